use crate::Matrix4;

/// An orthographic projection from y-down pixel coordinates to normalized
/// device coordinates.
///
/// (0, 0) maps to the top left corner of the viewport, (width, height) to the
/// bottom right. Depth maps 0..1 onto the full wgpu depth range.
pub fn pixel_projection(width: u32, height: u32) -> Matrix4 {
    Matrix4::orthographic_rh(0.0, width as f64, height as f64, 0.0, 0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use glam::DVec4;

    use super::pixel_projection;

    #[test]
    fn pixel_corners_map_to_ndc_corners() {
        let m = pixel_projection(640, 480);

        let top_left = m * DVec4::new(0.0, 0.0, 0.0, 1.0);
        assert_abs_diff_eq!(top_left.x, -1.0);
        assert_abs_diff_eq!(top_left.y, 1.0);

        let bottom_right = m * DVec4::new(640.0, 480.0, 0.0, 1.0);
        assert_abs_diff_eq!(bottom_right.x, 1.0);
        assert_abs_diff_eq!(bottom_right.y, -1.0);
    }
}
