use stamp_geometry::{Color, Point, Rect, Size, Vector};

use crate::texture::TextureId;

/// A single textured quad draw request.
///
/// Frame-scoped: enqueued via [`crate::SpriteBatch::draw`], cleared at the
/// next `begin`. The `with_*` builders supply the optional parameters; a
/// plain [`Glyph::new`] draws the whole texture, unrotated, pivoted at its
/// top left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    /// The texture to bind for this quad. [`TextureId::WHITE`] stands in for
    /// "untextured", so tinted quads batch together with everything else.
    pub texture: TextureId,
    /// Sub-rectangle of the texture in normalized [0,1] space.
    pub uv_rect: Rect,
    /// Scale applied to the far UV corner. Values above one repeat the
    /// `uv_rect` content across the quad without changing the rect itself.
    pub uv_tiling: Vector,
    /// World/screen space anchor of the quad.
    pub position: Point,
    /// Pivot as a fraction of `size`. (0, 0) anchors the top left corner at
    /// `position`, (0.5, 0.5) centers the quad on it.
    pub offset: Vector,
    /// Signed extent. A negative component mirrors the quad across that axis.
    pub size: Size,
    /// Rotation about the pivot, radians.
    pub rotation: f64,
    /// Per-quad color multiplier.
    pub tint: Color,
    /// Sort key only, and the z component of the generated vertices. Does not
    /// affect 2D geometry.
    pub depth: f64,
}

impl Glyph {
    pub fn new(texture: TextureId, position: impl Into<Point>, size: impl Into<Size>) -> Self {
        Self {
            texture,
            position: position.into(),
            size: size.into(),
            ..Self::default()
        }
    }

    /// A quad without a texture of its own, drawn with the reserved white
    /// pixel so that only the tint shows.
    pub fn untextured(position: impl Into<Point>, size: impl Into<Size>, tint: Color) -> Self {
        Self {
            tint,
            ..Self::new(TextureId::WHITE, position, size)
        }
    }

    #[must_use]
    pub fn with_uv_rect(mut self, uv_rect: Rect) -> Self {
        self.uv_rect = uv_rect;
        self
    }

    #[must_use]
    pub fn with_uv_tiling(mut self, uv_tiling: impl Into<Vector>) -> Self {
        self.uv_tiling = uv_tiling.into();
        self
    }

    #[must_use]
    pub fn with_offset(mut self, offset: impl Into<Vector>) -> Self {
        self.offset = offset.into();
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    #[must_use]
    pub fn with_tint(mut self, tint: Color) -> Self {
        self.tint = tint;
        self
    }

    #[must_use]
    pub fn with_depth(mut self, depth: f64) -> Self {
        self.depth = depth;
        self
    }
}

impl Default for Glyph {
    fn default() -> Self {
        Self {
            texture: TextureId::WHITE,
            uv_rect: Rect::UNIT,
            uv_tiling: Vector::new(1.0, 1.0),
            position: Point::ZERO,
            offset: Vector::ZERO,
            size: Size::ZERO,
            rotation: 0.0,
            tint: Color::WHITE,
            depth: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use stamp_geometry::Rect;

    use super::Glyph;
    use crate::texture::TextureId;

    #[test]
    fn defaults_cover_the_whole_texture_untiled() {
        let glyph = Glyph::default();
        assert_eq!(glyph.texture, TextureId::WHITE);
        assert_eq!(glyph.uv_rect, Rect::UNIT);
        assert_eq!(glyph.uv_tiling, (1.0, 1.0).into());
        assert_eq!(glyph.rotation, 0.0);
        assert_eq!(glyph.depth, 0.0);
    }
}
