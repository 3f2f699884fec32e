use bitflags::bitflags;

use crate::{glyph::Glyph, pods::Vertex, texture::TextureId};

/// A maximal run of same-texture glyphs in the sorted order, rendered with
/// one indexed draw call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub texture: TextureId,
    /// Position in the shared index stream where this batch begins.
    pub index_offset: u32,
    /// Number of indices covered, always a multiple of 6.
    pub index_count: u32,
}

bitflags! {
    /// Mirroring requested through negative size components.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Flips: u8 {
        const HORIZONTAL = 1 << 0;
        const VERTICAL = 1 << 1;
    }
}

pub(crate) const VERTICES_PER_GLYPH: usize = 4;
pub(crate) const INDICES_PER_GLYPH: u32 = 6;

/// Walks the glyphs in the given order, emits four vertices per glyph into
/// `vertices` and coalesces same-texture runs into `batches`.
///
/// Output only depends on `glyphs` and `order`; both target vectors are
/// cleared first, so running this twice over the same input produces
/// identical results.
pub(crate) fn build_frame(
    glyphs: &[Glyph],
    order: &[u32],
    vertices: &mut Vec<Vertex>,
    batches: &mut Vec<Batch>,
) {
    debug_assert_eq!(glyphs.len(), order.len());

    vertices.clear();
    batches.clear();
    vertices.reserve(glyphs.len() * VERTICES_PER_GLYPH);

    for &index in order {
        let glyph = &glyphs[index as usize];

        match batches.last_mut() {
            Some(batch) if batch.texture == glyph.texture => {
                batch.index_count += INDICES_PER_GLYPH;
            }
            _ => batches.push(Batch {
                texture: glyph.texture,
                index_offset: (vertices.len() / VERTICES_PER_GLYPH) as u32 * INDICES_PER_GLYPH,
                index_count: INDICES_PER_GLYPH,
            }),
        }

        emit_vertices(glyph, vertices);
    }
}

/// Generates the four corners of a glyph in the fixed slot order top-left,
/// top-right, bottom-left, bottom-right.
///
/// Mirroring (a negative size component) is a relabeling of which generated
/// corner occupies which output slot: a horizontal flip swaps the left/right
/// pair, a vertical flip the top/bottom pair. UVs stay attached to their
/// slots, so the image mirrors while the fixed index pattern keeps its
/// winding.
fn emit_vertices(glyph: &Glyph, vertices: &mut Vec<Vertex>) {
    let (width, height) = (glyph.size.width, glyph.size.height);

    // Pivot-relative corner offsets. With a negative extent these come out
    // mirrored already; the slot remap below restores the winding.
    let left = -glyph.offset.x * width;
    let right = (1.0 - glyph.offset.x) * width;
    let top = -glyph.offset.y * height;
    let bottom = (1.0 - glyph.offset.y) * height;

    let (rx, ry) = ((-glyph.rotation).cos(), (-glyph.rotation).sin());
    let rotate = |x: f64, y: f64| {
        (
            x * rx + y * ry + glyph.position.x,
            -x * ry + y * rx + glyph.position.y,
        )
    };

    let mut positions = [
        rotate(left, top),
        rotate(right, top),
        rotate(left, bottom),
        rotate(right, bottom),
    ];

    let mut flips = Flips::empty();
    flips.set(Flips::HORIZONTAL, width < 0.0);
    flips.set(Flips::VERTICAL, height < 0.0);

    if flips.contains(Flips::HORIZONTAL) {
        positions.swap(0, 1);
        positions.swap(2, 3);
    }
    if flips.contains(Flips::VERTICAL) {
        positions.swap(0, 2);
        positions.swap(1, 3);
    }

    let (tiling_x, tiling_y) = (glyph.uv_tiling.x as f32, glyph.uv_tiling.y as f32);
    let uvs = [
        [0.0, 0.0],
        [tiling_x, 0.0],
        [0.0, tiling_y],
        [tiling_x, tiling_y],
    ];

    let uv_rect = {
        let size = glyph.uv_rect.size();
        [
            glyph.uv_rect.left as f32,
            glyph.uv_rect.top as f32,
            size.width as f32,
            size.height as f32,
        ]
    };
    let color: [f32; 4] = glyph.tint.into();
    let depth = glyph.depth as f32;

    for slot in 0..VERTICES_PER_GLYPH {
        let (x, y) = positions[slot];
        vertices.push(Vertex::new(
            [x as f32, y as f32, depth],
            uvs[slot],
            uv_rect,
            color,
        ));
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use approx::assert_abs_diff_eq;
    use stamp_geometry::{Color, Rect};

    use super::{Batch, build_frame};
    use crate::{
        glyph::Glyph,
        sort::{SortMode, sort_glyphs},
        texture::TextureId,
    };

    fn frame(glyphs: &[Glyph], mode: SortMode) -> (Vec<crate::pods::Vertex>, Vec<Batch>) {
        let order = sort_glyphs(glyphs, mode);
        let mut vertices = Vec::new();
        let mut batches = Vec::new();
        build_frame(glyphs, &order, &mut vertices, &mut batches);
        (vertices, batches)
    }

    fn positions(vertices: &[crate::pods::Vertex]) -> Vec<(f32, f32)> {
        vertices
            .iter()
            .map(|v| (v.position[0], v.position[1]))
            .collect()
    }

    #[test]
    fn unrotated_corners_are_exact() {
        let glyphs = [Glyph::new(TextureId::WHITE, (10.0, 20.0), (30.0, 40.0))];
        let (vertices, _) = frame(&glyphs, SortMode::None);

        assert_eq!(
            positions(&vertices),
            [(10.0, 20.0), (40.0, 20.0), (10.0, 60.0), (40.0, 60.0)]
        );
    }

    #[test]
    fn horizontal_flip_mirrors_positions_and_keeps_slot_uvs() {
        let glyphs = [Glyph::new(TextureId::WHITE, (10.0, 20.0), (-30.0, 40.0))];
        let (vertices, _) = frame(&glyphs, SortMode::None);

        // Mirrored extent, corners swapped left/right within each row.
        assert_eq!(
            positions(&vertices),
            [(-20.0, 20.0), (10.0, 20.0), (-20.0, 60.0), (10.0, 60.0)]
        );
        // UVs stay attached to slots, which is what mirrors the image.
        assert_eq!(vertices[0].uv, [0.0, 0.0]);
        assert_eq!(vertices[3].uv, [1.0, 1.0]);
    }

    #[test]
    fn double_flip_swaps_diagonally() {
        let glyphs = [Glyph::new(TextureId::WHITE, (0.0, 0.0), (-2.0, -2.0))];
        let (vertices, _) = frame(&glyphs, SortMode::None);

        assert_eq!(
            positions(&vertices),
            [(-2.0, -2.0), (0.0, -2.0), (-2.0, 0.0), (0.0, 0.0)]
        );
    }

    #[test]
    fn rotation_is_applied_about_the_pivot() {
        let glyphs = [Glyph::new(TextureId::WHITE, (0.0, 0.0), (2.0, 2.0))
            .with_offset((0.5, 0.5))
            .with_rotation(FRAC_PI_2)];
        let (vertices, _) = frame(&glyphs, SortMode::None);
        let pos = positions(&vertices);

        // A quarter turn maps the top-left corner onto the former top-right
        // location.
        let expected = [(1.0, -1.0), (1.0, 1.0), (-1.0, -1.0), (-1.0, 1.0)];
        for (actual, expected) in pos.iter().zip(expected) {
            assert_abs_diff_eq!(actual.0, expected.0, epsilon = 1e-6);
            assert_abs_diff_eq!(actual.1, expected.1, epsilon = 1e-6);
        }
    }

    #[test]
    fn batches_partition_the_index_stream() {
        let (a, b) = TextureId::test_pair();
        let glyphs: Vec<_> = [a, a, b, b, a]
            .into_iter()
            .map(|t| Glyph::new(t, (0.0, 0.0), (1.0, 1.0)))
            .collect();
        let (vertices, batches) = frame(&glyphs, SortMode::None);

        assert_eq!(vertices.len(), 20);
        assert_eq!(
            batches,
            [
                Batch {
                    texture: a,
                    index_offset: 0,
                    index_count: 12
                },
                Batch {
                    texture: b,
                    index_offset: 12,
                    index_count: 12
                },
                Batch {
                    texture: a,
                    index_offset: 24,
                    index_count: 6
                },
            ]
        );

        // No gaps, no overlaps, 6 indices per glyph in total.
        let mut expected_offset = 0;
        for batch in &batches {
            assert_eq!(batch.index_offset, expected_offset);
            expected_offset += batch.index_count;
        }
        assert_eq!(expected_offset, glyphs.len() as u32 * 6);
    }

    #[test]
    fn texture_sort_coalesces_maximally() {
        let (a, b) = TextureId::test_pair();
        let glyphs: Vec<_> = [a, b, a, b, a, b]
            .into_iter()
            .map(|t| Glyph::new(t, (0.0, 0.0), (1.0, 1.0)))
            .collect();
        let (_, batches) = frame(&glyphs, SortMode::Texture);

        assert_eq!(batches.len(), 2);
        for pair in batches.windows(2) {
            assert_ne!(pair[0].texture, pair[1].texture);
        }
    }

    #[test]
    fn equal_depth_glyphs_keep_submission_order_in_the_vertex_stream() {
        let glyphs = [
            Glyph::new(TextureId::WHITE, (1.0, 0.0), (1.0, 1.0)).with_depth(0.5),
            Glyph::new(TextureId::WHITE, (2.0, 0.0), (1.0, 1.0)).with_depth(0.5),
        ];
        let (vertices, _) = frame(&glyphs, SortMode::FrontToBack);

        assert_eq!(vertices[0].position[0], 1.0);
        assert_eq!(vertices[4].position[0], 2.0);
    }

    #[test]
    fn depth_becomes_the_z_component() {
        let glyphs = [Glyph::new(TextureId::WHITE, (0.0, 0.0), (1.0, 1.0)).with_depth(0.25)];
        let (vertices, _) = frame(&glyphs, SortMode::None);
        assert!(vertices.iter().all(|v| v.position[2] == 0.25));
    }

    #[test]
    fn uv_rect_tiling_and_tint_propagate_to_every_corner() {
        let glyphs = [Glyph::new(TextureId::WHITE, (0.0, 0.0), (8.0, 8.0))
            .with_uv_rect(Rect::new((0.25, 0.5), (0.5, 0.25)))
            .with_uv_tiling((3.0, 2.0))
            .with_tint(Color::new(0.5, 0.25, 0.125, 1.0))];
        let (vertices, _) = frame(&glyphs, SortMode::None);

        for vertex in &vertices {
            assert_eq!(vertex.uv_rect, [0.25, 0.5, 0.5, 0.25]);
            assert_eq!(vertex.color, [0.5, 0.25, 0.125, 1.0]);
        }
        assert_eq!(vertices[0].uv, [0.0, 0.0]);
        assert_eq!(vertices[1].uv, [3.0, 0.0]);
        assert_eq!(vertices[2].uv, [0.0, 2.0]);
        assert_eq!(vertices[3].uv, [3.0, 2.0]);
    }

    #[test]
    fn zero_size_glyphs_are_valid_and_degenerate() {
        let glyphs = [Glyph::new(TextureId::WHITE, (5.0, 5.0), (0.0, 0.0))];
        let (vertices, batches) = frame(&glyphs, SortMode::None);

        assert_eq!(batches.len(), 1);
        assert!(positions(&vertices).iter().all(|&p| p == (5.0, 5.0)));
    }

    #[test]
    fn rebuilding_the_same_frame_is_idempotent() {
        let glyphs = [
            Glyph::new(TextureId::WHITE, (1.0, 2.0), (3.0, 4.0)).with_rotation(0.3),
            Glyph::new(TextureId::WHITE, (5.0, 6.0), (-7.0, 8.0)),
        ];
        let first = frame(&glyphs, SortMode::None);
        let second = frame(&glyphs, SortMode::None);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let (vertices, batches) = frame(&[], SortMode::Texture);
        assert!(vertices.is_empty());
        assert!(batches.is_empty());
    }
}
