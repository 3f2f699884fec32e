use crate::glyph::Glyph;

/// How `end` orders the pending glyphs before batching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Submission order.
    None,
    /// Ascending by texture handle. The ordering itself is meaningless, it
    /// exists to maximize adjacent same-texture runs and thus minimize the
    /// number of draw calls.
    #[default]
    Texture,
    /// Ascending by depth.
    FrontToBack,
    /// Descending by depth.
    BackToFront,
}

/// Produces the render order as a permutation over `glyphs`. Storage is never
/// permuted.
///
/// All modes are stable: glyphs comparing equal keep their submission order.
/// This is a correctness requirement, for overlapping transparent quads at
/// equal depth the submission order is the only remaining tie break and must
/// be deterministic frame to frame.
pub(crate) fn sort_glyphs(glyphs: &[Glyph], mode: SortMode) -> Vec<u32> {
    let mut order: Vec<u32> = (0..glyphs.len() as u32).collect();

    match mode {
        SortMode::None => {}
        SortMode::Texture => order.sort_by_key(|&i| glyphs[i as usize].texture),
        SortMode::FrontToBack => {
            order.sort_by(|&a, &b| glyphs[a as usize].depth.total_cmp(&glyphs[b as usize].depth))
        }
        SortMode::BackToFront => {
            order.sort_by(|&a, &b| glyphs[b as usize].depth.total_cmp(&glyphs[a as usize].depth))
        }
    }

    order
}

#[cfg(test)]
mod tests {
    use super::{SortMode, sort_glyphs};
    use crate::{glyph::Glyph, texture::TextureId};

    fn glyph(texture: TextureId, depth: f64) -> Glyph {
        Glyph::new(texture, (0.0, 0.0), (1.0, 1.0)).with_depth(depth)
    }

    #[test]
    fn none_preserves_submission_order() {
        let glyphs = [
            glyph(TextureId::WHITE, 3.0),
            glyph(TextureId::WHITE, 1.0),
            glyph(TextureId::WHITE, 2.0),
        ];
        assert_eq!(sort_glyphs(&glyphs, SortMode::None), [0, 1, 2]);
    }

    #[test]
    fn texture_sorts_ascending_by_handle() {
        let (a, b) = TextureId::test_pair();
        let glyphs = [
            glyph(b, 0.0),
            glyph(a, 0.0),
            glyph(TextureId::WHITE, 0.0),
            glyph(b, 0.0),
        ];
        assert_eq!(sort_glyphs(&glyphs, SortMode::Texture), [2, 1, 0, 3]);
    }

    #[test]
    fn depth_sorts_are_stable_for_equal_keys() {
        let glyphs = [
            glyph(TextureId::WHITE, 1.0),
            glyph(TextureId::WHITE, 0.5),
            glyph(TextureId::WHITE, 0.5),
            glyph(TextureId::WHITE, 0.0),
        ];
        // The two glyphs at depth 0.5 keep their submission order in both
        // directions.
        assert_eq!(sort_glyphs(&glyphs, SortMode::FrontToBack), [3, 1, 2, 0]);
        assert_eq!(sort_glyphs(&glyphs, SortMode::BackToFront), [0, 1, 2, 3]);
    }
}
