//! A 2D sprite batching engine on wgpu.
//!
//! Per frame: [`SpriteBatch::begin`] clears the previous frame's requests,
//! [`SpriteBatch::draw`] enqueues textured quads, [`SpriteBatch::end`] sorts
//! and coalesces them into batches and uploads the vertex stream, and
//! [`SpriteBatch::render`] issues one indexed draw per batch.

mod batcher;
mod glyph;
mod pods;
mod sort;
mod sprite_batch;
mod texture;
mod tools;

pub use batcher::Batch;
pub use glyph::Glyph;
pub use pods::Vertex;
pub use sort::SortMode;
pub use sprite_batch::{Camera, PreparationContext, RenderParams, SamplerKind, SpriteBatch};
pub use texture::TextureId;
