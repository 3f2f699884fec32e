mod pipeline;
mod quad_index_buffer;
pub mod texture_sampler;

pub use pipeline::*;
pub use quad_index_buffer::*;
