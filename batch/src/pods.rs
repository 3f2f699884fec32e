use std::mem::size_of;

use bytemuck::{Pod, Zeroable};
use static_assertions::const_assert_eq;
use wgpu::{BufferAddress, VertexAttribute, VertexBufferLayout, VertexStepMode};

/// The GPU-facing per-corner data of a glyph. Generated by the batcher, never
/// mutated within a frame.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// x, y and the owning glyph's depth as z, so depth testing downstream
    /// sees the same ordering the sorter used.
    pub position: [f32; 3],
    /// The corner's position in tiling space, 0 or the glyph's `uv_tiling`
    /// component.
    pub uv: [f32; 2],
    /// Left, top, width, height of the owning glyph's texture sub-rectangle.
    /// The shader maps the wrapped `uv` into it.
    pub uv_rect: [f32; 4],
    pub color: [f32; 4],
}

impl Vertex {
    pub fn new(position: [f32; 3], uv: [f32; 2], uv_rect: [f32; 4], color: [f32; 4]) -> Self {
        Self {
            position,
            uv,
            uv_rect,
            color,
        }
    }

    pub fn layout() -> VertexBufferLayout<'static> {
        const ATTRS: [VertexAttribute; 4] =
            wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2, 2 => Float32x4, 3 => Float32x4];

        VertexBufferLayout {
            array_stride: size_of::<Vertex>() as BufferAddress,
            step_mode: VertexStepMode::Vertex,
            attributes: &ATTRS,
        }
    }
}

// All f32 fields, no padding.
const_assert_eq!(size_of::<Vertex>(), 13 * 4);

/// We need this for Rust to store the matrix the way the shader expects it.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct Matrix4(pub [[f32; 4]; 4]);

// Push constant requirement.
const_assert_eq!(size_of::<Matrix4>() % 16, 0);

pub trait ToPod {
    type Pod;
    fn to_pod(&self) -> Self::Pod;
}

impl ToPod for stamp_geometry::Matrix4 {
    type Pod = Matrix4;

    fn to_pod(&self) -> Self::Pod {
        Matrix4(self.as_mat4().to_cols_array_2d())
    }
}

pub trait AsBytes {
    fn as_bytes(&self) -> &[u8];
}

impl<T: Pod> AsBytes for T {
    fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
