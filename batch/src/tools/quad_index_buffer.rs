use std::mem;

use log::debug;
use wgpu::{IndexFormat, RenderPass};

type Index = u32;

/// The shared index buffer all batches draw from.
///
/// The index pattern of quad N never depends on its neighbors, so the buffer
/// only ever grows: on growth the already uploaded prefix is copied over on
/// the GPU and only the new tail entries are generated and written. Capacity
/// never shrinks below the historical maximum.
#[derive(Debug)]
pub struct QuadIndexBuffer {
    buffer: wgpu::Buffer,
    quad_capacity: usize,
}

impl QuadIndexBuffer {
    pub const INDEX_FORMAT: IndexFormat = IndexFormat::Uint32;

    /// The two triangles of a quad, relative to its four vertices in
    /// top-left, top-right, bottom-left, bottom-right order.
    pub const QUAD_INDICES: [Index; 6] = [0, 2, 3, 3, 1, 0];
    pub const INDICES_PER_QUAD: usize = Self::QUAD_INDICES.len();
    pub const VERTICES_PER_QUAD: usize = 4;

    const INDEX_SIZE: usize = mem::size_of::<Index>();
    const QUAD_SIZE: usize = Self::INDICES_PER_QUAD * Self::INDEX_SIZE;

    pub fn new(device: &wgpu::Device) -> Self {
        Self {
            buffer: Self::create_buffer(device, 0),
            quad_capacity: 0,
        }
    }

    pub fn quads(&self) -> usize {
        self.quad_capacity
    }

    pub fn set(&self, pass: &mut RenderPass<'_>) {
        pass.set_index_buffer(self.buffer.slice(..), Self::INDEX_FORMAT);
    }

    /// Grows the buffer so that `required_quad_count` quads can be indexed.
    ///
    /// Capacity doubles until it fits. The previously allocated entries are
    /// never regenerated or re-uploaded: the old buffer contents move over
    /// via a GPU-side copy, the new tail via a single `write_buffer`.
    pub fn ensure_can_index_num_quads(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        required_quad_count: usize,
    ) {
        let current = self.quad_capacity;
        if required_quad_count <= current {
            return;
        }

        let mut proposed_quad_capacity = current.max(1) << 1;
        while proposed_quad_capacity < required_quad_count {
            proposed_quad_capacity <<= 1;
            assert!(proposed_quad_capacity != 0);
        }

        debug!(
            "Growing index buffer from {current} to {proposed_quad_capacity} quads, required: {required_quad_count}"
        );

        let buffer = Self::create_buffer(device, proposed_quad_capacity);

        if current > 0 {
            let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Quad Index Buffer Growth"),
            });
            encoder.copy_buffer_to_buffer(
                &self.buffer,
                0,
                &buffer,
                0,
                (current * Self::QUAD_SIZE) as u64,
            );
            queue.submit([encoder.finish()]);
        }

        let tail = Self::generate_range(current, proposed_quad_capacity);
        queue.write_buffer(
            &buffer,
            (current * Self::QUAD_SIZE) as u64,
            bytemuck::cast_slice(&tail),
        );

        self.buffer = buffer;
        self.quad_capacity = proposed_quad_capacity;
    }

    /// The index entries for the quads in `from_quad..to_quad`. For quad N
    /// these are `{4N, 4N+2, 4N+3, 4N+3, 4N+1, 4N}`.
    fn generate_range(from_quad: usize, to_quad: usize) -> Vec<Index> {
        let mut v = Vec::with_capacity((to_quad - from_quad) * Self::INDICES_PER_QUAD);

        for quad_index in from_quad..to_quad {
            let offset = (quad_index * Self::VERTICES_PER_QUAD) as Index;
            v.extend(Self::QUAD_INDICES.iter().map(|i| *i + offset));
        }

        v
    }

    fn create_buffer(device: &wgpu::Device, quads: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Quad Index Buffer"),
            size: (quads * Self::QUAD_SIZE) as u64,
            usage: wgpu::BufferUsages::INDEX
                | wgpu::BufferUsages::COPY_DST
                | wgpu::BufferUsages::COPY_SRC,
            mapped_at_creation: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::QuadIndexBuffer;

    #[test]
    fn pattern_follows_the_fixed_quad_layout() {
        let indices = QuadIndexBuffer::generate_range(0, 2);
        assert_eq!(indices, [0, 2, 3, 3, 1, 0, 4, 6, 7, 7, 5, 4]);
    }

    #[test]
    fn growth_appends_without_touching_existing_entries() {
        // The entries for the first quads are bit-identical no matter how
        // far the capacity has grown.
        let small = QuadIndexBuffer::generate_range(0, 10);
        let large = QuadIndexBuffer::generate_range(0, 1000);
        assert_eq!(small[..], large[..10 * QuadIndexBuffer::INDICES_PER_QUAD]);

        // Generating the tail separately yields exactly the missing suffix.
        let tail = QuadIndexBuffer::generate_range(10, 1000);
        assert_eq!(large[10 * QuadIndexBuffer::INDICES_PER_QUAD..], tail[..]);
    }
}
