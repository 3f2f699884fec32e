use anyhow::Result;
use stamp_geometry::{Matrix4, pixel_projection};
use wgpu::util::{BufferInitDescriptor, DeviceExt};

use crate::{
    batcher::{Batch, build_frame},
    glyph::Glyph,
    pods::{AsBytes, ToPod, Vertex},
    sort::{SortMode, sort_glyphs},
    texture::{TextureId, Textures},
    tools::{QuadIndexBuffer, alpha_blending_targets, create_pipeline, texture_sampler},
};

/// The device access `end` needs for buffer growth and upload.
///
/// Rendering requires `wgpu::Features::PUSH_CONSTANTS` with a push constant
/// budget of at least one `mat4x4<f32>`.
pub struct PreparationContext<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
}

/// Where within the frame the instance currently is. Used to fail loudly on
/// out-of-order calls in debug builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FramePhase {
    Collecting,
    Batched,
}

/// The view half of the per-draw transform.
#[derive(Debug, Clone, Copy)]
pub enum Camera {
    /// An explicit view-projection matrix.
    Matrix(Matrix4),
    /// An orthographic projection derived from a target viewport size,
    /// y-down with the origin at the top left.
    Screen(u32, u32),
}

impl Camera {
    pub fn to_matrix(&self) -> Matrix4 {
        match *self {
            Camera::Matrix(m) => m,
            Camera::Screen(width, height) => pixel_projection(width, height),
        }
    }
}

/// Which of the built-in samplers to bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplerKind {
    #[default]
    LinearWrap,
    LinearClamp,
    Nearest,
}

/// Per-`render` parameters. Defaults: identity world transform, linear-wrap
/// sampling, the built-in shading program.
#[derive(Debug, Clone, Copy)]
pub struct RenderParams<'a> {
    pub world: Matrix4,
    pub camera: Camera,
    pub sampler: SamplerKind,
    /// Replaces the built-in program and the depth/rasterizer state baked
    /// into it. Must be compatible with [`SpriteBatch::pipeline_layout`] and
    /// [`Vertex::layout`].
    pub pipeline: Option<&'a wgpu::RenderPipeline>,
}

impl<'a> RenderParams<'a> {
    pub fn screen(width: u32, height: u32) -> Self {
        Self::with_camera(Camera::Screen(width, height))
    }

    pub fn with_camera(camera: Camera) -> Self {
        Self {
            world: Matrix4::IDENTITY,
            camera,
            sampler: SamplerKind::default(),
            pipeline: None,
        }
    }

    #[must_use]
    pub fn with_world(mut self, world: Matrix4) -> Self {
        self.world = world;
        self
    }

    #[must_use]
    pub fn with_sampler(mut self, sampler: SamplerKind) -> Self {
        self.sampler = sampler;
        self
    }

    #[must_use]
    pub fn with_pipeline(mut self, pipeline: &'a wgpu::RenderPipeline) -> Self {
        self.pipeline = Some(pipeline);
        self
    }
}

/// A frame-driven batcher for textured quads.
///
/// Strictly single threaded and synchronous: `begin`, `draw`×N, `end`,
/// `render`×M, in that order. All pending state is exclusively owned by the
/// instance; only read-only resources (textures, pipelines) are shareable
/// across instances.
#[derive(Debug)]
pub struct SpriteBatch {
    pipeline: wgpu::RenderPipeline,
    pipeline_layout: wgpu::PipelineLayout,
    textures: Textures,
    sampler_bind_groups: [wgpu::BindGroup; 3],

    index_buffer: QuadIndexBuffer,
    vertex_buffer: wgpu::Buffer,

    glyphs: Vec<Glyph>,
    vertices: Vec<Vertex>,
    batches: Vec<Batch>,
    phase: FramePhase,
}

impl SpriteBatch {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target_format: wgpu::TextureFormat,
    ) -> Self {
        let textures = Textures::new(device, queue);

        let sampler_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Sprite Sampler Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            }],
        });

        // One bind group per SamplerKind, in discriminant order.
        let sampler_bind_groups = [
            texture_sampler::linear_wrapping(device),
            texture_sampler::linear_clamping(device),
            texture_sampler::nearest(device),
        ]
        .map(|sampler| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Sprite Sampler Bind Group"),
                layout: &sampler_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                }],
            })
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Sprite Pipeline Layout"),
            bind_group_layouts: &[textures.layout(), &sampler_layout],
            push_constant_ranges: &[wgpu::PushConstantRange {
                stages: wgpu::ShaderStages::VERTEX,
                range: 0..size_of::<crate::pods::Matrix4>() as u32,
            }],
        });

        let shader = device.create_shader_module(wgpu::include_wgsl!("sprite.wgsl"));

        let pipeline = create_pipeline(
            "Sprite Pipeline",
            device,
            &shader,
            "fs_sprite",
            &[Vertex::layout()],
            &pipeline_layout,
            &alpha_blending_targets(target_format),
        );

        Self {
            pipeline,
            pipeline_layout,
            textures,
            sampler_bind_groups,
            index_buffer: QuadIndexBuffer::new(device),
            vertex_buffer: create_vertex_buffer(device, &[]),
            glyphs: Vec::new(),
            vertices: Vec::new(),
            batches: Vec::new(),
            phase: FramePhase::Collecting,
        }
    }

    /// Registers a texture view for use in glyphs.
    pub fn add_texture(&mut self, device: &wgpu::Device, view: &wgpu::TextureView) -> TextureId {
        self.textures.add(device, view)
    }

    /// The layout override pipelines must be built against.
    pub fn pipeline_layout(&self) -> &wgpu::PipelineLayout {
        &self.pipeline_layout
    }

    /// Clears the previous frame's pending state. Storage capacity is
    /// retained across frames.
    pub fn begin(&mut self) {
        self.glyphs.clear();
        self.vertices.clear();
        self.batches.clear();
        self.phase = FramePhase::Collecting;
    }

    /// Enqueues one quad. Performs no GPU work and never fails.
    pub fn draw(&mut self, glyph: Glyph) {
        debug_assert_eq!(
            self.phase,
            FramePhase::Collecting,
            "draw is only valid between begin and end"
        );
        self.glyphs.push(glyph);
    }

    /// Sorts the pending glyphs, generates the vertex stream and the batch
    /// list, and uploads both streams.
    ///
    /// The vertex buffer is a fresh allocation every frame so the previous
    /// frame's in-flight reads are never waited on; the index buffer grows
    /// append-only and is shared across frames.
    pub fn end(&mut self, context: &PreparationContext, sort_mode: SortMode) -> Result<()> {
        debug_assert_eq!(
            self.phase,
            FramePhase::Collecting,
            "end without a preceding begin"
        );

        let order = sort_glyphs(&self.glyphs, sort_mode);
        build_frame(&self.glyphs, &order, &mut self.vertices, &mut self.batches);

        self.index_buffer.ensure_can_index_num_quads(
            context.device,
            context.queue,
            self.glyphs.len(),
        );

        // Also on an empty frame, so downstream bindings stay well defined.
        self.vertex_buffer = create_vertex_buffer(context.device, &self.vertices);

        self.phase = FramePhase::Batched;
        Ok(())
    }

    /// Issues one indexed draw per batch, in batch order.
    ///
    /// May be called multiple times per frame, e.g. once per camera.
    pub fn render(&self, pass: &mut wgpu::RenderPass<'_>, params: &RenderParams) {
        debug_assert_eq!(
            self.phase,
            FramePhase::Batched,
            "render requires a prior end"
        );

        if self.batches.is_empty() {
            return;
        }

        pass.set_pipeline(params.pipeline.unwrap_or(&self.pipeline));
        self.index_buffer.set(pass);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_bind_group(1, &self.sampler_bind_groups[params.sampler as usize], &[]);

        let matrix = (params.camera.to_matrix() * params.world).to_pod();
        pass.set_push_constants(wgpu::ShaderStages::VERTEX, 0, matrix.as_bytes());

        // Batch order already reflects the requested sort mode; reordering
        // here would break it.
        for batch in &self.batches {
            pass.set_bind_group(0, self.textures.bind_group(batch.texture), &[]);
            pass.draw_indexed(
                batch.index_offset..batch.index_offset + batch.index_count,
                0,
                0..1,
            );
        }
    }

    /// The number of glyphs pending in the current frame. Diagnostics.
    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// The number of batches produced by the last `end`. Diagnostics.
    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }

    /// The number of quads the shared index buffer can currently index.
    /// Grows monotonically, never shrinks below the historical maximum.
    pub fn index_quad_capacity(&self) -> usize {
        self.index_buffer.quads()
    }
}

fn create_vertex_buffer(device: &wgpu::Device, vertices: &[Vertex]) -> wgpu::Buffer {
    device.create_buffer_init(&BufferInitDescriptor {
        label: Some("Sprite Vertex Buffer"),
        contents: bytemuck::cast_slice(vertices),
        usage: wgpu::BufferUsages::VERTEX,
    })
}
