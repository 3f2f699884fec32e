use derive_more::Deref;

/// Handle to a texture registered with the engine.
///
/// Handles order by registration number; `SortMode::Texture` uses that
/// ordering to group draw calls. Id 0 is reserved for the built-in 1×1
/// opaque-white fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TextureId(u32);

impl TextureId {
    /// The reserved fallback for untextured, tint-only quads.
    pub const WHITE: Self = Self(0);
}

#[cfg(test)]
impl TextureId {
    /// Two distinct non-white handles for tests that never touch a device.
    pub(crate) fn test_pair() -> (Self, Self) {
        (Self(1), Self(2))
    }
}

/// The bind group layout of a sprite texture.
#[derive(Debug, Deref)]
pub struct BindGroupLayout(wgpu::BindGroupLayout);

impl BindGroupLayout {
    pub fn new(device: &wgpu::Device) -> Self {
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Sprite Texture Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            }],
        });

        Self(layout)
    }

    pub fn create_bind_group(
        &self,
        device: &wgpu::Device,
        view: &wgpu::TextureView,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Sprite Texture Bind Group"),
            layout: &self.0,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(view),
            }],
        })
    }
}

/// Registry of the textures glyphs may reference.
///
/// Wraps caller-created texture views into handles with a per-texture bind
/// group. Texture lifetime beyond the registry stays with the caller.
#[derive(Debug)]
pub struct Textures {
    layout: BindGroupLayout,
    bind_groups: Vec<wgpu::BindGroup>,
}

impl Textures {
    /// Creates the registry with the reserved white fallback at id 0.
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let layout = BindGroupLayout::new(device);
        let white = create_white_pixel(device, queue);
        let white_bind_group = layout.create_bind_group(device, &white);

        Self {
            layout,
            bind_groups: vec![white_bind_group],
        }
    }

    pub fn add(&mut self, device: &wgpu::Device, view: &wgpu::TextureView) -> TextureId {
        let id = TextureId(self.bind_groups.len() as u32);
        self.bind_groups
            .push(self.layout.create_bind_group(device, view));
        id
    }

    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    pub(crate) fn bind_group(&self, id: TextureId) -> &wgpu::BindGroup {
        &self.bind_groups[id.0 as usize]
    }
}

fn create_white_pixel(device: &wgpu::Device, queue: &wgpu::Queue) -> wgpu::TextureView {
    let size = wgpu::Extent3d {
        width: 1,
        height: 1,
        depth_or_array_layers: 1,
    };

    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("White Pixel Texture"),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8Unorm,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &[0xff, 0xff, 0xff, 0xff],
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4),
            rows_per_image: None,
        },
        size,
    );

    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
