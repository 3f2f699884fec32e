use wgpu::{AddressMode, Device, FilterMode, Sampler, SamplerDescriptor};

/// Creates a linear and repeating texture sampler, the sprite default, which
/// makes `uv_tiling` wrap for whole-texture sprites.
pub fn linear_wrapping(device: &Device) -> Sampler {
    device.create_sampler(&SamplerDescriptor {
        label: Some("Linear / Wrapping Texture Sampler"),
        address_mode_u: AddressMode::Repeat,
        address_mode_v: AddressMode::Repeat,
        mag_filter: FilterMode::Linear,
        min_filter: FilterMode::Linear,
        ..Default::default()
    })
}

/// Creates a linear and edge clamping texture sampler.
///
/// This assumes that the underlying texture is padded.
pub fn linear_clamping(device: &Device) -> Sampler {
    device.create_sampler(&SamplerDescriptor {
        label: Some("Linear / Clamping Texture Sampler"),
        address_mode_u: AddressMode::ClampToEdge,
        address_mode_v: AddressMode::ClampToEdge,
        mag_filter: FilterMode::Linear,
        min_filter: FilterMode::Linear,
        ..Default::default()
    })
}

/// Creates a nearest-neighbor sampler for pixel-art sprites.
pub fn nearest(device: &Device) -> Sampler {
    device.create_sampler(&SamplerDescriptor {
        label: Some("Nearest Texture Sampler"),
        address_mode_u: AddressMode::Repeat,
        address_mode_v: AddressMode::Repeat,
        mag_filter: FilterMode::Nearest,
        min_filter: FilterMode::Nearest,
        ..Default::default()
    })
}
