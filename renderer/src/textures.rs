use glam::UVec2;

/// Handle to a texture tracked by the renderer.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct TextureId(pub generational_arena::Index);

/// Description of a single 2D texture without mip levels.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TextureDescriptor {
    pub label: String,
    pub size: UVec2,
    pub format: wgpu::TextureFormat,
    pub address_mode: wgpu::AddressMode,
    pub filter: wgpu::FilterMode,
}

impl TextureDescriptor {
    /// Written by compute shaders and sampled with filtering, which core WebGPU allows for this
    /// format.
    pub const HEIGHT_MAP_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

    /// A square, wrapping, bilinear float texture suitable for holding heights.
    pub fn height_map(label: &str, edge: u32) -> Self {
        Self {
            label: label.to_string(),
            size: UVec2::splat(edge),
            format: Self::HEIGHT_MAP_FORMAT,
            address_mode: wgpu::AddressMode::Repeat,
            filter: wgpu::FilterMode::Linear,
        }
    }

    pub fn texel_count(&self) -> usize {
        self.size.x as usize * self.size.y as usize
    }
}
