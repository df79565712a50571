//! Per level height textures and the sources that fill them.

mod gpu;

pub use gpu::GpuHeightSource;

use glam::{UVec2, Vec3};
use renderer::{Renderer, TextureDescriptor, TextureId};
use tracing::{debug, trace};

use crate::layout;

/// Everything the height generation function consumes for one level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeightParams {
    /// `1 / 2^level`. Coarser levels sample lower frequencies.
    pub noise_frequency: f32,
    /// Where the level's tile starts sampling, normalized to the tile.
    pub origin: Vec3,
}

/// Something that can fill height textures.
///
/// Regeneration is a submission, not a wait: the new contents are not required to be visible by
/// the time [HeightSource::regenerate] returns, only before anything submitted after it reads
/// the texture.
pub trait HeightSource {
    /// Prepare storage for a texture before its first regeneration.
    fn allocate(&mut self, texture: TextureId, size: UVec2);

    /// Replace the contents of a texture.
    fn regenerate(&mut self, texture: TextureId, params: &HeightParams);

    /// Storage for the texture is no longer needed.
    fn release(&mut self, _texture: TextureId) {}
}

/// Leaves every texture untouched, which renders a flat terrain.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHeightSource;

impl HeightSource for NoHeightSource {
    fn allocate(&mut self, _texture: TextureId, _size: UVec2) {}

    fn regenerate(&mut self, _texture: TextureId, _params: &HeightParams) {}
}

/// Sampling origin of a level's tile, normalized so that one tile spans 0.5.
pub fn normalized_origin(viewpoint: Vec3, offset: Vec3, level: u32, chunk_resolution: u32) -> Vec3 {
    let scale = layout::chunk_scale(level);
    let tile_size = layout::tile_size(chunk_resolution) as f32;

    Vec3::new(
        (viewpoint.x + offset.x) / scale,
        (viewpoint.z + offset.z) / scale,
        0.0,
    ) / tile_size
        / 2.0
}

/// The height texture of a single level. The texture is allocated once and its contents are
/// replaced every frame.
pub struct HeightField {
    level: u32,
    chunk_resolution: u32,
    texture: TextureId,
    params: HeightParams,
}

impl HeightField {
    pub(crate) fn new(
        renderer: &mut Renderer,
        heights: &mut dyn HeightSource,
        level: u32,
        chunk_resolution: u32,
    ) -> Self {
        let edge = layout::tile_size(chunk_resolution);
        let descriptor = TextureDescriptor::height_map(&format!("Heightmap_{level}"), edge);
        let size = descriptor.size;
        debug!(
            "Creating {} with {} texels",
            descriptor.label,
            descriptor.texel_count()
        );
        let texture = renderer.create_texture(descriptor);

        let params = HeightParams {
            noise_frequency: 1.0 / layout::chunk_scale(level),
            origin: Vec3::ZERO,
        };

        heights.allocate(texture, size);
        heights.regenerate(texture, &params);

        Self {
            level,
            chunk_resolution,
            texture,
            params,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn texture(&self) -> TextureId {
        self.texture
    }

    pub fn noise_frequency(&self) -> f32 {
        self.params.noise_frequency
    }

    /// The origin the texture was last regenerated with.
    pub fn origin(&self) -> Vec3 {
        self.params.origin
    }

    /// Regenerate the texture for the level placed at `offset` this frame.
    pub fn update(&mut self, heights: &mut dyn HeightSource, viewpoint: Vec3, offset: Vec3) {
        self.params.origin =
            normalized_origin(viewpoint, offset, self.level, self.chunk_resolution);
        trace!(
            "Regenerating heights for level {} at {}",
            self.level, self.params.origin
        );
        heights.regenerate(self.texture, &self.params);
    }

    pub(crate) fn release(self, renderer: &mut Renderer, heights: &mut dyn HeightSource) {
        heights.release(self.texture);
        renderer.remove_texture(self.texture);
    }
}
