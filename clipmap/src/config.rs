use crate::ClipmapError;

/// Construction time settings for a [crate::ClipmapTerrain].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TerrainConfig {
    /// Amount of vertices along each edge of a square chunk. Shared by every level.
    pub chunk_resolution: u32,
    /// Amount of rings around the center.
    pub level_count: u32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            chunk_resolution: 16,
            level_count: 3,
        }
    }
}

impl TerrainConfig {
    /// Ring scales are `2^level`, which stays exact in `f32` well past this.
    pub const MAX_LEVELS: u32 = 20;

    /// Height textures are `4R - 1` texels across and must fit wgpu's default limit of 8192.
    pub const MAX_CHUNK_RESOLUTION: u32 = 2048;

    pub fn new(chunk_resolution: u32, level_count: u32) -> Self {
        Self {
            chunk_resolution,
            level_count,
        }
    }

    pub fn with_chunk_resolution(mut self, chunk_resolution: u32) -> Self {
        self.chunk_resolution = chunk_resolution;
        self
    }

    pub fn with_level_count(mut self, level_count: u32) -> Self {
        self.level_count = level_count;
        self
    }

    /// Edge length of every level's tile, in grid cells of that level, plus one.
    pub fn tile_size(&self) -> u32 {
        crate::layout::tile_size(self.chunk_resolution)
    }

    pub fn validate(&self) -> Result<(), ClipmapError> {
        if !(2..=Self::MAX_CHUNK_RESOLUTION).contains(&self.chunk_resolution) {
            return Err(ClipmapError::InvalidChunkResolution(self.chunk_resolution));
        }

        if self.level_count == 0 || self.level_count > Self::MAX_LEVELS {
            return Err(ClipmapError::InvalidLevelCount {
                count: self.level_count,
                max: Self::MAX_LEVELS,
            });
        }

        Ok(())
    }
}
