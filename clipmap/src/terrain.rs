use glam::Vec3;
use renderer::{Renderer, ShaderId, TextureId};
use tracing::{info, trace};

use crate::{
    Center, ChunkPieceSet, ClipmapError, HeightSource, LodLevel, Ring, TerrainConfig,
};

/// A geometric clipmap following a viewpoint: a [Center] surrounded by one [Ring] per level, each
/// twice the scale of the previous one.
pub struct ClipmapTerrain {
    config: TerrainConfig,
    pieces: ChunkPieceSet,
    center: Center,
    /// Finest first.
    rings: Vec<Ring>,
    heights: Box<dyn HeightSource>,
}

impl ClipmapTerrain {
    pub fn new(
        renderer: &mut Renderer,
        config: TerrainConfig,
        shader: ShaderId,
        mut heights: Box<dyn HeightSource>,
    ) -> Result<Self, ClipmapError> {
        config.validate()?;

        let pieces = ChunkPieceSet::new(renderer, config.chunk_resolution, shader)?;

        // Coarsest first, so each ring can be linked to the one outside of it.
        let mut rings = Vec::with_capacity(config.level_count as usize);
        let mut low_res: Option<TextureId> = None;
        for level in (1..=config.level_count).rev() {
            let ring = Ring::new(renderer, heights.as_mut(), &pieces, level, low_res)?;
            low_res = Some(ring.texture());
            rings.push(ring);
        }
        rings.reverse();

        let center = Center::new(renderer, heights.as_mut(), &pieces, low_res);

        let terrain = Self {
            config,
            pieces,
            center,
            rings,
            heights,
        };

        info!(
            "Created clipmap terrain with {} levels, chunk resolution {} and {} instances",
            config.level_count,
            config.chunk_resolution,
            terrain.instance_count()
        );

        Ok(terrain)
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    pub fn pieces(&self) -> &ChunkPieceSet {
        &self.pieces
    }

    pub fn center(&self) -> &Center {
        &self.center
    }

    /// Finest first, so `rings()[0]` is level 1.
    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    /// Every level, finest first.
    pub fn levels(&self) -> impl Iterator<Item = &dyn LodLevel> {
        std::iter::once(&self.center as &dyn LodLevel)
            .chain(self.rings.iter().map(|ring| ring as &dyn LodLevel))
    }

    /// Offset of every level from the last update, finest first.
    pub fn offsets(&self) -> Vec<Vec3> {
        self.levels().map(|level| level.offset()).collect()
    }

    pub fn instance_count(&self) -> usize {
        self.levels().map(|level| level.instances().len()).sum()
    }

    /// Move every level under `viewpoint`. Call once per frame, after the viewpoint is final.
    pub fn update(&mut self, renderer: &mut Renderer, viewpoint: Vec3) {
        trace!("Updating clipmap terrain at {viewpoint}");

        self.center
            .update_positions(renderer, self.heights.as_mut(), viewpoint);
        for ring in self.rings.iter_mut() {
            ring.update_positions(renderer, self.heights.as_mut(), viewpoint);
        }
    }

    /// Remove everything the terrain created from the renderer.
    pub fn release(self, renderer: &mut Renderer) {
        let Self {
            pieces,
            center,
            rings,
            mut heights,
            ..
        } = self;

        center.release(renderer, heights.as_mut());
        for ring in rings {
            ring.release(renderer, heights.as_mut());
        }
        pieces.release(renderer);

        info!("Released clipmap terrain");
    }
}
