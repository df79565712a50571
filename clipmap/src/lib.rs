//! Geometric clipmap terrain.
//!
//! A fixed set of mesh pieces is instanced once per level and translated every frame to stay
//! under a moving viewpoint. Level 0 is the [Center], a full grid of unit scale chunks. Every
//! [Ring] around it doubles the scale of the previous level and leaves a hole exactly where the
//! finer level sits. Levels only ever move in steps of two of their own cells, so chunk edges stay
//! aligned to the grid of the next coarser level and no geometry is regenerated. Only each level's
//! height texture is refilled every frame.

mod center;
mod config;
mod error;
mod height;
pub mod layout;
mod level;
pub mod mesh;
mod pieces;
mod ring;
mod terrain;

pub use center::Center;
pub use config::TerrainConfig;
pub use error::ClipmapError;
pub use height::{
    GpuHeightSource, HeightField, HeightParams, HeightSource, NoHeightSource, normalized_origin,
};
pub use level::LodLevel;
pub use pieces::{ChunkPiece, ChunkPieceSet, PieceKind};
pub use ring::Ring;
pub use terrain::ClipmapTerrain;
