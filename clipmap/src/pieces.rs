use renderer::{MaterialDescriptor, MaterialId, MeshId, Renderer, ShaderId};
use strum::{EnumCount, IntoEnumIterator};
use tracing::info;

use crate::{
    ClipmapError, TerrainConfig, layout,
    mesh::{create_cross, create_plane},
};

/// The shapes a clipmap is assembled from.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, EnumCount, strum::EnumIter)]
pub enum PieceKind {
    /// `R x R` chunk filling one slot of a level.
    Square,
    /// `R x 3` strip plugging the gap cross in the left and right columns of a ring.
    BorderVertical,
    /// `3 x R` strip plugging the gap cross in the top and bottom rows of a ring.
    BorderHorizontal,
    /// `(2R + 1) x 2` strip sealing the top or bottom of a ring's hole.
    InteriorVertical,
    /// `2 x (2R + 1)` strip sealing the right or left of a ring's hole.
    InteriorHorizontal,
    /// Cross of `4R - 1` long arms plugging the gap cross of the center.
    CenterCross,
}

impl PieceKind {
    fn label(self) -> &'static str {
        match self {
            Self::Square => "square",
            Self::BorderVertical => "border_vertical",
            Self::BorderHorizontal => "border_horizontal",
            Self::InteriorVertical => "interior_vertical",
            Self::InteriorHorizontal => "interior_horizontal",
            Self::CenterCross => "center_cross",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ChunkPiece {
    pub mesh: MeshId,
    pub material: MaterialId,
}

/// One mesh per [PieceKind] and the material they all share, created once per terrain.
pub struct ChunkPieceSet {
    chunk_resolution: u32,
    material: MaterialId,
    meshes: [MeshId; PieceKind::COUNT],
}

impl ChunkPieceSet {
    pub const TILE_SIZE_PROPERTY: &'static str = "_TileSize";

    pub fn new(
        renderer: &mut Renderer,
        chunk_resolution: u32,
        shader: ShaderId,
    ) -> Result<Self, ClipmapError> {
        if !(2..=TerrainConfig::MAX_CHUNK_RESOLUTION).contains(&chunk_resolution) {
            return Err(ClipmapError::InvalidChunkResolution(chunk_resolution));
        }

        if !renderer.has_shader(shader) {
            return Err(ClipmapError::MissingShader(format!("{shader:?}")));
        }

        let r = chunk_resolution;
        let tile_size = layout::tile_size(r);

        // Build every mesh before touching the renderer, so a failure leaves nothing behind.
        let mut meshes = Vec::with_capacity(PieceKind::COUNT);
        for kind in PieceKind::iter() {
            let mesh = match kind {
                PieceKind::Square => create_plane(r, r)?,
                PieceKind::BorderVertical => create_plane(r, 3)?,
                PieceKind::BorderHorizontal => create_plane(3, r)?,
                PieceKind::InteriorVertical => create_plane(2 * r + 1, 2)?,
                PieceKind::InteriorHorizontal => create_plane(2, 2 * r + 1)?,
                PieceKind::CenterCross => create_cross(tile_size)?,
            };
            meshes.push((kind, mesh));
        }

        let mut ids = Vec::with_capacity(PieceKind::COUNT);
        for (kind, mesh) in meshes {
            ids.push(renderer.create_mesh(kind.label(), mesh));
        }
        let meshes: [MeshId; PieceKind::COUNT] = std::array::from_fn(|i| ids[i]);

        let material = renderer.create_material(MaterialDescriptor {
            label: "clipmap_chunk".to_string(),
            shader,
        });
        renderer.set_material_float(material, Self::TILE_SIZE_PROPERTY, tile_size as f32);

        info!("Created chunk pieces for resolution {chunk_resolution} (tile size {tile_size})");

        Ok(Self {
            chunk_resolution,
            material,
            meshes,
        })
    }

    pub fn chunk_resolution(&self) -> u32 {
        self.chunk_resolution
    }

    pub fn material(&self) -> MaterialId {
        self.material
    }

    pub fn piece(&self, kind: PieceKind) -> ChunkPiece {
        ChunkPiece {
            mesh: self.meshes[kind as usize],
            material: self.material,
        }
    }

    pub(crate) fn release(self, renderer: &mut Renderer) {
        for mesh in self.meshes {
            renderer.remove_mesh(mesh);
        }
        renderer.remove_material(self.material);
    }
}
