use glam::Vec3;
use renderer::{InstanceDescriptor, InstanceId, Renderer, TextureId, TextureSlot};

use crate::{
    HeightField, HeightSource,
    pieces::{ChunkPieceSet, PieceKind},
};

/// Behaviour shared by the center and every ring.
pub trait LodLevel {
    /// 0 for the center, 1 and up for the rings.
    fn level(&self) -> u32;

    fn height_field(&self) -> &HeightField;

    /// Where the level was placed by the last update.
    fn offset(&self) -> Vec3;

    /// Every instance the level owns.
    fn instances(&self) -> &[InstanceId];

    /// Follow the viewpoint: regenerate the level's heights and move its pieces.
    fn update_positions(
        &mut self,
        renderer: &mut Renderer,
        heights: &mut dyn HeightSource,
        viewpoint: Vec3,
    );

    fn texture(&self) -> TextureId {
        self.height_field().texture()
    }
}

/// Everything a level needs to create its instances.
pub(crate) struct Spawner<'a> {
    pub renderer: &'a mut Renderer,
    pub pieces: &'a ChunkPieceSet,
    pub scale: f32,
    pub heightmap: TextureId,
    pub low_res_heightmap: TextureId,
}

impl Spawner<'_> {
    /// Create an instance of `kind`, scaled to the level, placed at `position` and bound to the
    /// level's height textures.
    pub fn spawn(&mut self, kind: PieceKind, label: String, position: Vec3) -> InstanceId {
        let piece = self.pieces.piece(kind);
        let id = self.renderer.create_instance(InstanceDescriptor {
            label,
            mesh: piece.mesh,
            material: piece.material,
        });

        self.renderer.set_local_position(id, position);
        self.renderer
            .set_local_scale(id, Vec3::new(self.scale, 1.0, self.scale));
        self.renderer
            .bind_texture(id, TextureSlot::Heightmap, self.heightmap);
        self.renderer
            .bind_texture(id, TextureSlot::LowResHeightmap, self.low_res_heightmap);

        id
    }
}

pub(crate) fn release_instances(renderer: &mut Renderer, instances: &[InstanceId]) {
    for &id in instances {
        renderer.remove_instance(id);
    }
}
