use glam::Vec3;
use renderer::{InstanceId, Renderer, TextureId};
use tracing::{debug, info};

use crate::{
    HeightField, HeightSource, LodLevel,
    layout::{self, CENTER_SLOTS},
    level::{Spawner, release_instances},
    pieces::{ChunkPieceSet, PieceKind},
};

const SQUARE_COUNT: usize = CENTER_SLOTS.len();
const CROSS: usize = SQUARE_COUNT;

/// The finest level: a full 4x4 grid of unit scale chunks with a cross plugging the gap between
/// them.
pub struct Center {
    chunk_resolution: u32,
    offset: Vec3,
    height_field: HeightField,
    low_res_texture: TextureId,
    /// Squares in [CENTER_SLOTS] order, then the cross.
    instances: [InstanceId; Self::INSTANCE_COUNT],
}

impl Center {
    pub const LEVEL: u32 = 0;
    pub const INSTANCE_COUNT: usize = CROSS + 1;

    pub fn new(
        renderer: &mut Renderer,
        heights: &mut dyn HeightSource,
        pieces: &ChunkPieceSet,
        low_res: Option<TextureId>,
    ) -> Self {
        let chunk_resolution = pieces.chunk_resolution();

        let height_field = HeightField::new(renderer, heights, Self::LEVEL, chunk_resolution);
        let low_res_texture = low_res.unwrap_or(height_field.texture());

        let mut spawner = Spawner {
            renderer,
            pieces,
            scale: 1.0,
            heightmap: height_field.texture(),
            low_res_heightmap: low_res_texture,
        };

        let mut ids = Vec::with_capacity(Self::INSTANCE_COUNT);
        for (n, &(x, z)) in CENTER_SLOTS.iter().enumerate() {
            ids.push(spawner.spawn(
                PieceKind::Square,
                format!("Square{}_Center", n + 1),
                layout::slot_origin(x, z, chunk_resolution, 1.0),
            ));
        }
        ids.push(spawner.spawn(
            PieceKind::CenterCross,
            "CenterCross".to_string(),
            Vec3::ZERO,
        ));

        let instances = std::array::from_fn(|i| ids[i]);

        info!("Created center with resolution {chunk_resolution}");

        Self {
            chunk_resolution,
            offset: Vec3::ZERO,
            height_field,
            low_res_texture,
            instances,
        }
    }

    pub fn low_res_texture(&self) -> TextureId {
        self.low_res_texture
    }

    pub fn squares(&self) -> &[InstanceId] {
        &self.instances[..SQUARE_COUNT]
    }

    pub fn cross(&self) -> InstanceId {
        self.instances[CROSS]
    }

    pub(crate) fn release(self, renderer: &mut Renderer, heights: &mut dyn HeightSource) {
        release_instances(renderer, &self.instances);
        self.height_field.release(renderer, heights);
    }
}

impl LodLevel for Center {
    fn level(&self) -> u32 {
        Self::LEVEL
    }

    fn height_field(&self) -> &HeightField {
        &self.height_field
    }

    fn offset(&self) -> Vec3 {
        self.offset
    }

    fn instances(&self) -> &[InstanceId] {
        &self.instances
    }

    fn update_positions(
        &mut self,
        renderer: &mut Renderer,
        heights: &mut dyn HeightSource,
        viewpoint: Vec3,
    ) {
        debug_assert!(viewpoint.is_finite(), "Viewpoint is not finite: {viewpoint}");

        let offset = layout::snapped_offset(viewpoint, Self::LEVEL);
        if offset != self.offset {
            debug!("Center moved to {offset}");
        }
        self.offset = offset;

        self.height_field.update(heights, viewpoint, offset);

        let r = self.chunk_resolution;
        for (&id, &(x, z)) in self.squares().iter().zip(CENTER_SLOTS.iter()) {
            renderer.set_local_position(id, offset + layout::slot_origin(x, z, r, 1.0));
        }
        renderer.set_local_position(self.cross(), offset);
    }
}

#[cfg(test)]
mod tests {
    use glam::vec3;
    use renderer::TextureSlot;

    use super::*;
    use crate::height::testing::RecordingHeightSource;

    fn center(chunk_resolution: u32) -> (Renderer, RecordingHeightSource, Center) {
        let mut renderer = Renderer::new();
        let mut heights = RecordingHeightSource::default();
        let shader = renderer.create_shader("chunk", "// chunk");
        let pieces = ChunkPieceSet::new(&mut renderer, chunk_resolution, shader).unwrap();
        let center = Center::new(&mut renderer, &mut heights, &pieces, None);
        (renderer, heights, center)
    }

    #[test]
    fn full_grid_and_cross() {
        let (renderer, _, center) = center(16);

        assert_eq!(center.instances().len(), 17);
        let label = |id| renderer.instance(id).unwrap().label().to_string();
        assert_eq!(label(center.squares()[0]), "Square1_Center");
        assert_eq!(label(center.squares()[15]), "Square16_Center");
        assert_eq!(label(center.cross()), "CenterCross");

        for &id in center.instances() {
            let instance = renderer.instance(id).unwrap();
            assert_eq!(instance.local_scale(), Vec3::ONE);
            assert_eq!(
                instance.texture(TextureSlot::Heightmap),
                Some(center.texture())
            );
            assert_eq!(
                instance.texture(TextureSlot::LowResHeightmap),
                Some(center.texture())
            );
        }
    }

    #[test]
    fn offset_snaps_to_odd_cells() {
        let (mut renderer, mut heights, mut center) = center(16);

        center.update_positions(&mut renderer, &mut heights, Vec3::ZERO);
        assert_eq!(center.offset(), vec3(1.0, 0.0, 1.0));

        center.update_positions(&mut renderer, &mut heights, vec3(1.9, 7.0, -0.1));
        assert_eq!(center.offset(), vec3(1.0, 0.0, -1.0));

        center.update_positions(&mut renderer, &mut heights, vec3(2.0, 0.0, 4.5));
        assert_eq!(center.offset(), vec3(3.0, 0.0, 5.0));

        let cross = renderer.instance(center.cross()).unwrap();
        assert_eq!(cross.local_position(), vec3(3.0, 0.0, 5.0));
        let corner = renderer.instance(center.squares()[0]).unwrap();
        assert_eq!(corner.local_position(), vec3(3.0 - 31.0, 0.0, 5.0 - 31.0));
    }

    #[test]
    fn cross_fills_the_gap() {
        let (mut renderer, mut heights, mut center) = center(16);
        center.update_positions(&mut renderer, &mut heights, vec3(10.0, 0.0, 10.0));

        // The squares next to the gap end one cell before the cross and start one cell after it.
        let offset = center.offset();
        let below = renderer.instance(center.squares()[5]).unwrap().local_position();
        let above = renderer.instance(center.squares()[10]).unwrap().local_position();
        assert_eq!(below + vec3(15.0, 0.0, 15.0), offset - vec3(1.0, 0.0, 1.0));
        assert_eq!(above, offset + vec3(1.0, 0.0, 1.0));
    }
}
