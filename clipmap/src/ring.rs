use glam::Vec3;
use renderer::{InstanceId, Renderer, TextureId};
use tracing::{debug, info};

use crate::{
    ClipmapError, HeightField, HeightSource, LodLevel, TerrainConfig,
    layout::{self, RING_SLOTS},
    level::{Spawner, release_instances},
    pieces::{ChunkPieceSet, PieceKind},
};

const SQUARE_COUNT: usize = RING_SLOTS.len();
const VERTICAL_BORDERS: usize = SQUARE_COUNT;
const HORIZONTAL_BORDERS: usize = VERTICAL_BORDERS + 2;
const INTERIOR_VERTICAL: usize = HORIZONTAL_BORDERS + 2;
const INTERIOR_HORIZONTAL: usize = INTERIOR_VERTICAL + 1;

/// A hollow level of the clipmap at a scale of `2^level`: 12 square chunks around a hole that the
/// next finer level fills, plus the strips that seal it.
pub struct Ring {
    level: u32,
    chunk_resolution: u32,
    scale: f32,
    offset: Vec3,
    height_field: HeightField,
    low_res_texture: TextureId,
    /// Squares in [RING_SLOTS] order, then 2 vertical borders, 2 horizontal borders, the
    /// vertical interior and the horizontal interior filler.
    instances: [InstanceId; Self::INSTANCE_COUNT],
}

impl Ring {
    pub const INSTANCE_COUNT: usize = INTERIOR_HORIZONTAL + 1;

    /// Create the ring for `level`. Its chunks sample `low_res` as the coarser level's heights,
    /// or their own heights if there is no coarser level.
    pub fn new(
        renderer: &mut Renderer,
        heights: &mut dyn HeightSource,
        pieces: &ChunkPieceSet,
        level: u32,
        low_res: Option<TextureId>,
    ) -> Result<Self, ClipmapError> {
        if !(1..=TerrainConfig::MAX_LEVELS).contains(&level) {
            return Err(ClipmapError::InvalidRingLevel(level));
        }

        let chunk_resolution = pieces.chunk_resolution();
        let scale = layout::chunk_scale(level);

        let height_field = HeightField::new(renderer, heights, level, chunk_resolution);
        let low_res_texture = low_res.unwrap_or(height_field.texture());

        let mut spawner = Spawner {
            renderer,
            pieces,
            scale,
            heightmap: height_field.texture(),
            low_res_heightmap: low_res_texture,
        };

        let mut ids = Vec::with_capacity(Self::INSTANCE_COUNT);

        for (n, &(x, z)) in RING_SLOTS.iter().enumerate() {
            ids.push(spawner.spawn(
                PieceKind::Square,
                format!("Square{}_{level}", n + 1),
                layout::slot_origin(x, z, chunk_resolution, scale),
            ));
        }

        let borders = layout::border_filler_origins(chunk_resolution, scale);
        for (i, position) in borders.vertical.into_iter().enumerate() {
            ids.push(spawner.spawn(
                PieceKind::BorderVertical,
                format!("VerticalBorder{i}_{level}"),
                position,
            ));
        }
        for (i, position) in borders.horizontal.into_iter().enumerate() {
            ids.push(spawner.spawn(
                PieceKind::BorderHorizontal,
                format!("HorizontalBorder{i}_{level}"),
                position,
            ));
        }

        let interior = layout::interior_filler_origins(chunk_resolution, scale, Vec3::ZERO);
        ids.push(spawner.spawn(
            PieceKind::InteriorVertical,
            format!("InteriorVertical_{level}"),
            interior.vertical,
        ));
        ids.push(spawner.spawn(
            PieceKind::InteriorHorizontal,
            format!("InteriorHorizontal_{level}"),
            interior.horizontal,
        ));

        let instances = std::array::from_fn(|i| ids[i]);

        info!("Created ring {level} with scale {scale}");

        Ok(Self {
            level,
            chunk_resolution,
            scale,
            offset: Vec3::ZERO,
            height_field,
            low_res_texture,
            instances,
        })
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn low_res_texture(&self) -> TextureId {
        self.low_res_texture
    }

    pub fn squares(&self) -> &[InstanceId] {
        &self.instances[..SQUARE_COUNT]
    }

    pub fn vertical_borders(&self) -> &[InstanceId] {
        &self.instances[VERTICAL_BORDERS..HORIZONTAL_BORDERS]
    }

    pub fn horizontal_borders(&self) -> &[InstanceId] {
        &self.instances[HORIZONTAL_BORDERS..INTERIOR_VERTICAL]
    }

    pub fn interior_vertical(&self) -> InstanceId {
        self.instances[INTERIOR_VERTICAL]
    }

    pub fn interior_horizontal(&self) -> InstanceId {
        self.instances[INTERIOR_HORIZONTAL]
    }

    pub(crate) fn release(self, renderer: &mut Renderer, heights: &mut dyn HeightSource) {
        release_instances(renderer, &self.instances);
        self.height_field.release(renderer, heights);
    }
}

impl LodLevel for Ring {
    fn level(&self) -> u32 {
        self.level
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

        let offset = layout::snapped_offset(viewpoint, self.level);
        let diff = offset - layout::inner_offset(viewpoint, self.level);

        if offset != self.offset {
            debug!("Ring {} moved to {offset}", self.level);
        }
        self.offset = offset;

        // Heights for the new position have to be submitted before any chunk moves there.
        self.height_field.update(heights, viewpoint, offset);

        let r = self.chunk_resolution;
        let scale = self.scale;

        for (&id, &(x, z)) in self.instances[..SQUARE_COUNT].iter().zip(RING_SLOTS.iter()) {
            renderer.set_local_position(id, offset + layout::slot_origin(x, z, r, scale));
        }

        let borders = layout::border_filler_origins(r, scale);
        for (&id, position) in self.vertical_borders().iter().zip(borders.vertical) {
            renderer.set_local_position(id, offset + position);
        }
        for (&id, position) in self.horizontal_borders().iter().zip(borders.horizontal) {
            renderer.set_local_position(id, offset + position);
        }

        let interior = layout::interior_filler_origins(r, scale, diff);
        renderer.set_local_position(self.interior_vertical(), offset + interior.vertical);
        renderer.set_local_position(self.interior_horizontal(), offset + interior.horizontal);
    }
}

#[cfg(test)]
mod tests {
    use glam::vec3;
    use renderer::TextureSlot;

    use super::*;
    use crate::height::testing::{HeightEvent, RecordingHeightSource};

    struct Fixture {
        renderer: Renderer,
        heights: RecordingHeightSource,
        pieces: ChunkPieceSet,
    }

    fn fixture(chunk_resolution: u32) -> Fixture {
        let mut renderer = Renderer::new();
        let shader = renderer.create_shader("chunk", "// chunk");
        let pieces = ChunkPieceSet::new(&mut renderer, chunk_resolution, shader).unwrap();
        Fixture {
            renderer,
            heights: RecordingHeightSource::default(),
            pieces,
        }
    }

    fn position(renderer: &Renderer, id: InstanceId) -> Vec3 {
        renderer.instance(id).unwrap().local_position()
    }

    #[test]
    fn level_zero_is_not_a_ring() {
        let Fixture {
            mut renderer,
            mut heights,
            pieces,
        } = fixture(16);

        assert_eq!(
            Ring::new(&mut renderer, &mut heights, &pieces, 0, None).err(),
            Some(ClipmapError::InvalidRingLevel(0))
        );
    }

    #[test]
    fn levels_past_the_maximum_are_rejected() {
        let Fixture {
            mut renderer,
            mut heights,
            pieces,
        } = fixture(16);

        for level in [TerrainConfig::MAX_LEVELS + 1, 32, u32::MAX] {
            assert_eq!(
                Ring::new(&mut renderer, &mut heights, &pieces, level, None).err(),
                Some(ClipmapError::InvalidRingLevel(level))
            );
        }
        assert!(heights.events.is_empty());

        assert!(
            Ring::new(&mut renderer, &mut heights, &pieces, TerrainConfig::MAX_LEVELS, None)
                .is_ok()
        );
    }

    #[test]
    fn instances_and_labels() {
        let Fixture {
            mut renderer,
            mut heights,
            pieces,
        } = fixture(16);
        let ring = Ring::new(&mut renderer, &mut heights, &pieces, 2, None).unwrap();

        assert_eq!(ring.instances().len(), 18);
        assert_eq!(ring.squares().len(), 12);

        let label = |id| renderer.instance(id).unwrap().label().to_string();
        assert_eq!(label(ring.squares()[0]), "Square1_2");
        assert_eq!(label(ring.squares()[11]), "Square12_2");
        assert_eq!(label(ring.vertical_borders()[1]), "VerticalBorder1_2");
        assert_eq!(label(ring.horizontal_borders()[0]), "HorizontalBorder0_2");
        assert_eq!(label(ring.interior_vertical()), "InteriorVertical_2");
        assert_eq!(label(ring.interior_horizontal()), "InteriorHorizontal_2");

        let square = pieces.piece(PieceKind::Square).mesh;
        assert!(
            ring.squares()
                .iter()
                .all(|&id| renderer.instance(id).unwrap().mesh() == square)
        );
    }

    #[test]
    fn chunks_are_scaled_and_bound_to_heights() {
        let Fixture {
            mut renderer,
            mut heights,
            pieces,
        } = fixture(16);
        let coarse = Ring::new(&mut renderer, &mut heights, &pieces, 3, None).unwrap();
        let fine = Ring::new(
            &mut renderer,
            &mut heights,
            &pieces,
            2,
            Some(coarse.texture()),
        )
        .unwrap();

        for &id in fine.instances() {
            let instance = renderer.instance(id).unwrap();
            assert_eq!(instance.local_scale(), vec3(4.0, 1.0, 4.0));
            assert_eq!(instance.texture(TextureSlot::Heightmap), Some(fine.texture()));
            assert_eq!(
                instance.texture(TextureSlot::LowResHeightmap),
                Some(coarse.texture())
            );
        }

        // The coarsest level has nothing coarser to blend towards.
        for &id in coarse.instances() {
            let instance = renderer.instance(id).unwrap();
            assert_eq!(
                instance.texture(TextureSlot::LowResHeightmap),
                Some(coarse.texture())
            );
        }
    }

    #[test]
    fn update_places_pieces_around_the_snapped_offset() {
        let Fixture {
            mut renderer,
            mut heights,
            pieces,
        } = fixture(16);
        let mut ring = Ring::new(&mut renderer, &mut heights, &pieces, 1, None).unwrap();

        ring.update_positions(&mut renderer, &mut heights, vec3(5.0, 0.0, -3.0));

        // floor(5 / 4) * 4 + 2 and floor(-3 / 4) * 4 + 2
        let offset = vec3(6.0, 0.0, -2.0);
        assert_eq!(ring.offset(), offset);
        assert_eq!(
            position(&renderer, ring.squares()[0]),
            offset + vec3(-62.0, 0.0, -62.0)
        );
        assert_eq!(
            position(&renderer, ring.squares()[11]),
            offset + vec3(32.0, 0.0, 32.0)
        );
        assert_eq!(
            position(&renderer, ring.vertical_borders()[0]),
            offset + vec3(32.0, 0.0, -2.0)
        );
        assert_eq!(
            position(&renderer, ring.horizontal_borders()[1]),
            offset + vec3(-2.0, 0.0, -62.0)
        );

        // inner offset is (4, 0, -4), so the hole is open towards +X and +Z.
        assert_eq!(
            position(&renderer, ring.interior_vertical()),
            offset + vec3(-32.0, 0.0, 30.0)
        );
        assert_eq!(
            position(&renderer, ring.interior_horizontal()),
            offset + vec3(30.0, 0.0, -32.0)
        );
    }

    #[test]
    fn sub_cell_movement_keeps_positions() {
        let Fixture {
            mut renderer,
            mut heights,
            pieces,
        } = fixture(16);
        let mut ring = Ring::new(&mut renderer, &mut heights, &pieces, 2, None).unwrap();

        ring.update_positions(&mut renderer, &mut heights, Vec3::ZERO);
        let before: Vec<_> = ring
            .instances()
            .iter()
            .map(|&id| position(&renderer, id))
            .collect();

        ring.update_positions(&mut renderer, &mut heights, vec3(1.0, 0.0, 0.0));
        let after: Vec<_> = ring
            .instances()
            .iter()
            .map(|&id| position(&renderer, id))
            .collect();

        assert_eq!(ring.offset(), vec3(4.0, 0.0, 4.0));
        assert_eq!(before, after);
    }

    #[test]
    fn heights_are_regenerated_every_update() {
        let Fixture {
            mut renderer,
            mut heights,
            pieces,
        } = fixture(16);
        let mut ring = Ring::new(&mut renderer, &mut heights, &pieces, 1, None).unwrap();
        heights.events.clear();

        let viewpoint = vec3(1.0, 0.0, 1.0);
        ring.update_positions(&mut renderer, &mut heights, viewpoint);
        ring.update_positions(&mut renderer, &mut heights, viewpoint);

        let expected = crate::height::normalized_origin(viewpoint, ring.offset(), 1, 16);
        assert_eq!(heights.regenerated().len(), 2);
        assert!(
            heights
                .regenerated()
                .iter()
                .all(|(texture, params)| *texture == ring.texture() && params.origin == expected)
        );
    }

    #[test]
    fn release_removes_everything() {
        let Fixture {
            mut renderer,
            mut heights,
            pieces,
        } = fixture(8);
        let ring = Ring::new(&mut renderer, &mut heights, &pieces, 1, None).unwrap();
        let texture = ring.texture();
        let instances = ring.instances().to_vec();

        ring.release(&mut renderer, &mut heights);

        assert!(instances.iter().all(|&id| renderer.instance(id).is_none()));
        assert!(renderer.texture(texture).is_none());
        assert_eq!(heights.events.last(), Some(&HeightEvent::Release(texture)));
    }
}
