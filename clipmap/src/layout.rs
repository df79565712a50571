//! Placement math shared by the center and the rings.
//!
//! Every level lays its chunks out on a 4x4 grid of slots. A chunk with a resolution of `R`
//! vertices spans `R - 1` cells, and the two middle slots are pushed apart by one cell each, which
//! leaves a two cell wide cross through the middle of the grid:
//!
//! ```text
//!   slot:    0       1      gap      2       3
//!        |-------|-------|   |   |-------|-------|
//!     -2R+1    -R      -1    0   1       R     2R-1
//! ```
//!
//! The whole tile is `4R - 1` vertices across. Positions below are in cells of the level, so
//! they are multiplied by the level's chunk scale before use.

use glam::Vec3;

/// Slots along each axis of a level.
pub const SLOTS_PER_AXIS: u32 = 4;

/// The slots of a ring, in the order the ring stores its chunks: the outer border of the 4x4
/// grid, walking X major.
pub const RING_SLOTS: [(u32, u32); 12] = [
    (0, 0),
    (0, 1),
    (0, 2),
    (0, 3),
    (1, 0),
    (1, 3),
    (2, 0),
    (2, 3),
    (3, 0),
    (3, 1),
    (3, 2),
    (3, 3),
];

/// All 16 slots of the center, X major.
pub const CENTER_SLOTS: [(u32, u32); 16] = [
    (0, 0),
    (0, 1),
    (0, 2),
    (0, 3),
    (1, 0),
    (1, 1),
    (1, 2),
    (1, 3),
    (2, 0),
    (2, 1),
    (2, 2),
    (2, 3),
    (3, 0),
    (3, 1),
    (3, 2),
    (3, 3),
];

/// Amount of vertices along each edge of a level's tile, which is also the edge length of each
/// level's height texture.
#[inline]
pub fn tile_size(chunk_resolution: u32) -> u32 {
    4 * chunk_resolution - 1
}

/// World size of one grid cell at `level`.
#[inline]
pub fn chunk_scale(level: u32) -> f32 {
    (1_u32 << level) as f32
}

/// Whether the slot lies on the outer border of the 4x4 grid.
#[inline]
pub fn is_border_slot(x: u32, z: u32) -> bool {
    x == 0 || x == SLOTS_PER_AXIS - 1 || z == 0 || z == SLOTS_PER_AXIS - 1
}

/// Offset in cells of a slot along one axis.
#[inline]
pub fn slot_offset(slot: u32, chunk_resolution: u32) -> i32 {
    let slot = slot as i32;
    let span = chunk_resolution as i32 - 1;
    (slot - 2) * span + if slot > 1 { 1 } else { -1 }
}

/// Local origin of the chunk in slot `(x, z)`.
pub fn slot_origin(x: u32, z: u32, chunk_resolution: u32, scale: f32) -> Vec3 {
    Vec3::new(
        slot_offset(x, chunk_resolution) as f32 * scale,
        0.0,
        slot_offset(z, chunk_resolution) as f32 * scale,
    )
}

/// Where a level sits this frame. The offset only moves in steps of two cells of the level, so
/// that every chunk stays aligned to the level's grid and to the next coarser level.
pub fn snapped_offset(viewpoint: Vec3, level: u32) -> Vec3 {
    let scale = chunk_scale(level);
    let step = scale * 2.0;
    Vec3::new(
        (viewpoint.x / step).floor() * step + scale,
        0.0,
        (viewpoint.z / step).floor() * step + scale,
    )
}

/// The viewpoint snapped to single cells of the level, which is where the next finer level ends
/// up.
pub fn inner_offset(viewpoint: Vec3, level: u32) -> Vec3 {
    let scale = chunk_scale(level);
    Vec3::new(
        (viewpoint.x / scale).floor() * scale,
        0.0,
        (viewpoint.z / scale).floor() * scale,
    )
}

/// Local origins of the fillers that plug the gap cross of a ring where it meets the outer edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BorderFillers {
    /// `R x 3` strips in the left and right columns.
    pub vertical: [Vec3; 2],
    /// `3 x R` strips in the top and bottom rows.
    pub horizontal: [Vec3; 2],
}

pub fn border_filler_origins(chunk_resolution: u32, scale: f32) -> BorderFillers {
    let span = (chunk_resolution - 1) as f32;
    let near = scale * (span + 1.0);
    let far = -scale * (2.0 * span + 1.0);

    BorderFillers {
        vertical: [Vec3::new(near, 0.0, -scale), Vec3::new(far, 0.0, -scale)],
        horizontal: [Vec3::new(-scale, 0.0, near), Vec3::new(-scale, 0.0, far)],
    }
}

/// Local origins of the one cell wide strips that seal whichever side of a ring's hole the finer
/// level does not cover this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InteriorFillers {
    /// `(2R + 1) x 2` strip along X, at the top or bottom of the hole.
    pub vertical: Vec3,
    /// `2 x (2R + 1)` strip along Z, at the right or left of the hole.
    pub horizontal: Vec3,
}

/// `diff` is the ring's snapped offset minus its [inner_offset]. A non-zero component means the
/// finer level is shifted towards negative on that axis and the positive side is open.
pub fn interior_filler_origins(chunk_resolution: u32, scale: f32, diff: Vec3) -> InteriorFillers {
    let span = (chunk_resolution - 1) as f32;
    let low = -scale * (span + 1.0);
    let high = scale * span;

    InteriorFillers {
        vertical: Vec3::new(low, 0.0, if diff.z != 0.0 { high } else { low }),
        horizontal: Vec3::new(if diff.x != 0.0 { high } else { low }, 0.0, low),
    }
}
