//! Fixed topology meshes that every level instances. The shapes only depend on vertex counts, so
//! the same arguments always produce the same mesh.

use glam::{Vec2, Vec3};
use renderer::{Mesh, Vertex};

use crate::ClipmapError;

/// An `n` x `m` grid of unit spaced vertices in the XZ plane, starting at the origin and running
/// along +X and +Z. Texture coordinates run from 0 to 1 over each axis.
pub fn create_plane(n: u32, m: u32) -> Result<Mesh, ClipmapError> {
    if n < 2 || m < 2 {
        return Err(ClipmapError::DegeneratePlane(n, m));
    }

    let width = (n - 1) as f32;
    let height = (m - 1) as f32;

    let mut vertices = Vec::with_capacity(n as usize * m as usize);
    for z in 0..m {
        for x in 0..n {
            vertices.push(Vertex::new(
                Vec3::new(x as f32, 0.0, z as f32),
                Vec3::ZERO,
                Vec2::new(x as f32 / width, z as f32 / height),
            ));
        }
    }

    let mut indices = Vec::with_capacity((n - 1) as usize * (m - 1) as usize * 6);
    for z in 0..m - 1 {
        for x in 0..n - 1 {
            let start = z * n + x;
            indices.extend_from_slice(&[
                start,
                start + n,
                start + n + 1,
                start,
                start + n + 1,
                start + 1,
            ]);
        }
    }

    let mut mesh = Mesh { vertices, indices };
    mesh.recalculate_normals();

    Ok(mesh)
}

/// Two strips, 3 vertices wide and `size` vertices long, crossing at the origin. One runs along Z,
/// the other along X. The arms do not share vertices.
pub fn create_cross(size: u32) -> Result<Mesh, ClipmapError> {
    if size < 2 {
        return Err(ClipmapError::DegenerateCross(size));
    }

    let half = (size / 2) as i32;
    let mut vertices = Vec::with_capacity(size as usize * 6);

    // Along Z.
    for i in 0..size as i32 {
        let z = (half - i) as f32;
        for x in [-1.0, 0.0, 1.0] {
            vertices.push(Vertex::from_position(Vec3::new(x, 0.0, z)));
        }
    }

    // Along X.
    for i in 0..size as i32 {
        let x = (half - i) as f32;
        for z in [-1.0, 0.0, 1.0] {
            vertices.push(Vertex::from_position(Vec3::new(x, 0.0, z)));
        }
    }

    let mut indices = Vec::with_capacity((size - 1) as usize * 24);

    for i in 0..size - 1 {
        let vi = i * 3;
        indices.extend_from_slice(&[
            vi,
            vi + 1,
            vi + 3,
            vi + 1,
            vi + 4,
            vi + 3,
            vi + 1,
            vi + 2,
            vi + 4,
            vi + 2,
            vi + 5,
            vi + 4,
        ]);
    }

    // The rows of this arm run along -X, so the winding is mirrored to keep facing up.
    for i in 0..size - 1 {
        let vi = (size + i) * 3;
        indices.extend_from_slice(&[
            vi,
            vi + 3,
            vi + 1,
            vi + 1,
            vi + 3,
            vi + 4,
            vi + 1,
            vi + 4,
            vi + 2,
            vi + 2,
            vi + 4,
            vi + 5,
        ]);
    }

    let mut mesh = Mesh { vertices, indices };
    mesh.recalculate_normals();

    Ok(mesh)
}
