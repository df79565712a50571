use glam::{Vec2, Vec3};

/// Handle to a mesh stored by the renderer.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct MeshId(pub generational_arena::Index);

#[derive(Clone, Copy, Debug, PartialEq, bytemuck::NoUninit)]
#[repr(C)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub tex_coord: Vec2,
}

impl Vertex {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            normal: Vec3::ZERO,
            tex_coord: Vec2::ZERO,
        }
    }

    pub fn new(position: Vec3, normal: Vec3, tex_coord: Vec2) -> Self {
        Self {
            position,
            normal,
            tex_coord,
        }
    }
}

/// Axis aligned bounds of a set of points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

/// Indexed triangle list.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Replace every vertex normal with the normalized sum of the normals of the triangles that
    /// use it. Larger triangles contribute more. Vertices not used by any triangle get a zero
    /// normal.
    pub fn recalculate_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.vertices.len()];

        for triangle in self.indices.chunks_exact(3) {
            let [a, b, c] = [triangle[0], triangle[1], triangle[2]].map(|i| i as usize);
            let p0 = self.vertices[a].position;
            let p1 = self.vertices[b].position;
            let p2 = self.vertices[c].position;

            // Not normalized, so the length weighs the contribution by area.
            let face = (p1 - p0).cross(p2 - p0);
            normals[a] += face;
            normals[b] += face;
            normals[c] += face;
        }

        for (vertex, normal) in self.vertices.iter_mut().zip(normals) {
            vertex.normal = normal.normalize_or_zero();
        }
    }

    /// Bounds of all the vertex positions, or `None` for a mesh without vertices.
    pub fn bounds(&self) -> Option<BoundingBox> {
        let first = self.vertices.first()?.position;
        Some(self.vertices.iter().skip(1).fold(
            BoundingBox {
                min: first,
                max: first,
            },
            |bounds, vertex| BoundingBox {
                min: bounds.min.min(vertex.position),
                max: bounds.max.max(vertex.position),
            },
        ))
    }
}
