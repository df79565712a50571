use glam::Vec3;
use strum::EnumCount;

use crate::{MaterialId, MeshId, TextureId, Tracked, Transform};

/// Handle to an instance placed by the renderer.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct InstanceId(pub generational_arena::Index);

/// Named texture inputs of the chunk shading stage.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, EnumCount, strum::EnumIter, strum::IntoStaticStr)]
#[repr(usize)]
pub enum TextureSlot {
    #[strum(serialize = "_Heightmap")]
    Heightmap = 0,
    #[strum(serialize = "_LowResHeightmap")]
    LowResHeightmap = 1,
}

impl TextureSlot {
    /// The name the shading stage knows this slot by.
    pub fn property_name(self) -> &'static str {
        self.into()
    }
}

#[derive(Clone, Debug)]
pub struct InstanceDescriptor {
    pub label: String,
    pub mesh: MeshId,
    pub material: MaterialId,
}

/// A mesh placed in the scene with a material and a set of bound textures.
pub struct Instance {
    label: String,
    mesh: MeshId,
    material: MaterialId,
    pub(crate) transform: Tracked<Transform>,
    pub(crate) textures: [Option<TextureId>; TextureSlot::COUNT],
}

impl Instance {
    pub(crate) fn new(descriptor: InstanceDescriptor) -> Self {
        Self {
            label: descriptor.label,
            mesh: descriptor.mesh,
            material: descriptor.material,
            transform: Tracked::new(Transform::default()),
            textures: [None; TextureSlot::COUNT],
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn mesh(&self) -> MeshId {
        self.mesh
    }

    pub fn material(&self) -> MaterialId {
        self.material
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn local_position(&self) -> Vec3 {
        self.transform.translation
    }

    pub fn local_scale(&self) -> Vec3 {
        self.transform.scale
    }

    pub fn texture(&self, slot: TextureSlot) -> Option<TextureId> {
        self.textures[slot as usize]
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn slot_property_names() {
        let names: Vec<_> = TextureSlot::iter().map(TextureSlot::property_name).collect();
        assert_eq!(names, vec!["_Heightmap", "_LowResHeightmap"]);
    }
}
