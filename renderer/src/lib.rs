//! A store of renderable resources: meshes, shaders, materials, textures and the instances that
//! place a mesh with a material somewhere in the scene.
//!
//! Everything is addressed by handles into generational arenas, so a handle to a removed resource
//! never aliases a newer one.

mod instances;
mod materials;
mod mesh;
mod shaders;
mod textures;
mod tracked;
mod transform;

pub use instances::*;
pub use materials::*;
pub use mesh::*;
pub use shaders::*;
pub use textures::*;
pub use tracked::*;
pub use transform::*;

use generational_arena::Arena;
use glam::Vec3;
use tracing::warn;

#[derive(Default)]
pub struct Renderer {
    meshes: Arena<MeshEntry>,
    shaders: Arena<ShaderEntry>,
    materials: Arena<MaterialEntry>,
    textures: Arena<TextureEntry>,
    instances: Arena<Instance>,
}

impl Renderer {
    /// Creates an empty resource store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers shader source and returns its handle.
    pub fn create_shader(&mut self, label: &str, source: &str) -> ShaderId {
        ShaderId(self.shaders.insert(ShaderEntry::new(label, source)))
    }

    pub fn has_shader(&self, id: ShaderId) -> bool {
        self.shaders.contains(id.0)
    }

    pub fn shader_source(&self, id: ShaderId) -> Option<&str> {
        self.shaders.get(id.0).map(|entry| entry.source.as_str())
    }

    pub fn shader_label(&self, id: ShaderId) -> Option<&str> {
        self.shaders.get(id.0).map(|entry| entry.label.as_str())
    }

    /// Stores a mesh and returns its handle.
    pub fn create_mesh(&mut self, label: &str, mesh: Mesh) -> MeshId {
        MeshId(self.meshes.insert(MeshEntry {
            label: label.to_string(),
            mesh,
        }))
    }

    pub fn mesh(&self, id: MeshId) -> Option<&Mesh> {
        self.meshes.get(id.0).map(|entry| &entry.mesh)
    }

    pub fn mesh_label(&self, id: MeshId) -> Option<&str> {
        self.meshes.get(id.0).map(|entry| entry.label.as_str())
    }

    pub fn remove_mesh(&mut self, id: MeshId) -> Option<Mesh> {
        self.meshes.remove(id.0).map(|entry| entry.mesh)
    }

    /// Creates a material and returns its handle.
    pub fn create_material(&mut self, descriptor: MaterialDescriptor) -> MaterialId {
        MaterialId(self.materials.insert(MaterialEntry::new(descriptor)))
    }

    pub fn material_shader(&self, id: MaterialId) -> Option<ShaderId> {
        self.materials.get(id.0).map(|entry| entry.descriptor.shader)
    }

    pub fn set_material_float(&mut self, id: MaterialId, name: &str, value: f32) {
        let Some(entry) = self.materials.get_mut(id.0) else {
            warn!("Setting {name} on a material that does not exist ({id:?})");
            return;
        };
        entry.floats.insert(name.to_string(), value);
    }

    pub fn material_float(&self, id: MaterialId, name: &str) -> Option<f32> {
        self.materials
            .get(id.0)
            .and_then(|entry| entry.floats.get(name).copied())
    }

    pub fn remove_material(&mut self, id: MaterialId) -> bool {
        self.materials.remove(id.0).is_some()
    }

    /// Creates a texture description and returns its handle. The texel storage is owned by
    /// whatever produces the texture contents.
    pub fn create_texture(&mut self, descriptor: TextureDescriptor) -> TextureId {
        TextureId(self.textures.insert(TextureEntry { descriptor }))
    }

    pub fn texture(&self, id: TextureId) -> Option<&TextureDescriptor> {
        self.textures.get(id.0).map(|entry| &entry.descriptor)
    }

    pub fn remove_texture(&mut self, id: TextureId) -> bool {
        self.textures.remove(id.0).is_some()
    }

    /// Creates an instance of a mesh rendered with a material. The instance starts at the origin
    /// with a unit scale and no textures bound.
    pub fn create_instance(&mut self, descriptor: InstanceDescriptor) -> InstanceId {
        debug_assert!(
            self.meshes.contains(descriptor.mesh.0),
            "Instance {} references a missing mesh.",
            descriptor.label
        );
        debug_assert!(
            self.materials.contains(descriptor.material.0),
            "Instance {} references a missing material.",
            descriptor.label
        );

        InstanceId(self.instances.insert(Instance::new(descriptor)))
    }

    pub fn instance(&self, id: InstanceId) -> Option<&Instance> {
        self.instances.get(id.0)
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn set_local_position(&mut self, id: InstanceId, position: Vec3) {
        let Some(instance) = self.instances.get_mut(id.0) else {
            warn!("Positioning an instance that does not exist ({id:?})");
            return;
        };
        instance.transform.modify(|transform| transform.translation = position);
    }

    pub fn set_local_scale(&mut self, id: InstanceId, scale: Vec3) {
        let Some(instance) = self.instances.get_mut(id.0) else {
            warn!("Scaling an instance that does not exist ({id:?})");
            return;
        };
        instance.transform.modify(|transform| transform.scale = scale);
    }

    pub fn bind_texture(&mut self, id: InstanceId, slot: TextureSlot, texture: TextureId) {
        let Some(instance) = self.instances.get_mut(id.0) else {
            warn!("Binding {slot:?} to an instance that does not exist ({id:?})");
            return;
        };
        instance.textures[slot as usize] = Some(texture);
    }

    /// Calls `f` once for every instance whose transform was written since the last drain, with
    /// the values the shading stage reads as `_Offset` and `_Size`. Returns the number of
    /// instances visited.
    pub fn drain_changed_instances(&mut self, mut f: impl FnMut(InstanceId, Vec3, Vec3)) -> usize {
        let mut visited = 0;
        for (index, instance) in self.instances.iter_mut() {
            if let Some(transform) = instance.transform.take_changed() {
                f(InstanceId(index), transform.translation, transform.scale);
                visited += 1;
            }
        }
        visited
    }

    pub fn remove_instance(&mut self, id: InstanceId) -> bool {
        self.instances.remove(id.0).is_some()
    }
}

struct MeshEntry {
    label: String,
    mesh: Mesh,
}

struct TextureEntry {
    descriptor: TextureDescriptor,
}
