use ahash::HashMap;

use crate::ShaderId;

/// Handle to a material tracked by the renderer.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct MaterialId(pub generational_arena::Index);

/// A shader together with the named parameters it is rendered with. One material is usually
/// shared by many instances.
#[derive(Clone, Debug)]
pub struct MaterialDescriptor {
    pub label: String,
    pub shader: ShaderId,
}

pub(crate) struct MaterialEntry {
    pub descriptor: MaterialDescriptor,
    pub floats: HashMap<String, f32>,
}

impl MaterialEntry {
    pub fn new(descriptor: MaterialDescriptor) -> Self {
        Self {
            descriptor,
            floats: HashMap::default(),
        }
    }
}
