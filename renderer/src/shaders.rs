/// Handle to a registered shader.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct ShaderId(pub generational_arena::Index);

/// WGSL source kept by the renderer until something compiles it.
pub(crate) struct ShaderEntry {
    pub label: String,
    pub source: String,
}

impl ShaderEntry {
    pub fn new(label: &str, source: &str) -> Self {
        Self {
            label: label.to_string(),
            source: source.to_string(),
        }
    }
}
