#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ClipmapError {
    #[error(
        "Chunk resolution must be between 2 and {max} ({0})",
        max = crate::TerrainConfig::MAX_CHUNK_RESOLUTION
    )]
    InvalidChunkResolution(u32),

    #[error("Number of levels must be between 1 and {max} ({count})")]
    InvalidLevelCount { count: u32, max: u32 },

    #[error(
        "Ring levels must be between 1 and {max} ({0})",
        max = crate::TerrainConfig::MAX_LEVELS
    )]
    InvalidRingLevel(u32),

    #[error("Plane meshes need at least 2x2 vertices ({0}x{1})")]
    DegeneratePlane(u32, u32),

    #[error("Cross meshes need arms of at least 2 vertices ({0})")]
    DegenerateCross(u32),

    #[error("Shader not found ({0})")]
    MissingShader(String),

    #[error("Shader source is empty ({0})")]
    EmptyShaderSource(String),

    #[error("Shader failed validation ({label}): {message}")]
    InvalidShader { label: String, message: String },
}
