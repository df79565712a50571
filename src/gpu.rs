use clipmap::{ClipmapError, GpuHeightSource};
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum GpuError {
    #[error("No suitable adapter found")]
    NoAdapter,

    #[error("Could not create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("Shader {label} failed validation: {message}")]
    InvalidShader { label: String, message: String },

    #[error(transparent)]
    Clipmap(#[from] ClipmapError),
}

/// Creates a headless device and queue.
pub fn request_device() -> Result<(wgpu::Device, wgpu::Queue), GpuError> {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());

    let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
        power_preference: wgpu::PowerPreference::HighPerformance,
        force_fallback_adapter: false,
        compatible_surface: None,
    }))
    .ok_or(GpuError::NoAdapter)?;

    let adapter_info = adapter.get_info();
    info!(
        "Using adapter {} ({:?})",
        adapter_info.name, adapter_info.backend
    );

    Ok(pollster::block_on(adapter.request_device(
        &wgpu::DeviceDescriptor {
            label: Some("clipmap_device"),
            ..Default::default()
        },
        None,
    ))?)
}

/// Compiles WGSL source on the device and reports any validation error.
pub fn validate_shader(device: &wgpu::Device, label: &str, source: &str) -> Result<(), GpuError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);

    device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    match pollster::block_on(device.pop_error_scope()) {
        Some(err) => Err(GpuError::InvalidShader {
            label: label.to_string(),
            message: err.to_string(),
        }),
        None => Ok(()),
    }
}

/// Creates a height source generating on a headless device. The chunk shader is compiled on the
/// same device first, so that a broken shader fails here instead of at the first draw.
pub fn create_height_source(
    chunk_label: &str,
    chunk_source: &str,
) -> Result<GpuHeightSource, GpuError> {
    let (device, queue) = request_device()?;

    validate_shader(&device, chunk_label, chunk_source)?;
    info!("Shader {chunk_label} validated");

    Ok(GpuHeightSource::new(device, queue)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shaders_are_validated_on_the_device() {
        // Nothing to validate against without an adapter.
        let Ok((device, _queue)) = request_device() else {
            return;
        };

        assert!(validate_shader(&device, "chunk", include_str!("chunk.wgsl")).is_ok());
        assert!(validate_shader(&device, "height", GpuHeightSource::DEFAULT_SHADER).is_ok());

        match validate_shader(&device, "broken", "fn vertex_main( -> {") {
            Err(GpuError::InvalidShader { label, .. }) => assert_eq!(label, "broken"),
            other => panic!("expected a validation error, got {other:?}"),
        }
    }
}
