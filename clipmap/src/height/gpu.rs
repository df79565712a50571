use ahash::HashMap;
use glam::{UVec2, Vec2};
use renderer::{TextureDescriptor, TextureId};
use tracing::{info, warn};

use crate::error::ClipmapError;

use super::{HeightParams, HeightSource};

const WORKGROUP_SIZE: u32 = 8;

#[derive(Clone, Copy, bytemuck::NoUninit)]
#[repr(C)]
struct HeightUniform {
    origin: [f32; 2],
    noise_frequency: f32,
    _padding: f32,
}

struct HeightTarget {
    size: UVec2,
    _texture: wgpu::Texture,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Fills height textures with a compute shader.
///
/// The shader gets the level's origin and noise frequency as a uniform at `@group(0) @binding(0)`
/// and writes to a `texture_storage_2d<rgba16float, write>` at `@binding(1)`. Work is submitted to
/// the queue and never waited on.
pub struct GpuHeightSource {
    device: wgpu::Device,
    queue: wgpu::Queue,
    bind_group_layout: wgpu::BindGroupLayout,
    pipeline: wgpu::ComputePipeline,
    targets: HashMap<TextureId, HeightTarget>,
}

impl GpuHeightSource {
    /// WGSL source of the default fractal value noise generator.
    pub const DEFAULT_SHADER: &'static str = include_str!("height.wgsl");

    pub fn new(device: wgpu::Device, queue: wgpu::Queue) -> Result<Self, ClipmapError> {
        Self::with_shader(device, queue, Self::DEFAULT_SHADER)
    }

    pub fn with_shader(
        device: wgpu::Device,
        queue: wgpu::Queue,
        source: &str,
    ) -> Result<Self, ClipmapError> {
        if source.trim().is_empty() {
            return Err(ClipmapError::EmptyShaderSource(
                "height_generation".to_string(),
            ));
        }

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("height_generation_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::StorageTexture {
                        access: wgpu::StorageTextureAccess::WriteOnly,
                        format: TextureDescriptor::HEIGHT_MAP_FORMAT,
                        view_dimension: wgpu::TextureViewDimension::D2,
                    },
                    count: None,
                },
            ],
        });

        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let pipeline = {
            let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("height_generation"),
                source: wgpu::ShaderSource::Wgsl(source.into()),
            });

            let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("height_generation_pipeline_layout"),
                bind_group_layouts: &[&bind_group_layout],
                push_constant_ranges: &[],
            });

            device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
                label: Some("height_generation_compute_pipeline"),
                layout: Some(&layout),
                module: &module,
                entry_point: Some("main"),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                cache: None,
            })
        };

        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            return Err(ClipmapError::InvalidShader {
                label: "height_generation".to_string(),
                message: err.to_string(),
            });
        }

        info!("Height generation pipeline created");

        Ok(Self {
            device,
            queue,
            bind_group_layout,
            pipeline,
            targets: HashMap::default(),
        })
    }
}

impl HeightSource for GpuHeightSource {
    fn allocate(&mut self, texture: TextureId, size: UVec2) {
        let label = format!("height_texture_{:?}", texture.0.into_raw_parts());

        let gpu_texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(&label),
            size: wgpu::Extent3d {
                width: size.x,
                height: size.y,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TextureDescriptor::HEIGHT_MAP_FORMAT,
            usage: wgpu::TextureUsages::STORAGE_BINDING | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });

        let view = gpu_texture.create_view(&wgpu::TextureViewDescriptor::default());

        let uniform_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("height_uniform_buffer"),
            size: std::mem::size_of::<HeightUniform>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("height_generation_bind_group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
            ],
        });

        self.targets.insert(
            texture,
            HeightTarget {
                size,
                _texture: gpu_texture,
                uniform_buffer,
                bind_group,
            },
        );
    }

    fn regenerate(&mut self, texture: TextureId, params: &HeightParams) {
        let Some(target) = self.targets.get(&texture) else {
            warn!("Regenerating heights for a texture that was never allocated ({texture:?})");
            return;
        };

        let uniform = HeightUniform {
            origin: Vec2::new(params.origin.x, params.origin.y).to_array(),
            noise_frequency: params.noise_frequency,
            _padding: 0.0,
        };
        self.queue
            .write_buffer(&target.uniform_buffer, 0, bytemuck::bytes_of(&uniform));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("height_generation_command_encoder"),
            });

        {
            let mut compute_pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("height_generation_compute_pass"),
                timestamp_writes: None,
            });

            compute_pass.set_pipeline(&self.pipeline);
            compute_pass.set_bind_group(0, &target.bind_group, &[]);
            compute_pass.dispatch_workgroups(
                target.size.x.div_ceil(WORKGROUP_SIZE),
                target.size.y.div_ceil(WORKGROUP_SIZE),
                1,
            );
        }

        self.queue.submit(std::iter::once(encoder.finish()));
    }

    fn release(&mut self, texture: TextureId) {
        self.targets.remove(&texture);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_matches_shader_layout() {
        // vec2 + f32 + padding, 16 byte aligned as a uniform.
        assert_eq!(std::mem::size_of::<HeightUniform>(), 16);
    }

    #[test]
    fn default_shader_has_entry_point() {
        assert!(GpuHeightSource::DEFAULT_SHADER.contains("fn main("));
        assert!(GpuHeightSource::DEFAULT_SHADER.contains("rgba16float"));
    }
}
