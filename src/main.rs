use clap::Parser;
use clipmap::{ClipmapTerrain, HeightSource, NoHeightSource, PieceKind, TerrainConfig};
use glam::Vec3;
use renderer::{Renderer, ShaderId};
use strum::IntoEnumIterator;
use tracing::{debug, error, info};

mod gpu;

#[derive(clap::Parser)]
struct Opts {
    /// Vertices along each edge of a chunk.
    #[arg(long, default_value_t = 16)]
    chunk_resolution: u32,

    /// Rings around the center.
    #[arg(long, default_value_t = 3)]
    levels: u32,

    /// Frames to simulate.
    #[arg(long, default_value_t = 240)]
    frames: u32,

    /// World units the viewpoint travels each frame.
    #[arg(long, default_value_t = 0.75)]
    speed: f32,

    /// Generate heights with a compute shader on a headless device.
    #[arg(long)]
    gpu: bool,
}

/// A slow outward spiral, so that every level crosses cell boundaries along both axes and in
/// every quadrant.
fn viewpoint_at(frame: u32, speed: f32) -> Vec3 {
    let distance = frame as f32 * speed;
    let angle = distance * 0.05;
    let radius = distance * 0.5;
    Vec3::new(angle.cos() * radius, 10.0, angle.sin() * radius)
}

fn create_gpu_height_source(
    renderer: &Renderer,
    shader: ShaderId,
) -> Result<clipmap::GpuHeightSource, gpu::GpuError> {
    let label = renderer.shader_label(shader).unwrap_or("chunk");
    let source = renderer.shader_source(shader).unwrap_or_default();
    gpu::create_height_source(label, source)
}

fn log_pieces(renderer: &Renderer, terrain: &ClipmapTerrain) {
    for kind in PieceKind::iter() {
        let id = terrain.pieces().piece(kind).mesh;
        let (Some(label), Some(mesh)) = (renderer.mesh_label(id), renderer.mesh(id)) else {
            continue;
        };
        let size = mesh.bounds().map(|bounds| bounds.size()).unwrap_or_default();
        debug!(
            "Piece {label}: {} vertices, {} triangles, {size}",
            mesh.vertices.len(),
            mesh.triangle_count()
        );
    }
}

fn main() {
    tracing_subscriber::fmt().init();

    let opts = Opts::parse();

    let config = TerrainConfig::default()
        .with_chunk_resolution(opts.chunk_resolution)
        .with_level_count(opts.levels);

    let mut renderer = Renderer::new();
    let shader = renderer.create_shader("chunk", include_str!("chunk.wgsl"));

    let heights: Box<dyn HeightSource> = if opts.gpu {
        match create_gpu_height_source(&renderer, shader) {
            Ok(heights) => Box::new(heights),
            Err(err) => {
                error!("Could not create GPU height source! - {}", err);
                std::process::exit(1);
            }
        }
    } else {
        Box::new(NoHeightSource)
    };

    let mut terrain = match ClipmapTerrain::new(&mut renderer, config, shader, heights) {
        Ok(terrain) => terrain,
        Err(err) => {
            error!("Could not create terrain! - {}", err);
            std::process::exit(1);
        }
    };

    log_pieces(&renderer, &terrain);

    let mut offsets = terrain.offsets();
    let mut total_changed = 0;

    for frame in 0..opts.frames {
        let viewpoint = viewpoint_at(frame, opts.speed);
        terrain.update(&mut renderer, viewpoint);

        // Stand in for the per chunk shader properties.
        let changed = renderer.drain_changed_instances(|id, offset, size| {
            debug!("{id:?} _Offset: {offset} _Size: {size}");
        });
        total_changed += changed;

        let current = terrain.offsets();
        let moved = current
            .iter()
            .zip(offsets.iter())
            .filter(|(a, b)| a != b)
            .count();
        if moved > 0 {
            info!("Frame {frame}: viewpoint {viewpoint}, {moved} levels moved, offsets {current:?}");
        }
        offsets = current;
    }

    info!(
        "Simulated {} frames, {} instances, {} instance updates",
        opts.frames,
        terrain.instance_count(),
        total_changed
    );

    terrain.release(&mut renderer);
}
