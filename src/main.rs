//! # Voxel Terrain Demo
//!
//! A headless driver for the voxel world. It loads the spawn region, walks an
//! observer across the world for a number of frames, digs one block in front of
//! it, and logs the streaming state along the way.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- [seed] [config.json]
//! ```

use cgmath::{Point3, Vector3};
use log::info;

use voxel_terrain::{EngineState, VoxelError, World, WorldConfig, WorldEvent, WorldSeed};

/// Frames simulated by the demo.
const FRAMES: u32 = 600;
/// Frames between two debug snapshots.
const SNAPSHOT_INTERVAL: u32 = 60;
/// Distance walked per frame, in voxels.
const WALK_SPEED: f32 = 0.5;
/// How far the observer can reach to dig, in voxels.
const REACH: f32 = 8.0;
/// Distance between samples along the pick ray, in voxels.
const PICK_STEP: f32 = 0.1;

fn main() -> Result<(), VoxelError> {
    voxel_terrain::init_logger();

    let mut args = std::env::args().skip(1);
    let seed = WorldSeed::new(args.next());
    let config = match args.next() {
        Some(path) => WorldConfig::load(path)?,
        None => WorldConfig {
            world_size_in_chunks: 24,
            ..WorldConfig::default()
        },
    };

    let world = World::from_defaults(config, seed)?;
    let mut engine = EngineState::new(world);
    let mut observer = engine.world.spawn_position();
    info!("Spawned at {:?}", observer);

    // Walk in a random direction, turning whenever a chunk border is crossed.
    let mut heading = random_heading(&mut engine);
    let mut meshes_uploaded = 0;
    for frame in 0..FRAMES {
        observer = clamp_to_world(observer + heading * WALK_SPEED, engine.world.config());
        let events = engine.update(observer);
        if events
            .iter()
            .any(|event| matches!(event, WorldEvent::ObserverChunkChanged { .. }))
        {
            heading = random_heading(&mut engine);
        }

        for coord in engine.take_dirty_meshes() {
            if let Some(chunk) = engine.world.chunk(coord) {
                let vertices = chunk.mesh().interleaved();
                let _bytes: &[u8] = bytemuck::cast_slice(&vertices);
                meshes_uploaded += 1;
            }
        }

        if frame % SNAPSHOT_INTERVAL == 0 {
            info!("Frame {}: {}", frame, engine.world.debug_snapshot());
        }
    }

    let eye = observer + Vector3::new(0.0, 1.6, 0.0);
    match engine
        .world
        .pick_voxel(eye, Vector3::new(heading.x, -1.0, heading.z), REACH, PICK_STEP)
    {
        Some(hit) => {
            let air = engine.world.generator().blocks().air;
            engine.world.edit_voxel(hit.voxel, air)?;
            info!("Dug voxel {:?}", hit.voxel);
        }
        None => info!("Nothing within reach to dig"),
    }
    engine.update(observer);
    meshes_uploaded += engine.take_dirty_meshes().len();

    info!(
        "Done after {} frames, {} mesh uploads: {}",
        engine.tick(),
        meshes_uploaded,
        engine.world.debug_snapshot()
    );
    Ok(())
}

/// A horizontal unit vector drawn from the world's RNG.
fn random_heading(engine: &mut EngineState) -> Vector3<f32> {
    let angle = engine.world.rng_mut().f32() * std::f32::consts::TAU;
    Vector3::new(angle.cos(), 0.0, angle.sin())
}

/// Keeps the observer inside the world's horizontal bounds.
fn clamp_to_world(position: Point3<f32>, config: &WorldConfig) -> Point3<f32> {
    let limit = config.world_size_in_voxels() as f32 - 1.0;
    Point3::new(position.x.clamp(0.0, limit), position.y, position.z.clamp(0.0, limit))
}
