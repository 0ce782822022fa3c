#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Terrain
//!
//! A procedural voxel terrain engine: a finite world of chunk columns generated
//! from layered noise, meshed with per-face culling, and streamed in and out of
//! visibility around a moving observer.
//!
//! ## Key Modules
//!
//! * `config` - World dimensions and the world seed
//! * `error` - The crate error type
//! * `engine_state` - The per-frame driver, the voxel world and chunk meshing
//!
//! ## Architecture
//!
//! The engine follows a layered design:
//! * Terrain generation is a pure function from world position to block id
//! * Chunks store generated voxels densely and own the mesh built from them
//! * The world owns every chunk and decides which ones are visible
//! * Drawing is left to the host, which pulls changed meshes each frame
//!
//! ## Usage
//!
//! ```no_run
//! use voxel_terrain::{EngineState, World, WorldConfig, WorldSeed};
//!
//! voxel_terrain::init_logger();
//! let world = World::from_defaults(WorldConfig::default(), WorldSeed::new(None))?;
//! let mut engine = EngineState::new(world);
//! let observer = engine.world.spawn_position();
//! loop {
//!     engine.update(observer);
//!     for coord in engine.take_dirty_meshes() {
//!         // upload engine.world.chunk(coord) ...
//!         # let _ = coord;
//!     }
//! }
//! # Ok::<(), voxel_terrain::VoxelError>(())
//! ```
//!
//! ## Performance Considerations
//!
//! * Chunk slots live in a flat pre-allocated grid, so lookups are O(1)
//! * Voxels are one byte each and never regenerated once populated
//! * New chunks are initialized one per frame rather than all at once
//! * Deactivated chunks keep their data, so returning to them is free

pub mod config;
pub mod engine_state;
pub mod error;

pub use config::{WorldConfig, WorldSeed};
pub use engine_state::{
    rendering::{ChunkMesh, ChunkVertex},
    voxels::{
        block::{BlockCatalog, BlockId},
        chunk::{Chunk, ChunkCoord},
        events::{DebugSnapshot, WorldEvent},
        generation::{biome::BiomeProfile, TerrainGenerator},
        world::{VoxelHit, World},
    },
    EngineState,
};
pub use error::VoxelError;

/// Installs the `env_logger` backend for the `log` facade.
///
/// Output goes to stdout and is filtered by the `RUST_LOG` environment variable.
/// Call once, before anything logs.
pub fn init_logger() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();
}
