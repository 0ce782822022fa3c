//! # Voxel World
//!
//! This module contains the voxel side of the engine: what blocks exist, how
//! terrain is generated, how voxels are stored, and how chunks are streamed
//! around an observer.
//!
//! ## Architecture
//!
//! * **Block**: the block catalog and the six fixed face directions
//! * **Generation**: biome profiles, noise sampling and the terrain generator
//! * **Chunk**: a dense column of voxels together with its mesh
//! * **World**: the chunk grid, the active set and the initialization queue
//! * **Events**: the outbox the world reports state changes through
//!
//! ## Data Flow
//!
//! 1. The world decides which chunks must exist around the observer
//! 2. New chunks are queued and, one per tick, filled from the terrain generator
//! 3. Each filled chunk is meshed, reading across seams through the world
//! 4. Edits rewrite voxels and rebuild the affected meshes
//!
//! Everything runs on the caller's thread; nothing here blocks or spawns.

pub mod block;
pub mod chunk;
pub mod events;
pub mod generation;
pub mod world;
