//! Notifications the world leaves for whoever drives it.
//!
//! The world never calls out. Every state change a UI or renderer may care about
//! is appended to an outbox, and the host drains it once per frame with
//! [`World::drain_events`](super::world::World::drain_events).

use std::fmt;

use cgmath::Point3;

use super::block::BlockId;
use super::chunk::ChunkCoord;

/// A change in world state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorldEvent {
    /// The observer crossed into another chunk.
    ObserverChunkChanged {
        /// Chunk the observer left
        from: ChunkCoord,
        /// Chunk the observer entered
        to: ChunkCoord,
    },
    /// A chunk was allocated and is waiting for initialization.
    ChunkQueued(ChunkCoord),
    /// A chunk's voxel map was populated and its first mesh built.
    ChunkInitialized(ChunkCoord),
    /// A chunk became visible.
    ChunkActivated(ChunkCoord),
    /// A chunk was hidden. Its data is kept.
    ChunkDeactivated(ChunkCoord),
    /// A chunk's mesh was replaced and should be re-uploaded.
    MeshRebuilt(ChunkCoord),
    /// A voxel was overwritten.
    VoxelEdited {
        /// World voxel position
        position: Point3<i32>,
        /// The block now stored there
        block: BlockId,
    },
}

/// State summary for a debug overlay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DebugSnapshot {
    /// Chunks allocated but not yet initialized
    pub pending_chunks: usize,
    /// Chunks in the active set
    pub active_chunks: usize,
    /// Chunk the observer is in
    pub player_chunk: ChunkCoord,
    /// Chunk the observer was in before its last move across a chunk border
    pub last_player_chunk: ChunkCoord,
    /// Name of the biome in use
    pub biome_name: String,
    /// World seed
    pub seed: String,
}

impl fmt::Display for DebugSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "seed {} | biome {} | chunk {} (last {}) | active {} | pending {}",
            self.seed,
            self.biome_name,
            self.player_chunk,
            self.last_player_chunk,
            self.active_chunks,
            self.pending_chunks
        )
    }
}
