//! # Engine State Module
//!
//! The per-frame driver of the voxel world.
//!
//! ## Key Components
//!
//! * `EngineState` - Owns the world and advances it once per frame
//! * `rendering` - Chunk meshing and the vertex format meshes are uploaded in
//! * `voxels` - Block catalog, terrain generation, chunks and chunk streaming
//!
//! ## Frame Loop
//!
//! A host calls [`EngineState::update`] once per frame with the observer's
//! position. That call moves the active region if the observer crossed a chunk
//! border and then initializes at most one queued chunk, so a long jump costs a
//! few frames of streaming instead of one long stall. Meshes that changed are
//! collected for the host, which uploads them whenever it likes through
//! [`EngineState::take_dirty_meshes`].

use bitvec::prelude::BitVec;
use cgmath::Point3;
use log::debug;

use voxels::{chunk::ChunkCoord, events::WorldEvent, world::World};

pub mod rendering;
pub mod voxels;

/// The main state container for the voxel engine.
///
/// # Examples
///
/// ```
/// use voxel_terrain::{EngineState, World, WorldConfig, WorldSeed};
///
/// let config = WorldConfig {
///     world_size_in_chunks: 4,
///     view_distance_in_chunks: 1,
///     ..WorldConfig::default()
/// };
/// let world = World::from_defaults(config, WorldSeed::new(Some("docs".to_string())))?;
/// let mut engine = EngineState::new(world);
///
/// // Main loop
/// let observer = engine.world.spawn_position();
/// engine.update(observer);
/// for coord in engine.take_dirty_meshes() {
///     let _vertices = engine.world.chunk(coord).map(|chunk| chunk.mesh().interleaved());
/// }
/// # Ok::<(), voxel_terrain::VoxelError>(())
/// ```
pub struct EngineState {
    /// The voxel world
    pub world: World,
    /// Number of updates run so far
    tick: u64,
    /// Chunks whose meshes changed since the host last asked
    dirty_meshes: Vec<ChunkCoord>,
    /// Slots currently in `dirty_meshes`
    dirty_slots: BitVec,
}

impl EngineState {
    /// Creates the engine state and loads the spawn region.
    ///
    /// # Arguments
    ///
    /// * `world` - A freshly created world
    ///
    /// # Returns
    ///
    /// An `EngineState` whose spawn region is active and meshed, with every spawn
    /// chunk reported as dirty
    pub fn new(mut world: World) -> Self {
        world.load_spawn_region();
        let slot_count = (world.config().world_size_in_chunks * world.config().world_size_in_chunks) as usize;

        let mut engine_state = EngineState {
            world,
            tick: 0,
            dirty_meshes: Vec::new(),
            dirty_slots: BitVec::repeat(false, slot_count),
        };
        engine_state.collect_events();
        engine_state
    }

    /// Advances the world by one frame.
    ///
    /// Tracks the observer and initializes exactly one queued chunk, if any is
    /// waiting.
    ///
    /// # Arguments
    ///
    /// * `observer_position` - Position of the observer in world units
    ///
    /// # Returns
    ///
    /// The world events produced since the previous update, oldest first
    pub fn update(&mut self, observer_position: Point3<f32>) -> Vec<WorldEvent> {
        self.tick += 1;
        self.world.update_observer(observer_position);
        if let Some(coord) = self.world.process_next_chunk() {
            debug!("Tick {}: initialized chunk {}", self.tick, coord);
        }
        self.collect_events()
    }

    fn collect_events(&mut self) -> Vec<WorldEvent> {
        let events = self.world.drain_events();
        for event in &events {
            let WorldEvent::MeshRebuilt(coord) = event else {
                continue;
            };
            if let Some(index) = self.world.chunk_index(*coord) {
                if !self.dirty_slots[index] {
                    self.dirty_slots.set(index, true);
                    self.dirty_meshes.push(*coord);
                }
            }
        }
        events
    }

    /// Takes the chunks whose meshes changed since the last call.
    ///
    /// Edits made directly on [`EngineState::world`] are picked up by the next
    /// [`EngineState::update`].
    pub fn take_dirty_meshes(&mut self) -> Vec<ChunkCoord> {
        let dirty = std::mem::take(&mut self.dirty_meshes);
        for coord in &dirty {
            if let Some(index) = self.world.chunk_index(*coord) {
                self.dirty_slots.set(index, false);
            }
        }
        dirty
    }

    /// Number of updates run so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{WorldConfig, WorldSeed};
    use crate::engine_state::voxels::{block::BlockCatalog, generation::biome::BiomeProfile};

    fn engine(world_size_in_chunks: i32) -> EngineState {
        let config = WorldConfig {
            chunk_width: 5,
            chunk_height: 10,
            world_size_in_chunks,
            view_distance_in_chunks: 1,
            texture_atlas_size_in_blocks: 4,
        };
        let catalog = BlockCatalog::default_catalog(4).unwrap();
        let world = World::new(
            config,
            catalog,
            BiomeProfile::flat("flat", 1),
            WorldSeed::new(Some("engine".to_string())),
        );
        EngineState::new(world)
    }

    #[test]
    fn test_spawn_meshes_are_dirty() {
        let mut engine = engine(4);
        let mut dirty = engine.take_dirty_meshes();
        dirty.sort_by_key(|coord| (coord.x, coord.z));
        assert_eq!(
            dirty,
            vec![
                ChunkCoord::new(1, 1),
                ChunkCoord::new(1, 2),
                ChunkCoord::new(2, 1),
                ChunkCoord::new(2, 2),
            ]
        );
        assert!(engine.take_dirty_meshes().is_empty());
    }

    #[test]
    fn test_update_initializes_one_chunk_per_tick() {
        let mut engine = engine(10);
        engine.take_dirty_meshes();

        // Jump from chunk (5, 5) to (2, 5): a whole new 3x3 region.
        let target = Point3::new(12.5, 3.0, 27.5);
        let events = engine.update(target);
        assert_eq!(engine.world.pending_chunk_count(), 8);
        assert!(events.contains(&WorldEvent::ChunkInitialized(ChunkCoord::new(1, 4))));

        for remaining in (0..8).rev() {
            engine.update(target);
            assert_eq!(engine.world.pending_chunk_count(), remaining);
        }
        assert_eq!(engine.take_dirty_meshes().len(), 9);
        assert_eq!(engine.tick(), 9);
    }

    #[test]
    fn test_direct_edits_become_dirty_on_next_update() {
        let mut engine = engine(4);
        engine.take_dirty_meshes();

        engine.world.edit_voxel(Point3::new(7, 1, 7), 0).unwrap();
        let observer = engine.world.spawn_position();
        engine.update(observer);
        assert_eq!(engine.take_dirty_meshes(), vec![ChunkCoord::new(1, 1)]);
    }

    #[test]
    fn test_repeated_rebuilds_are_reported_once() {
        let mut engine = engine(4);
        engine.take_dirty_meshes();

        let position = Point3::new(7, 1, 7);
        for _ in 0..3 {
            engine.world.edit_voxel(position, 0).unwrap();
            engine.world.edit_voxel(position, 3).unwrap();
        }
        let observer = engine.world.spawn_position();
        engine.update(observer);
        assert_eq!(engine.take_dirty_meshes(), vec![ChunkCoord::new(1, 1)]);

        // Taking the list clears it, so the chunk can become dirty again.
        engine.world.edit_voxel(position, 0).unwrap();
        engine.update(observer);
        assert_eq!(engine.take_dirty_meshes(), vec![ChunkCoord::new(1, 1)]);
        assert!(engine.take_dirty_meshes().is_empty());
    }
}
