//! # World Module
//!
//! This module provides the `World` struct, which owns every chunk of the voxel
//! world and streams them in and out of visibility as an observer moves.
//!
//! ## Architecture
//!
//! The world is finite and square, so chunks live in a pre-allocated grid indexed
//! by chunk coordinate rather than in a hash map. A slot is empty until its
//! coordinate first comes within view distance of the observer. The outermost
//! ring of the grid is never activated, which keeps every active chunk's
//! neighbours addressable.
//!
//! ## Streaming
//!
//! Each chunk goes through `Absent -> Populated-Inactive -> Active <-> Inactive`.
//! When the observer changes chunk, [`World::update_active_region`] diffs the
//! desired region against the current active set:
//!
//! - empty slots get a new chunk, which is queued for initialization
//! - inactive chunks are reactivated as they are, with no work queued
//! - chunks that fell out of the region are deactivated
//!
//! Initialization (populate + mesh) is the expensive part, so it never happens
//! inside the diff. Queued chunks are drained strictly first in, first out, one
//! per call to [`World::process_next_chunk`], and the caller decides how often
//! that is. Until its turn comes a queued chunk reads through to the terrain
//! generator.
//!
//! ## Edits
//!
//! An edit rewrites one voxel, rebuilds the owning chunk's mesh from scratch and,
//! if the voxel sits on a seam, rebuilds the neighbour across that seam too.

use std::collections::VecDeque;

use bitvec::prelude::BitVec;
use cgmath::{InnerSpace, Point3, Vector3};
use log::{debug, info, trace, warn};

use crate::config::{WorldConfig, WorldSeed};
use crate::engine_state::rendering::meshing::VoxelQuery;
use crate::error::VoxelError;

use super::block::{BlockCatalog, BlockId};
use super::chunk::{voxel_position, Chunk, ChunkCoord};
use super::events::{DebugSnapshot, WorldEvent};
use super::generation::{biome::BiomeProfile, TerrainGenerator};

/// Events kept in the outbox before the oldest start being discarded.
pub const MAX_PENDING_EVENTS: usize = 4096;

/// A voxel found by [`World::pick_voxel`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VoxelHit {
    /// The first solid voxel along the ray
    pub voxel: Point3<i32>,
    /// The last empty voxel sampled before it, where a placed block would go.
    /// `None` when the very first sample was already solid.
    pub previous: Option<Point3<i32>>,
}

/// The voxel world and its chunk streaming state.
pub struct World {
    /// World and chunk dimensions
    config: WorldConfig,
    /// Block definitions
    catalog: BlockCatalog,
    /// Source of voxels for chunks that have not been populated
    generator: TerrainGenerator,
    /// Seed of this world
    seed: WorldSeed,
    /// Randomness for everything except terrain
    rng: fastrand::Rng,
    /// Chunk slots, indexed by [`World::chunk_index`]
    chunks: Vec<Option<Chunk>>,
    /// Coordinates of the chunks currently visible
    active_chunks: Vec<ChunkCoord>,
    /// Chunks waiting for populate + mesh, oldest first
    init_queue: VecDeque<ChunkCoord>,
    /// Slots currently in `init_queue`
    queued: BitVec,
    /// Chunk the observer is in
    player_chunk: ChunkCoord,
    /// Chunk the observer was in before its last border crossing
    last_player_chunk: ChunkCoord,
    /// Outbox of state changes, drained by the host
    events: VecDeque<WorldEvent>,
    /// Events discarded because the outbox was full
    dropped_events: usize,
}

impl World {
    /// Creates a world with no chunks allocated.
    ///
    /// # Arguments
    ///
    /// * `config` - World and chunk dimensions; invalid values are replaced
    /// * `catalog` - Block definitions
    /// * `biome` - Terrain shape, validated against `catalog`
    /// * `seed` - World seed
    pub fn new(
        config: WorldConfig,
        catalog: BlockCatalog,
        biome: BiomeProfile,
        seed: WorldSeed,
    ) -> Self {
        let config = config.sanitized();
        let generator = TerrainGenerator::new(&config, &catalog, biome);
        let slot_count = (config.world_size_in_chunks * config.world_size_in_chunks) as usize;
        let spawn_chunk = Self::centre_chunk(&config);

        info!(
            "Created world with seed {}: {}x{} chunks of {}x{}x{} voxels, biome {}",
            seed.as_str(),
            config.world_size_in_chunks,
            config.world_size_in_chunks,
            config.chunk_width,
            config.chunk_height,
            config.chunk_width,
            generator.biome().name
        );

        World {
            rng: seed.rng(),
            seed,
            catalog,
            generator,
            chunks: std::iter::repeat_with(|| None).take(slot_count).collect(),
            active_chunks: Vec::new(),
            init_queue: VecDeque::new(),
            queued: BitVec::repeat(false, slot_count),
            player_chunk: spawn_chunk,
            last_player_chunk: spawn_chunk,
            events: VecDeque::new(),
            dropped_events: 0,
            config,
        }
    }

    /// Creates a world from the bundled block catalog and biome.
    pub fn from_defaults(config: WorldConfig, seed: WorldSeed) -> Result<Self, VoxelError> {
        let catalog = BlockCatalog::default_catalog(config.texture_atlas_size_in_blocks)?;
        let biome = BiomeProfile::default_biome()?;
        Ok(Self::new(config, catalog, biome, seed))
    }

    fn centre_chunk(config: &WorldConfig) -> ChunkCoord {
        let centre = config.world_size_in_voxels() / 2;
        ChunkCoord::from_voxel(Point3::new(centre, 0, centre), config.chunk_width)
    }

    /// World and chunk dimensions.
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Block definitions.
    pub fn catalog(&self) -> &BlockCatalog {
        &self.catalog
    }

    /// The terrain generator.
    pub fn generator(&self) -> &TerrainGenerator {
        &self.generator
    }

    /// Seed of this world.
    pub fn seed(&self) -> &WorldSeed {
        &self.seed
    }

    /// Seeded randomness for gameplay; terrain does not draw from it.
    pub fn rng_mut(&mut self) -> &mut fastrand::Rng {
        &mut self.rng
    }

    /// Chunk the observer is in.
    pub fn player_chunk(&self) -> ChunkCoord {
        self.player_chunk
    }

    /// Chunk the observer was in before its last border crossing.
    pub fn last_player_chunk(&self) -> ChunkCoord {
        self.last_player_chunk
    }

    /// Coordinates of the visible chunks.
    pub fn active_chunks(&self) -> &[ChunkCoord] {
        &self.active_chunks
    }

    /// Number of visible chunks.
    pub fn active_chunk_count(&self) -> usize {
        self.active_chunks.len()
    }

    /// Number of chunks waiting for initialization.
    pub fn pending_chunk_count(&self) -> usize {
        self.init_queue.len()
    }

    /// Whether a chunk coordinate may become active.
    ///
    /// The outermost ring of the grid is excluded so that every active chunk has
    /// neighbours on all four sides.
    pub fn is_chunk_in_world(&self, coord: ChunkCoord) -> bool {
        let last = self.config.world_size_in_chunks - 1;
        coord.x > 0 && coord.x < last && coord.z > 0 && coord.z < last
    }

    /// Slot of a chunk coordinate in the grid, `None` outside the grid.
    ///
    /// Slots run from zero to `world_size_in_chunks²`, so they can key flat
    /// per-chunk tables.
    pub fn chunk_index(&self, coord: ChunkCoord) -> Option<usize> {
        let size = self.config.world_size_in_chunks;
        if (0..size).contains(&coord.x) && (0..size).contains(&coord.z) {
            Some((coord.x * size + coord.z) as usize)
        } else {
            None
        }
    }

    /// The chunk at a chunk coordinate, if it has been allocated.
    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunk_index(coord)
            .and_then(|index| self.chunks[index].as_ref())
    }

    /// The chunk owning a world voxel position, if it has been allocated.
    pub fn chunk_at(&self, position: Point3<i32>) -> Option<&Chunk> {
        self.chunk(ChunkCoord::from_voxel(position, self.config.chunk_width))
    }

    /// Whether a chunk is allocated but still waiting in the initialization queue.
    pub fn is_chunk_queued(&self, coord: ChunkCoord) -> bool {
        self.chunk_index(coord)
            .is_some_and(|index| self.queued[index])
    }

    /// Block id at a world voxel position.
    ///
    /// Populated chunks answer from their voxel map; anything else is asked of the
    /// terrain generator. Positions outside the world are air.
    pub fn voxel_id_at(&self, position: Point3<i32>) -> BlockId {
        if !self.generator.is_voxel_in_world(position) {
            return self.generator.blocks().air;
        }

        self.chunk_at(position)
            .filter(|chunk| chunk.is_voxel_map_populated())
            .and_then(|chunk| chunk.voxel_at(position).ok())
            .unwrap_or_else(|| self.generator.generate_voxel(position))
    }

    /// Whether the voxel at a world position is solid. Outside the world it is not.
    pub fn check_solid_at(&self, position: Point3<i32>) -> bool {
        self.catalog.is_solid(self.voxel_id_at(position))
    }

    /// Whether the voxel at a world position lets faces behind it show.
    pub fn check_transparent_at(&self, position: Point3<i32>) -> bool {
        self.catalog.is_transparent(self.voxel_id_at(position))
    }

    /// Tracks the observer, updating the active region when it crosses into
    /// another chunk.
    ///
    /// # Returns
    ///
    /// `true` if the observer changed chunk
    pub fn update_observer(&mut self, position: Point3<f32>) -> bool {
        let coord = ChunkCoord::from_world_position(position, self.config.chunk_width);
        if coord == self.player_chunk {
            return false;
        }

        info!("Observer moved from chunk {} to {}", self.player_chunk, coord);
        self.last_player_chunk = self.player_chunk;
        self.player_chunk = coord;
        self.emit(WorldEvent::ObserverChunkChanged {
            from: self.last_player_chunk,
            to: coord,
        });

        self.update_active_region(coord);
        true
    }

    fn is_chunk_desired(&self, coord: ChunkCoord, observer: ChunkCoord) -> bool {
        coord.distance(&observer) <= self.config.view_distance_in_chunks && self.is_chunk_in_world(coord)
    }

    /// Makes exactly the chunks within view distance of `observer` active.
    ///
    /// New chunks are allocated and queued; chunks that already exist are
    /// reactivated without any work being queued; chunks that left the region are
    /// deactivated.
    pub fn update_active_region(&mut self, observer: ChunkCoord) {
        let view_distance = self.config.view_distance_in_chunks;
        let previously_active = std::mem::take(&mut self.active_chunks);

        // Clipped to the activatable part of the grid, 1..=size-2.
        let last = self.config.world_size_in_chunks - 2;
        let clip = |centre: i32| {
            centre.saturating_sub(view_distance).max(1)..=centre.saturating_add(view_distance).min(last)
        };

        for x in clip(observer.x) {
            for z in clip(observer.z) {
                let coord = ChunkCoord::new(x, z);
                let Some(index) = self.chunk_index(coord) else {
                    continue;
                };

                match self.chunks[index].as_mut() {
                    Some(chunk) => {
                        if !chunk.is_active() {
                            chunk.set_active(true);
                            debug!("Reactivated chunk {}", coord);
                            self.emit(WorldEvent::ChunkActivated(coord));
                        }
                    }
                    None => {
                        let mut chunk = Chunk::new(coord, &self.config);
                        chunk.set_active(true);
                        self.chunks[index] = Some(chunk);
                        self.enqueue(coord, index);
                        self.emit(WorldEvent::ChunkActivated(coord));
                    }
                }
                self.active_chunks.push(coord);
            }
        }

        for coord in previously_active {
            if self.is_chunk_desired(coord, observer) {
                continue;
            }
            if let Some(chunk) = self
                .chunk_index(coord)
                .and_then(|index| self.chunks[index].as_mut())
            {
                chunk.set_active(false);
                debug!("Deactivated chunk {}", coord);
                self.emit(WorldEvent::ChunkDeactivated(coord));
            }
        }

        debug!(
            "Active region around {}: {} active, {} pending",
            observer,
            self.active_chunks.len(),
            self.init_queue.len()
        );
    }

    fn enqueue(&mut self, coord: ChunkCoord, index: usize) {
        if self.queued[index] {
            return;
        }
        self.queued.set(index, true);
        self.init_queue.push_back(coord);
        debug!("Queued chunk {} for initialization", coord);
        self.emit(WorldEvent::ChunkQueued(coord));
    }

    /// Initializes the oldest queued chunk: populates its voxel map and builds
    /// its mesh.
    ///
    /// # Returns
    ///
    /// The chunk initialized, or `None` if the queue was empty
    pub fn process_next_chunk(&mut self) -> Option<ChunkCoord> {
        let coord = self.init_queue.pop_front()?;
        let index = self.chunk_index(coord)?;
        self.queued.set(index, false);

        if let Some(chunk) = self.chunks[index].as_mut() {
            chunk.populate_voxel_map(&self.generator);
        }
        self.rebuild_mesh(coord);

        debug!(
            "Initialized chunk {}, {} still pending",
            coord,
            self.init_queue.len()
        );
        self.emit(WorldEvent::ChunkInitialized(coord));
        Some(coord)
    }

    /// Rebuilds a populated chunk's mesh from scratch.
    ///
    /// # Returns
    ///
    /// `false` if there is no populated chunk at `coord`
    pub fn rebuild_mesh(&mut self, coord: ChunkCoord) -> bool {
        let Some(index) = self.chunk_index(coord) else {
            return false;
        };

        let mesh = match &self.chunks[index] {
            Some(chunk) if chunk.is_voxel_map_populated() => chunk.build_mesh(
                &self.catalog,
                &*self,
                self.config.texture_atlas_size_in_blocks,
            ),
            _ => return false,
        };

        debug!("Rebuilt mesh for chunk {}: {} faces", coord, mesh.face_count());
        if let Some(chunk) = self.chunks[index].as_mut() {
            chunk.set_mesh(mesh);
        }
        self.emit(WorldEvent::MeshRebuilt(coord));
        true
    }

    /// Allocates and populates the chunk at `coord` if needed, outside the queue.
    fn ensure_populated(&mut self, coord: ChunkCoord, index: usize) {
        let config = &self.config;
        let chunk = self.chunks[index].get_or_insert_with(|| Chunk::new(coord, config));
        if chunk.populate_voxel_map(&self.generator) {
            debug!("Populated chunk {} on demand", coord);
        }
    }

    /// Writes a block into the world.
    ///
    /// The owning chunk is populated first if it was not, so the edit cannot be
    /// overwritten later. Its mesh is then rebuilt, along with the mesh of every
    /// populated neighbour sharing a seam with the edited voxel.
    ///
    /// # Errors
    ///
    /// [`VoxelError::OutOfWorld`] outside the world volume,
    /// [`VoxelError::UnknownBlock`] for ids the catalog does not have.
    pub fn edit_voxel(&mut self, position: Point3<i32>, block: BlockId) -> Result<(), VoxelError> {
        if !self.generator.is_voxel_in_world(position) {
            return Err(VoxelError::OutOfWorld(position));
        }

        let coord = ChunkCoord::from_voxel(position, self.config.chunk_width);
        let index = self
            .chunk_index(coord)
            .ok_or(VoxelError::OutOfWorld(position))?;
        self.ensure_populated(coord, index);

        let seams = match self.chunks[index].as_mut() {
            Some(chunk) => chunk.edit_voxel(position, block, &self.catalog)?,
            None => return Err(VoxelError::OutOfWorld(position)),
        };
        trace!("Edited voxel {:?} to {}, seams {:?}", position, block, seams);
        self.emit(WorldEvent::VoxelEdited { position, block });

        self.rebuild_mesh(coord);
        for neighbour in seams {
            self.rebuild_mesh(neighbour);
        }
        Ok(())
    }

    /// Allocates, initializes and activates the region around the world centre
    /// in one go, without spreading it over ticks.
    ///
    /// # Returns
    ///
    /// The number of chunks initialized
    pub fn load_spawn_region(&mut self) -> usize {
        let spawn_chunk = Self::centre_chunk(&self.config);
        self.player_chunk = spawn_chunk;
        self.last_player_chunk = spawn_chunk;
        self.update_active_region(spawn_chunk);

        let mut initialized = 0;
        while self.process_next_chunk().is_some() {
            initialized += 1;
        }

        info!(
            "Loaded spawn region around chunk {}: {} chunks",
            spawn_chunk, initialized
        );
        initialized
    }

    /// Where the observer should start: the centre column of the world, standing
    /// on its surface.
    pub fn spawn_position(&self) -> Point3<f32> {
        let centre = self.config.world_size_in_voxels() / 2;
        let surface = self.generator.surface_height(centre, centre);
        let y = (surface + 1).min(self.config.chunk_height);
        Point3::new(centre as f32 + 0.5, y as f32, centre as f32 + 0.5)
    }

    /// Marches a ray in steps of `step` until it meets a solid voxel or passes
    /// `reach`.
    ///
    /// # Arguments
    ///
    /// * `origin` - Start of the ray, in world units
    /// * `direction` - Direction of the ray; need not be normalized
    /// * `reach` - Maximum distance travelled
    /// * `step` - Distance between samples
    pub fn pick_voxel(
        &self,
        origin: Point3<f32>,
        direction: Vector3<f32>,
        reach: f32,
        step: f32,
    ) -> Option<VoxelHit> {
        if step <= 0.0 || direction.magnitude2() == 0.0 {
            return None;
        }

        let direction = direction.normalize();
        let mut previous = None;
        let mut distance = step;
        while distance < reach {
            let voxel = voxel_position(origin + direction * distance);
            if self.check_solid_at(voxel) {
                return Some(VoxelHit { voxel, previous });
            }
            previous = Some(voxel);
            distance += step;
        }
        None
    }

    fn emit(&mut self, event: WorldEvent) {
        if self.events.len() == MAX_PENDING_EVENTS {
            if self.dropped_events == 0 {
                warn!("Event outbox is full, discarding the oldest events until it is drained");
            }
            self.events.pop_front();
            self.dropped_events += 1;
        }
        self.events.push_back(event);
    }

    /// Takes every event recorded since the last call, oldest first.
    ///
    /// Hosts driving the world directly must call this regularly. The outbox
    /// holds at most [`MAX_PENDING_EVENTS`]; past that the oldest events are
    /// discarded and counted by [`World::dropped_event_count`].
    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        if self.dropped_events > 0 {
            debug!("{} events discarded so far", self.dropped_events);
        }
        self.events.drain(..).collect()
    }

    /// Number of events discarded so far because the outbox was full.
    pub fn dropped_event_count(&self) -> usize {
        self.dropped_events
    }

    /// Summary of streaming state for a debug overlay.
    pub fn debug_snapshot(&self) -> DebugSnapshot {
        DebugSnapshot {
            pending_chunks: self.pending_chunk_count(),
            active_chunks: self.active_chunk_count(),
            player_chunk: self.player_chunk,
            last_player_chunk: self.last_player_chunk,
            biome_name: self.generator.biome().name.clone(),
            seed: self.seed.as_str().to_string(),
        }
    }
}

impl VoxelQuery for World {
    fn block_at(&self, position: Point3<i32>) -> BlockId {
        self.voxel_id_at(position)
    }
}
