use cgmath::Point3;

use voxel_terrain::{
    BiomeProfile, BlockCatalog, ChunkCoord, EngineState, World, WorldConfig, WorldEvent, WorldSeed,
};

fn small_config() -> WorldConfig {
    WorldConfig {
        chunk_width: 5,
        chunk_height: 10,
        world_size_in_chunks: 4,
        view_distance_in_chunks: 1,
        texture_atlas_size_in_blocks: 4,
    }
}

fn flat_world(config: WorldConfig) -> World {
    let catalog = BlockCatalog::default_catalog(config.texture_atlas_size_in_blocks).unwrap();
    World::new(
        config,
        catalog,
        BiomeProfile::flat("flat", 1),
        WorldSeed::new(Some("streaming".to_string())),
    )
}

#[test]
fn test_flat_column_block_sequence() {
    let world = flat_world(small_config());
    let catalog = world.catalog();
    let unbreakable = catalog.id_by_name("Unbreakable");
    let grass = catalog.id_by_name("Grass");
    let air = catalog.id_by_name("Air");

    let column: Vec<_> = (0..10)
        .map(|y| world.generator().generate_voxel(Point3::new(2, y, 2)))
        .collect();
    let mut expected = vec![unbreakable, grass];
    expected.extend(std::iter::repeat(air).take(8));
    assert_eq!(column, expected);
}

#[test]
fn test_populated_column_matches_generator() {
    let mut world = flat_world(small_config());
    world.load_spawn_region();

    for y in 0..10 {
        let position = Point3::new(7, y, 8);
        assert!(world.chunk_at(position).unwrap().is_voxel_map_populated());
        assert_eq!(
            world.voxel_id_at(position),
            world.generator().generate_voxel(position)
        );
    }
}

#[test]
fn test_every_chunk_initialized_after_n_ticks() {
    let config = WorldConfig {
        world_size_in_chunks: 12,
        ..small_config()
    };
    let world = flat_world(config);
    let mut engine = EngineState::new(world);

    // From chunk (6, 6) to (2, 9): nine chunks the observer has never been near.
    let target = Point3::new(12.0, 2.0, 47.0);
    let mut initialized = Vec::new();
    for _ in 0..9 {
        for event in engine.update(target) {
            if let WorldEvent::ChunkInitialized(coord) = event {
                initialized.push(coord);
            }
        }
    }

    assert_eq!(engine.world.pending_chunk_count(), 0);
    assert_eq!(initialized.len(), 9);
    for coord in engine.world.active_chunks() {
        assert!(initialized.contains(coord));
        assert!(engine.world.chunk(*coord).unwrap().is_voxel_map_populated());
    }
    assert_eq!(engine.world.player_chunk(), ChunkCoord::new(2, 9));
    assert_eq!(engine.world.last_player_chunk(), ChunkCoord::new(6, 6));
}

#[test]
fn test_digging_through_seam_keeps_meshes_consistent() {
    let mut world = flat_world(small_config());
    world.load_spawn_region();
    world.drain_events();

    // Voxel (9, 1, 9) is a corner of chunk (1, 1): it borders (2, 1) and (1, 2).
    world.edit_voxel(Point3::new(9, 1, 9), 0).unwrap();
    let rebuilt: Vec<_> = world
        .drain_events()
        .into_iter()
        .filter_map(|event| match event {
            WorldEvent::MeshRebuilt(coord) => Some(coord),
            _ => None,
        })
        .collect();
    assert_eq!(
        rebuilt,
        vec![ChunkCoord::new(1, 1), ChunkCoord::new(1, 2), ChunkCoord::new(2, 1)]
    );

    for coord in [ChunkCoord::new(1, 1), ChunkCoord::new(1, 2), ChunkCoord::new(2, 1)] {
        let chunk = world.chunk(coord).unwrap();
        let fresh = chunk.build_mesh(world.catalog(), &world, world.config().texture_atlas_size_in_blocks);
        assert_eq!(chunk.mesh(), &fresh);
    }
}
