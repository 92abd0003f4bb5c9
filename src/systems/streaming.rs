use std::collections::HashMap;

use bevy::prelude::*;
use bevy::render::primitives::Aabb;
use bevy::tasks::{AsyncComputeTaskPool, Task};
use futures_lite::future;

use crate::components::PlayerController;
use crate::world::{
    build_chunk_mesh, generate_chunk, Chunk, ChunkCoord, VoxelWorld, RENDER_DISTANCE,
};

/// Marker for a chunk's scene entity.
#[derive(Component)]
pub struct TerrainChunk {
    pub coord: ChunkCoord,
}

/// Chunks whose block data changed this frame and need a full mesh rebuild.
#[derive(Component)]
pub struct NeedsRemesh;

/// In-flight generation request. Dropping the task cancels it, so despawning
/// this entity is the cancellation token.
#[derive(Component)]
pub struct ChunkTask {
    pub coord: ChunkCoord,
    pub task: Task<(Chunk, Option<Mesh>)>,
}

/// Scene entity per resident chunk, for despawning and remesh queueing.
#[derive(Resource, Default)]
pub struct ChunkEntities(pub HashMap<ChunkCoord, Entity>);

/// The single shared chunk material, created once at startup and reused by
/// every chunk entity.
#[derive(Resource)]
pub struct ChunkMaterial(pub Handle<StandardMaterial>);

fn spawn_chunk_entity(
    commands: &mut Commands,
    chunk_entities: &mut ChunkEntities,
    meshes: &mut Assets<Mesh>,
    material: &Handle<StandardMaterial>,
    coord: ChunkCoord,
    mesh: Option<Mesh>,
) {
    let mut entity = commands.spawn((
        TerrainChunk { coord },
        Transform::from_translation(coord.world_origin()),
    ));
    // Chunks with no visible faces legitimately carry no mesh components.
    if let Some(mesh) = mesh {
        entity.insert((Mesh3d(meshes.add(mesh)), MeshMaterial3d(material.clone())));
    }
    chunk_entities.0.insert(coord, entity.id());
}

fn despawn_chunk_entity(
    commands: &mut Commands,
    chunk_entities: &mut ChunkEntities,
    meshes: &mut Assets<Mesh>,
    mesh_handles: &Query<&Mesh3d, With<TerrainChunk>>,
    coord: ChunkCoord,
) {
    let Some(entity) = chunk_entities.0.remove(&coord) else {
        return;
    };
    // Release the mesh asset alongside the entity; removal is a no-op if
    // the handle is already gone.
    if let Ok(mesh) = mesh_handles.get(entity) {
        meshes.remove(&mesh.0);
    }
    commands.entity(entity).despawn();
}

/// Synchronous initial load: the full 3x3 neighborhood around the origin
/// chunk is generated, meshed, and registered before the first frame
/// renders.
pub fn setup_world(
    mut commands: Commands,
    mut world: ResMut<VoxelWorld>,
    mut chunk_entities: ResMut<ChunkEntities>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Face shading is baked into vertex colors, so the material is unlit.
    let material = materials.add(StandardMaterial {
        unlit: true,
        ..default()
    });
    commands.insert_resource(ChunkMaterial(material.clone()));

    let origin = ChunkCoord::new(0, 0);
    for dz in -1..=1 {
        for dx in -1..=1 {
            let coord = ChunkCoord::new(origin.x + dx, origin.z + dz);
            let chunk = generate_chunk(world.seed(), coord);
            let mesh = build_chunk_mesh(&chunk);
            spawn_chunk_entity(
                &mut commands,
                &mut chunk_entities,
                &mut meshes,
                &material,
                coord,
                mesh,
            );
            world.insert_chunk(chunk);
        }
    }
    info!("Initial 3x3 neighborhood loaded (seed {})", world.seed());
}

/// Per-frame streaming: request missing chunks in range on the compute task
/// pool, cancel requests that drifted out of range, evict chunks past the
/// hysteresis margin.
pub fn stream_chunks(
    mut commands: Commands,
    mut world: ResMut<VoxelWorld>,
    mut chunk_entities: ResMut<ChunkEntities>,
    mut meshes: ResMut<Assets<Mesh>>,
    player: Query<&Transform, With<PlayerController>>,
    pending: Query<(Entity, &ChunkTask)>,
    mesh_handles: Query<&Mesh3d, With<TerrainChunk>>,
) {
    let Ok(transform) = player.get_single() else {
        return;
    };
    let center = ChunkCoord::from_world_pos(transform.translation);

    // Cancel pending generation that left the load radius.
    let stale = world.stale_pending(center, RENDER_DISTANCE);
    if !stale.is_empty() {
        for (entity, task) in pending.iter() {
            if stale.contains(&task.coord) {
                world.cancel_generating(task.coord);
                commands.entity(entity).despawn();
                debug!("Cancelled chunk request {:?}", task.coord);
            }
        }
    }

    // Request every missing chunk within render distance.
    let task_pool = AsyncComputeTaskPool::get();
    let seed = world.seed();
    for coord in world.missing_chunks_within(center, RENDER_DISTANCE) {
        world.mark_generating(coord);
        let task = task_pool.spawn(async move {
            let chunk = generate_chunk(seed, coord);
            let mesh = build_chunk_mesh(&chunk);
            (chunk, mesh)
        });
        commands.spawn(ChunkTask { coord, task });
    }

    // Evict loaded chunks beyond the eviction margin.
    for coord in world.evictable_beyond(center, RENDER_DISTANCE + 1) {
        world.remove_chunk(coord);
        despawn_chunk_entity(
            &mut commands,
            &mut chunk_entities,
            &mut meshes,
            &mesh_handles,
            coord,
        );
        debug!("Evicted chunk {:?}", coord);
    }
}

/// Drain completed generation tasks, once per tick. The chunk map is only
/// touched here and in `stream_chunks`, so the render path never observes a
/// partially built chunk.
pub fn apply_chunk_tasks(
    mut commands: Commands,
    mut world: ResMut<VoxelWorld>,
    mut chunk_entities: ResMut<ChunkEntities>,
    mut meshes: ResMut<Assets<Mesh>>,
    material: Res<ChunkMaterial>,
    mut tasks: Query<(Entity, &mut ChunkTask)>,
) {
    for (entity, mut chunk_task) in tasks.iter_mut() {
        let Some((chunk, mesh)) = future::block_on(future::poll_once(&mut chunk_task.task))
        else {
            continue;
        };
        let coord = chunk_task.coord;
        commands.entity(entity).despawn();

        // A same-frame cancellation may have dropped the slot already.
        if !world.is_generating(coord) {
            continue;
        }

        spawn_chunk_entity(
            &mut commands,
            &mut chunk_entities,
            &mut meshes,
            &material.0,
            coord,
            mesh,
        );
        world.insert_chunk(chunk);
    }
}

/// Rebuild the mesh of every chunk marked dirty by an edit. The rebuild is
/// wholesale: the old geometry is replaced, never patched.
pub fn remesh_chunks(
    mut commands: Commands,
    world: Res<VoxelWorld>,
    material: Res<ChunkMaterial>,
    mut meshes: ResMut<Assets<Mesh>>,
    dirty: Query<(Entity, &TerrainChunk, Option<&Mesh3d>), With<NeedsRemesh>>,
) {
    for (entity, terrain, mesh_3d) in dirty.iter() {
        let Some(chunk) = world.chunk(terrain.coord) else {
            commands.entity(entity).remove::<NeedsRemesh>();
            continue;
        };

        match (build_chunk_mesh(chunk), mesh_3d) {
            (Some(new_mesh), Some(handle)) => {
                if let Some(mesh) = meshes.get_mut(&handle.0) {
                    *mesh = new_mesh;
                }
                // The bounding volume is stale after the rebuild.
                commands.entity(entity).remove::<Aabb>();
            }
            (Some(new_mesh), None) => {
                commands.entity(entity).insert((
                    Mesh3d(meshes.add(new_mesh)),
                    MeshMaterial3d(material.0.clone()),
                ));
            }
            (None, Some(handle)) => {
                // Every visible face was removed; drop the mesh entirely.
                meshes.remove(&handle.0);
                commands.entity(entity).remove::<Mesh3d>();
                commands
                    .entity(entity)
                    .remove::<MeshMaterial3d<StandardMaterial>>();
                commands.entity(entity).remove::<Aabb>();
            }
            (None, None) => {}
        }

        commands.entity(entity).remove::<NeedsRemesh>();
    }
}

/// Full world teardown on app exit: every resident chunk is evicted and its
/// mesh released before the renderer itself shuts down.
pub fn teardown_world(
    mut exit: EventReader<AppExit>,
    mut commands: Commands,
    mut world: ResMut<VoxelWorld>,
    mut chunk_entities: ResMut<ChunkEntities>,
    mut meshes: ResMut<Assets<Mesh>>,
    mesh_handles: Query<&Mesh3d, With<TerrainChunk>>,
) {
    if exit.is_empty() {
        return;
    }
    exit.clear();

    let coords: Vec<ChunkCoord> = chunk_entities.0.keys().copied().collect();
    for coord in coords {
        despawn_chunk_entity(
            &mut commands,
            &mut chunk_entities,
            &mut meshes,
            &mesh_handles,
            coord,
        );
    }
    world.clear();
    info!("World disposed");
}
