mod blocks;
mod components;
mod resources;
mod systems;
mod world;

use bevy::prelude::*;

use resources::{FpsCounter, GameState};
use systems::{
    apply_chunk_tasks, block_edit, handle_window_focus, player_look, player_movement,
    remesh_chunks, setup_cursor_grab, setup_ui, setup_world, spawn_player, stream_chunks,
    teardown_world, toggle_debug_overlay, toggle_pause, update_debug_overlay, update_fps,
    ChunkEntities,
};
use world::VoxelWorld;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Terravox".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::srgb(0.5, 0.7, 0.95)))
        .init_resource::<GameState>()
        .init_resource::<FpsCounter>()
        .init_resource::<VoxelWorld>()
        .init_resource::<ChunkEntities>()
        // Synchronous initial load before the first frame renders
        .add_systems(
            Startup,
            (setup_world, spawn_player, setup_cursor_grab, setup_ui).chain(),
        )
        .add_systems(
            Update,
            (toggle_pause, handle_window_focus, toggle_debug_overlay),
        )
        // One logical tick per frame: input -> physics -> edits -> streaming
        .add_systems(
            Update,
            (
                player_look.run_if(|state: Res<GameState>| !state.paused),
                player_movement.run_if(|state: Res<GameState>| !state.paused),
                block_edit.run_if(|state: Res<GameState>| !state.paused),
                stream_chunks.run_if(|state: Res<GameState>| !state.paused),
                apply_chunk_tasks,
                update_fps,
                update_debug_overlay,
                teardown_world,
            )
                .chain(),
        )
        // Remeshing runs after edits so it observes the updated chunk data
        .add_systems(PostUpdate, remesh_chunks)
        .run();
}
