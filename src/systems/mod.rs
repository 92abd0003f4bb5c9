mod debug_overlay;
mod input;
mod interaction;
mod player;
mod streaming;

pub use debug_overlay::{setup_ui, update_debug_overlay, update_fps};
pub use input::{handle_window_focus, setup_cursor_grab, toggle_debug_overlay, toggle_pause};
pub use interaction::block_edit;
pub use player::{player_look, player_movement, spawn_player};
pub use streaming::{
    apply_chunk_tasks, remesh_chunks, setup_world, stream_chunks, teardown_world, ChunkEntities,
};
