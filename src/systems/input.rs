use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow, WindowFocused};

use crate::components::DebugOverlay;
use crate::resources::GameState;

pub fn setup_cursor_grab(mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    if let Ok(mut window) = windows.get_single_mut() {
        window.cursor_options.grab_mode = CursorGrabMode::Locked;
        window.cursor_options.visible = false;
    }
}

pub fn toggle_pause(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut game_state: ResMut<GameState>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    if keyboard_input.just_pressed(KeyCode::Escape) {
        game_state.paused = !game_state.paused;

        if let Ok(mut window) = windows.get_single_mut() {
            if game_state.paused {
                window.cursor_options.grab_mode = CursorGrabMode::None;
                window.cursor_options.visible = true;
            } else {
                window.cursor_options.grab_mode = CursorGrabMode::Locked;
                window.cursor_options.visible = false;
            }
        }
    }
}

/// Re-grab the cursor when the window regains focus (e.g. after
/// alt-tabbing).
pub fn handle_window_focus(
    mut focus_events: EventReader<WindowFocused>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    game_state: Res<GameState>,
) {
    for event in focus_events.read() {
        if event.focused && !game_state.paused {
            if let Ok(mut window) = windows.get_single_mut() {
                window.cursor_options.grab_mode = CursorGrabMode::Locked;
                window.cursor_options.visible = false;
            }
        }
    }
}

pub fn toggle_debug_overlay(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut query: Query<&mut DebugOverlay>,
) {
    if keyboard_input.just_pressed(KeyCode::F3) {
        for mut overlay in query.iter_mut() {
            overlay.visible = !overlay.visible;
        }
    }
}
