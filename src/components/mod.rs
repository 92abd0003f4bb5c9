mod player;
mod ui;

pub use player::{
    MoveInput, PlayerController, GRAVITY, JUMP_IMPULSE, LOOK_SENSITIVITY, PLAYER_HEIGHT,
    SPRINT_MULTIPLIER, WALK_SPEED,
};
pub use ui::{Crosshair, DebugOverlay};
