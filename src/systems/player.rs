use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;

use crate::components::{MoveInput, PlayerController, PLAYER_HEIGHT};
use crate::world::{surface_height, VoxelWorld};

/// Physics delta-time cap; avoids blow-ups after a long frame stall
/// (e.g. returning from a minimized window).
const MAX_FRAME_DT: f32 = 0.1;

/// Spawn the first-person camera standing on the terrain surface at the
/// world origin.
pub fn spawn_player(mut commands: Commands, world: Res<VoxelWorld>) {
    let surface = surface_height(world.seed(), 0, 0);
    let spawn = Vec3::new(
        0.5,
        surface as f32 + 1.0 + PLAYER_HEIGHT / 2.0 + 0.5,
        0.5,
    );

    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(spawn),
        PlayerController::default(),
    ));
    info!("Player spawned at {spawn}");
}

/// FPS-style look: accumulate this frame's mouse delta, feed it to the
/// controller, write the resulting rotation to the camera.
pub fn player_look(
    mut mouse_motion: EventReader<MouseMotion>,
    mut query: Query<(&mut Transform, &mut PlayerController)>,
) {
    let mut delta = Vec2::ZERO;
    for event in mouse_motion.read() {
        delta += event.delta;
    }

    for (mut transform, mut controller) in query.iter_mut() {
        controller.apply_look(delta);
        transform.rotation = controller.rotation();
    }
}

/// Movement and gravity: snapshot the keyboard into a `MoveInput`, step the
/// controller against the world, write back the resolved position.
pub fn player_movement(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    world: Res<VoxelWorld>,
    mut query: Query<(&mut Transform, &mut PlayerController)>,
) {
    let dt = time.delta_secs().min(MAX_FRAME_DT);
    let input = MoveInput {
        forward: keyboard_input.pressed(KeyCode::KeyW),
        back: keyboard_input.pressed(KeyCode::KeyS),
        left: keyboard_input.pressed(KeyCode::KeyA),
        right: keyboard_input.pressed(KeyCode::KeyD),
        jump: keyboard_input.pressed(KeyCode::Space),
        sprint: keyboard_input.pressed(KeyCode::ControlLeft),
    };

    for (mut transform, mut controller) in query.iter_mut() {
        transform.translation = controller.step(dt, input, &world, transform.translation);
    }
}
