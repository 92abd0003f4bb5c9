use bevy::prelude::*;

use crate::components::{Crosshair, DebugOverlay, PlayerController};
use crate::resources::FpsCounter;
use crate::world::VoxelWorld;

/// Crosshair plus the F3 debug overlay (initially visible).
pub fn setup_ui(mut commands: Commands) {
    // Crosshair horizontal line
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            width: Val::Px(20.0),
            height: Val::Px(2.0),
            left: Val::Percent(50.0),
            top: Val::Percent(50.0),
            margin: UiRect {
                left: Val::Px(-10.0),
                top: Val::Px(-1.0),
                ..default()
            },
            ..default()
        },
        BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.8)),
        Crosshair,
    ));

    // Crosshair vertical line
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            width: Val::Px(2.0),
            height: Val::Px(20.0),
            left: Val::Percent(50.0),
            top: Val::Percent(50.0),
            margin: UiRect {
                left: Val::Px(-1.0),
                top: Val::Px(-10.0),
                ..default()
            },
            ..default()
        },
        BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.8)),
        Crosshair,
    ));

    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        TextColor(Color::srgb(1.0, 1.0, 1.0)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
        DebugOverlay { visible: true },
    ));
}

pub fn update_fps(time: Res<Time>, mut counter: ResMut<FpsCounter>) {
    counter.tick(time.delta_secs());
}

/// Read-only telemetry for the host: FPS, player position, facing, and the
/// number of loaded chunks.
pub fn update_debug_overlay(
    fps: Res<FpsCounter>,
    world: Res<VoxelWorld>,
    camera_query: Query<(&Transform, &PlayerController)>,
    mut text_query: Query<(&mut Text, &DebugOverlay)>,
) {
    let Ok((camera_transform, controller)) = camera_query.get_single() else {
        return;
    };
    let Ok((mut text, overlay)) = text_query.get_single_mut() else {
        return;
    };

    if !overlay.visible {
        **text = String::new();
        return;
    }

    let pos = camera_transform.translation;
    let mut debug_text = String::new();
    debug_text.push_str(&format!("FPS: {:.0}\n", fps.fps()));
    debug_text.push_str(&format!(
        "X: {:.1}\nY: {:.1}\nZ: {:.1}\n",
        pos.x, pos.y, pos.z
    ));
    debug_text.push_str(&format!(
        "Facing: {}\n",
        cardinal_direction(controller.yaw)
    ));
    debug_text.push_str(&format!("Chunks: {}", world.loaded_count()));

    **text = debug_text;
}

fn cardinal_direction(yaw: f32) -> &'static str {
    let mut normalized = yaw % (2.0 * std::f32::consts::PI);
    if normalized < 0.0 {
        normalized += 2.0 * std::f32::consts::PI;
    }
    let degrees = normalized.to_degrees();

    match degrees {
        d if !(22.5..337.5).contains(&d) => "N",
        d if d < 67.5 => "NW",
        d if d < 112.5 => "W",
        d if d < 157.5 => "SW",
        d if d < 202.5 => "S",
        d if d < 247.5 => "SE",
        d if d < 292.5 => "E",
        _ => "NE",
    }
}
