use bevy::prelude::*;

#[derive(Component)]
pub struct DebugOverlay {
    pub visible: bool,
}

#[derive(Component)]
pub struct Crosshair;
