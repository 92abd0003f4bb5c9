use bevy::prelude::*;

#[derive(Resource, Default)]
pub struct GameState {
    pub paused: bool,
}

/// Rolling one-second FPS counter: counts frames, publishes the rate each
/// time a full second has elapsed.
#[derive(Resource, Default)]
pub struct FpsCounter {
    frames: u32,
    elapsed: f32,
    fps: f32,
}

impl FpsCounter {
    pub fn tick(&mut self, dt: f32) {
        self.frames += 1;
        self.elapsed += dt;
        if self.elapsed >= 1.0 {
            self.fps = self.frames as f32 / self.elapsed;
            self.frames = 0;
            self.elapsed = 0.0;
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}
