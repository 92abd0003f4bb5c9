use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use crate::world::VoxelWorld;

pub const PLAYER_HEIGHT: f32 = 1.8;
pub const WALK_SPEED: f32 = 5.0;
pub const SPRINT_MULTIPLIER: f32 = 2.0;
pub const JUMP_IMPULSE: f32 = 8.0;
pub const GRAVITY: f32 = 20.0;
pub const LOOK_SENSITIVITY: f32 = 0.003;

/// First-person controller state carried by the camera entity. Position
/// lives in the entity transform (camera center; feet are half the player
/// height below it).
#[derive(Component, Default)]
pub struct PlayerController {
    pub yaw: f32,   // Horizontal rotation, unbounded
    pub pitch: f32, // Vertical rotation, clamped to +/- 90 degrees
    pub velocity_y: f32,
    pub grounded: bool,
}

/// Polled input snapshot for one tick, built by the movement system from
/// the keyboard state.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveInput {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub sprint: bool,
}

impl PlayerController {
    /// Apply an accumulated mouse delta to the view angles.
    pub fn apply_look(&mut self, delta: Vec2) {
        self.yaw -= delta.x * LOOK_SENSITIVITY;
        self.pitch = (self.pitch - delta.y * LOOK_SENSITIVITY).clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// Advance one tick: 8-direction movement rotated into yaw space,
    /// gravity while airborne, then the discrete ground probe. Returns the
    /// resolved position. `dt` arrives pre-capped by the calling system.
    pub fn step(&mut self, dt: f32, input: MoveInput, world: &VoxelWorld, pos: Vec3) -> Vec3 {
        let mut dir = Vec3::ZERO;
        if input.forward {
            dir.z -= 1.0;
        }
        if input.back {
            dir.z += 1.0;
        }
        if input.left {
            dir.x -= 1.0;
        }
        if input.right {
            dir.x += 1.0;
        }
        let dir = Quat::from_rotation_y(self.yaw) * dir.normalize_or_zero();

        let speed = if input.sprint {
            WALK_SPEED * SPRINT_MULTIPLIER
        } else {
            WALK_SPEED
        };

        if self.grounded && input.jump {
            self.velocity_y = JUMP_IMPULSE;
            self.grounded = false;
        }
        if !self.grounded {
            self.velocity_y -= GRAVITY * dt;
        }

        let mut next = pos + dir * speed * dt;
        next.y += self.velocity_y * dt;

        // Single-sample ground probe at the feet. No wall collision: a
        // known simplification, not a sweep test.
        let feet_y = next.y - PLAYER_HEIGHT / 2.0;
        let cell = IVec3::new(
            next.x.floor() as i32,
            feet_y.floor() as i32,
            next.z.floor() as i32,
        );
        if world.block_at(cell.x, cell.y, cell.z).is_solid() {
            // Snap the feet onto the block top.
            next.y = cell.y as f32 + 1.0 + PLAYER_HEIGHT / 2.0;
            self.velocity_y = 0.0;
            self.grounded = true;
        } else {
            self.grounded = false;
        }

        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::Block;
    use crate::world::{Chunk, ChunkCoord};

    /// World with a single solid block at the given cell.
    fn world_with_block(x: i32, y: i32, z: i32) -> VoxelWorld {
        let mut world = VoxelWorld::new(1);
        let mut chunk = Chunk::new(ChunkCoord::of_block(x, z));
        chunk.set(
            x.rem_euclid(16),
            y,
            z.rem_euclid(16),
            Block::Stone,
        );
        world.insert_chunk(chunk);
        world
    }

    #[test]
    fn falling_player_snaps_exactly_onto_the_block_top() {
        // Block cell y=40, top at y=41; one 0.1s gravity tick from y=41.99
        // must land the feet exactly on the top.
        let world = world_with_block(5, 40, 5);
        let mut player = PlayerController::default();

        let pos = player.step(
            0.1,
            MoveInput::default(),
            &world,
            Vec3::new(5.5, 41.99, 5.5),
        );

        assert_eq!(pos.y, 41.0 + PLAYER_HEIGHT / 2.0);
        assert!(player.grounded);
        assert_eq!(player.velocity_y, 0.0);
    }

    #[test]
    fn player_falls_through_water() {
        let mut world = VoxelWorld::new(1);
        let mut chunk = Chunk::new(ChunkCoord::new(0, 0));
        chunk.set(5, 40, 5, Block::Water);
        world.insert_chunk(chunk);

        let mut player = PlayerController::default();
        let pos = player.step(
            0.1,
            MoveInput::default(),
            &world,
            Vec3::new(5.5, 41.5, 5.5),
        );

        assert!(!player.grounded);
        assert!(pos.y < 41.5);
    }

    #[test]
    fn jump_requires_ground_and_clears_the_grounded_flag() {
        let world = world_with_block(5, 40, 5);
        let mut player = PlayerController::default();
        let start = Vec3::new(5.5, 41.0 + PLAYER_HEIGHT / 2.0 - 0.05, 5.5);

        // Land first.
        let pos = player.step(0.05, MoveInput::default(), &world, start);
        assert!(player.grounded);

        let jump = MoveInput {
            jump: true,
            ..Default::default()
        };
        let pos = player.step(0.05, jump, &world, pos);
        assert!(!player.grounded);
        assert!(player.velocity_y > 0.0);
        assert!(pos.y > 41.0 + PLAYER_HEIGHT / 2.0);

        // Airborne jump input must not re-fire the impulse.
        let vy = player.velocity_y;
        player.step(0.05, jump, &world, pos);
        assert!(player.velocity_y < vy);
    }

    #[test]
    fn diagonal_movement_is_not_faster_than_straight() {
        let world = VoxelWorld::new(1);
        let mut player = PlayerController::default();
        player.grounded = false;

        let straight = MoveInput {
            forward: true,
            ..Default::default()
        };
        let diagonal = MoveInput {
            forward: true,
            right: true,
            ..Default::default()
        };

        let origin = Vec3::ZERO;
        let a = player.step(0.1, straight, &world, origin);
        let b = player.step(0.1, diagonal, &world, origin);

        let a_dist = Vec2::new(a.x, a.z).length();
        let b_dist = Vec2::new(b.x, b.z).length();
        assert!((a_dist - b_dist).abs() < 1e-5);
        assert!((a_dist - WALK_SPEED * 0.1).abs() < 1e-5);
    }

    #[test]
    fn sprint_doubles_horizontal_speed() {
        let world = VoxelWorld::new(1);
        let mut player = PlayerController::default();

        let sprint = MoveInput {
            forward: true,
            sprint: true,
            ..Default::default()
        };
        let pos = player.step(0.1, sprint, &world, Vec3::ZERO);
        let dist = Vec2::new(pos.x, pos.z).length();
        assert!((dist - WALK_SPEED * SPRINT_MULTIPLIER * 0.1).abs() < 1e-5);
    }

    #[test]
    fn movement_rotates_into_yaw_space() {
        let world = VoxelWorld::new(1);
        let mut player = PlayerController::default();
        // Face +X (yaw -90 degrees turns -Z forward onto +X).
        player.yaw = -FRAC_PI_2;

        let forward = MoveInput {
            forward: true,
            ..Default::default()
        };
        let pos = player.step(0.1, forward, &world, Vec3::ZERO);
        assert!(pos.x > 0.4);
        assert!(pos.z.abs() < 1e-4);
    }

    #[test]
    fn pitch_clamps_at_ninety_degrees() {
        let mut player = PlayerController::default();
        player.apply_look(Vec2::new(0.0, -10_000.0));
        assert_eq!(player.pitch, FRAC_PI_2);
        player.apply_look(Vec2::new(0.0, 10_000.0));
        assert_eq!(player.pitch, -FRAC_PI_2);
        // Yaw is unbounded.
        player.apply_look(Vec2::new(-10_000.0, 0.0));
        assert!(player.yaw > 6.0);
    }
}
