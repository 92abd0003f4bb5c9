use bevy::prelude::*;

use super::streaming::{ChunkEntities, NeedsRemesh};
use crate::blocks::Block;
use crate::components::{PlayerController, PLAYER_HEIGHT};
use crate::world::{ChunkCoord, VoxelWorld};

/// Maximum edit reach, in world units.
pub const REACH: f32 = 8.0;
/// March step along the targeting ray.
const RAY_STEP: f32 = 0.1;
/// In-cell distance that counts as "on a face" for normal selection.
const FACE_EPSILON: f32 = 0.1;

/// Block placed on right click.
const PLACED_BLOCK: Block = Block::Stone;

#[derive(Debug, Clone, Copy)]
pub struct RaycastHit {
    pub block_pos: IVec3,
    pub face_normal: IVec3,
    pub block: Block,
}

/// March from the camera along the view direction in fixed steps; the first
/// non-Air cell sampled is the hit. The face normal comes from the ray's
/// fractional position inside that cell, tested against a threshold per
/// axis in x, y, z order. Near cell corners this can pick the wrong face;
/// the approximation is kept as-is.
pub fn raycast(world: &VoxelWorld, origin: Vec3, direction: Vec3) -> Option<RaycastHit> {
    let direction = direction.normalize_or_zero();
    if direction == Vec3::ZERO {
        return None;
    }

    let steps = (REACH / RAY_STEP) as i32;
    for i in 1..=steps {
        let point = origin + direction * (i as f32 * RAY_STEP);
        let block_pos = IVec3::new(
            point.x.floor() as i32,
            point.y.floor() as i32,
            point.z.floor() as i32,
        );
        let block = world.block_at(block_pos.x, block_pos.y, block_pos.z);
        if block.is_air() {
            continue;
        }

        let frac = point - block_pos.as_vec3();
        let face_normal = if frac.x < FACE_EPSILON {
            IVec3::NEG_X
        } else if frac.x > 1.0 - FACE_EPSILON {
            IVec3::X
        } else if frac.y < FACE_EPSILON {
            IVec3::NEG_Y
        } else if frac.y > 1.0 - FACE_EPSILON {
            IVec3::Y
        } else if frac.z < FACE_EPSILON {
            IVec3::NEG_Z
        } else if frac.z > 1.0 - FACE_EPSILON {
            IVec3::Z
        } else {
            // Sampled deep inside the cell; no face is a credible answer.
            IVec3::ZERO
        };

        return Some(RaycastHit {
            block_pos,
            face_normal,
            block,
        });
    }

    None
}

/// Would a block at `cell` overlap the player's standing box?
fn would_intersect_player(cell: IVec3, player_pos: Vec3) -> bool {
    let feet = player_pos.y - PLAYER_HEIGHT / 2.0;
    let head = player_pos.y + PLAYER_HEIGHT / 2.0;
    (cell.y as f32) < head
        && (cell.y as f32 + 1.0) > feet
        && (cell.x as f32 + 0.5 - player_pos.x).abs() < 0.8
        && (cell.z as f32 + 0.5 - player_pos.z).abs() < 0.8
}

fn queue_remesh(commands: &mut Commands, chunk_entities: &ChunkEntities, coord: ChunkCoord) {
    if let Some(&entity) = chunk_entities.0.get(&coord) {
        commands.entity(entity).insert(NeedsRemesh);
    }
}

/// Left click destroys the targeted block; right click places one against
/// the targeted face. Every accepted edit queues a full remesh of the
/// owning chunk.
pub fn block_edit(
    mut commands: Commands,
    mouse_button: Res<ButtonInput<MouseButton>>,
    camera_query: Query<&Transform, With<PlayerController>>,
    mut world: ResMut<VoxelWorld>,
    chunk_entities: Res<ChunkEntities>,
) {
    let destroy = mouse_button.just_pressed(MouseButton::Left);
    let place = mouse_button.just_pressed(MouseButton::Right);
    if !destroy && !place {
        return;
    }

    let Ok(camera_transform) = camera_query.get_single() else {
        return;
    };
    let origin = camera_transform.translation;
    let Some(hit) = raycast(&world, origin, *camera_transform.forward()) else {
        return;
    };

    if destroy {
        if let Some(coord) =
            world.set_block(hit.block_pos.x, hit.block_pos.y, hit.block_pos.z, Block::Air)
        {
            queue_remesh(&mut commands, &chunk_entities, coord);
            info!("Destroyed {:?} at {}", hit.block, hit.block_pos);
        }
    }

    if place {
        let target = hit.block_pos + hit.face_normal;
        if would_intersect_player(target, origin) {
            return;
        }
        if !world.block_at(target.x, target.y, target.z).is_air() {
            return;
        }
        if let Some(coord) = world.set_block(target.x, target.y, target.z, PLACED_BLOCK) {
            queue_remesh(&mut commands, &chunk_entities, coord);
            info!("Placed {:?} at {}", PLACED_BLOCK, target);
        }
    }
}
