use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;

use super::chunk::{Chunk, CHUNK_HEIGHT, CHUNK_SIZE};
use crate::blocks::{Block, BlockFace};

/// Corner positions for one face of the unit cube at (x, y, z), ordered so
/// the shared index pattern winds the quad outward.
fn face_corners(face: BlockFace, x: f32, y: f32, z: f32) -> [[f32; 3]; 4] {
    match face {
        BlockFace::Top => [
            [x, y + 1.0, z],
            [x + 1.0, y + 1.0, z],
            [x + 1.0, y + 1.0, z + 1.0],
            [x, y + 1.0, z + 1.0],
        ],
        BlockFace::Bottom => [
            [x, y, z],
            [x, y, z + 1.0],
            [x + 1.0, y, z + 1.0],
            [x + 1.0, y, z],
        ],
        BlockFace::South => [
            [x, y, z + 1.0],
            [x, y + 1.0, z + 1.0],
            [x + 1.0, y + 1.0, z + 1.0],
            [x + 1.0, y, z + 1.0],
        ],
        BlockFace::North => [
            [x, y, z],
            [x + 1.0, y, z],
            [x + 1.0, y + 1.0, z],
            [x, y + 1.0, z],
        ],
        BlockFace::East => [
            [x + 1.0, y, z],
            [x + 1.0, y, z + 1.0],
            [x + 1.0, y + 1.0, z + 1.0],
            [x + 1.0, y + 1.0, z],
        ],
        BlockFace::West => [
            [x, y, z],
            [x, y + 1.0, z],
            [x, y + 1.0, z + 1.0],
            [x, y, z + 1.0],
        ],
    }
}

/// Full mesh rebuild for one chunk. Emits one quad per face of a non-Air
/// cell whose neighbor is transparent; out-of-chunk neighbors read as Air
/// through the bounds-checked getter, so chunk-border faces are emitted.
/// Returns None when no face is visible (a legitimately empty mesh).
pub fn build_chunk_mesh(chunk: &Chunk) -> Option<Mesh> {
    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut normals: Vec<[f32; 3]> = Vec::new();
    let mut colors: Vec<[f32; 4]> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    for y in 0..CHUNK_HEIGHT as i32 {
        for z in 0..CHUNK_SIZE as i32 {
            for x in 0..CHUNK_SIZE as i32 {
                let block = chunk.get(x, y, z);
                if block.is_air() {
                    continue;
                }

                for face in BlockFace::ALL {
                    let n = face.offset();
                    if !chunk.get(x + n.x, y + n.y, z + n.z).is_transparent() {
                        continue;
                    }
                    push_quad(
                        &mut positions,
                        &mut normals,
                        &mut colors,
                        &mut indices,
                        face,
                        x as f32,
                        y as f32,
                        z as f32,
                        block,
                    );
                }
            }
        }
    }

    if positions.is_empty() {
        return None;
    }

    Some(
        Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::default(),
        )
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, colors)
        .with_inserted_indices(Indices::U32(indices)),
    )
}

#[allow(clippy::too_many_arguments)]
fn push_quad(
    positions: &mut Vec<[f32; 3]>,
    normals: &mut Vec<[f32; 3]>,
    colors: &mut Vec<[f32; 4]>,
    indices: &mut Vec<u32>,
    face: BlockFace,
    x: f32,
    y: f32,
    z: f32,
    block: Block,
) {
    let base_index = positions.len() as u32;
    let corners = face_corners(face, x, y, z);

    // One flat normal per quad, from the cross product of two edges.
    let v0 = Vec3::from(corners[0]);
    let edge_a = Vec3::from(corners[1]) - v0;
    let edge_b = Vec3::from(corners[3]) - v0;
    let normal = edge_b.cross(edge_a).normalize();

    let [r, g, b] = block.base_color();
    let shade = face.brightness();
    let color = [r * shade, g * shade, b * shade, 1.0];

    positions.extend_from_slice(&corners);
    normals.extend_from_slice(&[normal.to_array(); 4]);
    colors.extend_from_slice(&[color; 4]);
    indices.extend_from_slice(&[
        base_index,
        base_index + 3,
        base_index + 2,
        base_index + 2,
        base_index + 1,
        base_index,
    ]);
}
