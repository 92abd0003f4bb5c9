use noise::{NoiseFn, Simplex};

use super::chunk::{Chunk, ChunkCoord, CHUNK_HEIGHT, CHUNK_SIZE};
use crate::blocks::Block;

/// Water fills every air cell at or below this height.
pub const SEA_LEVEL: i32 = 32;

/// World-space sampling scale for the base noise octave.
const NOISE_SCALE: f64 = 0.01;

/// Terrain height for one column: three octaves of 2D Simplex noise summed
/// over the sea-level baseline. Large features, hills at double frequency,
/// detail at quadruple frequency.
fn column_height(noise: &Simplex, wx: i32, wz: i32) -> i32 {
    let x = wx as f64 * NOISE_SCALE;
    let z = wz as f64 * NOISE_SCALE;

    let large = noise.get([x, z]) * 20.0;
    let hills = noise.get([x * 2.0, z * 2.0]) * 10.0;
    let detail = noise.get([x * 4.0, z * 4.0]) * 5.0;

    let height = (SEA_LEVEL as f64 + large + hills + detail).floor() as i32;
    // Keep at least one stone layer and never overflow the chunk buffer.
    height.clamp(1, CHUNK_HEIGHT as i32 - 1)
}

/// Top solid cell of the column at (wx, wz). Used to place the player spawn
/// on the terrain surface.
pub fn surface_height(seed: u32, wx: i32, wz: i32) -> i32 {
    column_height(&Simplex::new(seed), wx, wz)
}

/// Fill one column: surface block on top (sand on shores and sea floor,
/// grass elsewhere), three cells of dirt, stone below, then water over any
/// air left at or below sea level.
fn fill_column(chunk: &mut Chunk, x: i32, z: i32, height: i32) {
    let surface = if height < SEA_LEVEL - 2 {
        Block::Sand
    } else {
        Block::Grass
    };

    for y in 0..CHUNK_HEIGHT as i32 {
        let block = if y > height {
            Block::Air
        } else if y == height {
            surface
        } else if y > height - 4 {
            Block::Dirt
        } else {
            Block::Stone
        };
        chunk.set(x, y, z, block);
    }

    for y in (height + 1)..=SEA_LEVEL {
        if chunk.get(x, y, z).is_air() {
            chunk.set(x, y, z, Block::Water);
        }
    }
}

/// Generate one chunk's block buffer. Pure and deterministic for
/// (seed, coord): no side effects, no failure modes.
pub fn generate_chunk(seed: u32, coord: ChunkCoord) -> Chunk {
    let noise = Simplex::new(seed);
    let mut chunk = Chunk::new(coord);

    let chunk_world_x = coord.x * CHUNK_SIZE as i32;
    let chunk_world_z = coord.z * CHUNK_SIZE as i32;

    for z in 0..CHUNK_SIZE as i32 {
        for x in 0..CHUNK_SIZE as i32 {
            let height = column_height(&noise, chunk_world_x + x, chunk_world_z + z);
            fill_column(&mut chunk, x, z, height);
        }
    }

    chunk
}
