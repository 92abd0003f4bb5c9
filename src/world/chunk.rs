use bevy::prelude::*;

use crate::blocks::Block;

// Chunk configuration - 16x64x16 full-height columns
pub const CHUNK_SIZE: usize = 16;
pub const CHUNK_HEIGHT: usize = 64;
pub const RENDER_DISTANCE: i32 = 2; // Load radius in chunks around the player

/// Horizontal chunk coordinate. Chunks span the full world height, so the
/// vertical axis is not chunked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkCoord {
    pub x: i32,
    pub z: i32,
}

impl ChunkCoord {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Chunk containing the given block column (floored division, so
    /// negative world coordinates map correctly).
    pub fn of_block(wx: i32, wz: i32) -> Self {
        Self {
            x: wx.div_euclid(CHUNK_SIZE as i32),
            z: wz.div_euclid(CHUNK_SIZE as i32),
        }
    }

    pub fn from_world_pos(pos: Vec3) -> Self {
        Self {
            x: (pos.x / CHUNK_SIZE as f32).floor() as i32,
            z: (pos.z / CHUNK_SIZE as f32).floor() as i32,
        }
    }

    /// World-space position of this chunk's (0, 0, 0) corner.
    pub fn world_origin(&self) -> Vec3 {
        Vec3::new(
            self.x as f32 * CHUNK_SIZE as f32,
            0.0,
            self.z as f32 * CHUNK_SIZE as f32,
        )
    }

    /// Chebyshev distance, the metric for the square streaming window.
    pub fn chebyshev_distance(&self, other: ChunkCoord) -> i32 {
        (self.x - other.x).abs().max((self.z - other.z).abs())
    }
}

/// One chunk's dense block buffer.
pub struct Chunk {
    pub coord: ChunkCoord,
    blocks: Vec<Block>,
}

impl Chunk {
    pub fn new(coord: ChunkCoord) -> Self {
        Self {
            coord,
            blocks: vec![Block::Air; CHUNK_SIZE * CHUNK_HEIGHT * CHUNK_SIZE],
        }
    }

    /// Convert 3D coordinates to 1D index
    /// Layout: x + z * CHUNK_SIZE + y * CHUNK_SIZE * CHUNK_SIZE
    #[inline]
    fn index(x: usize, y: usize, z: usize) -> usize {
        x + z * CHUNK_SIZE + y * CHUNK_SIZE * CHUNK_SIZE
    }

    #[inline]
    fn in_bounds(x: i32, y: i32, z: i32) -> bool {
        x >= 0
            && (x as usize) < CHUNK_SIZE
            && y >= 0
            && (y as usize) < CHUNK_HEIGHT
            && z >= 0
            && (z as usize) < CHUNK_SIZE
    }

    /// Out-of-range reads degrade to Air, which lets the mesher treat any
    /// out-of-chunk neighbor as transparent without special-casing.
    pub fn get(&self, x: i32, y: i32, z: i32) -> Block {
        if !Self::in_bounds(x, y, z) {
            return Block::Air;
        }
        self.blocks[Self::index(x as usize, y as usize, z as usize)]
    }

    /// Out-of-range writes are a silent no-op.
    pub fn set(&mut self, x: i32, y: i32, z: i32, block: Block) {
        if Self::in_bounds(x, y, z) {
            self.blocks[Self::index(x as usize, y as usize, z as usize)] = block;
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn of_block_floors_negative_coordinates() {
        assert_eq!(ChunkCoord::of_block(0, 0), ChunkCoord::new(0, 0));
        assert_eq!(ChunkCoord::of_block(15, 15), ChunkCoord::new(0, 0));
        assert_eq!(ChunkCoord::of_block(16, 0), ChunkCoord::new(1, 0));
        assert_eq!(ChunkCoord::of_block(-1, -1), ChunkCoord::new(-1, -1));
        assert_eq!(ChunkCoord::of_block(-16, -17), ChunkCoord::new(-1, -2));
    }

    #[test]
    fn from_world_pos_matches_of_block() {
        let pos = Vec3::new(-0.5, 30.0, 17.2);
        assert_eq!(
            ChunkCoord::from_world_pos(pos),
            ChunkCoord::of_block(pos.x.floor() as i32, pos.z.floor() as i32)
        );
    }

    #[test]
    fn chebyshev_distance_is_max_axis() {
        let a = ChunkCoord::new(0, 0);
        assert_eq!(a.chebyshev_distance(ChunkCoord::new(2, -1)), 2);
        assert_eq!(a.chebyshev_distance(ChunkCoord::new(-3, 3)), 3);
        assert_eq!(a.chebyshev_distance(a), 0);
    }

    #[test]
    fn set_then_get_round_trips_in_range() {
        let mut chunk = Chunk::new(ChunkCoord::new(0, 0));
        chunk.set(3, 40, 7, Block::Stone);
        assert_eq!(chunk.get(3, 40, 7), Block::Stone);
        chunk.set(3, 40, 7, Block::Air);
        assert_eq!(chunk.get(3, 40, 7), Block::Air);
    }

    #[test]
    fn out_of_range_get_is_air_and_set_is_noop() {
        let mut chunk = Chunk::new(ChunkCoord::new(0, 0));
        chunk.set(0, 0, 0, Block::Dirt);

        assert_eq!(chunk.get(-1, 0, 0), Block::Air);
        assert_eq!(chunk.get(0, -1, 0), Block::Air);
        assert_eq!(chunk.get(16, 0, 0), Block::Air);
        assert_eq!(chunk.get(0, 64, 0), Block::Air);
        assert_eq!(chunk.get(0, 0, 16), Block::Air);

        chunk.set(-1, 0, 0, Block::Stone);
        chunk.set(0, 64, 0, Block::Stone);
        chunk.set(16, 0, 16, Block::Stone);
        // prior in-range write is untouched
        assert_eq!(chunk.get(0, 0, 0), Block::Dirt);
    }
}
