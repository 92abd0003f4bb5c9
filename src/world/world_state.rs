use std::collections::HashMap;

use bevy::prelude::*;

use super::chunk::{Chunk, ChunkCoord, CHUNK_HEIGHT, CHUNK_SIZE};
use crate::blocks::Block;

/// Default world seed; the same seed reproduces the same world.
pub const DEFAULT_SEED: u32 = 42;

/// Residency state for one chunk coordinate. Absence from the map means
/// not loaded, so "generated but all air" and "never generated" stay
/// distinguishable even though block reads degrade to Air for both.
pub enum ChunkSlot {
    /// A generation task is in flight.
    Generating,
    Loaded(Chunk),
}

/// Sparse map of resident chunks around the player, plus the world seed.
/// Mutated only from the main schedule; generation tasks hand finished
/// chunks back through the once-per-tick drain.
#[derive(Resource)]
pub struct VoxelWorld {
    chunks: HashMap<ChunkCoord, ChunkSlot>,
    seed: u32,
}

impl Default for VoxelWorld {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl VoxelWorld {
    pub fn new(seed: u32) -> Self {
        Self {
            chunks: HashMap::new(),
            seed,
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Chunks with block data, i.e. what the telemetry overlay reports.
    pub fn loaded_count(&self) -> usize {
        self.chunks
            .values()
            .filter(|slot| matches!(slot, ChunkSlot::Loaded(_)))
            .count()
    }

    /// Loaded or generating.
    pub fn is_resident(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    pub fn is_generating(&self, coord: ChunkCoord) -> bool {
        matches!(self.chunks.get(&coord), Some(ChunkSlot::Generating))
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        match self.chunks.get(&coord) {
            Some(ChunkSlot::Loaded(chunk)) => Some(chunk),
            _ => None,
        }
    }

    pub fn mark_generating(&mut self, coord: ChunkCoord) {
        self.chunks.entry(coord).or_insert(ChunkSlot::Generating);
    }

    /// Drop a pending slot after its task is cancelled. Loaded chunks are
    /// left alone.
    pub fn cancel_generating(&mut self, coord: ChunkCoord) {
        if self.is_generating(coord) {
            self.chunks.remove(&coord);
        }
    }

    pub fn insert_chunk(&mut self, chunk: Chunk) {
        self.chunks.insert(chunk.coord, ChunkSlot::Loaded(chunk));
    }

    pub fn remove_chunk(&mut self, coord: ChunkCoord) -> Option<ChunkSlot> {
        self.chunks.remove(&coord)
    }

    /// Evict everything (world teardown).
    pub fn clear(&mut self) {
        self.chunks.clear();
    }

    /// Block at a world position. Missing chunks and out-of-height reads
    /// degrade to Air; callers cannot fail here.
    pub fn block_at(&self, wx: i32, wy: i32, wz: i32) -> Block {
        if wy < 0 || wy >= CHUNK_HEIGHT as i32 {
            return Block::Air;
        }
        let coord = ChunkCoord::of_block(wx, wz);
        match self.chunk(coord) {
            Some(chunk) => chunk.get(
                wx - coord.x * CHUNK_SIZE as i32,
                wy,
                wz - coord.z * CHUNK_SIZE as i32,
            ),
            None => Block::Air,
        }
    }

    /// Write a block at a world position. No-ops (returning None) outside
    /// the height range or resident chunks; on success returns the owning
    /// chunk coordinate so the caller can queue a full remesh.
    pub fn set_block(&mut self, wx: i32, wy: i32, wz: i32, block: Block) -> Option<ChunkCoord> {
        if wy < 0 || wy >= CHUNK_HEIGHT as i32 {
            return None;
        }
        let coord = ChunkCoord::of_block(wx, wz);
        match self.chunks.get_mut(&coord) {
            Some(ChunkSlot::Loaded(chunk)) => {
                chunk.set(
                    wx - coord.x * CHUNK_SIZE as i32,
                    wy,
                    wz - coord.z * CHUNK_SIZE as i32,
                    block,
                );
                Some(coord)
            }
            _ => None,
        }
    }

    /// Coordinates within `radius` of `center` (Chebyshev) that are neither
    /// loaded nor generating. Requesting a resident chunk is a no-op by
    /// construction.
    pub fn missing_chunks_within(&self, center: ChunkCoord, radius: i32) -> Vec<ChunkCoord> {
        let mut missing = Vec::new();
        for dz in -radius..=radius {
            for dx in -radius..=radius {
                let coord = ChunkCoord::new(center.x + dx, center.z + dz);
                if !self.is_resident(coord) {
                    missing.push(coord);
                }
            }
        }
        missing
    }

    /// Loaded chunks farther than `margin` from `center`. The caller passes
    /// `RENDER_DISTANCE + 1`: the extra ring is a hysteresis band so chunks
    /// sitting exactly on the load boundary don't thrash in and out.
    pub fn evictable_beyond(&self, center: ChunkCoord, margin: i32) -> Vec<ChunkCoord> {
        self.chunks
            .iter()
            .filter(|(coord, slot)| {
                matches!(slot, ChunkSlot::Loaded(_)) && center.chebyshev_distance(**coord) > margin
            })
            .map(|(coord, _)| *coord)
            .collect()
    }

    /// Pending generation requests that have drifted outside the load
    /// radius and should be cancelled.
    pub fn stale_pending(&self, center: ChunkCoord, radius: i32) -> Vec<ChunkCoord> {
        self.chunks
            .iter()
            .filter(|(coord, slot)| {
                matches!(slot, ChunkSlot::Generating)
                    && center.chebyshev_distance(**coord) > radius
            })
            .map(|(coord, _)| *coord)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::chunk::RENDER_DISTANCE;
    use crate::world::terrain::generate_chunk;

    /// The synchronous equivalent of one streaming cycle: generate every
    /// missing chunk in range, then evict past the hysteresis margin.
    fn update_around(world: &mut VoxelWorld, center: ChunkCoord) {
        for coord in world.missing_chunks_within(center, RENDER_DISTANCE) {
            world.insert_chunk(generate_chunk(world.seed(), coord));
        }
        for coord in world.evictable_beyond(center, RENDER_DISTANCE + 1) {
            world.remove_chunk(coord);
        }
    }

    #[test]
    fn update_loads_everything_in_range_and_nothing_lingers_far_away() {
        let mut world = VoxelWorld::new(1);
        let origin = ChunkCoord::new(0, 0);
        update_around(&mut world, origin);

        for dz in -RENDER_DISTANCE..=RENDER_DISTANCE {
            for dx in -RENDER_DISTANCE..=RENDER_DISTANCE {
                assert!(world.chunk(ChunkCoord::new(dx, dz)).is_some());
            }
        }

        // Move far enough that the old neighborhood is fully out of range.
        let far = ChunkCoord::new(10, 0);
        update_around(&mut world, far);

        for dz in -RENDER_DISTANCE..=RENDER_DISTANCE {
            for dx in -RENDER_DISTANCE..=RENDER_DISTANCE {
                assert!(world
                    .chunk(ChunkCoord::new(far.x + dx, far.z + dz))
                    .is_some());
            }
        }
        for (coord, _) in world.chunks.iter() {
            assert!(
                far.chebyshev_distance(*coord) <= RENDER_DISTANCE + 1,
                "chunk {coord:?} survived past the eviction margin"
            );
        }
    }

    #[test]
    fn hysteresis_band_keeps_boundary_chunks_resident() {
        let mut world = VoxelWorld::new(1);
        update_around(&mut world, ChunkCoord::new(0, 0));

        // One step to the east: chunks at x = -2 are now at distance 3
        // (outside the load radius, inside the eviction margin).
        update_around(&mut world, ChunkCoord::new(1, 0));
        assert!(world.chunk(ChunkCoord::new(-2, 0)).is_some());

        // Two steps: distance 4 exceeds the margin, so they go.
        update_around(&mut world, ChunkCoord::new(2, 0));
        assert!(world.chunk(ChunkCoord::new(-2, 0)).is_none());
    }

    #[test]
    fn block_reads_degrade_to_air() {
        let world = VoxelWorld::new(1);
        assert_eq!(world.block_at(5, 30, 5), Block::Air); // no chunk

        let mut world = VoxelWorld::new(1);
        let mut chunk = Chunk::new(ChunkCoord::new(0, 0));
        chunk.set(5, 30, 5, Block::Stone);
        world.insert_chunk(chunk);

        assert_eq!(world.block_at(5, 30, 5), Block::Stone);
        assert_eq!(world.block_at(5, -1, 5), Block::Air); // below the world
        assert_eq!(world.block_at(5, 64, 5), Block::Air); // above the world
        assert_eq!(world.block_at(21, 30, 5), Block::Air); // neighbor not loaded
    }

    #[test]
    fn set_block_round_trips_and_reports_the_owning_chunk() {
        let mut world = VoxelWorld::new(1);
        world.insert_chunk(Chunk::new(ChunkCoord::new(-1, 0)));

        // World (-3, 40, 2) lands in chunk (-1, 0), local (13, 40, 2).
        let coord = world.set_block(-3, 40, 2, Block::Dirt);
        assert_eq!(coord, Some(ChunkCoord::new(-1, 0)));
        assert_eq!(world.block_at(-3, 40, 2), Block::Dirt);
    }

    #[test]
    fn set_block_is_a_noop_outside_resident_chunks_and_height() {
        let mut world = VoxelWorld::new(1);
        world.insert_chunk(Chunk::new(ChunkCoord::new(0, 0)));

        assert_eq!(world.set_block(40, 30, 0, Block::Stone), None);
        assert_eq!(world.set_block(5, 64, 5, Block::Stone), None);
        assert_eq!(world.set_block(5, -1, 5, Block::Stone), None);
        assert_eq!(world.block_at(40, 30, 0), Block::Air);
    }

    #[test]
    fn generating_slots_are_resident_but_read_as_air() {
        let mut world = VoxelWorld::new(1);
        let coord = ChunkCoord::new(2, 2);
        world.mark_generating(coord);

        assert!(world.is_resident(coord));
        assert!(world.is_generating(coord));
        assert_eq!(world.loaded_count(), 0);
        assert_eq!(world.block_at(33, 10, 33), Block::Air);
        assert!(world
            .missing_chunks_within(coord, 0)
            .is_empty());

        world.cancel_generating(coord);
        assert!(!world.is_resident(coord));
    }

    #[test]
    fn cancel_generating_never_drops_a_loaded_chunk() {
        let mut world = VoxelWorld::new(1);
        world.insert_chunk(Chunk::new(ChunkCoord::new(0, 0)));
        world.cancel_generating(ChunkCoord::new(0, 0));
        assert!(world.chunk(ChunkCoord::new(0, 0)).is_some());
    }

    #[test]
    fn stale_pending_lists_only_out_of_range_requests() {
        let mut world = VoxelWorld::new(1);
        world.mark_generating(ChunkCoord::new(0, 0));
        world.mark_generating(ChunkCoord::new(5, 0));

        let stale = world.stale_pending(ChunkCoord::new(0, 0), RENDER_DISTANCE);
        assert_eq!(stale, vec![ChunkCoord::new(5, 0)]);
    }

    #[test]
    fn clear_evicts_everything() {
        let mut world = VoxelWorld::new(1);
        update_around(&mut world, ChunkCoord::new(0, 0));
        assert!(world.loaded_count() > 0);
        world.clear();
        assert_eq!(world.loaded_count(), 0);
        assert_eq!(world.block_at(0, 30, 0), Block::Air);
    }
}
