mod chunk;
pub mod mesh_gen;
mod terrain;
mod world_state;

pub use chunk::{Chunk, ChunkCoord, CHUNK_HEIGHT, CHUNK_SIZE, RENDER_DISTANCE};
pub use mesh_gen::build_chunk_mesh;
pub use terrain::{generate_chunk, surface_height, SEA_LEVEL};
pub use world_state::{ChunkSlot, VoxelWorld, DEFAULT_SEED};
