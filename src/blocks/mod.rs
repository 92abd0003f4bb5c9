mod block_type;

pub use block_type::{Block, BlockFace, BLOCK_COUNT};
