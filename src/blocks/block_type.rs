use bevy::prelude::IVec3;

/// A single voxel cell value. Plain data, no identity.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Block {
    #[default]
    Air,
    Grass,
    Dirt,
    Stone,
    Sand,
    Water,
}

pub const BLOCK_COUNT: usize = 6;

/// Base color per block type, indexed by the enum discriminant.
const BLOCK_COLORS: [[f32; 3]; BLOCK_COUNT] = [
    [0.0, 0.0, 0.0],    // Air (never meshed)
    [0.33, 0.63, 0.24], // Grass
    [0.55, 0.4, 0.26],  // Dirt
    [0.5, 0.5, 0.52],   // Stone
    [0.86, 0.81, 0.58], // Sand
    [0.2, 0.42, 0.78],  // Water
];

impl Block {
    pub fn is_air(self) -> bool {
        self == Block::Air
    }

    /// Transparent blocks don't occlude neighboring faces.
    pub fn is_transparent(self) -> bool {
        matches!(self, Block::Air | Block::Water)
    }

    /// Solid blocks support the player; water is swim-through.
    pub fn is_solid(self) -> bool {
        !self.is_transparent()
    }

    pub fn base_color(self) -> [f32; 3] {
        BLOCK_COLORS[self as usize]
    }
}

/// Which face of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockFace {
    Top,
    Bottom,
    North,
    South,
    East,
    West,
}

impl BlockFace {
    pub const ALL: [BlockFace; 6] = [
        BlockFace::Top,
        BlockFace::Bottom,
        BlockFace::North,
        BlockFace::South,
        BlockFace::East,
        BlockFace::West,
    ];

    /// Unit offset toward the neighbor this face looks at.
    pub fn offset(self) -> IVec3 {
        match self {
            BlockFace::Top => IVec3::Y,
            BlockFace::Bottom => IVec3::NEG_Y,
            BlockFace::North => IVec3::NEG_Z,
            BlockFace::South => IVec3::Z,
            BlockFace::East => IVec3::X,
            BlockFace::West => IVec3::NEG_X,
        }
    }

    /// Fixed directional shading multiplier (static occlusion approximation,
    /// not a lighting model).
    pub fn brightness(self) -> f32 {
        match self {
            BlockFace::Top => 1.0,
            BlockFace::Bottom => 0.5,
            BlockFace::North | BlockFace::South => 0.8,
            BlockFace::East | BlockFace::West => 0.65,
        }
    }
}
