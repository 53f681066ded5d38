use rand::Rng;
use serde::{Deserialize, Serialize};

use stepstone_core::math::Vec3;

/// Tile types for the lane road.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    /// A gap. Landing here ends the run.
    Empty,
    /// A stone block the actor can stand on.
    Solid,
}

/// An ordered tile sequence. Index 0 is always Solid, and no two
/// consecutive tiles are Empty, so every gap is clearable with a one- or
/// two-tile jump.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Road {
    tiles: Vec<Tile>,
}

impl Road {
    /// Build a road from explicit tiles, for scripted layouts.
    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        debug_assert!(tiles.first() == Some(&Tile::Solid), "road must start solid");
        Self { tiles }
    }

    pub fn len(&self) -> u32 {
        self.tiles.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tile at `index`, or `None` past the end of the road. An index at or
    /// beyond the length is the run-complete boundary, not an error.
    pub fn tile(&self, index: u32) -> Option<Tile> {
        self.tiles.get(index as usize).copied()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// World positions of the Solid tiles, spaced `tile_size` apart along
    /// the lane axis, for the presentation layer to lay out blocks.
    pub fn block_positions(&self, tile_size: f32) -> impl Iterator<Item = (u32, Vec3)> + '_ {
        self.tiles.iter().enumerate().filter_map(move |(i, tile)| {
            (*tile == Tile::Solid).then(|| (i as u32, Vec3::new(i as f32 * tile_size, 0.0, 0.0)))
        })
    }
}

/// Generate a road of `length` tiles.
///
/// Tile 0 is always Solid. Every tile after an Empty is forced Solid;
/// otherwise the tile is an even draw between Empty and Solid. The forced
/// tile is what keeps every road finishable: a double gap would be wider
/// than the longest jump.
///
/// Panics if `length` is 0; a zero-length road is a configuration error
/// and `GameConfig::validate` rejects it before generation is reachable.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, length: u32) -> Road {
    assert!(length >= 1, "road length must be >= 1");
    let mut tiles = Vec::with_capacity(length as usize);
    tiles.push(Tile::Solid);
    for i in 1..length as usize {
        if tiles[i - 1] == Tile::Empty {
            tiles.push(Tile::Solid);
        } else if rng.random_range(0..2) == 0 {
            tiles.push(Tile::Empty);
        } else {
            tiles.push(Tile::Solid);
        }
    }
    Road { tiles }
}
