//! Hex cell data and the six-slot compass direction model.
//!
//! The grid uses an odd-q vertical offset layout: hexes sit in columns,
//! odd columns shifted half a cell south. Every hex therefore has up to
//! six neighbors: north, south, north-west, north-east, south-west and
//! south-east.

use serde::{Deserialize, Serialize};

use crate::biomes::Biome;
use crate::resources::Resource;
use crate::territory::TerritoryId;

/// Compass direction toward one of a hex's six neighbor slots.
///
/// The variant order is the fixed traversal order used everywhere a
/// deterministic visitation or tie-break is needed (river tracing,
/// flood fill, edge enumeration).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Direction {
    /// All six directions in fixed traversal order.
    pub const ALL: [Direction; 6] = [
        Direction::North,
        Direction::South,
        Direction::NorthWest,
        Direction::NorthEast,
        Direction::SouthWest,
        Direction::SouthEast,
    ];

    /// Slot index matching the position in [`Direction::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// The direction pointing back across the same edge.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::NorthWest => Direction::SouthEast,
            Direction::NorthEast => Direction::SouthWest,
            Direction::SouthWest => Direction::NorthEast,
            Direction::SouthEast => Direction::NorthWest,
        }
    }

    /// Coordinate delta `(dx, dy)` for this direction from a hex in
    /// column `x`. Diagonal rows depend on column parity (odd columns
    /// are shifted south).
    pub fn offset(self, x: usize) -> (i32, i32) {
        let odd = x % 2 == 1;
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::NorthWest => {
                if odd { (-1, 0) } else { (-1, -1) }
            }
            Direction::NorthEast => {
                if odd { (1, 0) } else { (1, -1) }
            }
            Direction::SouthWest => {
                if odd { (-1, 1) } else { (-1, 0) }
            }
            Direction::SouthEast => {
                if odd { (1, 1) } else { (1, 0) }
            }
        }
    }
}

/// A single cell of the hexagonal world grid.
///
/// Coordinates are fixed at construction; every other field is written
/// by exactly one generation phase and read-only afterwards.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Hex {
    pub x: usize,
    pub y: usize,
    /// Elevation from noise scaled into `0.0..=TOP_HEIGHT`, nudged by
    /// a tie-breaking jitter of at most `ALTITUDE_JITTER`.
    pub altitude: f32,
    /// Local temperature in Celsius.
    pub temperature: f32,
    /// Moisture in `0.0..=1.0`.
    pub moisture: f32,
    pub biome: Biome,
    /// True iff altitude is above the selected sea level.
    pub land: bool,
    /// Owning territory, if any. Index-based back-reference; the
    /// territory holds the member coordinate list.
    pub territory: Option<TerritoryId>,
    pub resource: Option<Resource>,
}

impl Hex {
    pub fn new(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            altitude: 0.0,
            temperature: 0.0,
            moisture: 0.0,
            biome: Biome::Ocean,
            land: false,
            territory: None,
            resource: None,
        }
    }

    pub fn coord(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    pub fn is_land(&self) -> bool {
        self.land
    }

    pub fn is_water(&self) -> bool {
        !self.land
    }

    pub fn is_owned(&self) -> bool {
        self.territory.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposites_pair_up() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_ne!(dir.opposite(), dir);
        }
    }

    #[test]
    fn test_index_matches_all_order() {
        for (i, dir) in Direction::ALL.iter().enumerate() {
            assert_eq!(dir.index(), i);
        }
    }

    #[test]
    fn test_offset_round_trip() {
        // Stepping in a direction and back along its opposite must
        // return to the start, for both column parities.
        for x in [2usize, 3usize] {
            let y = 5usize;
            for dir in Direction::ALL {
                let (dx, dy) = dir.offset(x);
                let nx = (x as i32 + dx) as usize;
                let ny = (y as i32 + dy) as usize;
                let (bx, by) = dir.opposite().offset(nx);
                assert_eq!((nx as i32 + bx, ny as i32 + by), (x as i32, y as i32));
            }
        }
    }
}
