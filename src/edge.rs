//! The boundary between two adjacent hexes.
//!
//! Edges are derived values, recomputed on demand from the two hexes'
//! current state. The up/down orientation always reflects the altitudes
//! at query time, so edges queried after the heightmap phase see the
//! final terrain.

use crate::hex::{Direction, Hex};

/// The shared boundary between `one` and `two`, where `two` sits in the
/// `direction` slot of `one`.
#[derive(Clone, Copy, Debug)]
pub struct Edge<'a> {
    pub one: &'a Hex,
    pub two: &'a Hex,
    pub direction: Direction,
}

impl<'a> Edge<'a> {
    pub fn new(one: &'a Hex, two: &'a Hex, direction: Direction) -> Self {
        Self {
            one,
            two,
            direction,
        }
    }

    /// The upslope hex. On equal altitudes the hex with the
    /// lexicographically smaller `(y, x)` coordinate is upslope, so the
    /// orientation is stable from either hex's perspective.
    pub fn up(&self) -> &'a Hex {
        if self.one.altitude > self.two.altitude {
            self.one
        } else if self.two.altitude > self.one.altitude {
            self.two
        } else if (self.one.y, self.one.x) < (self.two.y, self.two.x) {
            self.one
        } else {
            self.two
        }
    }

    /// The downslope hex.
    pub fn down(&self) -> &'a Hex {
        let up = self.up();
        if std::ptr::eq(up, self.one) {
            self.two
        } else {
            self.one
        }
    }

    /// Altitude drop across the edge; non-negative by construction.
    pub fn delta(&self) -> f32 {
        self.up().altitude - self.down().altitude
    }
}

/// Two edges are equal when they describe the same physical boundary,
/// regardless of which hex they were derived from.
impl PartialEq for Edge<'_> {
    fn eq(&self, other: &Self) -> bool {
        let a = (self.one.coord(), self.two.coord());
        let b = (other.one.coord(), other.two.coord());
        a == b || a == (b.1, b.0)
    }
}

impl Eq for Edge<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::HexGrid;

    fn sloped_pair() -> HexGrid {
        let mut grid = HexGrid::new(2, 1);
        grid.hex_mut(0, 0).altitude = 10.0;
        grid.hex_mut(1, 0).altitude = 3.0;
        grid
    }

    #[test]
    fn test_delta_and_orientation() {
        let grid = sloped_pair();
        // (1, 0) sits south-east of the even-column hex (0, 0).
        let edge = grid.edge_toward(0, 0, Direction::SouthEast).unwrap();
        assert_eq!(edge.delta(), 7.0);
        assert_eq!(edge.up().coord(), (0, 0));
        assert_eq!(edge.down().coord(), (1, 0));
    }

    #[test]
    fn test_equality_across_perspectives() {
        let grid = sloped_pair();
        let from_a = grid.edge_toward(0, 0, Direction::SouthEast).unwrap();
        let from_b = grid.edge_toward(1, 0, Direction::NorthWest).unwrap();
        assert_eq!(from_a, from_b);
        // Orientation agrees no matter the perspective.
        assert_eq!(from_a.up().coord(), from_b.up().coord());
        assert_eq!(from_a.delta(), from_b.delta());
    }

    #[test]
    fn test_equal_altitude_tie_break() {
        let mut grid = HexGrid::new(2, 1);
        grid.hex_mut(0, 0).altitude = 5.0;
        grid.hex_mut(1, 0).altitude = 5.0;

        let from_a = grid.edge_toward(0, 0, Direction::SouthEast).unwrap();
        let from_b = grid.edge_toward(1, 0, Direction::NorthWest).unwrap();
        // Lexicographically smaller (y, x) wins the tie from both sides.
        assert_eq!(from_a.up().coord(), (0, 0));
        assert_eq!(from_b.up().coord(), (0, 0));
        assert_eq!(from_a.delta(), 0.0);
    }

    #[test]
    fn test_delta_reflects_current_altitude() {
        let mut grid = sloped_pair();
        {
            let edge = grid.edge_toward(0, 0, Direction::SouthEast).unwrap();
            assert_eq!(edge.delta(), 7.0);
        }
        // Mutate terrain, re-derive: the edge sees the new altitudes.
        grid.hex_mut(1, 0).altitude = 20.0;
        let edge = grid.edge_toward(0, 0, Direction::SouthEast).unwrap();
        assert_eq!(edge.delta(), 10.0);
        assert_eq!(edge.up().coord(), (1, 0));
    }

    #[test]
    fn test_inequality_for_different_boundaries() {
        let grid = HexGrid::new(3, 3);
        let a = grid.edge_toward(1, 1, Direction::North).unwrap();
        let b = grid.edge_toward(1, 1, Direction::South).unwrap();
        assert_ne!(a, b);
    }
}
