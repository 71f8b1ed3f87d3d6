//! The hexagonal grid container: cell storage, symmetric neighbor
//! wiring and spatial queries.
//!
//! Adjacency is resolved through a neighbor table built once at
//! construction, so direction classification is a plain lookup rather
//! than coordinate math scattered through the generation phases.

use crate::edge::Edge;
use crate::hex::{Direction, Hex};

/// A fixed-size grid of hexes in odd-q offset coordinates.
pub struct HexGrid {
    pub width: usize,
    pub height: usize,
    hexes: Vec<Hex>,
    /// Per-hex neighbor coordinates, indexed by [`Direction::index`].
    /// Out-of-range slots are `None` and never synthesized.
    neighbors: Vec<[Option<(usize, usize)>; 6]>,
}

impl HexGrid {
    /// Build an empty grid and wire up the neighbor table.
    pub fn new(width: usize, height: usize) -> Self {
        let mut hexes = Vec::with_capacity(width * height);
        let mut neighbors = Vec::with_capacity(width * height);

        for y in 0..height {
            for x in 0..width {
                hexes.push(Hex::new(x, y));

                let mut slots = [None; 6];
                for dir in Direction::ALL {
                    let (dx, dy) = dir.offset(x);
                    let nx = x as i32 + dx;
                    let ny = y as i32 + dy;
                    if nx >= 0 && ny >= 0 && (nx as usize) < width && (ny as usize) < height {
                        slots[dir.index()] = Some((nx as usize, ny as usize));
                    }
                }
                neighbors.push(slots);
            }
        }

        Self {
            width,
            height,
            hexes,
            neighbors,
        }
    }

    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// The hex at `(x, y)`, or `None` when out of bounds.
    pub fn find_hex(&self, x: usize, y: usize) -> Option<&Hex> {
        if x < self.width && y < self.height {
            Some(&self.hexes[self.index(x, y)])
        } else {
            None
        }
    }

    /// In-bounds accessor. Panics on out-of-range coordinates; the
    /// generation phases only ever iterate valid coordinates.
    pub fn hex(&self, x: usize, y: usize) -> &Hex {
        &self.hexes[y * self.width + x]
    }

    pub fn hex_mut(&mut self, x: usize, y: usize) -> &mut Hex {
        let idx = self.index(x, y);
        &mut self.hexes[idx]
    }

    /// Coordinates of the neighbor in `dir`, if present.
    pub fn neighbor_coords(&self, x: usize, y: usize, dir: Direction) -> Option<(usize, usize)> {
        self.neighbors[self.index(x, y)][dir.index()]
    }

    /// The neighboring hex in `dir`, if present.
    pub fn neighbor(&self, x: usize, y: usize, dir: Direction) -> Option<&Hex> {
        self.neighbor_coords(x, y, dir)
            .map(|(nx, ny)| self.hex(nx, ny))
    }

    /// The edge toward the neighbor in `dir`, if that neighbor exists.
    ///
    /// Edges are derived values: up/down orientation and delta are
    /// computed from the hexes' current altitudes at query time.
    pub fn edge_toward(&self, x: usize, y: usize, dir: Direction) -> Option<Edge<'_>> {
        self.neighbor_coords(x, y, dir)
            .map(|(nx, ny)| Edge::new(self.hex(x, y), self.hex(nx, ny), dir))
    }

    /// Every edge of the hex at `(x, y)`, in [`Direction::ALL`] order.
    /// Boundary hexes have fewer than six.
    pub fn edges_of(&self, x: usize, y: usize) -> Vec<Edge<'_>> {
        Direction::ALL
            .iter()
            .filter_map(|&dir| self.edge_toward(x, y, dir))
            .collect()
    }

    /// Row-major iteration over all hexes.
    pub fn iter(&self) -> impl Iterator<Item = &Hex> {
        self.hexes.iter()
    }

    /// Row-major coordinate iteration.
    pub fn coords(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        (0..self.width * self.height).map(move |i| (i % width, i / width))
    }

    pub fn len(&self) -> usize {
        self.hexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hexes.is_empty()
    }

    /// Number of land hexes.
    pub fn land_count(&self) -> usize {
        self.hexes.iter().filter(|h| h.is_land()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbor_symmetry() {
        let grid = HexGrid::new(7, 5);
        for (x, y) in grid.coords() {
            for dir in Direction::ALL {
                if let Some((nx, ny)) = grid.neighbor_coords(x, y, dir) {
                    assert_eq!(
                        grid.neighbor_coords(nx, ny, dir.opposite()),
                        Some((x, y)),
                        "asymmetric wiring at ({}, {}) toward {:?}",
                        x,
                        y,
                        dir
                    );
                }
            }
        }
    }

    #[test]
    fn test_find_hex_bounds() {
        let grid = HexGrid::new(4, 3);
        assert!(grid.find_hex(0, 0).is_some());
        assert!(grid.find_hex(3, 2).is_some());
        assert!(grid.find_hex(4, 0).is_none());
        assert!(grid.find_hex(0, 3).is_none());
    }

    #[test]
    fn test_boundary_hexes_have_fewer_edges() {
        let grid = HexGrid::new(5, 5);
        // Corner hex: only a few neighbors present.
        let corner = grid.edges_of(0, 0).len();
        assert!(corner < 6);
        // An interior even-column hex has the full ring.
        assert_eq!(grid.edges_of(2, 2).len(), 6);
    }

    #[test]
    fn test_edges_follow_direction_order() {
        let grid = HexGrid::new(5, 5);
        let edges = grid.edges_of(2, 2);
        let dirs: Vec<_> = edges.iter().map(|e| e.direction).collect();
        assert_eq!(dirs, Direction::ALL.to_vec());
    }

    #[test]
    fn test_no_synthesized_neighbors() {
        let grid = HexGrid::new(3, 3);
        assert!(grid.neighbor_coords(0, 0, Direction::North).is_none());
        assert!(grid.neighbor_coords(0, 0, Direction::NorthWest).is_none());
        assert!(grid.neighbor_coords(2, 2, Direction::South).is_none());
    }
}
