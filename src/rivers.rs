//! Steepest-descent river tracing.
//!
//! Rivers start at sampled high-altitude land hexes and walk downhill,
//! always crossing the edge with the steepest drop, until they reach
//! water or a basin with no further descent. Traced segments are stored
//! as canonical unordered coordinate pairs, so a marked edge is visible
//! from both of its hexes, and the visited set spans the whole tracing
//! pass: no segment is ever marked twice.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::grid::HexGrid;
use crate::hex::Direction;

/// Grid area covered by a single river source.
const AREA_PER_SOURCE: usize = 64;

/// Fraction of the land altitude band below which a hex cannot be a
/// river source (sources come from the top 40%).
const SOURCE_BAND: f32 = 0.6;

/// Canonical key for a traced segment: the two hex coordinates ordered
/// by `(y, x)`.
type SegmentKey = ((usize, usize), (usize, usize));

/// The set of edges carrying a river.
#[derive(Clone, Debug, Default)]
pub struct RiverMap {
    segments: HashSet<SegmentKey>,
}

impl RiverMap {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(a: (usize, usize), b: (usize, usize)) -> SegmentKey {
        if (a.1, a.0) <= (b.1, b.0) {
            (a, b)
        } else {
            (b, a)
        }
    }

    /// Mark the edge between `a` and `b`. Returns false if it was
    /// already a river segment.
    pub fn mark(&mut self, a: (usize, usize), b: (usize, usize)) -> bool {
        self.segments.insert(Self::key(a, b))
    }

    /// Whether the edge between `a` and `b` carries a river.
    pub fn contains(&self, a: (usize, usize), b: (usize, usize)) -> bool {
        self.segments.contains(&Self::key(a, b))
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Directions at `(x, y)` whose edges carry a river, in
    /// [`Direction::ALL`] order.
    pub fn directions_at(&self, grid: &HexGrid, x: usize, y: usize) -> Vec<Direction> {
        Direction::ALL
            .iter()
            .filter(|&&dir| {
                grid.neighbor_coords(x, y, dir)
                    .is_some_and(|n| self.contains((x, y), n))
            })
            .copied()
            .collect()
    }
}

/// Trace rivers across the grid. Altitudes and the land/water split
/// must be final before this runs.
pub fn trace_rivers(grid: &HexGrid, seed: u64) -> RiverMap {
    let mut rivers = RiverMap::new();

    let mut min_land = f32::MAX;
    let mut max_land = f32::MIN;
    for hex in grid.iter().filter(|h| h.is_land()) {
        min_land = min_land.min(hex.altitude);
        max_land = max_land.max(hex.altitude);
    }
    if max_land <= min_land {
        return rivers;
    }

    let threshold = min_land + (max_land - min_land) * SOURCE_BAND;
    let mut candidates: Vec<(usize, usize)> = grid
        .coords()
        .filter(|&(x, y)| {
            let hex = grid.hex(x, y);
            hex.is_land() && hex.altitude >= threshold
        })
        .collect();
    if candidates.is_empty() {
        return rivers;
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    candidates.shuffle(&mut rng);
    let count = (grid.len() / AREA_PER_SOURCE).max(1).min(candidates.len());

    for &source in candidates.iter().take(count) {
        trace_from(grid, source, &mut rivers);
    }

    rivers
}

/// Walk one river from `source` to water or a pit. Returns the hexes
/// visited in order, starting at `source`.
fn trace_from(
    grid: &HexGrid,
    source: (usize, usize),
    rivers: &mut RiverMap,
) -> Vec<(usize, usize)> {
    let (mut x, mut y) = source;
    let mut path = vec![source];

    loop {
        let current = grid.hex(x, y);

        // Steepest unmarked descent; ties keep the earliest direction
        // in the fixed traversal order.
        let mut best: Option<((usize, usize), f32)> = None;
        for dir in Direction::ALL {
            if let Some(n) = grid.neighbor_coords(x, y, dir) {
                let neighbor = grid.hex(n.0, n.1);
                if neighbor.altitude < current.altitude && !rivers.contains((x, y), n) {
                    let lower = match best {
                        Some((_, alt)) => neighbor.altitude < alt,
                        None => true,
                    };
                    if lower {
                        best = Some((n, neighbor.altitude));
                    }
                }
            }
        }

        let Some((next, _)) = best else {
            // Pit with no drainage: the trace ends here.
            return path;
        };

        rivers.mark((x, y), next);
        path.push(next);
        if grid.hex(next.0, next.1).is_water() {
            return path;
        }
        (x, y) = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A 1-row slope descending west to east into water.
    fn sloped_grid() -> HexGrid {
        let mut grid = HexGrid::new(5, 1);
        let altitudes = [100.0, 80.0, 60.0, 40.0, 5.0];
        for (x, &alt) in altitudes.iter().enumerate() {
            let hex = grid.hex_mut(x, 0);
            hex.altitude = alt;
            hex.land = x < 4;
        }
        grid
    }

    #[test]
    fn test_trace_descends_to_water() {
        let grid = sloped_grid();
        let mut rivers = RiverMap::new();
        trace_from(&grid, (0, 0), &mut rivers);

        // Four segments down the slope, ending in the water hex.
        assert_eq!(rivers.len(), 4);
        for x in 0..4 {
            assert!(rivers.contains((x, 0), (x + 1, 0)));
        }
    }

    #[test]
    fn test_segments_visible_from_both_hexes() {
        let grid = sloped_grid();
        let mut rivers = RiverMap::new();
        trace_from(&grid, (0, 0), &mut rivers);

        let from_west = rivers.directions_at(&grid, 0, 0);
        let from_east = rivers.directions_at(&grid, 1, 0);
        assert!(from_west.contains(&Direction::SouthEast));
        assert!(from_east.contains(&Direction::NorthWest));
    }

    #[test]
    fn test_pit_terminates_trace() {
        // A lone land hex lower than nothing: no descent, no segments.
        let mut grid = HexGrid::new(3, 1);
        grid.hex_mut(0, 0).altitude = 10.0;
        grid.hex_mut(1, 0).altitude = 50.0;
        grid.hex_mut(2, 0).altitude = 60.0;
        for x in 0..3 {
            grid.hex_mut(x, 0).land = true;
        }
        let mut rivers = RiverMap::new();
        trace_from(&grid, (1, 0), &mut rivers);

        // One step down into the pit at (0, 0), then the trace stops.
        assert_eq!(rivers.len(), 1);
        assert!(rivers.contains((1, 0), (0, 0)));
    }

    #[test]
    fn test_no_double_marking() {
        let grid = sloped_grid();
        let mut rivers = RiverMap::new();
        trace_from(&grid, (0, 0), &mut rivers);
        let before = rivers.len();

        // Re-tracing the same path cannot re-mark segments; the second
        // trace diverts or dies without touching marked edges.
        trace_from(&grid, (0, 0), &mut rivers);
        for x in 0..4 {
            assert!(rivers.contains((x, 0), (x + 1, 0)));
        }
        assert!(rivers.len() >= before);
    }

    #[test]
    fn test_traced_paths_strictly_descend() {
        let mut grid = HexGrid::new(10, 10);
        crate::heightmap::generate_altitudes(&mut grid, 99);
        crate::heightmap::apply_sea_level(&mut grid, 55);

        // Walk a trace from every land hex: each step must drop in
        // altitude, never flat, never uphill.
        let mut rivers = RiverMap::new();
        let sources: Vec<(usize, usize)> = grid
            .coords()
            .filter(|&(x, y)| grid.hex(x, y).is_land())
            .collect();
        for &source in &sources {
            let path = trace_from(&grid, source, &mut rivers);
            for step in path.windows(2) {
                let from = grid.hex(step[0].0, step[0].1).altitude;
                let to = grid.hex(step[1].0, step[1].1).altitude;
                assert!(
                    to < from,
                    "river ran uphill or flat from {:?} to {:?}",
                    step[0],
                    step[1]
                );
            }
        }

        // The marked segments carry the same guarantee: no segment
        // joins two hexes of equal altitude.
        let traced = trace_rivers(&grid, 99);
        for &((ax, ay), (bx, by)) in &traced.segments {
            assert_ne!(grid.hex(ax, ay).altitude, grid.hex(bx, by).altitude);
        }
    }

    #[test]
    fn test_determinism() {
        let mut grid = HexGrid::new(12, 8);
        crate::heightmap::generate_altitudes(&mut grid, 5);
        crate::heightmap::apply_sea_level(&mut grid, 60);

        let a = trace_rivers(&grid, 11);
        let b = trace_rivers(&grid, 11);
        assert_eq!(a.len(), b.len());
        for (x, y) in grid.coords() {
            assert_eq!(a.directions_at(&grid, x, y), b.directions_at(&grid, x, y));
        }
    }

    #[test]
    fn test_out_of_band_sources_rejected() {
        // All-water grid: no land band, no rivers.
        let grid = HexGrid::new(4, 4);
        let rivers = trace_rivers(&grid, 3);
        assert!(rivers.is_empty());
    }
}
