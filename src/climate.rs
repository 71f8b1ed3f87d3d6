//! Temperature and moisture assignment.
//!
//! Temperature anchors the configured surface average to a latitude
//! curve (equator at the middle row, poles at the top and bottom edges)
//! and subtracts a lapse term for altitude above sea level. Moisture is
//! a breadth-first distance-to-water field: hexes close to water are
//! wet, hexes deep inland are dry.

use std::collections::VecDeque;

use crate::grid::HexGrid;
use crate::heightmap::TOP_HEIGHT;
use crate::hex::Direction;

/// Temperature bonus at the equator relative to the surface average.
const EQUATOR_BONUS: f32 = 8.0;

/// Temperature drop from equator to pole.
const POLAR_DROP: f32 = 30.0;

/// Temperature drop across the full altitude range (lapse rate).
const ALTITUDE_LAPSE: f32 = 22.0;

/// Hex distance from water at which moisture bottoms out.
const MOISTURE_RANGE: f32 = 12.0;

/// Moisture floor for hexes beyond the decay range.
const MOISTURE_FLOOR: f32 = 0.05;

/// Assign a temperature to every hex.
pub fn generate_temperature(grid: &mut HexGrid, avg_surface_temp: f32, sealevel: f32) {
    let height = grid.height;

    for y in 0..height {
        // 0.0 at the equator row, 1.0 at the poles.
        let latitude = if height > 1 {
            (y as f32 / (height - 1) as f32 - 0.5).abs() * 2.0
        } else {
            0.0
        };
        let lat_factor = latitude.powf(1.5);
        let base = avg_surface_temp + EQUATOR_BONUS - (EQUATOR_BONUS + POLAR_DROP) * lat_factor;

        for x in 0..grid.width {
            let hex = grid.hex_mut(x, y);
            let lapse = if hex.land {
                (hex.altitude - sealevel) / TOP_HEIGHT * ALTITUDE_LAPSE
            } else {
                0.0
            };
            hex.temperature = base - lapse;
        }
    }
}

/// Assign a moisture value to every hex from distance to water.
///
/// Multi-source BFS seeded row-major from every water hex, expanding in
/// [`Direction::ALL`] order, so the field is deterministic. Water hexes
/// are saturated; landlocked interiors decay toward the floor.
pub fn generate_moisture(grid: &mut HexGrid) {
    let len = grid.len();
    let mut distance: Vec<u32> = vec![u32::MAX; len];
    let mut queue = VecDeque::new();

    for (x, y) in grid.coords() {
        if grid.hex(x, y).is_water() {
            distance[y * grid.width + x] = 0;
            queue.push_back((x, y));
        }
    }

    while let Some((x, y)) = queue.pop_front() {
        let next = distance[y * grid.width + x] + 1;
        for dir in Direction::ALL {
            if let Some((nx, ny)) = grid.neighbor_coords(x, y, dir) {
                let idx = ny * grid.width + nx;
                if distance[idx] == u32::MAX {
                    distance[idx] = next;
                    queue.push_back((nx, ny));
                }
            }
        }
    }

    for (x, y) in grid.coords().collect::<Vec<_>>() {
        let dist = distance[y * grid.width + x];
        let moisture = if dist == 0 {
            1.0
        } else if dist == u32::MAX {
            MOISTURE_FLOOR
        } else {
            (1.0 - dist as f32 / MOISTURE_RANGE).clamp(MOISTURE_FLOOR, 1.0)
        };
        grid.hex_mut(x, y).moisture = moisture;
    }
}
