//! Elevation generation and sea-level selection.
//!
//! Altitudes come from multi-octave Perlin noise scaled into
//! `0..=TOP_HEIGHT`, plus a tiny seeded jitter that keeps every altitude
//! distinct. Distinct altitudes make the percentile sea-level cut exact:
//! asking for 50% water yields exactly half the hexes below sea level.

use noise::{NoiseFn, Perlin, Seedable};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::grid::HexGrid;

/// Maximum altitude; sea level is always chosen inside this range.
pub const TOP_HEIGHT: f32 = 255.0;

/// Jitter magnitude added to each altitude to break ties. Altitudes can
/// exceed [`TOP_HEIGHT`] by at most this much.
pub const ALTITUDE_JITTER: f32 = 1e-3;

/// Parameters for the fractal elevation noise.
pub struct TerrainParams {
    /// Base frequency (lower = larger landmasses).
    pub frequency: f64,
    /// Number of noise octaves.
    pub octaves: u32,
    /// Amplitude decay per octave.
    pub persistence: f64,
    /// Frequency multiplier per octave.
    pub lacunarity: f64,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            frequency: 2.2,
            octaves: 5,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }
}

/// Assign an altitude to every hex from seeded fractal noise.
pub fn generate_altitudes(grid: &mut HexGrid, seed: u64) {
    generate_altitudes_with(grid, seed, &TerrainParams::default());
}

/// Assign altitudes with explicit noise parameters.
pub fn generate_altitudes_with(grid: &mut HexGrid, seed: u64, params: &TerrainParams) {
    let terrain_noise = Perlin::new(1).set_seed(seed as u32);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let width = grid.width;
    let height = grid.height;

    for y in 0..height {
        for x in 0..width {
            let nx = x as f64 / width as f64 * params.frequency;
            let ny = y as f64 / height as f64 * params.frequency;

            // fbm in -1..1, remapped to 0..TOP_HEIGHT.
            let v = fbm(
                &terrain_noise,
                nx,
                ny,
                params.octaves,
                params.persistence,
                params.lacunarity,
            );
            let altitude = ((v + 1.0) * 0.5) as f32 * TOP_HEIGHT;
            let jitter: f32 = rng.gen::<f32>() * ALTITUDE_JITTER;

            grid.hex_mut(x, y).altitude = altitude + jitter;
        }
    }
}

/// Choose the sea level as the altitude percentile matching
/// `sea_percent`, then finalize every hex's land/water flag.
///
/// With pairwise-distinct altitudes exactly
/// `len * sea_percent / 100` hexes end up below sea level.
/// Returns the selected sea level.
pub fn apply_sea_level(grid: &mut HexGrid, sea_percent: u8) -> f32 {
    let mut altitudes: Vec<f32> = grid.iter().map(|h| h.altitude).collect();
    altitudes.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let k = altitudes.len() * sea_percent as usize / 100;
    let sealevel = if k == 0 {
        // Everything is land.
        altitudes.first().copied().unwrap_or(0.0) - 1.0
    } else {
        altitudes[k - 1]
    };

    for y in 0..grid.height {
        for x in 0..grid.width {
            let hex = grid.hex_mut(x, y);
            hex.land = hex.altitude > sealevel;
        }
    }

    sealevel
}

/// Fractional Brownian motion accumulator over a noise source.
pub fn fbm(
    noise: &impl NoiseFn<f64, 2>,
    x: f64,
    y: f64,
    octaves: u32,
    persistence: f64,
    lacunarity: f64,
) -> f64 {
    let mut total = 0.0;
    let mut amplitude = 1.0;
    let mut frequency = 1.0;
    let mut max_value = 0.0;

    for _ in 0..octaves {
        total += amplitude * noise.get([x * frequency, y * frequency]);
        max_value += amplitude;
        amplitude *= persistence;
        frequency *= lacunarity;
    }

    total / max_value
}
