//! Biome classification from the temperature/moisture pair.
//!
//! The table is deterministic: the same `(temperature, moisture)` pair
//! always maps to the same biome, with a water override applied per hex.

use serde::{Deserialize, Serialize};

use crate::grid::HexGrid;

/// Biome category assigned to each hex.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Biome {
    #[default]
    Ocean,
    Tundra,
    Taiga,
    Desert,
    Grassland,
    Forest,
    Rainforest,
    Savanna,
}

impl Biome {
    pub fn title(&self) -> &'static str {
        match self {
            Biome::Ocean => "Ocean",
            Biome::Tundra => "Tundra",
            Biome::Taiga => "Taiga",
            Biome::Desert => "Desert",
            Biome::Grassland => "Grassland",
            Biome::Forest => "Forest",
            Biome::Rainforest => "Rainforest",
            Biome::Savanna => "Savanna",
        }
    }
}

/// Classify a land hex from its temperature (°C) and moisture (0..=1).
pub fn classify(temperature: f32, moisture: f32) -> Biome {
    if temperature < -5.0 {
        Biome::Tundra
    } else if temperature < 3.0 {
        Biome::Taiga
    } else if moisture < 0.2 {
        Biome::Desert
    } else if temperature >= 22.0 {
        if moisture >= 0.65 {
            Biome::Rainforest
        } else {
            Biome::Savanna
        }
    } else if moisture >= 0.55 {
        Biome::Forest
    } else {
        Biome::Grassland
    }
}

/// Assign a biome to every hex; water hexes become [`Biome::Ocean`]
/// regardless of climate.
pub fn assign_biomes(grid: &mut HexGrid) {
    for y in 0..grid.height {
        for x in 0..grid.width {
            let hex = grid.hex_mut(x, y);
            hex.biome = if hex.is_water() {
                Biome::Ocean
            } else {
                classify(hex.temperature, hex.moisture)
            };
        }
    }
}
