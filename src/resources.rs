//! Resource deposit placement.
//!
//! A seeded pass over the finished terrain drops occasional deposits on
//! land hexes: a kind drawn from a fixed table and a 1..=10 rating.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::grid::HexGrid;

/// Chance for any given land hex to hold a deposit.
const DEPOSIT_CHANCE: f64 = 0.04;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Iron,
    Copper,
    Gold,
    Coal,
    Gems,
    Timber,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 6] = [
        ResourceKind::Iron,
        ResourceKind::Copper,
        ResourceKind::Gold,
        ResourceKind::Coal,
        ResourceKind::Gems,
        ResourceKind::Timber,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ResourceKind::Iron => "Iron",
            ResourceKind::Copper => "Copper",
            ResourceKind::Gold => "Gold",
            ResourceKind::Coal => "Coal",
            ResourceKind::Gems => "Gems",
            ResourceKind::Timber => "Timber",
        }
    }
}

/// A deposit on a single hex.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub kind: ResourceKind,
    /// Deposit quality, 1..=10.
    pub rating: u8,
}

/// Scatter deposits across land hexes. Row-major, seeded, so placement
/// is reproducible.
pub fn place_resources(grid: &mut HexGrid, seed: u64) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    for (x, y) in grid.coords().collect::<Vec<_>>() {
        if grid.hex(x, y).is_water() {
            continue;
        }
        if rng.gen_bool(DEPOSIT_CHANCE) {
            let kind = ResourceKind::ALL[rng.gen_range(0..ResourceKind::ALL.len())];
            let rating = rng.gen_range(1..=10);
            grid.hex_mut(x, y).resource = Some(Resource { kind, rating });
        }
    }
}
