//! Seed management for world generation.
//!
//! Each generation stage gets its own seed derived from a master seed,
//! so individual stages can be varied or held constant independently
//! while the whole pipeline stays reproducible.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Seeds for all generation stages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldSeeds {
    /// Master seed (used for display/reference).
    pub master: u64,
    /// Elevation noise and altitude jitter.
    pub heightmap: u64,
    /// Sea-level percentile draw when none is configured.
    pub sea_level: u64,
    /// River source sampling.
    pub rivers: u64,
    /// Territory colors.
    pub territories: u64,
    /// Resource deposit placement.
    pub resources: u64,
}

impl WorldSeeds {
    /// Derive all stage seeds deterministically from a master seed.
    pub fn from_master(master: u64) -> Self {
        Self {
            master,
            heightmap: derive_seed(master, "heightmap"),
            sea_level: derive_seed(master, "sea_level"),
            rivers: derive_seed(master, "rivers"),
            territories: derive_seed(master, "territories"),
            resources: derive_seed(master, "resources"),
        }
    }
}

impl Default for WorldSeeds {
    fn default() -> Self {
        Self::from_master(rand::random())
    }
}

/// Derive a stage seed from the master seed and the stage name.
fn derive_seed(master: u64, stage: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    master.hash(&mut hasher);
    stage.hash(&mut hasher);
    hasher.finish()
}

impl std::fmt::Display for WorldSeeds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "WorldSeeds {{ master: {}, heightmap: {}, sea_level: {}, rivers: {}, \
             territories: {}, resources: {} }}",
            self.master, self.heightmap, self.sea_level, self.rivers, self.territories,
            self.resources,
        )
    }
}
