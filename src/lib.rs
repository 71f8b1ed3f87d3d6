//! Hexagonal world-grid generation library.
//!
//! Builds a hex terrain grid with elevation, climate, biomes, rivers
//! and political territories from a handful of global parameters.

pub mod biomes;
pub mod climate;
pub mod edge;
pub mod error;
pub mod grid;
pub mod heightmap;
pub mod hex;
pub mod resources;
pub mod rivers;
pub mod seeds;
pub mod territory;
pub mod world;
