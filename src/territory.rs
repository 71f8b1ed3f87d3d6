//! Territory clustering and aggregates.
//!
//! Land hexes are partitioned by breadth-first flood fill: unvisited
//! land seeds a new territory in row-major scan order, and the fill
//! spreads to any unassigned land neighbor in fixed direction order.
//! A post-pass merges undersized islands into the nearest surviving
//! territory, so a territory may hold several disconnected groups.
//! Fill order, merge targets and ids are all deterministic for a fixed
//! grid and seed.

use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::biomes::Biome;
use crate::grid::HexGrid;
use crate::hex::Direction;

/// Territories smaller than this merge into a nearby larger one.
const MIN_TERRITORY_SIZE: usize = 6;

/// Sequential territory identifier.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TerritoryId(pub u32);

/// One maximal contiguous sub-region of a territory, anchored at its
/// first row-major hex.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub size: usize,
    pub x: usize,
    pub y: usize,
}

/// A clustered region of land hexes under one political grouping.
/// Immutable once clustering finishes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Territory {
    pub id: TerritoryId,
    /// Hex count across all groups.
    pub size: usize,
    /// Display color assigned from the clustering seed.
    pub color: (u8, u8, u8),
    /// True iff no member hex borders water.
    pub landlocked: bool,
    pub avg_temp: f32,
    pub avg_moisture: f32,
    /// Biome category -> member count.
    pub biomes: BTreeMap<Biome, usize>,
    /// Bordering territories; never contains the territory itself.
    pub neighbors: BTreeSet<TerritoryId>,
    /// One entry per connected component.
    pub groups: Vec<Group>,
    /// Member coordinates, row-major sorted.
    pub hexes: Vec<(usize, usize)>,
}

/// Partition all land hexes into territories, write the back-reference
/// onto each hex and compute the aggregates.
pub fn cluster_territories(grid: &mut HexGrid, seed: u64) -> Vec<Territory> {
    let clusters = flood_fill_clusters(grid);
    let clusters = merge_small_islands(clusters);
    build_territories(grid, clusters, seed)
}

/// Row-major seeded BFS flood fill over land adjacency.
fn flood_fill_clusters(grid: &HexGrid) -> Vec<Vec<(usize, usize)>> {
    let mut assigned = vec![false; grid.len()];
    let mut clusters: Vec<Vec<(usize, usize)>> = Vec::new();

    for (sx, sy) in grid.coords().collect::<Vec<_>>() {
        if !grid.hex(sx, sy).is_land() || assigned[sy * grid.width + sx] {
            continue;
        }

        let mut members = Vec::new();
        let mut queue = VecDeque::new();
        assigned[sy * grid.width + sx] = true;
        queue.push_back((sx, sy));

        while let Some((x, y)) = queue.pop_front() {
            members.push((x, y));
            for dir in Direction::ALL {
                if let Some((nx, ny)) = grid.neighbor_coords(x, y, dir) {
                    let idx = ny * grid.width + nx;
                    if grid.hex(nx, ny).is_land() && !assigned[idx] {
                        assigned[idx] = true;
                        queue.push_back((nx, ny));
                    }
                }
            }
        }
        clusters.push(members);
    }

    clusters
}

/// Merge clusters below [`MIN_TERRITORY_SIZE`] into the nearest
/// surviving cluster, measured by squared distance between anchors
/// (a cluster's anchor is its BFS seed, the first row-major hex).
/// Ties go to the earlier cluster. When nothing survives the size cut,
/// every cluster stands on its own.
fn merge_small_islands(mut clusters: Vec<Vec<(usize, usize)>>) -> Vec<Vec<(usize, usize)>> {
    let survivors: Vec<usize> = clusters
        .iter()
        .enumerate()
        .filter(|(_, c)| c.len() >= MIN_TERRITORY_SIZE)
        .map(|(i, _)| i)
        .collect();
    if survivors.is_empty() {
        return clusters;
    }

    for i in 0..clusters.len() {
        if clusters[i].len() >= MIN_TERRITORY_SIZE || clusters[i].is_empty() {
            continue;
        }
        let anchor = clusters[i][0];

        let mut target = survivors[0];
        let mut best = u64::MAX;
        for &s in &survivors {
            let other = clusters[s][0];
            let dx = anchor.0 as i64 - other.0 as i64;
            let dy = anchor.1 as i64 - other.1 as i64;
            let dist = (dx * dx + dy * dy) as u64;
            if dist < best {
                best = dist;
                target = s;
            }
        }

        let island = std::mem::take(&mut clusters[i]);
        clusters[target].extend(island);
    }

    clusters.retain(|c| !c.is_empty());
    clusters
}

/// Turn merged clusters into finished territories: sequential ids,
/// hex back-references, aggregates, groups and colors.
fn build_territories(
    grid: &mut HexGrid,
    clusters: Vec<Vec<(usize, usize)>>,
    seed: u64,
) -> Vec<Territory> {
    // Write ownership first so border scans can see both sides.
    for (i, cluster) in clusters.iter().enumerate() {
        let id = TerritoryId(i as u32);
        for &(x, y) in cluster {
            grid.hex_mut(x, y).territory = Some(id);
        }
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut territories = Vec::with_capacity(clusters.len());

    for (i, mut cluster) in clusters.into_iter().enumerate() {
        let id = TerritoryId(i as u32);
        cluster.sort_by_key(|&(x, y)| (y, x));

        let mut temp_sum = 0.0f32;
        let mut moisture_sum = 0.0f32;
        let mut biomes: BTreeMap<Biome, usize> = BTreeMap::new();
        let mut neighbors: BTreeSet<TerritoryId> = BTreeSet::new();
        let mut landlocked = true;

        for &(x, y) in &cluster {
            let hex = grid.hex(x, y);
            temp_sum += hex.temperature;
            moisture_sum += hex.moisture;
            *biomes.entry(hex.biome).or_insert(0) += 1;

            for dir in Direction::ALL {
                if let Some(neighbor) = grid.neighbor(x, y, dir) {
                    if neighbor.is_water() {
                        landlocked = false;
                    } else if let Some(other) = neighbor.territory {
                        if other != id {
                            neighbors.insert(other);
                        }
                    }
                }
            }
        }

        let size = cluster.len();
        let color = (
            rng.gen_range(40..=220),
            rng.gen_range(40..=220),
            rng.gen_range(40..=220),
        );

        territories.push(Territory {
            id,
            size,
            color,
            landlocked,
            avg_temp: temp_sum / size as f32,
            avg_moisture: moisture_sum / size as f32,
            biomes,
            neighbors,
            groups: find_groups(grid, &cluster),
            hexes: cluster,
        });
    }

    territories
}

/// Connected components within one territory's member set, in
/// row-major anchor order.
fn find_groups(grid: &HexGrid, members: &[(usize, usize)]) -> Vec<Group> {
    let member_set: HashSet<(usize, usize)> = members.iter().copied().collect();
    let mut visited: HashSet<(usize, usize)> = HashSet::new();
    let mut groups = Vec::new();

    for &(sx, sy) in members {
        if visited.contains(&(sx, sy)) {
            continue;
        }

        let mut size = 0;
        let mut queue = VecDeque::new();
        visited.insert((sx, sy));
        queue.push_back((sx, sy));

        while let Some((x, y)) = queue.pop_front() {
            size += 1;
            for dir in Direction::ALL {
                if let Some(n) = grid.neighbor_coords(x, y, dir) {
                    if member_set.contains(&n) && !visited.contains(&n) {
                        visited.insert(n);
                        queue.push_back(n);
                    }
                }
            }
        }

        groups.push(Group {
            size,
            x: sx,
            y: sy,
        });
    }

    groups
}
