//! Nectar majority scoring (Oceania).
//!
//! For each habitat the players with the most nectar split a first pool and
//! the runners-up split a second pool. Splits round up, unlike end-of-round
//! goals. Players with no nectar in a habitat score nothing there.

use serde::{Deserialize, Serialize};

use crate::game::{CategoryId, NECTAR_CATEGORIES};

/// Points shared by the players with the most nectar in a habitat.
pub const NECTAR_FIRST_POOL: u32 = 5;

/// Points shared by the players with the second-most nectar in a habitat.
pub const NECTAR_SECOND_POOL: u32 = 2;

/// One player's nectar counts per habitat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NectarCounts {
    pub forest: u32,
    pub grassland: u32,
    pub wetland: u32,
}

impl NectarCounts {
    pub const fn new(forest: u32, grassland: u32, wetland: u32) -> Self {
        NectarCounts { forest, grassland, wetland }
    }

    /// Returns the count for a nectar category; zero for any other category.
    pub const fn get(&self, category: CategoryId) -> u32 {
        match category {
            CategoryId::NectarForest => self.forest,
            CategoryId::NectarGrassland => self.grassland,
            CategoryId::NectarWetland => self.wetland,
            _ => 0,
        }
    }

    pub fn set(&mut self, category: CategoryId, value: u32) {
        match category {
            CategoryId::NectarForest => self.forest = value,
            CategoryId::NectarGrassland => self.grassland = value,
            CategoryId::NectarWetland => self.wetland = value,
            _ => {}
        }
    }
}

/// Scores one habitat. Returns points parallel to `values`.
pub fn resolve_nectar_category(values: &[u32]) -> Vec<u32> {
    let mut result = vec![0; values.len()];

    let mut distinct: Vec<u32> = values.iter().copied().filter(|&v| v > 0).collect();
    distinct.sort_unstable_by(|a, b| b.cmp(a));
    distinct.dedup();

    for (&count, pool) in distinct.iter().zip([NECTAR_FIRST_POOL, NECTAR_SECOND_POOL]) {
        let group: Vec<usize> = values
            .iter()
            .enumerate()
            .filter(|(_, &v)| v == count)
            .map(|(i, _)| i)
            .collect();
        let share = pool.div_ceil(group.len() as u32);
        for i in group {
            result[i] += share;
        }
    }

    result
}

/// Sums the three habitats for each player. Returns totals parallel to `players`.
pub fn resolve_nectar_scores(players: &[NectarCounts]) -> Vec<u32> {
    let mut totals = vec![0; players.len()];

    for category in NECTAR_CATEGORIES {
        let values: Vec<u32> = players.iter().map(|p| p.get(category)).collect();
        for (total, score) in totals.iter_mut().zip(resolve_nectar_category(&values)) {
            *total += score;
        }
    }

    totals
}
