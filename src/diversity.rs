pub mod crowding;
pub mod hyperplane;
pub mod niching;
pub mod reference_directions;

use std::cmp::Ordering;
use itertools::Itertools;
use rand::rngs::StdRng;
use crate::config::DiversityConfig;
use crate::diversity::crowding::crowding_distances;
use crate::diversity::hyperplane::Hyperplane;
use crate::diversity::niching::{associate, niching};
use crate::diversity::reference_directions::ReferenceDirections;
use crate::error::ConfigurationError;
use crate::ranking::{fast_non_dominated_sort, Ranking};
use crate::solution::Solution;

/// Per-generation side table of selection attributes, keyed by population index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PopulationAttributes {
    pub ranks: Vec<usize>,
    pub crowding: Vec<f64>,
}

impl PopulationAttributes {
    /// Ranks the population and computes the crowding distance of every
    /// member within its own front.
    pub fn compute(population: &[Solution]) -> Self {
        let ranking = fast_non_dominated_sort(population);
        let mut crowding = vec![0.0; population.len()];

        for front in &ranking.fronts {
            for (&index, distance) in front.iter().zip(crowding_distances(population, front)) {
                crowding[index] = distance;
            }
        }

        PopulationAttributes {
            ranks: ranking.ranks,
            crowding,
        }
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Crowded comparison of two members.
    pub fn compare(&self, a: usize, b: usize) -> Ordering {
        crowding::crowded_comparison(self.ranks[a], self.crowding[a], self.ranks[b], self.crowding[b])
    }
}

/// Strategy used by the replacement step to cut a ranked population down to
/// the configured size.
#[derive(Debug, Clone, PartialEq)]
pub enum DiversityPreserver {
    CrowdingDistance,
    ReferencePoints(ReferenceDirections),
}

impl DiversityPreserver {
    pub fn from_config(config: &DiversityConfig, number_of_objectives: usize) -> Result<Self, ConfigurationError> {
        match config {
            DiversityConfig::CrowdingDistance => Ok(DiversityPreserver::CrowdingDistance),
            DiversityConfig::ReferencePoints { divisions } => Ok(DiversityPreserver::ReferencePoints(
                ReferenceDirections::new(number_of_objectives, *divisions)?
            )),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            DiversityPreserver::CrowdingDistance => "crowding distance",
            DiversityPreserver::ReferencePoints(_) => "reference points",
        }
    }

    /// Chooses `quota` survivors of `population` (indices, best fronts first).
    ///
    /// Whole fronts are admitted while they fit; the first front that does not
    /// fit is cut by crowding distance or by reference point niching.
    pub fn select(&self, population: &[Solution], ranking: &Ranking, quota: usize, rng: &mut StdRng) -> Vec<usize> {
        if quota >= population.len() {
            return ranking.fronts.iter().flatten().copied().collect();
        }

        let mut selected: Vec<usize> = Vec::with_capacity(quota);
        let mut last_front: &[usize] = &[];

        for front in &ranking.fronts {
            if selected.len() + front.len() <= quota {
                selected.extend_from_slice(front);
                if selected.len() == quota {
                    break;
                }
            } else {
                last_front = front;
                break;
            }
        }

        let remaining = quota - selected.len();
        if remaining == 0 {
            return selected;
        }

        let completion = match self {
            DiversityPreserver::CrowdingDistance => Self::truncate_by_crowding(population, last_front, remaining),
            DiversityPreserver::ReferencePoints(directions) => {
                Self::truncate_by_niching(population, &selected, last_front, remaining, directions, rng)
            }
        };

        selected.extend(completion);
        selected
    }

    fn truncate_by_crowding(population: &[Solution], last_front: &[usize], remaining: usize) -> Vec<usize> {
        let distances = crowding_distances(population, last_front);

        last_front
            .iter()
            .zip(distances)
            .sorted_by(|(_, a), (_, b)| b.partial_cmp(a).unwrap_or(Ordering::Equal))
            .take(remaining)
            .map(|(&index, _)| index)
            .collect()
    }

    fn truncate_by_niching(
        population: &[Solution],
        selected: &[usize],
        last_front: &[usize],
        remaining: usize,
        directions: &ReferenceDirections,
        rng: &mut StdRng,
    ) -> Vec<usize> {
        // Positions 0..selected.len() are admitted, the rest is the last front.
        let considered: Vec<usize> = selected.iter().chain(last_front).copied().collect();
        let points: Vec<Vec<f64>> = considered
            .iter()
            .map(|&index| population[index].objectives.clone())
            .collect();

        let hyperplane = Hyperplane::fit(&points);
        let normalized: Vec<Vec<f64>> = points.iter().map(|point| hyperplane.normalize(point)).collect();
        let association = associate(&normalized, directions);

        let admitted: Vec<usize> = (0..selected.len()).collect();
        let candidates: Vec<usize> = (selected.len()..considered.len()).collect();

        niching(&association, &admitted, &candidates, directions.len(), remaining, rng)
            .into_iter()
            .map(|position| considered[position])
            .collect()
    }
}
