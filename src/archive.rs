use std::cmp::Ordering;
use crate::diversity::crowding::crowding_distances_of;
use crate::error::ConfigurationError;
use crate::solution::{dominance, Dominance, Solution};

/// Capacity-bounded store of mutually non-dominated solutions.
///
/// Members are kept in insertion order. When an insertion pushes the archive
/// over capacity, crowding distances are recomputed over the whole archive and
/// the most crowded member is evicted (the earliest inserted on ties), until
/// the archive is back at capacity.
#[derive(Debug, Clone)]
pub struct BoundedArchive {
    capacity: usize,
    members: Vec<Solution>,
}

impl BoundedArchive {
    pub fn new(capacity: usize) -> Result<Self, ConfigurationError> {
        if capacity == 0 {
            return Err(ConfigurationError::ZeroCapacity { name: "Archive" });
        }

        Ok(BoundedArchive {
            capacity,
            members: Vec::with_capacity(capacity + 1),
        })
    }

    /// Offers a solution to the archive; returns whether it was kept.
    ///
    /// Rejected when its objectives contain NaN, when a member dominates it or
    /// already has the same objective vector. Members it dominates are removed.
    pub fn add(&mut self, solution: Solution) -> bool {
        if solution.objectives.iter().any(|v| v.is_nan()) {
            return false;
        }

        for member in &self.members {
            if member.objectives == solution.objectives
                && member.overall_constraint_violation() == solution.overall_constraint_violation() {
                return false;
            }

            if dominance(member, &solution) == Dominance::Left {
                return false;
            }
        }

        self.members.retain(|member| dominance(&solution, member) != Dominance::Left);
        self.members.push(solution);

        let mut kept = true;
        while self.members.len() > self.capacity {
            let evicted = self.most_crowded();
            if evicted == self.members.len() - 1 {
                kept = false;
            }
            self.members.remove(evicted);
        }

        kept
    }

    /// Adds every solution, returning how many were kept.
    pub fn extend<I: IntoIterator<Item = Solution>>(&mut self, solutions: I) -> usize {
        let mut kept = 0;
        for solution in solutions {
            if self.add(solution) {
                kept += 1;
            }
        }
        kept
    }

    pub fn solutions(&self) -> &[Solution] {
        &self.members
    }

    pub fn into_solutions(self) -> Vec<Solution> {
        self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Crowding distance of every member, in member order.
    pub fn crowding_distances(&self) -> Vec<f64> {
        crowding_distances_of(&self.members)
    }

    fn most_crowded(&self) -> usize {
        let distances = self.crowding_distances();

        let mut worst = 0;
        for (index, distance) in distances.iter().enumerate().skip(1) {
            if distance.partial_cmp(&distances[worst]) == Some(Ordering::Less) {
                worst = index;
            }
        }

        worst
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solution::dominates;
    use proptest::prelude::*;

    fn point(objectives: &[f64]) -> Solution {
        Solution::with_objectives(vec![], objectives.to_vec())
    }

    fn objectives(archive: &BoundedArchive) -> Vec<Vec<f64>> {
        archive.solutions().iter().map(|s| s.objectives.clone()).collect()
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(matches!(BoundedArchive::new(0), Err(ConfigurationError::ZeroCapacity { .. })));
    }

    #[test]
    fn dominated_solution_is_rejected_and_dominating_one_replaces() {
        let mut archive = BoundedArchive::new(10).unwrap();

        assert!(archive.add(point(&[2.0, 2.0])));
        assert!(!archive.add(point(&[3.0, 3.0])));
        assert!(archive.add(point(&[1.0, 3.0])));
        assert!(archive.add(point(&[1.0, 1.0])));

        assert_eq!(objectives(&archive), vec![vec![1.0, 1.0]]);
    }

    #[test]
    fn duplicate_objectives_are_rejected() {
        let mut archive = BoundedArchive::new(4).unwrap();

        assert!(archive.add(point(&[1.0, 2.0])));
        assert!(!archive.add(Solution::with_objectives(vec![0.7], vec![1.0, 2.0])));
        assert_eq!(archive.len(), 1);
    }

    #[test]
    fn nan_objectives_never_enter() {
        let mut archive = BoundedArchive::new(4).unwrap();

        for _ in 0..3 {
            assert!(!archive.add(point(&[f64::NAN, 1.0])));
        }

        assert!(archive.is_empty());
    }

    #[test]
    fn overflow_evicts_lowest_crowding_distance() {
        let mut archive = BoundedArchive::new(5).unwrap();

        for p in [[1.0, 5.0], [2.0, 3.0], [3.0, 2.0], [5.0, 1.0], [1.5, 4.0], [4.5, 1.2]] {
            archive.add(point(&p));
        }

        // Crowding before eviction: [1.5, 4] and [4.5, 1.2] tie at 0.75, the
        // lowest; the earlier inserted one goes.
        assert_eq!(archive.len(), 5);
        assert_eq!(
            objectives(&archive),
            vec![vec![1.0, 5.0], vec![2.0, 3.0], vec![3.0, 2.0], vec![5.0, 1.0], vec![4.5, 1.2]]
        );
    }

    #[test]
    fn newcomer_can_be_the_evicted_member() {
        let mut archive = BoundedArchive::new(3).unwrap();

        archive.add(point(&[0.0, 10.0]));
        archive.add(point(&[10.0, 0.0]));
        archive.add(point(&[3.0, 3.0]));

        assert!(!archive.add(point(&[3.1, 2.9])));
        assert_eq!(archive.len(), 3);
    }

    proptest! {
        #[test]
        fn capacity_and_non_domination_hold(points in prop::collection::vec(prop::array::uniform2(0.0f64..100.0), 0..80), capacity in 1usize..12) {
            let mut archive = BoundedArchive::new(capacity).unwrap();

            for p in &points {
                archive.add(point(p));
                prop_assert!(archive.len() <= capacity);
            }

            for a in archive.solutions() {
                for b in archive.solutions() {
                    prop_assert!(!dominates(a, b));
                }
            }
        }
    }
}
