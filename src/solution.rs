use std::cmp::Ordering;

/// A candidate solution: bounded real decision variables plus the values
/// computed for them.
///
/// Ranks, crowding distances and reference point associations are not stored
/// here; they live in per-generation side tables keyed by population index.
/// Cloning is a deep copy, which is what lets a solution cross a thread
/// boundary without aliasing.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub variables: Vec<f64>,
    /// Empty until the solution has been evaluated.
    pub objectives: Vec<f64>,
    /// Constraint violation magnitudes, 0 meaning satisfied.
    pub constraints: Vec<f64>,
}

impl Solution {
    pub fn new(variables: Vec<f64>) -> Self {
        Solution {
            variables,
            objectives: vec![],
            constraints: vec![],
        }
    }

    /// Builds an already evaluated solution. Mostly useful for archives and tests.
    pub fn with_objectives(variables: Vec<f64>, objectives: Vec<f64>) -> Self {
        Solution {
            variables,
            objectives,
            constraints: vec![],
        }
    }

    pub fn is_evaluated(&self) -> bool {
        !self.objectives.is_empty()
    }

    pub fn overall_constraint_violation(&self) -> f64 {
        self.constraints.iter().map(|violation| violation.max(0.0)).sum()
    }

    pub fn is_feasible(&self) -> bool {
        self.overall_constraint_violation() == 0.0
    }

    /// Marks the solution as the worst possible outcome so that it is
    /// dominated out by every successfully evaluated solution.
    pub fn mark_failed(&mut self, number_of_objectives: usize, number_of_constraints: usize) {
        self.objectives = vec![f64::MAX; number_of_objectives];
        self.constraints = vec![f64::MAX; number_of_constraints.max(1)];
    }

    /// Drops computed values, e.g. after the variables were moved.
    pub fn reset(&mut self) {
        self.objectives.clear();
        self.constraints.clear();
    }
}

/// Outcome of comparing two solutions for dominance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dominance {
    /// The left solution dominates the right one.
    Left,
    /// The right solution dominates the left one.
    Right,
    Neither,
}

/// Pareto dominance on raw objective vectors (minimization).
pub fn pareto_dominance(a: &[f64], b: &[f64]) -> Dominance {
    let mut a_better = false;
    let mut b_better = false;

    for (va, vb) in a.iter().zip(b) {
        match va.partial_cmp(vb) {
            Some(Ordering::Less) => a_better = true,
            Some(Ordering::Greater) => b_better = true,
            _ => (),
        }

        if a_better && b_better {
            return Dominance::Neither;
        }
    }

    match (a_better, b_better) {
        (true, false) => Dominance::Left,
        (false, true) => Dominance::Right,
        _ => Dominance::Neither,
    }
}

/// Constraint-aware dominance: feasibility first, then the overall violation,
/// then Pareto dominance between feasible solutions.
pub fn dominance(a: &Solution, b: &Solution) -> Dominance {
    let violation_a = a.overall_constraint_violation();
    let violation_b = b.overall_constraint_violation();

    if violation_a == 0.0 && violation_b == 0.0 {
        return pareto_dominance(&a.objectives, &b.objectives);
    }

    match violation_a.partial_cmp(&violation_b) {
        Some(Ordering::Less) => Dominance::Left,
        Some(Ordering::Greater) => Dominance::Right,
        _ => pareto_dominance(&a.objectives, &b.objectives),
    }
}

pub fn dominates(a: &Solution, b: &Solution) -> bool {
    dominance(a, b) == Dominance::Left
}
