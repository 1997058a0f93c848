pub mod dtlz;
pub mod srinivas;
pub mod zdt1;

use dyn_clone::DynClone;
use rand::Rng;
use rand::rngs::StdRng;
use crate::error::{ConfigurationError, EvaluationError};
use crate::solution::Solution;

/// The evaluation boundary of the search.
///
/// Engines only ever see a problem through this trait. `evaluate` is the
/// single place where objective computation may fail; engines recover from
/// that per solution instead of aborting the run.
pub trait Problem: DynClone + Send + Sync {
    fn name(&self) -> &str;
    fn number_of_variables(&self) -> usize;
    fn number_of_objectives(&self) -> usize;
    fn number_of_constraints(&self) -> usize {
        0
    }

    /// Inclusive `(lower, upper)` bounds of variable `index`.
    fn bounds(&self, index: usize) -> (f64, f64);

    /// A solution drawn uniformly at random within the variable bounds.
    fn create_solution(&self, rng: &mut StdRng) -> Solution {
        let variables = (0..self.number_of_variables())
            .map(|index| {
                let (lower, upper) = self.bounds(index);
                if lower == upper {
                    lower
                } else {
                    rng.gen_range(lower..=upper)
                }
            })
            .collect();

        Solution::new(variables)
    }

    /// Fills the objective vector, and the constraint vector if the problem
    /// has constraints.
    fn evaluate(&self, solution: &mut Solution) -> Result<(), EvaluationError>;

    /// Problem-specific shape checks, run before an engine starts.
    fn validate(&self) -> Result<(), ConfigurationError> {
        Ok(())
    }
}

dyn_clone::clone_trait_object!(Problem);

/// Rejects problems no engine can run on.
pub fn validate_problem(problem: &dyn Problem) -> Result<(), ConfigurationError> {
    if problem.number_of_objectives() == 0 {
        return Err(ConfigurationError::ProblemShape(format!("{} has no objectives", problem.name())));
    }

    if problem.number_of_variables() == 0 {
        return Err(ConfigurationError::ProblemShape(format!("{} has no variables", problem.name())));
    }

    for index in 0..problem.number_of_variables() {
        let (lower, upper) = problem.bounds(index);
        if !(lower.is_finite() && upper.is_finite() && lower <= upper) {
            return Err(ConfigurationError::ProblemShape(
                format!("{}: variable {} has bounds [{}, {}]", problem.name(), index, lower, upper)
            ));
        }
    }

    problem.validate()
}

/// Clamps `value` into the bounds of variable `index`.
pub fn repair(problem: &dyn Problem, index: usize, value: f64) -> f64 {
    let (lower, upper) = problem.bounds(index);
    value.clamp(lower, upper)
}
