pub mod generational;
pub mod variation;

use crate::error::{EvaluationFailure, SearchError};
use crate::solution::Solution;

/// Hooks an optimizer calls while it runs.
///
/// `generation_completed` is called once per replacement with the new
/// population; implementations that hand the population to another thread
/// must copy it.
pub trait GenerationObserver {
    fn generation_completed(&mut self, generation: usize, population: &[Solution]);

    fn evaluation_failed(&mut self, _generation: usize, _failures: &[EvaluationFailure]) {}

    /// Called once, with the final population, when the optimizer reaches its
    /// terminal state.
    fn terminated(&mut self, _generation: usize, _population: &[Solution]) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default)]
pub struct NoopObserver;

impl GenerationObserver for NoopObserver {
    fn generation_completed(&mut self, _generation: usize, _population: &[Solution]) {}
}

pub trait Optimizer: Send {
    fn name(&self) -> &str;

    /// Runs to the optimizer's own termination condition.
    fn optimize(&mut self, observer: &mut dyn GenerationObserver) -> Result<(), SearchError>;

    /// Non-dominated subset of the current population.
    fn best_solutions(&self) -> Vec<Solution>;
}
