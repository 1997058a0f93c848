pub mod genetic;
pub mod operators;
pub mod swarm;

use rand::rngs::StdRng;
use crate::diversity::PopulationAttributes;
use crate::problem::Problem;
use crate::solution::Solution;

/// Pluggable reproduction step of a [`super::generational::GenerationalEngine`].
///
/// The engine calls `initialize` once with the evaluated initial population,
/// then every generation `select` → `vary` → (evaluation) → `observe`.
/// Offspring returned by `vary` must be unevaluated copies; the engine
/// evaluates them and merges them with the current population.
pub trait VariationStrategy: Send {
    fn name(&self) -> &str;

    fn initialize(&mut self, _population: &[Solution], _problem: &dyn Problem, _rng: &mut StdRng) {}

    /// Draws the mating (or guide) set from the current population.
    fn select(&mut self, population: &[Solution], attributes: &PopulationAttributes, rng: &mut StdRng) -> Vec<Solution>;

    /// Produces new candidate solutions from the mating set.
    fn vary(&mut self, mating_set: Vec<Solution>, problem: &dyn Problem, rng: &mut StdRng) -> Vec<Solution>;

    /// Sees the offspring once they are evaluated.
    fn observe(&mut self, _offspring: &[Solution]) {}
}
