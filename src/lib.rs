pub mod archive;
pub mod config;
pub mod diversity;
pub mod error;
pub mod evaluator;
pub mod events;
pub mod optimizers;
pub mod problem;
pub mod ranking;
pub mod solution;
pub mod superposition;
#[cfg(test)]
mod tests;

pub use archive::BoundedArchive;
pub use config::{DiversityConfig, EngineConfig, GeneticConfig, SuperpositionConfig, SwarmConfig};
pub use error::{ConfigurationError, EvaluationError, EvaluationFailure, SearchError};
pub use evaluator::{Evaluator, MultiThreadedEvaluator, SequentialEvaluator};
pub use events::{EngineId, EngineStatus, SuperpositionEvent};
pub use optimizers::generational::GenerationalEngine;
pub use optimizers::variation::genetic::GeneticVariation;
pub use optimizers::variation::swarm::SwarmVariation;
pub use optimizers::variation::VariationStrategy;
pub use optimizers::{GenerationObserver, Optimizer};
pub use problem::Problem;
pub use solution::Solution;
pub use superposition::{Snapshot, SuperpositionCombinator, SuperpositionOutcome};
