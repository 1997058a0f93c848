/// Invalid construction parameters. Returned before anything starts running.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Population size must be greater than zero")]
    ZeroPopulationSize,
    #[error("{name} capacity must be greater than zero")]
    ZeroCapacity { name: &'static str },
    #[error("At least one of max_evaluations or max_generations must be set")]
    NoTerminationCondition,
    #[error("Reference point divisions must be greater than zero")]
    ZeroDivisions,
    #[error("Reference points have {found} coordinates but the problem has {expected} objectives")]
    ReferencePointDimension { expected: usize, found: usize },
    #[error("Reference point {index} is not on the unit simplex")]
    ReferencePointOffSimplex { index: usize },
    #[error("{name} must be within [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },
    #[error("{name} must be non-negative, got {value}")]
    NegativeParameter { name: &'static str, value: f64 },
    #[error("{name} range is empty: min {min} > max {max}")]
    InvalidRange { name: &'static str, min: f64, max: f64 },
    #[error("Invalid problem shape: {0}")]
    ProblemShape(String),
    #[error("Invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure raised by [`crate::problem::Problem::evaluate`] for a single solution.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct EvaluationError(pub String);

impl EvaluationError {
    pub fn new(message: impl Into<String>) -> Self {
        EvaluationError(message.into())
    }
}

/// A recovered evaluation failure, keyed by the position of the solution
/// in the batch that was evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationFailure {
    pub index: usize,
    pub message: String,
}

/// An engine could not continue its generational loop.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SearchError {
    #[error("{strategy} produced no offspring")]
    NoOffspring { strategy: String },
    #[error("Offspring has {found} variables, expected {expected}")]
    VariableCount { expected: usize, found: usize },
}
