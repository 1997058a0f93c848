use std::fmt;
use crate::error::EvaluationFailure;
use crate::solution::Solution;

/// Which of the two superposed engines a message or event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineId {
    A,
    B,
}

impl EngineId {
    pub const ALL: [EngineId; 2] = [EngineId::A, EngineId::B];

    pub fn index(self) -> usize {
        match self {
            EngineId::A => 0,
            EngineId::B => 1,
        }
    }
}

impl fmt::Display for EngineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineId::A => write!(f, "engine A"),
            EngineId::B => write!(f, "engine B"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineStatus {
    Running,
    Terminal,
    /// The engine stopped without reaching its terminal state.
    Failed(String),
}

impl EngineStatus {
    pub fn is_settled(&self) -> bool {
        !matches!(self, EngineStatus::Running)
    }
}

/// Notifications delivered to every subscribed listener, each exactly once
/// per occurrence.
#[derive(Debug, Clone)]
pub enum SuperpositionEvent {
    GenerationCompleted {
        engine: EngineId,
        generation: usize,
    },
    EvaluationFailed {
        engine: EngineId,
        generation: usize,
        failures: Vec<EvaluationFailure>,
    },
    EngineTerminal {
        engine: EngineId,
    },
    EngineFailed {
        engine: EngineId,
        reason: String,
    },
    /// Last event of a run. `partial` is set when an engine failed.
    SuperpositionDone {
        result: Vec<Solution>,
        partial: bool,
    },
}
