mod superposition_scenarios;

use crate::error::SearchError;
use crate::optimizers::{GenerationObserver, Optimizer};
use crate::ranking::non_dominated;
use crate::solution::Solution;

pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub(crate) fn solutions(points: &[&[f64]]) -> Vec<Solution> {
    points
        .iter()
        .map(|point| Solution::with_objectives(vec![], point.to_vec()))
        .collect()
}

/// Objective vectors sorted lexicographically, for set comparisons.
pub(crate) fn sorted_objectives(solutions: &[Solution]) -> Vec<Vec<f64>> {
    let mut objectives: Vec<Vec<f64>> = solutions.iter().map(|s| s.objectives.clone()).collect();
    objectives.sort_by(|a, b| a.partial_cmp(b).unwrap());
    objectives
}

pub(crate) enum Ending {
    Terminal,
    /// Returns without calling `terminated`.
    Silent,
    Error,
    Panic,
}

/// Optimizer stub that replays fixed populations.
pub(crate) struct ScriptedOptimizer {
    pub name: String,
    pub generations: Vec<Vec<Solution>>,
    pub ending: Ending,
    last: Vec<Solution>,
}

impl ScriptedOptimizer {
    pub fn new(name: &str, generations: Vec<Vec<Solution>>, ending: Ending) -> Self {
        ScriptedOptimizer { name: name.to_string(), generations, ending, last: vec![] }
    }
}

impl Optimizer for ScriptedOptimizer {
    fn name(&self) -> &str {
        &self.name
    }

    fn optimize(&mut self, observer: &mut dyn GenerationObserver) -> Result<(), SearchError> {
        for (index, population) in self.generations.iter().enumerate() {
            observer.generation_completed(index + 1, population);
            self.last = population.clone();
        }

        match self.ending {
            Ending::Terminal => {
                observer.terminated(self.generations.len(), &self.last);
                Ok(())
            }
            Ending::Silent => Ok(()),
            Ending::Error => Err(SearchError::NoOffspring { strategy: self.name.clone() }),
            Ending::Panic => panic!("{} blew up", self.name),
        }
    }

    fn best_solutions(&self) -> Vec<Solution> {
        non_dominated(&self.last)
    }
}
