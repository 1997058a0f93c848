use crate::error::EvaluationFailure;
use crate::problem::Problem;
use crate::solution::Solution;

/// Scores a batch of solutions in place.
///
/// A solution whose evaluation fails is marked with the worst possible
/// objective values and a violation, and reported in the returned list;
/// the batch itself never fails.
pub trait Evaluator: Send {
    fn evaluate(&self, solutions: &mut [Solution], problem: &dyn Problem) -> Vec<EvaluationFailure>;
}

fn evaluate_one(index: usize, solution: &mut Solution, problem: &dyn Problem) -> Option<EvaluationFailure> {
    let message = match problem.evaluate(solution) {
        Err(error) => error.to_string(),
        Ok(()) if solution.objectives.len() != problem.number_of_objectives() => {
            format!("{} returned {} objectives, expected {}",
                    problem.name(), solution.objectives.len(), problem.number_of_objectives())
        }
        // NaN or infinite values count as a failed evaluation.
        Ok(()) if solution.objectives.iter().chain(&solution.constraints).any(|v| !v.is_finite()) => {
            format!("{} returned non-finite values {:?}", problem.name(), solution.objectives)
        }
        Ok(()) => return None,
    };

    solution.mark_failed(problem.number_of_objectives(), problem.number_of_constraints());
    Some(EvaluationFailure { index, message })
}

/// Evaluates on the calling thread.
#[derive(Debug, Clone, Default)]
pub struct SequentialEvaluator;

impl Evaluator for SequentialEvaluator {
    fn evaluate(&self, solutions: &mut [Solution], problem: &dyn Problem) -> Vec<EvaluationFailure> {
        solutions
            .iter_mut()
            .enumerate()
            .filter_map(|(index, solution)| evaluate_one(index, solution, problem))
            .collect()
    }
}

/// Splits the batch into contiguous chunks evaluated on scoped worker threads.
#[derive(Debug, Clone)]
pub struct MultiThreadedEvaluator {
    threads: usize,
}

impl MultiThreadedEvaluator {
    /// `threads == 0` uses one worker per logical CPU.
    pub fn new(threads: usize) -> Self {
        let threads = if threads == 0 { num_cpus::get() } else { threads };

        MultiThreadedEvaluator { threads: threads.max(1) }
    }

    pub fn number_of_threads(&self) -> usize {
        self.threads
    }
}

impl Default for MultiThreadedEvaluator {
    fn default() -> Self {
        MultiThreadedEvaluator::new(0)
    }
}

impl Evaluator for MultiThreadedEvaluator {
    fn evaluate(&self, solutions: &mut [Solution], problem: &dyn Problem) -> Vec<EvaluationFailure> {
        if solutions.is_empty() {
            return vec![];
        }

        if self.threads == 1 {
            return SequentialEvaluator.evaluate(solutions, problem);
        }

        let chunk_size = (solutions.len() + self.threads - 1) / self.threads;

        let scoped = crossbeam::thread::scope(|scope| {
            let handles: Vec<_> = solutions
                .chunks_mut(chunk_size)
                .enumerate()
                .map(|(chunk_index, chunk)| {
                    scope.spawn(move |_| {
                        let offset = chunk_index * chunk_size;
                        chunk
                            .iter_mut()
                            .enumerate()
                            .filter_map(|(index, solution)| evaluate_one(offset + index, solution, problem))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            handles
                .into_iter()
                .flat_map(|handle| match handle.join() {
                    Ok(failures) => failures,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect::<Vec<_>>()
        });

        match scoped {
            Ok(failures) => failures,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
}
