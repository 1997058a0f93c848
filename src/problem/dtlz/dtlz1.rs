use crate::error::{ConfigurationError, EvaluationError};
use crate::problem::dtlz::{calc_linear_target, check_shape, g1, split_position};
use crate::problem::Problem;
use crate::solution::Solution;

/// DTLZ1: linear Pareto front `sum(f) = 0.5` with a multimodal distance function.
#[derive(Clone)]
pub struct Dtlz1
{
    name: String,
    n_var: usize,
    n_obj: usize
}

impl Dtlz1 {
    pub fn new(n_var: usize, n_obj: usize) -> Self
    {
        Dtlz1 {
            name: format!("DTLZ1 ({} {})", n_var, n_obj),
            n_var,
            n_obj
        }
    }
}

impl Problem for Dtlz1
{
    fn name(&self) -> &str {
        self.name.as_str()
    }

    fn number_of_variables(&self) -> usize {
        self.n_var
    }

    fn number_of_objectives(&self) -> usize {
        self.n_obj
    }

    fn bounds(&self, _index: usize) -> (f64, f64) {
        (0.0, 1.0)
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        check_shape(&self.name, self.n_var, self.n_obj)
    }

    fn evaluate(&self, solution: &mut Solution) -> Result<(), EvaluationError> {
        if solution.variables.len() != self.n_var || self.n_var < self.n_obj
        {
            return Err(EvaluationError::new(format!("{} expects {} variables, got {}",
                                                    self.name, self.n_var, solution.variables.len())));
        }

        let (x, x_m) = split_position(&solution.variables, self.n_obj);
        let g = g1(x_m);

        solution.objectives.resize(self.n_obj, 0.0);
        calc_linear_target(x, g, &mut solution.objectives);

        Ok(())
    }
}
