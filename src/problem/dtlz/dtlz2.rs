use crate::error::{ConfigurationError, EvaluationError};
use crate::problem::dtlz::{calc_spherical_target, check_shape, g2, split_position};
use crate::problem::Problem;
use crate::solution::Solution;

/// DTLZ2: spherical Pareto front `sum(f^2) = 1`.
#[derive(Clone)]
pub struct Dtlz2
{
    name: String,
    n_var: usize,
    n_obj: usize
}

impl Dtlz2 {
    pub fn new(n_var: usize, n_obj: usize) -> Self
    {
        Dtlz2 {
            name: format!("DTLZ2 ({} {})", n_var, n_obj),
            n_var,
            n_obj
        }
    }

    /// Distance of the decision vector from the optimal front; 0 on the front.
    pub fn convergence_metric(&self, in_x: &[f64]) -> f64 {
        let (_, x_m) = split_position(in_x, self.n_obj);

        g2(x_m)
    }
}

impl Problem for Dtlz2
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
        let g = g2(x_m);

        solution.objectives.resize(self.n_obj, 0.0);
        calc_spherical_target(x, g, &mut solution.objectives);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::validate_problem;

    #[test]
    fn optimal_point_lies_on_unit_sphere() {
        let problem = Dtlz2::new(4, 3);
        let mut solution = Solution::new(vec![0.2, 0.9, 0.5, 0.5]);

        problem.evaluate(&mut solution).unwrap();

        let norm: f64 = solution.objectives.iter().map(|f| f * f).sum();
        assert!((norm - 1.0).abs() < 1e-12);
        assert_eq!(problem.convergence_metric(&solution.variables), 0.0);
    }

    #[test]
    fn fewer_variables_than_objectives_is_rejected_up_front() {
        assert!(matches!(validate_problem(&Dtlz2::new(2, 3)), Err(ConfigurationError::ProblemShape(_))));
    }
}
