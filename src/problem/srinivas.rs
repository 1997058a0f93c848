use crate::error::EvaluationError;
use crate::problem::Problem;
use crate::solution::Solution;

/// Srinivas: two objectives, two inequality constraints.
#[derive(Clone, Default)]
pub struct Srinivas;

impl Problem for Srinivas
{
    fn name(&self) -> &str {
        "Srinivas"
    }

    fn number_of_variables(&self) -> usize {
        2
    }

    fn number_of_objectives(&self) -> usize {
        2
    }

    fn number_of_constraints(&self) -> usize {
        2
    }

    fn bounds(&self, _index: usize) -> (f64, f64) {
        (-20.0, 20.0)
    }

    fn evaluate(&self, solution: &mut Solution) -> Result<(), EvaluationError> {
        let (x1, x2) = match solution.variables.as_slice() {
            [x1, x2] => (*x1, *x2),
            other => return Err(EvaluationError::new(format!("Srinivas expects 2 variables, got {}", other.len())))
        };

        let f1 = 2.0 + (x1 - 2.0).powi(2) + (x2 - 1.0).powi(2);
        let f2 = 9.0 * x1 - (x2 - 1.0).powi(2);

        // g1: x1^2 + x2^2 <= 225, g2: x1 - 3 x2 + 10 <= 0
        let c1 = x1 * x1 + x2 * x2 - 225.0;
        let c2 = x1 - 3.0 * x2 + 10.0;

        solution.objectives = vec![f1, f2];
        solution.constraints = vec![c1.max(0.0), c2.max(0.0)];

        Ok(())
    }
}
