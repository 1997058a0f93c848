use crate::error::EvaluationError;
use crate::problem::Problem;
use crate::solution::Solution;

/// ZDT1: two objectives, convex front `f2 = 1 - sqrt(f1)`.
#[derive(Clone)]
pub struct Zdt1
{
    n_var: usize
}

impl Zdt1 {
    pub fn new(n_var: usize) -> Self
    {
        Zdt1 { n_var }
    }
}

impl Problem for Zdt1
{
    fn name(&self) -> &str {
        "ZDT1"
    }

    fn number_of_variables(&self) -> usize {
        self.n_var
    }

    fn number_of_objectives(&self) -> usize {
        2
    }

    fn bounds(&self, _index: usize) -> (f64, f64) {
        (0.0, 1.0)
    }

    fn evaluate(&self, solution: &mut Solution) -> Result<(), EvaluationError> {
        let x = &solution.variables;
        if x.len() < 2
        {
            return Err(EvaluationError::new("ZDT1 needs at least two variables"));
        }

        let f1 = x[0];
        let g = 1.0 + 9.0 * x[1..].iter().sum::<f64>() / (x.len() - 1) as f64;
        let h = 1.0 - (f1 / g).sqrt();

        solution.objectives = vec![f1, g * h];

        Ok(())
    }
}
