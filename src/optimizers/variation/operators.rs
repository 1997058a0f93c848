use std::cmp::Ordering;
use rand::Rng;
use rand::rngs::StdRng;
use crate::diversity::PopulationAttributes;
use crate::problem::{repair, Problem};
use crate::solution::Solution;

const EPS: f64 = 1.0e-14;

/// Binary tournament on the crowded comparison; a coin decides full ties.
pub fn tournament(attributes: &PopulationAttributes, p1: usize, p2: usize, rng: &mut StdRng) -> usize {
    match attributes.compare(p1, p2) {
        Ordering::Less => p1,
        Ordering::Greater => p2,
        Ordering::Equal => if rng.gen_bool(0.5) { p1 } else { p2 },
    }
}

/// Simulated binary crossover. Returns two unevaluated children.
pub fn sbx_crossover(
    parent1: &Solution,
    parent2: &Solution,
    probability: f64,
    distribution_index: f64,
    problem: &dyn Problem,
    rng: &mut StdRng,
) -> (Solution, Solution) {
    let mut child1 = Solution::new(parent1.variables.clone());
    let mut child2 = Solution::new(parent2.variables.clone());

    if rng.gen::<f64>() > probability {
        return (child1, child2);
    }

    let exponent = 1.0 / (distribution_index + 1.0);

    for i in 0..parent1.variables.len() {
        let x1 = parent1.variables[i];
        let x2 = parent2.variables[i];

        if rng.gen::<f64>() > 0.5 || (x1 - x2).abs() <= EPS {
            continue;
        }

        let (y1, y2) = if x1 < x2 { (x1, x2) } else { (x2, x1) };
        let (lower, upper) = problem.bounds(i);

        let rand: f64 = rng.gen();

        let beta = 1.0 + 2.0 * (y1 - lower) / (y2 - y1);
        let alpha = 2.0 - beta.powf(-(distribution_index + 1.0));
        let betaq = spread_factor(rand, alpha, exponent);
        let c1 = 0.5 * (y1 + y2 - betaq * (y2 - y1));

        let beta = 1.0 + 2.0 * (upper - y2) / (y2 - y1);
        let alpha = 2.0 - beta.powf(-(distribution_index + 1.0));
        let betaq = spread_factor(rand, alpha, exponent);
        let c2 = 0.5 * (y1 + y2 + betaq * (y2 - y1));

        let c1 = repair(problem, i, c1);
        let c2 = repair(problem, i, c2);

        if rng.gen::<f64>() <= 0.5 {
            child1.variables[i] = c2;
            child2.variables[i] = c1;
        } else {
            child1.variables[i] = c1;
            child2.variables[i] = c2;
        }
    }

    (child1, child2)
}

fn spread_factor(rand: f64, alpha: f64, exponent: f64) -> f64 {
    if rand <= 1.0 / alpha {
        (rand * alpha).powf(exponent)
    } else {
        (1.0 / (2.0 - rand * alpha)).powf(exponent)
    }
}

/// Polynomial mutation, applied per variable with `probability`.
/// Returns whether any variable changed.
pub fn polynomial_mutation(
    solution: &mut Solution,
    probability: f64,
    distribution_index: f64,
    problem: &dyn Problem,
    rng: &mut StdRng,
) -> bool {
    let mut mutated = false;
    let mutation_power = 1.0 / (distribution_index + 1.0);

    for i in 0..solution.variables.len() {
        if rng.gen::<f64>() > probability {
            continue;
        }

        let (lower, upper) = problem.bounds(i);
        if lower == upper {
            solution.variables[i] = lower;
            continue;
        }

        let y = solution.variables[i];
        let delta1 = (y - lower) / (upper - lower);
        let delta2 = (upper - y) / (upper - lower);
        let rnd: f64 = rng.gen();

        let deltaq = if rnd <= 0.5 {
            let xy = 1.0 - delta1;
            let val = 2.0 * rnd + (1.0 - 2.0 * rnd) * xy.powf(distribution_index + 1.0);
            val.powf(mutation_power) - 1.0
        } else {
            let xy = 1.0 - delta2;
            let val = 2.0 * (1.0 - rnd) + 2.0 * (rnd - 0.5) * xy.powf(distribution_index + 1.0);
            1.0 - val.powf(mutation_power)
        };

        solution.variables[i] = repair(problem, i, y + deltaq * (upper - lower));
        mutated = true;
    }

    if mutated {
        solution.reset();
    }

    mutated
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use crate::problem::zdt1::Zdt1;

    #[test]
    fn tournament_prefers_lower_rank_then_isolation() {
        let attributes = PopulationAttributes {
            ranks: vec![0, 1, 0],
            crowding: vec![0.2, f64::INFINITY, 0.9],
        };
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(tournament(&attributes, 0, 1, &mut rng), 0);
        assert_eq!(tournament(&attributes, 0, 2, &mut rng), 2);
    }

    #[test]
    fn crossover_children_stay_within_bounds() {
        let problem = Zdt1::new(10);
        let mut rng = StdRng::seed_from_u64(17);

        for _ in 0..200 {
            let p1 = problem.create_solution(&mut rng);
            let p2 = problem.create_solution(&mut rng);

            let (c1, c2) = sbx_crossover(&p1, &p2, 1.0, 20.0, &problem, &mut rng);

            for child in [&c1, &c2] {
                assert_eq!(child.variables.len(), 10);
                assert!(child.variables.iter().all(|&x| (0.0..=1.0).contains(&x)));
                assert!(!child.is_evaluated());
            }
        }
    }

    #[test]
    fn zero_probability_crossover_copies_parents() {
        let problem = Zdt1::new(3);
        let mut rng = StdRng::seed_from_u64(2);
        let p1 = Solution::new(vec![0.1, 0.2, 0.3]);
        let p2 = Solution::new(vec![0.9, 0.8, 0.7]);

        let (c1, c2) = sbx_crossover(&p1, &p2, 0.0, 20.0, &problem, &mut rng);

        assert_eq!(c1.variables, p1.variables);
        assert_eq!(c2.variables, p2.variables);
    }

    #[test]
    fn mutation_respects_bounds_and_clears_objectives() {
        let problem = Zdt1::new(5);
        let mut rng = StdRng::seed_from_u64(5);
        let mut solution = Solution::with_objectives(vec![0.0, 1.0, 0.5, 0.5, 0.5], vec![1.0, 1.0]);

        assert!(polynomial_mutation(&mut solution, 1.0, 20.0, &problem, &mut rng));

        assert!(solution.variables.iter().all(|&x| (0.0..=1.0).contains(&x)));
        assert!(!solution.is_evaluated());
    }

    #[test]
    fn zero_probability_mutation_is_a_no_op() {
        let problem = Zdt1::new(2);
        let mut rng = StdRng::seed_from_u64(5);
        let mut solution = Solution::with_objectives(vec![0.3, 0.4], vec![0.3, 1.0]);

        assert!(!polynomial_mutation(&mut solution, 0.0, 20.0, &problem, &mut rng));
        assert!(solution.is_evaluated());
    }
}
