use rand::Rng;
use rand::rngs::StdRng;
use crate::archive::BoundedArchive;
use crate::config::SwarmConfig;
use crate::diversity::PopulationAttributes;
use crate::error::ConfigurationError;
use crate::optimizers::variation::operators::{polynomial_mutation, tournament};
use crate::optimizers::variation::VariationStrategy;
use crate::problem::Problem;
use crate::solution::{dominates, Solution};

/// Speed-constrained particle swarm reproduction (SMPSO style).
///
/// The swarm keeps its own particles (position, velocity, personal best) and
/// an external archive of non-dominated leaders. `select` draws one leader
/// per particle, `vary` moves every particle towards its personal best and
/// its leader, and `observe` updates personal bests and leaders from the
/// evaluated positions.
pub struct SwarmVariation {
    config: SwarmConfig,
    positions: Vec<Vec<f64>>,
    velocities: Vec<Vec<f64>>,
    personal_best: Vec<Solution>,
    leaders: BoundedArchive,
}

impl SwarmVariation {
    pub fn new(config: SwarmConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        let leaders = BoundedArchive::new(config.leader_capacity)?;

        Ok(SwarmVariation {
            config,
            positions: vec![],
            velocities: vec![],
            personal_best: vec![],
            leaders,
        })
    }

    pub fn leaders(&self) -> &[Solution] {
        self.leaders.solutions()
    }

    pub fn swarm_size(&self) -> usize {
        self.positions.len()
    }

    fn constriction(c1: f64, c2: f64) -> f64 {
        let phi = c1 + c2;
        if phi <= 4.0 {
            return 1.0;
        }

        2.0 / (2.0 - phi - (phi * phi - 4.0 * phi).sqrt()).abs()
    }

    fn draw(rng: &mut StdRng, min: f64, max: f64) -> f64 {
        if min == max {
            min
        } else {
            rng.gen_range(min..=max)
        }
    }

    fn leader_tournament(&self, rng: &mut StdRng) -> Option<Solution> {
        let leaders = self.leaders.solutions();
        match leaders.len() {
            0 => None,
            1 => Some(leaders[0].clone()),
            size => {
                let attributes = PopulationAttributes {
                    ranks: vec![0; size],
                    crowding: self.leaders.crowding_distances(),
                };
                let p1 = rng.gen_range(0..size);
                let p2 = rng.gen_range(0..size);
                Some(leaders[tournament(&attributes, p1, p2, rng)].clone())
            }
        }
    }
}

impl VariationStrategy for SwarmVariation {
    fn name(&self) -> &str {
        "swarm"
    }

    fn initialize(&mut self, population: &[Solution], _problem: &dyn Problem, _rng: &mut StdRng) {
        self.positions = population.iter().map(|s| s.variables.clone()).collect();
        self.velocities = population.iter().map(|s| vec![0.0; s.variables.len()]).collect();
        self.personal_best = population.to_vec();

        for particle in population {
            self.leaders.add(particle.clone());
        }
    }

    fn select(&mut self, population: &[Solution], attributes: &PopulationAttributes, rng: &mut StdRng) -> Vec<Solution> {
        (0..self.positions.len())
            .map(|_| {
                self.leader_tournament(rng).unwrap_or_else(|| {
                    let p1 = rng.gen_range(0..population.len());
                    let p2 = rng.gen_range(0..population.len());
                    population[tournament(attributes, p1, p2, rng)].clone()
                })
            })
            .collect()
    }

    fn vary(&mut self, mating_set: Vec<Solution>, problem: &dyn Problem, rng: &mut StdRng) -> Vec<Solution> {
        let mutation_probability = self
            .config
            .mutation_probability
            .unwrap_or(1.0 / problem.number_of_variables() as f64);

        let mut offspring = Vec::with_capacity(self.positions.len());

        for (i, leader) in mating_set.iter().enumerate().take(self.positions.len()) {
            let r1: f64 = rng.gen();
            let r2: f64 = rng.gen();
            let c1 = Self::draw(rng, self.config.c1_min, self.config.c1_max);
            let c2 = Self::draw(rng, self.config.c2_min, self.config.c2_max);
            let w = Self::draw(rng, self.config.inertia_min, self.config.inertia_max);
            let chi = Self::constriction(c1, c2);

            let position = &mut self.positions[i];
            let velocity = &mut self.velocities[i];
            let best = &self.personal_best[i].variables;

            for j in 0..position.len() {
                let (lower, upper) = problem.bounds(j);
                let delta_max = (upper - lower) / 2.0;

                let v = chi * (w * velocity[j]
                    + c1 * r1 * (best[j] - position[j])
                    + c2 * r2 * (leader.variables[j] - position[j]));
                velocity[j] = v.clamp(-delta_max, delta_max);

                position[j] += velocity[j];
                if position[j] < lower {
                    position[j] = lower;
                    velocity[j] = -velocity[j];
                } else if position[j] > upper {
                    position[j] = upper;
                    velocity[j] = -velocity[j];
                }
            }

            let mut particle = Solution::new(position.clone());
            if self.config.mutation_stride > 0 && i % self.config.mutation_stride == 0 {
                polynomial_mutation(
                    &mut particle,
                    mutation_probability,
                    self.config.mutation_distribution_index,
                    problem,
                    rng,
                );
                position.copy_from_slice(&particle.variables);
            }

            offspring.push(particle);
        }

        offspring
    }

    fn observe(&mut self, offspring: &[Solution]) {
        for (i, particle) in offspring.iter().enumerate().take(self.personal_best.len()) {
            if !dominates(&self.personal_best[i], particle) {
                self.personal_best[i] = particle.clone();
            }

            self.leaders.add(particle.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use crate::evaluator::{Evaluator, SequentialEvaluator};
    use crate::problem::zdt1::Zdt1;

    fn evaluated_swarm(problem: &Zdt1, size: usize, rng: &mut StdRng) -> Vec<Solution> {
        let mut swarm: Vec<Solution> = (0..size).map(|_| problem.create_solution(rng)).collect();
        SequentialEvaluator.evaluate(&mut swarm, problem);
        swarm
    }

    #[test]
    fn constriction_is_one_below_phi_four() {
        assert_eq!(SwarmVariation::constriction(1.5, 2.0), 1.0);
        let chi = SwarmVariation::constriction(2.05, 2.05);
        assert!(chi > 0.72 && chi < 0.73);
    }

    #[test]
    fn leaders_are_non_dominated_after_initialization() {
        let problem = Zdt1::new(5);
        let mut rng = StdRng::seed_from_u64(21);
        let swarm = evaluated_swarm(&problem, 20, &mut rng);
        let mut variation = SwarmVariation::new(SwarmConfig::default().with_leader_capacity(10)).unwrap();

        variation.initialize(&swarm, &problem, &mut rng);

        assert_eq!(variation.swarm_size(), 20);
        assert!(!variation.leaders().is_empty() && variation.leaders().len() <= 10);
        for a in variation.leaders() {
            for b in variation.leaders() {
                assert!(!dominates(a, b));
            }
        }
    }

    #[test]
    fn moved_particles_stay_in_bounds_and_update_bests() {
        let problem = Zdt1::new(5);
        let mut rng = StdRng::seed_from_u64(8);
        let swarm = evaluated_swarm(&problem, 12, &mut rng);
        let mut variation = SwarmVariation::new(SwarmConfig::default()).unwrap();
        variation.initialize(&swarm, &problem, &mut rng);
        let attributes = PopulationAttributes::compute(&swarm);

        for _ in 0..5 {
            let guides = variation.select(&swarm, &attributes, &mut rng);
            assert_eq!(guides.len(), 12);

            let mut moved = variation.vary(guides, &problem, &mut rng);
            assert_eq!(moved.len(), 12);
            assert!(moved.iter().all(|p| p.variables.iter().all(|&x| (0.0..=1.0).contains(&x))));

            SequentialEvaluator.evaluate(&mut moved, &problem);
            variation.observe(&moved);

            for (best, particle) in variation.personal_best.iter().zip(&moved) {
                assert!(!dominates(particle, best));
            }
        }
    }

    #[test]
    fn zero_leader_capacity_is_rejected() {
        assert!(SwarmVariation::new(SwarmConfig::default().with_leader_capacity(0)).is_err());
    }
}
