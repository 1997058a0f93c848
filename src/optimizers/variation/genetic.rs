use rand::Rng;
use rand::rngs::StdRng;
use crate::config::GeneticConfig;
use crate::diversity::PopulationAttributes;
use crate::error::ConfigurationError;
use crate::optimizers::variation::operators::{polynomial_mutation, sbx_crossover, tournament};
use crate::optimizers::variation::VariationStrategy;
use crate::problem::Problem;
use crate::solution::Solution;

/// NSGA-style reproduction: binary tournament, SBX crossover and polynomial
/// mutation. Produces as many offspring as the population has members.
pub struct GeneticVariation {
    config: GeneticConfig,
}

impl GeneticVariation {
    pub fn new(config: GeneticConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;

        Ok(GeneticVariation { config })
    }
}

impl VariationStrategy for GeneticVariation {
    fn name(&self) -> &str {
        "genetic"
    }

    fn select(&mut self, population: &[Solution], attributes: &PopulationAttributes, rng: &mut StdRng) -> Vec<Solution> {
        let size = population.len();

        (0..size)
            .map(|_| {
                let p1 = rng.gen_range(0..size);
                let p2 = rng.gen_range(0..size);
                population[tournament(attributes, p1, p2, rng)].clone()
            })
            .collect()
    }

    fn vary(&mut self, mating_set: Vec<Solution>, problem: &dyn Problem, rng: &mut StdRng) -> Vec<Solution> {
        let size = mating_set.len();
        let mutation_probability = self
            .config
            .mutation_probability
            .unwrap_or(1.0 / problem.number_of_variables() as f64);

        let mut offspring = Vec::with_capacity(size + 1);

        for i in (0..size).step_by(2) {
            let parent1 = &mating_set[i];
            let parent2 = &mating_set[(i + 1).min(size - 1)];

            let (mut c1, mut c2) = sbx_crossover(
                parent1,
                parent2,
                self.config.crossover_probability,
                self.config.crossover_distribution_index,
                problem,
                rng,
            );

            polynomial_mutation(&mut c1, mutation_probability, self.config.mutation_distribution_index, problem, rng);
            polynomial_mutation(&mut c2, mutation_probability, self.config.mutation_distribution_index, problem, rng);

            offspring.push(c1);
            offspring.push(c2);
        }

        offspring.truncate(size);
        offspring
    }
}
