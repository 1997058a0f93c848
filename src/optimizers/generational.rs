use rand::SeedableRng;
use rand::rngs::StdRng;
use crate::config::EngineConfig;
use crate::diversity::reference_directions::ReferenceDirections;
use crate::diversity::{DiversityPreserver, PopulationAttributes};
use crate::error::{ConfigurationError, SearchError};
use crate::evaluator::{Evaluator, SequentialEvaluator};
use crate::optimizers::variation::VariationStrategy;
use crate::optimizers::{GenerationObserver, Optimizer};
use crate::problem::{validate_problem, Problem};
use crate::ranking::{fast_non_dominated_sort, non_dominated};
use crate::solution::Solution;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Init,
    Running,
    Terminal,
}

/// Generational evolutionary loop shared by every variation strategy.
///
/// `Init` creates and evaluates the initial population, then every
/// generation runs select, vary, evaluate and replace until either
/// termination bound is reached. The population is owned by the engine;
/// observers only ever see it through a shared slice.
pub struct GenerationalEngine {
    name: String,
    problem: Box<dyn Problem>,
    evaluator: Box<dyn Evaluator>,
    variation: Box<dyn VariationStrategy>,
    preserver: DiversityPreserver,
    config: EngineConfig,
    rng: StdRng,

    phase: Phase,
    generation: usize,
    evaluations: usize,
    failures: usize,
    population: Vec<Solution>,
    attributes: PopulationAttributes,
}

impl GenerationalEngine {
    pub fn new(
        problem: Box<dyn Problem>,
        variation: Box<dyn VariationStrategy>,
        config: EngineConfig,
    ) -> Result<Self, ConfigurationError> {
        config.validate()?;
        validate_problem(problem.as_ref())?;

        let preserver = DiversityPreserver::from_config(&config.diversity, problem.number_of_objectives())?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let name = format!("{} ({}, {})", problem.name(), variation.name(), preserver.name());

        Ok(GenerationalEngine {
            name,
            problem,
            evaluator: Box::new(SequentialEvaluator),
            variation,
            preserver,
            config,
            rng,
            phase: Phase::Init,
            generation: 0,
            evaluations: 0,
            failures: 0,
            population: vec![],
            attributes: PopulationAttributes::default(),
        })
    }

    pub fn with_evaluator(mut self, evaluator: Box<dyn Evaluator>) -> Self {
        self.evaluator = evaluator;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Replaces the generated lattice by user supplied reference points.
    pub fn with_reference_points(mut self, points: Vec<Vec<f64>>) -> Result<Self, ConfigurationError> {
        let directions = ReferenceDirections::from_points(self.problem.number_of_objectives(), points)?;
        self.preserver = DiversityPreserver::ReferencePoints(directions);
        Ok(self)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// Number of solutions whose evaluation failed so far.
    pub fn evaluation_failures(&self) -> usize {
        self.failures
    }

    pub fn population(&self) -> &[Solution] {
        &self.population
    }

    fn should_terminate(&self) -> bool {
        let evaluations_done = self
            .config
            .max_evaluations
            .map_or(false, |max| self.evaluations >= max);
        let generations_done = self
            .config
            .max_generations
            .map_or(false, |max| self.generation >= max);

        evaluations_done || generations_done
    }

    fn evaluate(&mut self, solutions: &mut [Solution], observer: &mut dyn GenerationObserver) {
        let failures = self.evaluator.evaluate(solutions, self.problem.as_ref());
        self.evaluations += solutions.len();

        if !failures.is_empty() {
            log::warn!("{}: {} evaluation(s) failed in generation {}", self.name, failures.len(), self.generation);
            self.failures += failures.len();
            observer.evaluation_failed(self.generation, &failures);
        }
    }

    fn initialize(&mut self, observer: &mut dyn GenerationObserver) {
        let mut population: Vec<Solution> = (0..self.config.population_size)
            .map(|_| self.problem.create_solution(&mut self.rng))
            .collect();

        self.evaluate(&mut population, observer);

        self.attributes = PopulationAttributes::compute(&population);
        self.variation.initialize(&population, self.problem.as_ref(), &mut self.rng);
        self.population = population;
        self.phase = Phase::Running;

        log::info!("{}: started with {} solutions", self.name, self.population.len());
    }

    fn reproduce(&mut self) -> Result<Vec<Solution>, SearchError> {
        let mating_set = self.variation.select(&self.population, &self.attributes, &mut self.rng);
        let offspring = self.variation.vary(mating_set, self.problem.as_ref(), &mut self.rng);

        if offspring.is_empty() {
            return Err(SearchError::NoOffspring { strategy: self.variation.name().to_string() });
        }

        let expected = self.problem.number_of_variables();
        if let Some(child) = offspring.iter().find(|child| child.variables.len() != expected) {
            return Err(SearchError::VariableCount { expected, found: child.variables.len() });
        }

        Ok(offspring)
    }

    fn replace(&mut self, offspring: Vec<Solution>) {
        let mut merged = std::mem::take(&mut self.population);
        merged.extend(offspring);

        let ranking = fast_non_dominated_sort(&merged);
        let survivors = self
            .preserver
            .select(&merged, &ranking, self.config.population_size, &mut self.rng);

        let mut slots: Vec<Option<Solution>> = merged.into_iter().map(Some).collect();
        self.population = survivors
            .into_iter()
            .filter_map(|index| slots[index].take())
            .collect();
        self.attributes = PopulationAttributes::compute(&self.population);
    }

    fn step(&mut self, observer: &mut dyn GenerationObserver) -> Result<(), SearchError> {
        let mut offspring = self.reproduce()?;
        self.evaluate(&mut offspring, observer);
        self.variation.observe(&offspring);
        self.replace(offspring);

        self.generation += 1;
        observer.generation_completed(self.generation, &self.population);

        log::debug!("{}: generation {} done, {} evaluations", self.name, self.generation, self.evaluations);

        Ok(())
    }
}

impl Optimizer for GenerationalEngine {
    fn name(&self) -> &str {
        &self.name
    }

    fn optimize(&mut self, observer: &mut dyn GenerationObserver) -> Result<(), SearchError> {
        if self.phase == Phase::Terminal {
            return Ok(());
        }

        if self.phase == Phase::Init {
            self.initialize(observer);
        }

        while !self.should_terminate() {
            self.step(observer)?;
        }

        self.phase = Phase::Terminal;
        observer.terminated(self.generation, &self.population);

        log::info!(
            "{}: terminal after {} generations and {} evaluations",
            self.name, self.generation, self.evaluations
        );

        Ok(())
    }

    fn best_solutions(&self) -> Vec<Solution> {
        non_dominated(&self.population)
    }
}
