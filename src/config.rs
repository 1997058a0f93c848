//! Construction parameters for engines, variation strategies and the
//! superposition combinator.
//!
//! Every config has sensible defaults, chained `with_*` setters and a
//! `validate()` that every constructor calls before anything starts. All
//! of them can be read from JSON.

use serde::{Deserialize, Serialize};
use crate::error::ConfigurationError;

fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidProbability { name, value })
    }
}

fn check_non_negative(name: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::NegativeParameter { name, value })
    }
}

/// How the replacement step preserves diversity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiversityConfig {
    CrowdingDistance,
    ReferencePoints { divisions: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub population_size: usize,
    pub max_evaluations: Option<usize>,
    pub max_generations: Option<usize>,
    /// Seed of the engine's random generator; drawn from entropy when absent.
    pub seed: Option<u64>,
    pub diversity: DiversityConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            population_size: 100,
            max_evaluations: Some(25_000),
            max_generations: None,
            seed: None,
            diversity: DiversityConfig::CrowdingDistance,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_population_size(mut self, population_size: usize) -> Self {
        self.population_size = population_size;
        self
    }

    pub fn with_max_evaluations(mut self, max_evaluations: usize) -> Self {
        self.max_evaluations = Some(max_evaluations);
        self
    }

    pub fn with_max_generations(mut self, max_generations: usize) -> Self {
        self.max_generations = Some(max_generations);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_diversity(mut self, diversity: DiversityConfig) -> Self {
        self.diversity = diversity;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.population_size == 0 {
            return Err(ConfigurationError::ZeroPopulationSize);
        }

        if self.max_evaluations.is_none() && self.max_generations.is_none() {
            return Err(ConfigurationError::NoTerminationCondition);
        }

        if let DiversityConfig::ReferencePoints { divisions: 0 } = self.diversity {
            return Err(ConfigurationError::ZeroDivisions);
        }

        Ok(())
    }
}

/// Parameters of [`crate::optimizers::variation::genetic::GeneticVariation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneticConfig {
    pub crossover_probability: f64,
    pub crossover_distribution_index: f64,
    /// Per-variable mutation probability; `1 / number_of_variables` when absent.
    pub mutation_probability: Option<f64>,
    pub mutation_distribution_index: f64,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        GeneticConfig {
            crossover_probability: 0.9,
            crossover_distribution_index: 20.0,
            mutation_probability: None,
            mutation_distribution_index: 20.0,
        }
    }
}

impl GeneticConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        let config: GeneticConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_crossover(mut self, probability: f64, distribution_index: f64) -> Self {
        self.crossover_probability = probability;
        self.crossover_distribution_index = distribution_index;
        self
    }

    pub fn with_mutation(mut self, probability: f64, distribution_index: f64) -> Self {
        self.mutation_probability = Some(probability);
        self.mutation_distribution_index = distribution_index;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        check_probability("crossover_probability", self.crossover_probability)?;
        check_non_negative("crossover_distribution_index", self.crossover_distribution_index)?;
        if let Some(probability) = self.mutation_probability {
            check_probability("mutation_probability", probability)?;
        }
        check_non_negative("mutation_distribution_index", self.mutation_distribution_index)
    }
}

/// Parameters of [`crate::optimizers::variation::swarm::SwarmVariation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwarmConfig {
    /// Capacity of the leader archive.
    pub leader_capacity: usize,
    pub c1_min: f64,
    pub c1_max: f64,
    pub c2_min: f64,
    pub c2_max: f64,
    pub inertia_min: f64,
    pub inertia_max: f64,
    /// Every `mutation_stride`-th particle is mutated after moving.
    pub mutation_stride: usize,
    pub mutation_probability: Option<f64>,
    pub mutation_distribution_index: f64,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        SwarmConfig {
            leader_capacity: 100,
            c1_min: 1.5,
            c1_max: 2.5,
            c2_min: 1.5,
            c2_max: 2.5,
            inertia_min: 0.1,
            inertia_max: 0.1,
            mutation_stride: 6,
            mutation_probability: None,
            mutation_distribution_index: 20.0,
        }
    }
}

impl SwarmConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        let config: SwarmConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_leader_capacity(mut self, leader_capacity: usize) -> Self {
        self.leader_capacity = leader_capacity;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.leader_capacity == 0 {
            return Err(ConfigurationError::ZeroCapacity { name: "Leader archive" });
        }

        for (name, value) in [
            ("c1_min", self.c1_min),
            ("c1_max", self.c1_max),
            ("c2_min", self.c2_min),
            ("c2_max", self.c2_max),
            ("inertia_min", self.inertia_min),
            ("inertia_max", self.inertia_max),
            ("mutation_distribution_index", self.mutation_distribution_index),
        ] {
            check_non_negative(name, value)?;
        }

        for (name, min, max) in [
            ("c1", self.c1_min, self.c1_max),
            ("c2", self.c2_min, self.c2_max),
            ("inertia", self.inertia_min, self.inertia_max),
        ] {
            if min > max {
                return Err(ConfigurationError::InvalidRange { name, min, max });
            }
        }

        if let Some(probability) = self.mutation_probability {
            check_probability("mutation_probability", probability)?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuperpositionConfig {
    /// Capacity of the combined archive, i.e. the size of the final result.
    pub archive_capacity: usize,
}

impl Default for SuperpositionConfig {
    fn default() -> Self {
        SuperpositionConfig { archive_capacity: 100 }
    }
}

impl SuperpositionConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        let config: SuperpositionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_archive_capacity(mut self, archive_capacity: usize) -> Self {
        self.archive_capacity = archive_capacity;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.archive_capacity == 0 {
            return Err(ConfigurationError::ZeroCapacity { name: "Combined archive" });
        }
        Ok(())
    }
}
