//! Solver configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ga::{Chance, OperatorRates, Selection};

/// Configuration for [`Solver`](super::Solver).
///
/// Unset mutation rates never fire. Unset worker count means one worker per
/// CPU.
///
/// # Examples
///
/// ```
/// use u_mdvrp::ga::{Chance, Selection};
/// use u_mdvrp::solver::SolverConfig;
///
/// let config = SolverConfig::default()
///     .with_population_size(50)
///     .with_selection_size(0.5)
///     .with_selection(Selection::Random)
///     .with_route_split(Chance::one_in(20))
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.num_new_agents(), 25);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Number of agents in the population.
    pub population_size: usize,
    /// Fraction of the population bred each generation, in `(0, 1]`.
    pub selection_size: f64,
    /// Parent selection method.
    pub selection: Selection,
    /// Worker threads; `None` uses the CPU count.
    pub num_workers: Option<usize>,
    /// Mutation and crossover rates.
    #[serde(flatten)]
    pub rates: OperatorRates,
    /// Seed for reproducible solves with a fixed worker count.
    pub seed: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            population_size: 200,
            selection_size: 0.3,
            selection: Selection::Roulette,
            num_workers: None,
            rates: OperatorRates::default(),
            seed: None,
        }
    }
}

impl SolverConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the fraction of the population bred per generation.
    pub fn with_selection_size(mut self, fraction: f64) -> Self {
        self.selection_size = fraction;
        self
    }

    /// Sets the selection method.
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Sets the number of worker threads.
    pub fn with_num_workers(mut self, workers: usize) -> Self {
        self.num_workers = Some(workers);
        self
    }

    /// Sets the route split chance.
    pub fn with_route_split(mut self, chance: Chance) -> Self {
        self.rates.route_split = chance;
        self
    }

    /// Sets the depot relocation chance.
    pub fn with_depot_relocation(mut self, chance: Chance) -> Self {
        self.rates.depot_relocation = chance;
        self
    }

    /// Sets the chance that injection samples routes of other depots.
    pub fn with_outer_depot_route(mut self, chance: Chance) -> Self {
        self.rates.outer_depot_route = chance;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks that every option is in range.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(Error::InvalidConfig {
                field: "population_size",
                reason: "must be greater than 0".to_string(),
            });
        }
        if !(self.selection_size > 0.0 && self.selection_size <= 1.0) {
            return Err(Error::InvalidConfig {
                field: "selection_size",
                reason: format!("must be in (0, 1], got {}", self.selection_size),
            });
        }
        if self.num_workers == Some(0) {
            return Err(Error::InvalidConfig {
                field: "num_workers",
                reason: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Resolved number of worker threads.
    pub fn workers(&self) -> usize {
        self.num_workers.unwrap_or_else(num_cpus::get).max(1)
    }

    /// Reproduction events per generation.
    pub fn num_new_agents(&self) -> usize {
        (self.population_size as f64 * self.selection_size).floor() as usize
    }
}
