//! Agents: evaluated genomes.

use rand::Rng;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::evaluation::{evaluate, Fitness};
use crate::models::Problem;

use super::genome::Genome;
use super::injection::inject_route;
use super::mutation::mutate;
use super::rates::OperatorRates;

/// A genome together with its fitness.
///
/// The genome can only be changed through [`Agent::modify`], which
/// re-evaluates it, so the fitness is never stale.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use u_mdvrp::ga::{Agent, OperatorRates};
/// use u_mdvrp::models::{Customer, Depot, Problem};
/// use u_mdvrp::random::create_rng;
///
/// let problem = Problem::new(
///     BTreeMap::from([(0, Depot::new(0.0, 0.0, 2, 100.0))]),
///     BTreeMap::from([
///         (1, Customer::new(1, 1.0, 0.0, 10.0, 0.0)),
///         (2, Customer::new(2, 0.0, 1.0, 10.0, 0.0)),
///     ]),
/// )
/// .unwrap();
///
/// let mut rng = create_rng(42);
/// let a = Agent::seed(&problem, &mut rng).unwrap();
/// let b = Agent::seed(&problem, &mut rng).unwrap();
/// let child = a.mate(&b, &problem, &OperatorRates::default(), &mut rng).unwrap();
/// assert!(child.genome().covers(&problem));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Agent {
    genome: Genome,
    fitness: Fitness,
}

impl Agent {
    /// Wraps and evaluates a genome.
    pub fn new(genome: Genome, problem: &Problem) -> Result<Self> {
        let fitness = evaluate(&genome, problem)?;
        Ok(Self { genome, fitness })
    }

    /// Creates an agent from a freshly seeded genome.
    pub fn seed<R: Rng>(problem: &Problem, rng: &mut R) -> Result<Self> {
        Self::new(Genome::seed(problem, rng), problem)
    }

    /// The agent's genome.
    pub fn genome(&self) -> &Genome {
        &self.genome
    }

    /// The agent's fitness.
    pub fn fitness(&self) -> Fitness {
        self.fitness
    }

    /// Consumes the agent and returns its genome.
    pub fn into_genome(self) -> Genome {
        self.genome
    }

    /// Applies a change to the genome and re-evaluates it.
    pub fn modify<F>(&mut self, problem: &Problem, change: F) -> Result<()>
    where
        F: FnOnce(&mut Genome) -> Result<()>,
    {
        let result = change(&mut self.genome);
        self.fitness = evaluate(&self.genome, problem)?;
        result
    }

    /// Breeds a child from this agent (recipient) and a donor.
    ///
    /// The child is a copy of `self` with one random route of `donor`
    /// injected, followed by one mutation pass.
    pub fn mate<R: Rng>(
        &self,
        donor: &Agent,
        problem: &Problem,
        rates: &OperatorRates,
        rng: &mut R,
    ) -> Result<Agent> {
        let route = donor
            .genome
            .random_route(rng)
            .ok_or(Error::EmptyGenome)?
            .clone();

        let mut child = self.clone();
        child.modify(problem, |genome| {
            inject_route(genome, &route, problem, rates.outer_depot_route, rng)?;
            mutate(genome, problem, rates, rng)
        })?;
        Ok(child)
    }
}
