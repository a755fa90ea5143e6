//! Fitness evaluator for routes and genomes.

use crate::error::Result;
use crate::ga::{Genome, Route};
use crate::models::{distance, Problem};

use super::Fitness;

/// Computes travelled distance and load excess.
///
/// Evaluation is a full recomputation over every route; callers re-evaluate
/// after each structural change to a genome.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use u_mdvrp::evaluation::FitnessEvaluator;
/// use u_mdvrp::ga::{Genome, Route};
/// use u_mdvrp::models::{Customer, Depot, Problem};
///
/// let problem = Problem::new(
///     BTreeMap::from([(0, Depot::new(0.0, 0.0, 1, 25.0))]),
///     BTreeMap::from([
///         (1, Customer::new(1, 3.0, 4.0, 10.0, 0.0)),
///         (2, Customer::new(2, 6.0, 8.0, 20.0, 0.0)),
///     ]),
/// )
/// .unwrap();
///
/// let genome = Genome::new(vec![Route::with_customers(0, vec![1, 2])]);
/// let fitness = FitnessEvaluator::new(&problem).evaluate(&genome).unwrap();
/// // 0→1 = 5, 1→2 = 5, 2→0 = 10
/// assert!((fitness.distance() - 20.0).abs() < 1e-10);
/// assert_eq!(fitness.over_demand(), 5.0);
/// ```
pub struct FitnessEvaluator<'a> {
    problem: &'a Problem,
}

impl<'a> FitnessEvaluator<'a> {
    /// Creates an evaluator for the given problem.
    pub fn new(problem: &'a Problem) -> Self {
        Self { problem }
    }

    /// Evaluates a single route. Empty routes cost nothing.
    pub fn evaluate_route(&self, route: &Route) -> Result<Fitness> {
        let customers = route.customers();
        let (Some(&first), Some(&last)) = (customers.first(), customers.last()) else {
            return Ok(Fitness::default());
        };

        let depot = self.problem.depot(route.depot_id())?;
        let mut total_distance = distance(depot, self.problem.customer(first)?)
            + distance(self.problem.customer(last)?, depot);

        let mut demand = 0.0;
        let mut prev = None;
        for &id in customers {
            let customer = self.problem.customer(id)?;
            if let Some(prev) = prev {
                total_distance += distance(prev, customer);
            }
            demand += customer.demand();
            prev = Some(customer);
        }

        let over_demand = (demand - depot.max_load()).max(0.0);
        Ok(Fitness::new(total_distance, over_demand))
    }

    /// Evaluates a whole genome.
    pub fn evaluate(&self, genome: &Genome) -> Result<Fitness> {
        genome
            .routes()
            .iter()
            .map(|route| self.evaluate_route(route))
            .sum()
    }
}

/// Evaluates a genome against a problem.
pub fn evaluate(genome: &Genome, problem: &Problem) -> Result<Fitness> {
    FitnessEvaluator::new(problem).evaluate(genome)
}
