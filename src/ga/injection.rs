//! Route injection crossover.
//!
//! # Algorithm
//!
//! The donor route's customers are removed from the recipient genome and
//! then reinserted one at a time, in donor order, at the position of any
//! route that gives the lowest genome total. Routes bound to other depots
//! than the donor's are only tried when the outer-depot chance fires, so
//! most insertions stay local to the donor's depot.
//!
//! # Complexity
//!
//! O(k × n²) per injection for k donor customers and n customers overall,
//! since every trial position triggers a full evaluation.

use rand::Rng;

use crate::error::{Error, Result};
use crate::evaluation::FitnessEvaluator;
use crate::models::Problem;

use super::genome::{Genome, Route};
use super::rates::Chance;

/// A trial insertion point.
#[derive(Debug, Clone, Copy)]
struct Insertion {
    route: usize,
    position: usize,
    total: f64,
}

/// Injects a donor route into a recipient genome.
///
/// Afterwards every customer of the donor appears exactly once in the
/// recipient. If no route was eligible for a customer (e.g. the recipient has
/// no route at the donor's depot and the outer-depot chance did not fire),
/// all routes are tried.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use u_mdvrp::ga::{inject_route, Chance, Genome, Route};
/// use u_mdvrp::models::{Customer, Depot, Problem};
/// use u_mdvrp::random::create_rng;
///
/// let problem = Problem::new(
///     BTreeMap::from([(0, Depot::new(0.0, 0.0, 2, 100.0))]),
///     BTreeMap::from([
///         (1, Customer::new(1, 1.0, 0.0, 1.0, 0.0)),
///         (2, Customer::new(2, 2.0, 0.0, 1.0, 0.0)),
///         (3, Customer::new(3, 3.0, 0.0, 1.0, 0.0)),
///     ]),
/// )
/// .unwrap();
///
/// let mut genome = Genome::new(vec![
///     Route::with_customers(0, vec![3, 1]),
///     Route::with_customers(0, vec![2]),
/// ]);
/// let donor = Route::with_customers(0, vec![1, 3]);
/// inject_route(&mut genome, &donor, &problem, Chance::never(), &mut create_rng(0)).unwrap();
/// assert!(genome.covers(&problem));
/// ```
pub fn inject_route<R: Rng>(
    genome: &mut Genome,
    donor: &Route,
    problem: &Problem,
    outer_depot_route: Chance,
    rng: &mut R,
) -> Result<()> {
    if genome.num_routes() == 0 {
        return Err(Error::EmptyGenome);
    }

    genome.remove_customers(donor.customers());

    let evaluator = FitnessEvaluator::new(problem);
    for &customer_id in donor.customers() {
        let eligible: Vec<bool> = genome
            .routes()
            .iter()
            .map(|r| r.depot_id() == donor.depot_id() || outer_depot_route.roll(rng))
            .collect();

        let best = match best_insertion(genome, customer_id, &evaluator, |ri| eligible[ri])? {
            Some(best) => best,
            None => best_insertion(genome, customer_id, &evaluator, |_| true)?
                .ok_or(Error::EmptyGenome)?,
        };

        genome.routes_mut()[best.route]
            .customers_mut()
            .insert(best.position, customer_id);
    }

    Ok(())
}

/// Finds the insertion point with the lowest genome total among the routes
/// accepted by `eligible`. The genome is restored after every trial.
fn best_insertion(
    genome: &mut Genome,
    customer_id: usize,
    evaluator: &FitnessEvaluator<'_>,
    eligible: impl Fn(usize) -> bool,
) -> Result<Option<Insertion>> {
    let mut best: Option<Insertion> = None;

    for route in 0..genome.num_routes() {
        if !eligible(route) {
            continue;
        }
        for position in 0..=genome.routes()[route].len() {
            genome.routes_mut()[route]
                .customers_mut()
                .insert(position, customer_id);
            let fitness = evaluator.evaluate(genome);
            genome.routes_mut()[route].customers_mut().remove(position);

            let total = fitness?.total();
            if best.is_none_or(|b| total < b.total) {
                best = Some(Insertion {
                    route,
                    position,
                    total,
                });
            }
        }
    }

    Ok(best)
}
