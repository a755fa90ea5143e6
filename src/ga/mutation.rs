//! Depot-aware route mutations.
//!
//! - **Split**: the second half of a route becomes a new route at an
//!   available depot (the route's own depot first).
//! - **Relocation**: the route moves to the other depot closest to its
//!   customers that still has a free vehicle.
//!
//! Neither mutation ever pushes a depot past its vehicle count. When no
//! depot is available the attempt is skipped.

use rand::Rng;
use tracing::trace;

use crate::error::{Error, Result};
use crate::models::{distance, Problem};

use super::genome::{Genome, Route};
use super::rates::OperatorRates;

/// Runs one mutation pass over the routes present when the pass starts.
///
/// Empty routes are left alone. A route that was split is always relocated;
/// other routes are relocated with the depot relocation chance.
pub fn mutate<R: Rng>(
    genome: &mut Genome,
    problem: &Problem,
    rates: &OperatorRates,
    rng: &mut R,
) -> Result<()> {
    for route in 0..genome.num_routes() {
        if genome.routes()[route].is_empty() {
            continue;
        }
        let split = rates.route_split.roll(rng) && split_route(genome, route, problem)?;
        if split || rates.depot_relocation.roll(rng) {
            relocate_route(genome, route, problem)?;
        }
    }
    Ok(())
}

/// Splits a route at its midpoint. Returns `false` if the route is too short
/// or no depot can take the new route, and an error if `route` is not an
/// index of the genome.
pub fn split_route(genome: &mut Genome, route: usize, problem: &Problem) -> Result<bool> {
    let (len, depot_id) = {
        let r = genome.routes().get(route).ok_or(Error::UnknownRoute(route))?;
        (r.len(), r.depot_id())
    };
    if len < 2 {
        return Ok(false);
    }

    let Some(target) = genome.available_depot(problem, depot_id)? else {
        trace!(route, depot_id, "split skipped: no depot with a free vehicle");
        return Ok(false);
    };

    let tail = genome.routes_mut()[route].split_off_half();
    genome.push_route(Route::with_customers(target, tail));
    Ok(true)
}

/// Moves a route to the closest other depot with a free vehicle.
///
/// Closeness is the summed distance from the depot to each of the route's
/// customers. Returns `false` if the route stays where it is.
pub fn relocate_route(genome: &mut Genome, route: usize, problem: &Problem) -> Result<bool> {
    let current = genome
        .routes()
        .get(route)
        .ok_or(Error::UnknownRoute(route))?
        .depot_id();

    let mut candidates = Vec::with_capacity(problem.num_depots());
    for (depot_id, depot) in problem.depots() {
        if depot_id == current {
            continue;
        }
        let mut sum = 0.0;
        for &customer_id in genome.routes()[route].customers() {
            sum += distance(depot, problem.customer(customer_id)?);
        }
        candidates.push((depot_id, sum));
    }
    // stable: equal sums keep ascending depot order
    candidates.sort_by(|a, b| a.1.total_cmp(&b.1));

    for (depot_id, _) in candidates {
        if genome.depot_is_available(problem, depot_id)? {
            genome.routes_mut()[route].set_depot_id(depot_id);
            return Ok(true);
        }
    }

    trace!(route, depot_id = current, "relocation skipped: no depot with a free vehicle");
    Ok(false)
}
