//! Route-list genome for multi-depot routing.
//!
//! A genome is a list of routes, each bound to one depot, that together
//! visit every customer of the problem exactly once. Empty routes are
//! legal and still occupy one of their depot's vehicles.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{distance, Problem};

/// One vehicle's visiting order, bound to a depot.
///
/// # Examples
///
/// ```
/// use u_mdvrp::ga::Route;
///
/// let route = Route::with_customers(1, vec![4, 2, 7]);
/// assert_eq!(route.depot_id(), 1);
/// assert_eq!(route.customers(), &[4, 2, 7]);
/// assert!(Route::new(0).is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    depot_id: usize,
    customers: Vec<usize>,
}

impl Route {
    /// Creates an empty route at the given depot.
    pub fn new(depot_id: usize) -> Self {
        Self::with_customers(depot_id, Vec::new())
    }

    /// Creates a route with a visiting order.
    pub fn with_customers(depot_id: usize, customers: Vec<usize>) -> Self {
        Self {
            depot_id,
            customers,
        }
    }

    /// The depot this route starts and ends at.
    pub fn depot_id(&self) -> usize {
        self.depot_id
    }

    /// Rebinds the route to another depot.
    pub fn set_depot_id(&mut self, depot_id: usize) {
        self.depot_id = depot_id;
    }

    /// Customer ids in visiting order.
    pub fn customers(&self) -> &[usize] {
        &self.customers
    }

    /// Mutable visiting order.
    pub fn customers_mut(&mut self) -> &mut Vec<usize> {
        &mut self.customers
    }

    /// Number of customers on the route.
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    /// Returns `true` if the route visits no customer.
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Removes and returns the second half of the visiting order.
    pub fn split_off_half(&mut self) -> Vec<usize> {
        let mid = self.customers.len() / 2;
        self.customers.split_off(mid)
    }
}

/// A complete candidate solution.
///
/// Cloning a genome copies every route's sequence; the copy shares no
/// storage with the original.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use u_mdvrp::ga::Genome;
/// use u_mdvrp::models::{Customer, Depot, Problem};
/// use u_mdvrp::random::create_rng;
///
/// let problem = Problem::new(
///     BTreeMap::from([(0, Depot::new(0.0, 0.0, 2, 100.0))]),
///     BTreeMap::from([
///         (1, Customer::new(1, 1.0, 0.0, 10.0, 0.0)),
///         (2, Customer::new(2, 2.0, 0.0, 10.0, 0.0)),
///         (3, Customer::new(3, 3.0, 0.0, 10.0, 0.0)),
///     ]),
/// )
/// .unwrap();
///
/// let genome = Genome::seed(&problem, &mut create_rng(42));
/// assert_eq!(genome.num_routes(), 2);
/// assert!(genome.covers(&problem));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Genome {
    routes: Vec<Route>,
}

impl Genome {
    /// Creates a genome from routes.
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Builds a randomized genome.
    ///
    /// Every customer goes to its nearest depot (the first one on ties).
    /// Each depot gets all of its vehicles as routes, and its customers are
    /// dealt round-robin over them in random order.
    pub fn seed<R: Rng>(problem: &Problem, rng: &mut R) -> Self {
        let mut assigned: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (customer_id, customer) in problem.customers() {
            let mut nearest: Option<(usize, f64)> = None;
            for (depot_id, depot) in problem.depots() {
                let d = distance(depot, customer);
                if nearest.is_none_or(|(_, best)| d < best) {
                    nearest = Some((depot_id, d));
                }
            }
            if let Some((depot_id, _)) = nearest {
                assigned.entry(depot_id).or_default().push(customer_id);
            }
        }

        let mut routes = Vec::with_capacity(problem.total_vehicles());
        for (depot_id, depot) in problem.depots() {
            let mut depot_routes: Vec<Route> =
                (0..depot.max_vehicles()).map(|_| Route::new(depot_id)).collect();
            let mut pool = assigned.remove(&depot_id).unwrap_or_default();
            pool.shuffle(rng);
            let n = depot_routes.len();
            for (i, customer_id) in pool.into_iter().enumerate() {
                depot_routes[i % n].customers.push(customer_id);
            }
            routes.extend(depot_routes);
        }

        Self { routes }
    }

    /// The routes of this genome.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Mutable routes.
    pub fn routes_mut(&mut self) -> &mut Vec<Route> {
        &mut self.routes
    }

    /// Number of routes, empty ones included.
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Appends a route.
    pub fn push_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// Picks a uniformly random route.
    pub fn random_route<R: Rng>(&self, rng: &mut R) -> Option<&Route> {
        if self.routes.is_empty() {
            return None;
        }
        self.routes.get(rng.random_range(0..self.routes.len()))
    }

    /// Removes each given customer from the route currently holding it.
    ///
    /// Ids not present in the genome are ignored.
    pub fn remove_customers(&mut self, customer_ids: &[usize]) {
        for &id in customer_ids {
            for route in &mut self.routes {
                if let Some(pos) = route.customers.iter().position(|&c| c == id) {
                    route.customers.remove(pos);
                    break;
                }
            }
        }
    }

    /// Number of routes bound to a depot.
    pub fn depot_occupancy(&self, depot_id: usize) -> usize {
        self.routes.iter().filter(|r| r.depot_id == depot_id).count()
    }

    /// Returns `true` if the depot can take one more route.
    pub fn depot_is_available(&self, problem: &Problem, depot_id: usize) -> Result<bool> {
        let depot = problem.depot(depot_id)?;
        Ok(self.depot_occupancy(depot_id) < depot.max_vehicles())
    }

    /// Returns a depot that can take one more route, preferring `preferred`.
    pub fn available_depot(&self, problem: &Problem, preferred: usize) -> Result<Option<usize>> {
        if self.depot_is_available(problem, preferred)? {
            return Ok(Some(preferred));
        }
        for &depot_id in problem.depot_ids() {
            if depot_id != preferred && self.depot_is_available(problem, depot_id)? {
                return Ok(Some(depot_id));
            }
        }
        Ok(None)
    }

    /// All visited customer ids, sorted, duplicates kept.
    pub fn visited_customers(&self) -> Vec<usize> {
        let mut ids: Vec<usize> = self
            .routes
            .iter()
            .flat_map(|r| r.customers.iter().copied())
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Returns `true` if every customer of the problem is visited exactly once.
    pub fn covers(&self, problem: &Problem) -> bool {
        self.visited_customers() == problem.customer_ids()
    }

    /// Returns `true` if no depot has more routes than vehicles.
    pub fn respects_fleet(&self, problem: &Problem) -> bool {
        problem
            .depots()
            .all(|(id, depot)| self.depot_occupancy(id) <= depot.max_vehicles())
            && self
                .routes
                .iter()
                .all(|r| problem.depot(r.depot_id).is_ok())
    }
}
