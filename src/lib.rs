//! # u-mdvrp
//!
//! Multi-depot vehicle routing with a genetic algorithm: route injection
//! crossover, depot-aware mutation, and a parallel steady-state generation
//! loop.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Customer, Depot, Problem)
//! - [`evaluation`] — Distance plus quadratic over-demand fitness
//! - [`ga`] — Genome encoding, seeding, injection, mutation, selection, population
//! - [`solver`] — Configuration, end conditions, and the generation loop
//! - [`parallel`] — Fixed-size worker pool
//! - [`io`] — Cordeau-format problem file reader
//! - [`random`] — Seeded random number generators
//!
//! ## Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use u_mdvrp::models::{Customer, Depot, Problem};
//! use u_mdvrp::solver::{EndCondition, Solver, SolverConfig};
//!
//! let problem = Problem::new(
//!     BTreeMap::from([
//!         (0, Depot::new(0.0, 0.0, 2, 30.0)),
//!         (1, Depot::new(20.0, 0.0, 2, 30.0)),
//!     ]),
//!     BTreeMap::from([
//!         (1, Customer::new(1, 2.0, 1.0, 10.0, 0.0)),
//!         (2, Customer::new(2, 3.0, -1.0, 10.0, 0.0)),
//!         (3, Customer::new(3, 18.0, 2.0, 10.0, 0.0)),
//!         (4, Customer::new(4, 21.0, -2.0, 10.0, 0.0)),
//!     ]),
//! )
//! .unwrap();
//!
//! let config = SolverConfig::default().with_population_size(40).with_seed(3);
//! let mut solver = Solver::new(problem, config).unwrap();
//! let outcome = solver
//!     .solve(EndCondition::default().with_max_generations(20), |_| {})
//!     .unwrap();
//! assert!(outcome.best.fitness().is_feasible());
//! ```

pub mod error;
pub mod evaluation;
pub mod ga;
pub mod io;
pub mod models;
pub mod parallel;
pub mod random;
pub mod solver;

pub use error::{Error, ParseError, Result};
