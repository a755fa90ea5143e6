//! Genetic algorithm components for multi-depot routing.
//!
//! - [`Genome`] / [`Route`] — Route-list encoding covering every customer once
//! - [`Agent`] — A genome with its fitness; the unit of selection and mating
//! - [`inject_route`] — Route injection crossover
//! - [`mutation`] — Route split and depot relocation
//! - [`Selection`] — Roulette or uniform parent selection
//! - [`Population`] — Fixed-size, steady-state population

mod agent;
mod genome;
mod injection;
pub mod mutation;
mod population;
mod rates;
mod selection;

pub use agent::Agent;
pub use genome::{Genome, Route};
pub use injection::inject_route;
pub use population::Population;
pub use rates::{Chance, OperatorRates};
pub use selection::Selection;
