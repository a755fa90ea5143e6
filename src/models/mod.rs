//! Domain model types for multi-depot routing problems.
//!
//! Provides positions and Euclidean distance, customers with demands,
//! depots with fleet and load limits, and the [`Problem`] that ties them
//! together for one solve.

mod customer;
mod depot;
mod location;
mod problem;

pub use customer::Customer;
pub use depot::Depot;
pub use location::{distance, Located, Position};
pub use problem::Problem;
