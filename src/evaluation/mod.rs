//! Fitness of genomes: travelled distance plus a quadratic load penalty.

mod evaluator;
mod fitness;

pub use evaluator::{evaluate, FitnessEvaluator};
pub use fitness::{Fitness, OVER_DEMAND_PENALTY};
