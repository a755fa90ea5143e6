//! Parent selection.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::agent::Agent;

/// How parents are drawn from the population.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    /// Fitness-biased: agents with a lower total are drawn more often.
    #[default]
    Roulette,
    /// Uniform over all slots.
    Random,
}

impl Selection {
    /// Draws the index of one agent.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_mdvrp::ga::Selection;
    /// use u_mdvrp::random::create_rng;
    ///
    /// let mut rng = create_rng(1);
    /// assert!(Selection::Random.select(&[], &mut rng).is_err());
    /// ```
    pub fn select<R: Rng>(&self, agents: &[Agent], rng: &mut R) -> Result<usize> {
        if agents.is_empty() {
            return Err(Error::EmptyPopulation);
        }
        if let Selection::Roulette = self {
            if let Some(index) = spin_roulette(agents, rng) {
                return Ok(index);
            }
        }
        Ok(rng.random_range(0..agents.len()))
    }
}

/// Spins a wheel where each agent weighs `highest - total`.
///
/// The draw spans the sum of totals rather than the sum of weights. A spin
/// that walks past the last agent returns `None` and the caller falls back
/// to a uniform draw, which is what happens when most totals sit close to
/// the highest one.
fn spin_roulette<R: Rng>(agents: &[Agent], rng: &mut R) -> Option<usize> {
    let totals: Vec<f64> = agents.iter().map(|a| a.fitness().total()).collect();
    let highest = totals.iter().copied().fold(0.0, f64::max);
    let sum: f64 = totals.iter().sum();
    if !(sum > 0.0 && sum.is_finite()) {
        return None;
    }

    let mut value = rng.random_range(0.0..sum);
    for (index, total) in totals.iter().enumerate() {
        value -= highest - total;
        if value <= 0.0 {
            return Some(index);
        }
    }
    None
}
