//! Fitness of a candidate solution.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// Weight of the squared over-demand in [`Fitness::total`].
pub const OVER_DEMAND_PENALTY: f64 = 100.0;

/// Quality of a genome. Lower is better.
///
/// `total = distance + 100 × over_demand²`. The quadratic penalty lets short
/// but overloaded solutions lose to longer feasible ones once the overload
/// is noticeable.
///
/// # Examples
///
/// ```
/// use u_mdvrp::evaluation::Fitness;
///
/// let f = Fitness::new(12.0, 15.0);
/// assert_eq!(f.total(), 12.0 + 22_500.0);
///
/// let sum = f + Fitness::new(3.0, 0.0);
/// assert_eq!(sum.distance(), 15.0);
/// assert_eq!(sum.over_demand(), 15.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Fitness {
    distance: f64,
    over_demand: f64,
    total: f64,
}

impl Fitness {
    /// Creates a fitness and derives its total.
    pub fn new(distance: f64, over_demand: f64) -> Self {
        Self {
            distance,
            over_demand,
            total: distance + OVER_DEMAND_PENALTY * over_demand.powi(2),
        }
    }

    /// Total travelled distance.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Summed load in excess of the depots' vehicle caps.
    pub fn over_demand(&self) -> f64 {
        self.over_demand
    }

    /// Penalized objective value.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Returns `true` if no route exceeds its load cap.
    pub fn is_feasible(&self) -> bool {
        self.over_demand <= 0.0
    }
}

// Totals are re-derived from the summed parts; the penalty is not additive.
impl Add for Fitness {
    type Output = Fitness;

    fn add(self, rhs: Fitness) -> Fitness {
        Fitness::new(self.distance + rhs.distance, self.over_demand + rhs.over_demand)
    }
}

impl AddAssign for Fitness {
    fn add_assign(&mut self, rhs: Fitness) {
        *self = *self + rhs;
    }
}

impl Sum for Fitness {
    fn sum<I: Iterator<Item = Fitness>>(iter: I) -> Fitness {
        iter.fold(Fitness::default(), Add::add)
    }
}

impl fmt::Display for Fitness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Fitness(dist: {:.3}, over-demand: {:.3}, total: {:.3})",
            self.distance, self.over_demand, self.total
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fitness_total() {
        let f = Fitness::new(10.0, 2.0);
        assert!((f.total() - 410.0).abs() < 1e-10);
        assert!(!f.is_feasible());
    }

    #[test]
    fn test_fitness_default_is_zero() {
        let f = Fitness::default();
        assert_eq!(f.total(), 0.0);
        assert!(f.is_feasible());
    }

    #[test]
    fn test_fitness_sum_rederives_total() {
        let parts = vec![Fitness::new(1.0, 1.0), Fitness::new(2.0, 1.0)];
        let sum: Fitness = parts.into_iter().sum();
        assert_eq!(sum.distance(), 3.0);
        assert_eq!(sum.over_demand(), 2.0);
        // 3 + 100 * 2^2, not 101 + 102
        assert!((sum.total() - 403.0).abs() < 1e-10);
    }

    #[test]
    fn test_fitness_add_assign() {
        let mut f = Fitness::new(1.0, 0.0);
        f += Fitness::new(4.0, 0.5);
        assert_eq!(f.distance(), 5.0);
        assert!((f.total() - 30.0).abs() < 1e-10);
    }

    #[test]
    fn test_fitness_display() {
        let f = Fitness::new(1.5, 0.0);
        assert_eq!(
            f.to_string(),
            "Fitness(dist: 1.500, over-demand: 0.000, total: 1.500)"
        );
    }
}
