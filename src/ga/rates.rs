//! Probabilistic operator rates.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A "1 in N" chance.
///
/// `0` never fires, `1` always fires.
///
/// # Examples
///
/// ```
/// use u_mdvrp::ga::Chance;
/// use u_mdvrp::random::create_rng;
///
/// let mut rng = create_rng(1);
/// assert!(!Chance::never().roll(&mut rng));
/// assert!(Chance::one_in(1).roll(&mut rng));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Chance(u64);

impl Chance {
    /// A chance that never fires.
    pub const fn never() -> Self {
        Self(0)
    }

    /// A chance that fires once in `n` rolls on average.
    pub const fn one_in(n: u64) -> Self {
        Self(n)
    }

    /// The `N` of "1 in N", or `None` if the chance never fires.
    pub fn denominator(&self) -> Option<u64> {
        (self.0 > 0).then_some(self.0)
    }

    /// Draws once.
    pub fn roll<R: Rng>(&self, rng: &mut R) -> bool {
        match self.0 {
            0 => false,
            1 => true,
            n => rng.random_range(0..n) == 0,
        }
    }
}

/// Rates driving the genetic operators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorRates {
    /// Chance that a route is split in two during mutation.
    pub route_split: Chance,
    /// Chance that an unsplit route is moved to its closest other depot.
    pub depot_relocation: Chance,
    /// Chance that injection also tries routes of other depots.
    pub outer_depot_route: Chance,
}
