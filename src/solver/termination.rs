//! When a solve stops.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Numeric stopping rules, checked after every generation.
///
/// The default has no limit; such a solve only ends through a
/// [`StopHandle`].
///
/// # Examples
///
/// ```
/// use u_mdvrp::solver::{EndCondition, StopReason};
///
/// let end = EndCondition::default().with_max_generations(100).with_target_fitness(550.0);
/// assert_eq!(end.check(100, 600.0), Some(StopReason::GenerationLimit));
/// assert_eq!(end.check(10, 549.0), Some(StopReason::TargetReached));
/// assert_eq!(end.check(10, 600.0), None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EndCondition {
    /// Stop once this many generations have completed.
    pub max_generations: Option<usize>,
    /// Stop once the best total is at or below this value.
    pub target_fitness: Option<f64>,
}

impl EndCondition {
    /// Caps the number of generations.
    pub fn with_max_generations(mut self, generations: usize) -> Self {
        self.max_generations = Some(generations);
        self
    }

    /// Stops when the best total reaches the target.
    pub fn with_target_fitness(mut self, total: f64) -> Self {
        self.target_fitness = Some(total);
        self
    }

    /// Returns why the solve should stop, if it should.
    ///
    /// The fitness target wins when both rules fire.
    pub fn check(&self, generations_completed: usize, best_total: f64) -> Option<StopReason> {
        if self.target_fitness.is_some_and(|target| best_total <= target) {
            return Some(StopReason::TargetReached);
        }
        if self.generation_limit_reached(generations_completed) {
            return Some(StopReason::GenerationLimit);
        }
        None
    }

    /// Returns `true` if the generation cap allows no further generation.
    pub fn generation_limit_reached(&self, generations_completed: usize) -> bool {
        self.max_generations
            .is_some_and(|limit| generations_completed >= limit)
    }
}

/// Why a solve returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// The generation cap was reached.
    GenerationLimit,
    /// The best total reached the fitness target.
    TargetReached,
    /// A stop was requested through a [`StopHandle`].
    Cancelled,
}

/// Cooperative cancellation shared between a solver and its callers.
///
/// A request takes effect at the next generation boundary.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    requested: Arc<AtomicBool>,
}

impl StopHandle {
    /// Creates a handle with no pending request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a stop.
    pub fn stop(&self) {
        self.requested.store(true, Ordering::SeqCst);
    }

    /// Returns `true` if a stop is pending.
    pub fn is_stopped(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    /// Consumes a pending request, returning whether there was one.
    pub(crate) fn take(&self) -> bool {
        self.requested.swap(false, Ordering::SeqCst)
    }
}
