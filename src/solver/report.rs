//! Per-generation reports and solve outcomes.

use serde::Serialize;

use crate::evaluation::Fitness;
use crate::ga::Agent;

use super::termination::StopReason;

/// Summary handed to the generation callback.
///
/// The best agent is borrowed from the population; it stays valid for the
/// duration of the callback only.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GenerationInfo<'a> {
    /// Zero-based generation number.
    pub generation: usize,
    /// The agent with the lowest total after this generation.
    pub best: &'a Agent,
    /// Summed distance and over-demand of the whole population.
    pub population_fitness: Fitness,
}

/// Result of a finished solve.
#[derive(Debug, Clone, Serialize)]
pub struct SolveOutcome {
    /// The best agent of the last completed generation.
    pub best: Agent,
    /// Number of generations completed so far.
    pub generations: usize,
    /// Aggregate fitness of the last completed generation.
    pub population_fitness: Fitness,
    /// Why the solve stopped.
    pub reason: StopReason,
}
