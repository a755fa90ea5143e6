//! Solver orchestration.
//!
//! - [`SolverConfig`] — Population size, selection, operator rates, workers
//! - [`Solver`] — Parallel steady-state generation loop
//! - [`EndCondition`] / [`StopHandle`] — Generation cap, fitness target, cancellation
//! - [`GenerationInfo`] / [`SolveOutcome`] — Per-generation and final reports

mod config;
mod engine;
mod report;
mod termination;

pub use config::SolverConfig;
pub use engine::{SolveHandle, Solver, SolverState};
pub use report::{GenerationInfo, SolveOutcome};
pub use termination::{EndCondition, StopHandle, StopReason};
