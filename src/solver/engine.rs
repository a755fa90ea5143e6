//! The parallel steady-state generation loop.

use std::thread::{self, JoinHandle};

use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::{Error, Result};
use crate::ga::{Agent, Population};
use crate::models::Problem;
use crate::parallel::{partition, share, WorkerPool};
use crate::random::{create_rng, create_rng_from, worker_seeds};

use super::config::SolverConfig;
use super::report::{GenerationInfo, SolveOutcome};
use super::termination::{EndCondition, StopHandle, StopReason};

/// Lifecycle of a [`Solver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolverState {
    /// No population has been built yet.
    Uninitialized,
    /// A solve is in progress.
    Running,
    /// The last solve returned; solving again resumes from its population.
    Stopped,
}

/// Genetic algorithm solver for one problem.
///
/// Each generation breeds `floor(population_size * selection_size)` pairs
/// across the worker pool. Workers read the population as it stood at the
/// start of the generation; their children are then merged one by one,
/// each replacing the parent slot it was bred from only when its total is
/// strictly lower than the slot's current occupant.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use u_mdvrp::models::{Customer, Depot, Problem};
/// use u_mdvrp::solver::{EndCondition, Solver, SolverConfig, StopReason};
///
/// let problem = Problem::new(
///     BTreeMap::from([(0, Depot::new(0.0, 0.0, 2, 50.0))]),
///     BTreeMap::from([
///         (1, Customer::new(1, 3.0, 0.0, 10.0, 0.0)),
///         (2, Customer::new(2, 0.0, 4.0, 10.0, 0.0)),
///         (3, Customer::new(3, -2.0, 1.0, 10.0, 0.0)),
///     ]),
/// )
/// .unwrap();
///
/// let config = SolverConfig::default()
///     .with_population_size(20)
///     .with_num_workers(2)
///     .with_seed(1);
/// let mut solver = Solver::new(problem, config).unwrap();
///
/// let mut reports = 0;
/// let outcome = solver
///     .solve(EndCondition::default().with_max_generations(5), |_| reports += 1)
///     .unwrap();
/// assert_eq!(outcome.reason, StopReason::GenerationLimit);
/// assert_eq!(outcome.generations, 5);
/// assert_eq!(reports, 5);
/// ```
pub struct Solver {
    problem: Problem,
    config: SolverConfig,
    pool: WorkerPool,
    rng: StdRng,
    population: Population,
    generation: usize,
    state: SolverState,
    stop: StopHandle,
}

impl Solver {
    /// Validates the configuration and starts the worker pool.
    ///
    /// The population is built lazily by the first [`solve`](Self::solve).
    pub fn new(problem: Problem, config: SolverConfig) -> Result<Self> {
        config.validate()?;
        let pool = WorkerPool::new(config.workers())?;
        let rng = create_rng_from(config.seed);
        Ok(Self {
            problem,
            config,
            pool,
            rng,
            population: Population::default(),
            generation: 0,
            state: SolverState::Uninitialized,
            stop: StopHandle::new(),
        })
    }

    /// The problem being solved.
    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    /// The solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// The current population. Empty before the first solve.
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Generations completed across all solves.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SolverState {
        self.state
    }

    /// The best agent found so far.
    pub fn best(&self) -> Option<&Agent> {
        self.population.best()
    }

    /// A handle that stops this solver at the next generation boundary.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Runs generations until an end condition holds or a stop is requested.
    ///
    /// `on_generation` is called once per completed generation, in order,
    /// before the end conditions are checked. A stopped solver resumes from
    /// its current population and generation count.
    #[instrument(skip_all, fields(
        depots = self.problem.num_depots(),
        customers = self.problem.num_customers(),
        workers = self.pool.num_workers()
    ))]
    pub fn solve<F>(&mut self, end: EndCondition, on_generation: F) -> Result<SolveOutcome>
    where
        F: FnMut(&GenerationInfo<'_>),
    {
        if self.state == SolverState::Uninitialized {
            self.initialize()?;
        }
        self.state = SolverState::Running;
        info!(
            generation = self.generation,
            population = self.population.len(),
            "solve started"
        );

        let reason = self.run(&end, on_generation);
        self.state = SolverState::Stopped;
        let reason = reason?;

        let best = self.population.best().ok_or(Error::EmptyPopulation)?.clone();
        info!(
            generations = self.generation,
            best = %best.fitness(),
            ?reason,
            "solve stopped"
        );
        Ok(SolveOutcome {
            best,
            generations: self.generation,
            population_fitness: self.population.aggregate_fitness(),
            reason,
        })
    }

    /// Moves the solver onto its own thread and starts solving.
    ///
    /// The returned handle can stop the solve and join it to get the solver
    /// back for resuming.
    pub fn spawn<F>(self, end: EndCondition, on_generation: F) -> SolveHandle
    where
        F: FnMut(&GenerationInfo<'_>) + Send + 'static,
    {
        let stop = self.stop_handle();
        let mut solver = self;
        let thread = thread::spawn(move || {
            let outcome = solver.solve(end, on_generation);
            (solver, outcome)
        });
        SolveHandle { stop, thread }
    }

    fn initialize(&mut self) -> Result<()> {
        let size = self.config.population_size;
        let num_workers = self.pool.num_workers();
        let seeds = worker_seeds(&mut self.rng, num_workers);
        let problem = &self.problem;

        let batches = self.pool.broadcast(|worker| {
            let mut rng = create_rng(seeds[worker]);
            (0..share(size, num_workers, worker))
                .map(|_| Agent::seed(problem, &mut rng))
                .collect::<Result<Vec<_>>>()
        });

        let mut agents = Vec::with_capacity(size);
        for batch in batches {
            agents.extend(batch?);
        }
        self.population = Population::new(agents);
        debug!(size = self.population.len(), "population initialized");
        Ok(())
    }

    fn run<F>(&mut self, end: &EndCondition, mut on_generation: F) -> Result<StopReason>
    where
        F: FnMut(&GenerationInfo<'_>),
    {
        if end.generation_limit_reached(self.generation) {
            self.stop.take();
            return Ok(StopReason::GenerationLimit);
        }
        loop {
            let replaced = self.step()?;
            let generation = self.generation;
            self.generation += 1;

            let best = self.population.best().ok_or(Error::EmptyPopulation)?;
            let info = GenerationInfo {
                generation,
                best,
                population_fitness: self.population.aggregate_fitness(),
            };
            debug!(generation, replaced, best = %best.fitness(), "generation completed");
            on_generation(&info);

            let cancelled = self.stop.take();
            if let Some(reason) = end.check(self.generation, best.fitness().total()) {
                return Ok(reason);
            }
            if cancelled {
                return Ok(StopReason::Cancelled);
            }
        }
    }

    /// Runs one generation and returns how many slots were replaced.
    fn step(&mut self) -> Result<usize> {
        let num_events = self.config.num_new_agents();
        let num_workers = self.pool.num_workers();
        let seeds = worker_seeds(&mut self.rng, num_workers);
        let agents = self.population.agents();
        let problem = &self.problem;
        let config = &self.config;

        let batches = self.pool.broadcast(|worker| {
            let mut rng = create_rng(seeds[worker]);
            let mut children = Vec::new();
            for _ in partition(num_events, num_workers, worker) {
                reproduce(agents, problem, config, &mut rng, &mut children)?;
            }
            Ok::<_, Error>(children)
        });

        let mut replaced = 0;
        for batch in batches {
            for (slot, child) in batch? {
                if self.population.replace_if_better(slot, child) {
                    replaced += 1;
                }
            }
        }
        Ok(replaced)
    }
}

/// One reproduction event: select two parents and breed them both ways.
///
/// A child is kept as a candidate for its recipient's slot only when it
/// beats that recipient.
fn reproduce<R: Rng>(
    agents: &[Agent],
    problem: &Problem,
    config: &SolverConfig,
    rng: &mut R,
    children: &mut Vec<(usize, Agent)>,
) -> Result<()> {
    let first = config.selection.select(agents, rng)?;
    let second = config.selection.select(agents, rng)?;

    for (recipient, donor) in [(first, second), (second, first)] {
        let parent = &agents[recipient];
        let child = parent.mate(&agents[donor], problem, &config.rates, rng)?;
        if child.fitness().total() < parent.fitness().total() {
            children.push((recipient, child));
        }
    }
    Ok(())
}

/// A solve running on its own thread.
pub struct SolveHandle {
    stop: StopHandle,
    thread: JoinHandle<(Solver, Result<SolveOutcome>)>,
}

impl SolveHandle {
    /// Requests a stop at the next generation boundary.
    pub fn stop(&self) {
        self.stop.stop();
    }

    /// A clone of the solver's stop handle.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Returns `true` once the solve thread has exited.
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Waits for the solve to end and returns the solver with its outcome.
    pub fn join(self) -> Result<(Solver, SolveOutcome)> {
        let (solver, outcome) = self.thread.join().map_err(|_| Error::SolverPanicked)?;
        Ok((solver, outcome?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::{Chance, Selection};
    use crate::models::{Customer, Depot};
    use std::collections::BTreeMap;

    fn problem() -> Problem {
        let customers = (1..=12)
            .map(|i| {
                let x = ((i * 37) % 23) as f64 - 11.0;
                let y = ((i * 17) % 19) as f64 - 9.0;
                (i, Customer::new(i, x, y, 10.0, 0.0))
            })
            .collect();
        Problem::new(
            BTreeMap::from([
                (0, Depot::new(-5.0, -5.0, 3, 40.0)),
                (1, Depot::new(5.0, 5.0, 3, 40.0)),
            ]),
            customers,
        )
        .expect("valid problem")
    }

    fn config() -> SolverConfig {
        SolverConfig::default()
            .with_population_size(30)
            .with_selection_size(0.5)
            .with_num_workers(3)
            .with_route_split(Chance::one_in(5))
            .with_depot_relocation(Chance::one_in(5))
            .with_outer_depot_route(Chance::one_in(3))
            .with_seed(11)
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let result = Solver::new(problem(), config().with_population_size(0));
        assert!(matches!(result, Err(Error::InvalidConfig { .. })));
    }

    #[test]
    fn test_initialize_fills_population() {
        let mut solver = Solver::new(problem(), config()).expect("solver");
        assert_eq!(solver.state(), SolverState::Uninitialized);
        assert!(solver.best().is_none());

        solver
            .solve(EndCondition::default().with_max_generations(1), |_| {})
            .expect("solve");
        assert_eq!(solver.population().len(), 30);
        assert_eq!(solver.state(), SolverState::Stopped);
        for agent in solver.population().agents() {
            assert!(agent.genome().covers(solver.problem()));
            assert!(agent.genome().respects_fleet(solver.problem()));
        }
    }

    #[test]
    fn test_best_never_worsens() {
        let mut solver = Solver::new(problem(), config()).expect("solver");
        let mut history = Vec::new();
        solver
            .solve(EndCondition::default().with_max_generations(15), |info| {
                history.push(info.best.fitness().total());
            })
            .expect("solve");
        assert_eq!(history.len(), 15);
        for pair in history.windows(2) {
            assert!(pair[1] <= pair[0]);
        }
    }

    #[test]
    fn test_generation_numbers_are_sequential_across_resume() {
        let mut solver = Solver::new(problem(), config()).expect("solver");
        let mut seen = Vec::new();
        solver
            .solve(EndCondition::default().with_max_generations(3), |info| {
                seen.push(info.generation)
            })
            .expect("first solve");
        let outcome = solver
            .solve(EndCondition::default().with_max_generations(6), |info| {
                seen.push(info.generation)
            })
            .expect("resume");
        assert_eq!(seen, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(outcome.generations, 6);
    }

    #[test]
    fn test_stop_before_solve_runs_one_generation() {
        let mut solver = Solver::new(problem(), config()).expect("solver");
        solver.stop_handle().stop();
        let outcome = solver
            .solve(EndCondition::default(), |_| {})
            .expect("solve");
        assert_eq!(outcome.reason, StopReason::Cancelled);
        assert_eq!(outcome.generations, 1);
        assert!(!solver.stop_handle().is_stopped());
    }

    #[test]
    fn test_stop_in_last_generation_does_not_leak_into_next_solve() {
        let mut solver = Solver::new(problem(), config()).expect("solver");
        let stop = solver.stop_handle();
        let outcome = solver
            .solve(EndCondition::default().with_max_generations(3), |info| {
                if info.generation == 2 {
                    stop.stop();
                }
            })
            .expect("first solve");
        assert_eq!(outcome.reason, StopReason::GenerationLimit);
        assert!(!solver.stop_handle().is_stopped());

        let outcome = solver
            .solve(EndCondition::default().with_max_generations(10), |_| {})
            .expect("second solve");
        assert_eq!(outcome.reason, StopReason::GenerationLimit);
        assert_eq!(outcome.generations, 10);
    }

    #[test]
    fn test_zero_generation_cap_runs_nothing() {
        let mut solver = Solver::new(problem(), config()).expect("solver");
        let mut reports = 0;
        let outcome = solver
            .solve(EndCondition::default().with_max_generations(0), |_| reports += 1)
            .expect("solve");
        assert_eq!(reports, 0);
        assert_eq!(outcome.generations, 0);
        assert_eq!(outcome.reason, StopReason::GenerationLimit);
        assert_eq!(solver.population().len(), 30);
    }

    #[test]
    fn test_random_selection_runs() {
        let mut solver =
            Solver::new(problem(), config().with_selection(Selection::Random)).expect("solver");
        let outcome = solver
            .solve(EndCondition::default().with_max_generations(4), |_| {})
            .expect("solve");
        assert_eq!(outcome.reason, StopReason::GenerationLimit);
        assert!(outcome.best.genome().covers(solver.problem()));
    }

    #[test]
    fn test_reproduce_only_keeps_improvements() {
        let problem = problem();
        let config = config();
        let mut rng = create_rng(3);
        let agents: Vec<Agent> = (0..10)
            .map(|_| Agent::seed(&problem, &mut rng).expect("agent"))
            .collect();
        let mut children = Vec::new();
        for _ in 0..20 {
            reproduce(&agents, &problem, &config, &mut rng, &mut children).expect("reproduce");
        }
        for (slot, child) in &children {
            assert!(child.fitness().total() < agents[*slot].fitness().total());
        }
    }

    #[test]
    fn test_seeded_solves_are_reproducible() {
        let run = || {
            let mut solver = Solver::new(problem(), config()).expect("solver");
            solver
                .solve(EndCondition::default().with_max_generations(5), |_| {})
                .expect("solve")
                .best
        };
        assert_eq!(run(), run());
    }
}
