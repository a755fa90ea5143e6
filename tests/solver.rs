use std::collections::BTreeMap;
use std::sync::mpsc;

use u_mdvrp::ga::Chance;
use u_mdvrp::models::{Customer, Depot, Problem};
use u_mdvrp::solver::{EndCondition, Solver, SolverConfig, SolverState, StopReason};
use u_mdvrp::Error;

fn clustered_problem() -> Problem {
    let centers = [(0, -30.0, 0.0), (1, 30.0, 0.0), (2, 0.0, 40.0)];
    let depots = centers
        .iter()
        .map(|&(id, x, y)| (id, Depot::new(x, y, 2, 60.0)))
        .collect();
    let mut customers = BTreeMap::new();
    for (k, &(_, cx, cy)) in centers.iter().enumerate() {
        for j in 0..6 {
            let id = 1 + k * 6 + j;
            let angle = j as f64 * std::f64::consts::PI / 3.0;
            let x = cx + 8.0 * angle.cos();
            let y = cy + 8.0 * angle.sin();
            customers.insert(id, Customer::new(id, x, y, 12.0, 0.0));
        }
    }
    Problem::new(depots, customers).expect("problem")
}

fn config() -> SolverConfig {
    SolverConfig::default()
        .with_population_size(40)
        .with_selection_size(0.5)
        .with_num_workers(4)
        .with_route_split(Chance::one_in(10))
        .with_depot_relocation(Chance::one_in(10))
        .with_outer_depot_route(Chance::one_in(4))
        .with_seed(2024)
}

#[test]
fn best_total_is_non_increasing() {
    let mut solver = Solver::new(clustered_problem(), config()).expect("solver");
    let mut bests = Vec::new();
    let outcome = solver
        .solve(EndCondition::default().with_max_generations(30), |info| {
            bests.push(info.best.fitness().total());
        })
        .expect("solve");

    assert_eq!(bests.len(), 30);
    assert!(bests.windows(2).all(|w| w[1] <= w[0]));
    assert_eq!(Some(&outcome.best.fitness().total()), bests.last());
}

#[test]
fn callback_sees_every_generation_in_order() {
    let mut solver = Solver::new(clustered_problem(), config()).expect("solver");
    let mut generations = Vec::new();
    let outcome = solver
        .solve(EndCondition::default().with_max_generations(8), |info| {
            generations.push(info.generation);
            assert!(info.population_fitness.total() >= info.best.fitness().total());
        })
        .expect("solve");

    assert_eq!(generations, (0..8).collect::<Vec<_>>());
    assert_eq!(outcome.reason, StopReason::GenerationLimit);
    assert_eq!(outcome.generations, 8);
    assert_eq!(solver.generation(), 8);
    assert_eq!(solver.state(), SolverState::Stopped);
}

#[test]
fn reaching_the_target_stops_early() {
    let mut solver = Solver::new(clustered_problem(), config()).expect("solver");
    let outcome = solver
        .solve(
            EndCondition::default()
                .with_max_generations(50)
                .with_target_fitness(1e12),
            |_| {},
        )
        .expect("solve");
    assert_eq!(outcome.reason, StopReason::TargetReached);
    assert_eq!(outcome.generations, 1);
}

#[test]
fn unreachable_target_falls_back_to_generation_cap() {
    let mut solver = Solver::new(clustered_problem(), config()).expect("solver");
    let outcome = solver
        .solve(
            EndCondition::default()
                .with_max_generations(3)
                .with_target_fitness(0.0),
            |_| {},
        )
        .expect("solve");
    assert_eq!(outcome.reason, StopReason::GenerationLimit);
}

#[test]
fn spawned_solve_can_be_cancelled_and_resumed() {
    let solver = Solver::new(clustered_problem(), config()).expect("solver");
    let (tx, rx) = mpsc::channel();
    let handle = solver.spawn(EndCondition::default(), move |info| {
        let _ = tx.send(info.generation);
    });

    for expected in 0..3 {
        assert_eq!(rx.recv().expect("generation report"), expected);
    }
    assert!(!handle.is_finished());
    handle.stop();
    let (mut solver, outcome) = handle.join().expect("join");
    assert_eq!(outcome.reason, StopReason::Cancelled);
    assert!(outcome.generations >= 3);
    assert!(outcome.best.genome().covers(solver.problem()));

    let resumed_from = solver.generation();
    let mut first = None;
    let outcome = solver
        .solve(
            EndCondition::default().with_max_generations(resumed_from + 2),
            |info| {
                first.get_or_insert(info.generation);
            },
        )
        .expect("resume");
    assert_eq!(first, Some(resumed_from));
    assert_eq!(outcome.reason, StopReason::GenerationLimit);
    assert_eq!(outcome.generations, resumed_from + 2);
}

#[test]
fn single_worker_matches_population_size() {
    let mut solver =
        Solver::new(clustered_problem(), config().with_num_workers(1).with_population_size(7))
            .expect("solver");
    solver
        .solve(EndCondition::default().with_max_generations(2), |_| {})
        .expect("solve");
    assert_eq!(solver.population().len(), 7);
}

#[test]
fn invalid_config_is_rejected() {
    let bad = [
        config().with_population_size(0),
        config().with_selection_size(0.0),
        config().with_selection_size(1.5),
        config().with_num_workers(0),
    ];
    for config in bad {
        let result = Solver::new(clustered_problem(), config);
        assert!(matches!(result, Err(Error::InvalidConfig { .. })));
    }
}
