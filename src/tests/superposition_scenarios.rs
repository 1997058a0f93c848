use crate::archive::BoundedArchive;
use crate::config::{EngineConfig, GeneticConfig, SuperpositionConfig, SwarmConfig};
use crate::error::ConfigurationError;
use crate::events::{EngineId, EngineStatus, SuperpositionEvent};
use crate::evaluator::MultiThreadedEvaluator;
use crate::optimizers::generational::GenerationalEngine;
use crate::optimizers::variation::genetic::GeneticVariation;
use crate::optimizers::variation::swarm::SwarmVariation;
use crate::problem::zdt1::Zdt1;
use crate::problem::Problem;
use crate::solution::dominates;
use crate::superposition::SuperpositionCombinator;
use super::{init_logging, solutions, sorted_objectives, Ending, ScriptedOptimizer};

fn scripted(name: &str, points: &[&[f64]], ending: Ending) -> Box<ScriptedOptimizer> {
    Box::new(ScriptedOptimizer::new(name, vec![solutions(points)], ending))
}

#[test]
fn final_snapshots_of_both_engines_are_merged() {
    init_logging();

    let engine_a = scripted("a", &[&[1.0, 5.0], &[3.0, 2.0]], Ending::Terminal);
    let engine_b = scripted("b", &[&[2.0, 3.0], &[5.0, 1.0], &[4.0, 4.0]], Ending::Terminal);
    let combinator = SuperpositionCombinator::new(engine_a, engine_b, SuperpositionConfig::default()).unwrap();

    let outcome = combinator.run();

    assert!(!outcome.partial);
    assert_eq!(outcome.status(EngineId::A), &EngineStatus::Terminal);
    assert_eq!(outcome.status(EngineId::B), &EngineStatus::Terminal);
    assert_eq!(
        sorted_objectives(&outcome.solutions),
        vec![vec![1.0, 5.0], vec![2.0, 3.0], vec![3.0, 2.0], vec![5.0, 1.0]]
    );
}

#[test]
fn merge_does_not_depend_on_snapshot_order_or_repetition() {
    let a = solutions(&[&[1.0, 5.0], &[3.0, 2.0]]);
    let b = solutions(&[&[2.0, 3.0], &[5.0, 1.0], &[4.0, 4.0]]);

    let mut forward = BoundedArchive::new(10).unwrap();
    forward.extend(a.clone());
    forward.extend(b.clone());

    let mut backward = BoundedArchive::new(10).unwrap();
    backward.extend(b.clone());
    backward.extend(a.clone());
    backward.extend(a);
    backward.extend(b);

    assert_eq!(sorted_objectives(forward.solutions()), sorted_objectives(backward.solutions()));
}

#[test]
fn completion_fires_once_after_both_terminal_events() {
    init_logging();

    let engine_a = Box::new(ScriptedOptimizer::new(
        "a",
        vec![solutions(&[&[1.0, 5.0]]), solutions(&[&[1.0, 4.0], &[4.0, 1.0]])],
        Ending::Terminal,
    ));
    let engine_b = scripted("b", &[&[2.0, 2.0]], Ending::Terminal);
    let mut combinator = SuperpositionCombinator::new(engine_a, engine_b, SuperpositionConfig::default()).unwrap();
    let events = combinator.subscribe();

    let outcome = combinator.run();
    let events: Vec<SuperpositionEvent> = events.iter().collect();

    let done: Vec<usize> = events
        .iter()
        .enumerate()
        .filter(|(_, event)| matches!(event, SuperpositionEvent::SuperpositionDone { .. }))
        .map(|(index, _)| index)
        .collect();
    assert_eq!(done, vec![events.len() - 1]);

    let terminals: Vec<EngineId> = events
        .iter()
        .filter_map(|event| match event {
            SuperpositionEvent::EngineTerminal { engine } => Some(*engine),
            _ => None,
        })
        .collect();
    assert_eq!(terminals.len(), 2);
    assert!(terminals.contains(&EngineId::A) && terminals.contains(&EngineId::B));

    let generations_of_a: Vec<usize> = events
        .iter()
        .filter_map(|event| match event {
            SuperpositionEvent::GenerationCompleted { engine: EngineId::A, generation } => Some(*generation),
            _ => None,
        })
        .collect();
    assert_eq!(generations_of_a, vec![1, 2]);

    match events.last() {
        Some(SuperpositionEvent::SuperpositionDone { result, partial }) => {
            assert!(!partial);
            assert_eq!(sorted_objectives(result), sorted_objectives(&outcome.solutions));
        }
        other => panic!("unexpected last event {:?}", other),
    }
}

#[test]
fn panicking_engine_yields_partial_result() {
    init_logging();

    let engine_a = scripted("healthy", &[&[1.0, 5.0], &[5.0, 1.0]], Ending::Terminal);
    let engine_b = scripted("doomed", &[&[3.0, 3.0]], Ending::Panic);
    let mut combinator = SuperpositionCombinator::new(engine_a, engine_b, SuperpositionConfig::default()).unwrap();
    let events = combinator.subscribe();

    let outcome = combinator.run();

    assert!(outcome.partial);
    assert_eq!(outcome.status(EngineId::A), &EngineStatus::Terminal);
    match outcome.status(EngineId::B) {
        EngineStatus::Failed(reason) => assert!(reason.contains("doomed blew up"), "{}", reason),
        other => panic!("unexpected status {:?}", other),
    }
    // The snapshot published before the panic was merged.
    assert_eq!(
        sorted_objectives(&outcome.solutions),
        vec![vec![1.0, 5.0], vec![3.0, 3.0], vec![5.0, 1.0]]
    );

    let events: Vec<SuperpositionEvent> = events.iter().collect();
    assert!(events.iter().any(|e| matches!(e, SuperpositionEvent::EngineFailed { engine: EngineId::B, .. })));
    assert!(matches!(events.last(), Some(SuperpositionEvent::SuperpositionDone { partial: true, .. })));
}

#[test]
fn engine_error_is_reported_as_failure() {
    init_logging();

    let engine_a = scripted("stuck", &[&[2.0, 2.0]], Ending::Error);
    let engine_b = scripted("fine", &[&[1.0, 3.0]], Ending::Terminal);
    let combinator = SuperpositionCombinator::new(engine_a, engine_b, SuperpositionConfig::default()).unwrap();

    let outcome = combinator.run();

    assert!(outcome.partial);
    assert!(matches!(outcome.status(EngineId::A), EngineStatus::Failed(reason) if reason.contains("no offspring")));
    assert_eq!(outcome.status(EngineId::B), &EngineStatus::Terminal);
    assert_eq!(outcome.solutions.len(), 2);
}

#[test]
fn zero_archive_capacity_refuses_to_start() {
    let engine_a = scripted("a", &[&[1.0, 1.0]], Ending::Terminal);
    let engine_b = scripted("b", &[&[1.0, 1.0]], Ending::Terminal);

    let result = SuperpositionCombinator::new(
        engine_a,
        engine_b,
        SuperpositionConfig::default().with_archive_capacity(0),
    );

    assert!(matches!(result, Err(ConfigurationError::ZeroCapacity { .. })));
}

#[test]
fn genetic_and_swarm_engines_superpose_on_zdt1() {
    init_logging();

    let problem: Box<dyn Problem> = Box::new(Zdt1::new(8));
    let config = EngineConfig::from_json(
        r#"{ "population_size": 20, "max_evaluations": null, "max_generations": 25, "seed": 17 }"#
    ).unwrap();

    let genetic = GenerationalEngine::new(
        problem.clone(),
        Box::new(GeneticVariation::new(GeneticConfig::default()).unwrap()),
        config.clone(),
    )
    .unwrap()
    .with_name("genetic")
    .with_evaluator(Box::new(MultiThreadedEvaluator::new(2)));

    let swarm = GenerationalEngine::new(
        problem,
        Box::new(SwarmVariation::new(SwarmConfig::default().with_leader_capacity(20)).unwrap()),
        config.with_seed(18),
    )
    .unwrap()
    .with_name("swarm");

    let mut combinator = SuperpositionCombinator::new(
        Box::new(genetic),
        Box::new(swarm),
        SuperpositionConfig::default().with_archive_capacity(30),
    )
    .unwrap();
    let events = combinator.subscribe();

    let outcome = combinator.spawn().unwrap().join().unwrap();

    assert!(!outcome.partial);
    assert!(!outcome.solutions.is_empty() && outcome.solutions.len() <= 30);
    for a in &outcome.solutions {
        for b in &outcome.solutions {
            assert!(!dominates(a, b));
        }
        assert!(a.variables.iter().all(|&x| (0.0..=1.0).contains(&x)));
    }

    let events: Vec<SuperpositionEvent> = events.try_iter().collect();
    for id in EngineId::ALL {
        let completed = events
            .iter()
            .filter(|event| matches!(event, SuperpositionEvent::GenerationCompleted { engine, .. } if *engine == id))
            .count();
        assert_eq!(completed, 25, "{}", id);
    }
}
