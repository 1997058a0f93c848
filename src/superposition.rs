use std::any::Any;
use std::thread::JoinHandle;
use crossbeam::channel::{unbounded, Receiver, Select, Sender};
use crate::archive::BoundedArchive;
use crate::config::SuperpositionConfig;
use crate::error::{ConfigurationError, EvaluationFailure};
use crate::events::{EngineId, EngineStatus, SuperpositionEvent};
use crate::optimizers::{GenerationObserver, Optimizer};
use crate::solution::Solution;

/// Immutable copy of an engine population, taken at a generation boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub engine: EngineId,
    pub generation: usize,
    pub solutions: Vec<Solution>,
}

#[derive(Debug)]
enum EngineMessage {
    Generation(Snapshot),
    EvaluationFailed {
        generation: usize,
        failures: Vec<EvaluationFailure>,
    },
    Terminal(Snapshot),
    Failed(String),
}

/// Observer installed on an engine thread; copies every published
/// population into a [`Snapshot`] and sends it to the combinator.
struct SnapshotPublisher {
    engine: EngineId,
    sender: Sender<EngineMessage>,
    /// Generation of the most recent snapshot sent.
    generation: usize,
    terminal_sent: bool,
}

impl SnapshotPublisher {
    fn new(engine: EngineId, sender: Sender<EngineMessage>) -> Self {
        SnapshotPublisher { engine, sender, generation: 0, terminal_sent: false }
    }
}

impl SnapshotPublisher {
    fn publish(&self, message: EngineMessage) {
        if self.sender.send(message).is_err() {
            log::debug!("{}: combinator is gone, dropping message", self.engine);
        }
    }

    fn snapshot(&self, generation: usize, population: &[Solution]) -> Snapshot {
        Snapshot {
            engine: self.engine,
            generation,
            solutions: population.to_vec(),
        }
    }
}

impl GenerationObserver for SnapshotPublisher {
    fn generation_completed(&mut self, generation: usize, population: &[Solution]) {
        self.generation = generation;
        self.publish(EngineMessage::Generation(self.snapshot(generation, population)));
    }

    fn evaluation_failed(&mut self, generation: usize, failures: &[EvaluationFailure]) {
        self.publish(EngineMessage::EvaluationFailed {
            generation,
            failures: failures.to_vec(),
        });
    }

    fn terminated(&mut self, generation: usize, population: &[Solution]) {
        if self.terminal_sent {
            return;
        }

        self.terminal_sent = true;
        self.publish(EngineMessage::Terminal(self.snapshot(generation, population)));
    }
}

fn run_engine(mut optimizer: Box<dyn Optimizer>, engine: EngineId, sender: Sender<EngineMessage>) {
    let mut publisher = SnapshotPublisher::new(engine, sender);

    match optimizer.optimize(&mut publisher) {
        Ok(()) => {
            // Optimizers that never call `terminated` still hand over their result.
            if !publisher.terminal_sent {
                let best = optimizer.best_solutions();
                let generation = publisher.generation;
                publisher.terminated(generation, &best);
            }
        }
        Err(error) => {
            log::error!("{} ({}) stopped: {}", engine, optimizer.name(), error);
            publisher.publish(EngineMessage::Failed(error.to_string()));
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Final state of a superposition run: the frozen combined archive.
#[derive(Debug, Clone)]
pub struct SuperpositionOutcome {
    pub solutions: Vec<Solution>,
    /// Set when at least one engine failed; `solutions` then holds whatever
    /// was merged before the failure.
    pub partial: bool,
    pub statuses: [EngineStatus; 2],
}

impl SuperpositionOutcome {
    pub fn status(&self, engine: EngineId) -> &EngineStatus {
        &self.statuses[engine.index()]
    }
}

/// Runs two optimizers concurrently and merges their snapshots into one
/// bounded non-dominated archive.
///
/// Each engine runs on its own thread and talks to the combinator over its
/// own channel only. The combinator is the single owner of the combined
/// archive; it merges snapshots in arrival order, which is the generation
/// order per engine and arbitrary between engines.
pub struct SuperpositionCombinator {
    engines: [Box<dyn Optimizer>; 2],
    archive: BoundedArchive,
    listeners: Vec<Sender<SuperpositionEvent>>,
}

impl SuperpositionCombinator {
    pub fn new(
        engine_a: Box<dyn Optimizer>,
        engine_b: Box<dyn Optimizer>,
        config: SuperpositionConfig,
    ) -> Result<Self, ConfigurationError> {
        config.validate()?;

        Ok(SuperpositionCombinator {
            engines: [engine_a, engine_b],
            archive: BoundedArchive::new(config.archive_capacity)?,
            listeners: vec![],
        })
    }

    /// Registers a listener. Must be called before `run`/`spawn`.
    pub fn subscribe(&mut self) -> Receiver<SuperpositionEvent> {
        let (sender, receiver) = unbounded();
        self.listeners.push(sender);
        receiver
    }

    /// Runs on its own thread; join the handle for the outcome.
    pub fn spawn(self) -> std::io::Result<JoinHandle<SuperpositionOutcome>> {
        std::thread::Builder::new()
            .name("superposition".to_string())
            .spawn(move || self.run())
    }

    /// Runs both engines to completion, blocking the calling thread.
    pub fn run(self) -> SuperpositionOutcome {
        let SuperpositionCombinator { engines, archive, listeners } = self;
        let mut state = CombinatorState {
            archive,
            listeners,
            statuses: [EngineStatus::Running, EngineStatus::Running],
        };

        let mut receivers = Vec::with_capacity(2);
        let mut handles: Vec<Option<JoinHandle<()>>> = Vec::with_capacity(2);

        for (engine, optimizer) in EngineId::ALL.into_iter().zip(engines) {
            let (sender, receiver) = unbounded();
            receivers.push(receiver);

            log::info!("Starting {} ({})", engine, optimizer.name());

            let spawned = std::thread::Builder::new()
                .name(format!("superposition-{}", engine).replace(' ', "-"))
                .spawn(move || run_engine(optimizer, engine, sender));

            match spawned {
                Ok(handle) => handles.push(Some(handle)),
                Err(error) => {
                    handles.push(None);
                    state.fail(engine, format!("could not start thread: {}", error));
                }
            }
        }

        while state.statuses.iter().any(|status| !status.is_settled()) {
            let mut select = Select::new();
            let mut waiting = Vec::with_capacity(2);
            for engine in EngineId::ALL {
                if !state.statuses[engine.index()].is_settled() {
                    select.recv(&receivers[engine.index()]);
                    waiting.push(engine);
                }
            }

            let operation = select.select();
            let engine = waiting[operation.index()];

            match operation.recv(&receivers[engine.index()]) {
                Ok(message) => state.handle(engine, message),
                Err(_) => {
                    let reason = match handles[engine.index()].take().map(JoinHandle::join) {
                        Some(Err(panic)) => format!("panicked: {}", panic_message(&*panic)),
                        _ => "stopped without reaching a terminal state".to_string(),
                    };
                    state.fail(engine, reason);
                }
            }
        }

        for (engine, handle) in EngineId::ALL.into_iter().zip(handles) {
            if let Some(Err(panic)) = handle.map(JoinHandle::join) {
                log::error!("{} panicked after settling: {}", engine, panic_message(&*panic));
            }
        }

        state.finish()
    }
}

struct CombinatorState {
    archive: BoundedArchive,
    listeners: Vec<Sender<SuperpositionEvent>>,
    statuses: [EngineStatus; 2],
}

impl CombinatorState {
    fn emit(&mut self, event: SuperpositionEvent) {
        // Listeners that hung up are dropped.
        self.listeners.retain(|listener| listener.send(event.clone()).is_ok());
    }

    fn merge(&mut self, snapshot: Snapshot) -> usize {
        let offered = snapshot.solutions.len();
        let kept = self.archive.extend(snapshot.solutions);

        log::debug!(
            "Merged {} generation {}: kept {} of {}, archive holds {}",
            snapshot.engine, snapshot.generation, kept, offered, self.archive.len()
        );

        kept
    }

    fn handle(&mut self, engine: EngineId, message: EngineMessage) {
        match message {
            EngineMessage::Generation(snapshot) => {
                let generation = snapshot.generation;
                self.merge(snapshot);
                self.emit(SuperpositionEvent::GenerationCompleted { engine, generation });
            }
            EngineMessage::EvaluationFailed { generation, failures } => {
                self.emit(SuperpositionEvent::EvaluationFailed { engine, generation, failures });
            }
            EngineMessage::Terminal(snapshot) => {
                self.merge(snapshot);
                self.statuses[engine.index()] = EngineStatus::Terminal;
                log::info!("{} is terminal", engine);
                self.emit(SuperpositionEvent::EngineTerminal { engine });
            }
            EngineMessage::Failed(reason) => self.fail(engine, reason),
        }
    }

    fn fail(&mut self, engine: EngineId, reason: String) {
        log::error!("{} failed: {}", engine, reason);
        self.statuses[engine.index()] = EngineStatus::Failed(reason.clone());
        self.emit(SuperpositionEvent::EngineFailed { engine, reason });
    }

    fn finish(mut self) -> SuperpositionOutcome {
        let partial = self
            .statuses
            .iter()
            .any(|status| matches!(status, EngineStatus::Failed(_)));
        let solutions = self.archive.solutions().to_vec();

        log::info!("Superposition done with {} solutions (partial: {})", solutions.len(), partial);

        self.emit(SuperpositionEvent::SuperpositionDone {
            result: solutions.clone(),
            partial,
        });

        SuperpositionOutcome {
            solutions,
            partial,
            statuses: self.statuses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{solutions, sorted_objectives, Ending, ScriptedOptimizer};

    #[test]
    fn publisher_copies_population_and_sends_terminal_once() {
        let (sender, receiver) = unbounded();
        let mut publisher = SnapshotPublisher::new(EngineId::B, sender);
        let population = vec![Solution::with_objectives(vec![0.5], vec![1.0, 2.0])];

        publisher.generation_completed(1, &population);
        publisher.terminated(1, &population);
        publisher.terminated(1, &population);
        drop(publisher);

        let messages: Vec<EngineMessage> = receiver.iter().collect();
        assert_eq!(messages.len(), 2);
        match &messages[0] {
            EngineMessage::Generation(snapshot) => {
                assert_eq!(snapshot.engine, EngineId::B);
                assert_eq!(snapshot.solutions, population);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(&messages[1], EngineMessage::Terminal(s) if s.generation == 1));
    }

    #[test]
    fn implicit_terminal_carries_last_published_generation() {
        let optimizer = ScriptedOptimizer::new(
            "quiet",
            vec![
                solutions(&[&[2.0, 2.0]]),
                solutions(&[&[1.0, 3.0], &[3.0, 1.0]]),
                solutions(&[&[1.0, 2.0], &[2.0, 1.0]]),
            ],
            Ending::Silent,
        );
        let (sender, receiver) = unbounded();

        run_engine(Box::new(optimizer), EngineId::A, sender);

        let messages: Vec<EngineMessage> = receiver.iter().collect();
        assert_eq!(messages.len(), 4);
        match &messages[3] {
            EngineMessage::Terminal(snapshot) => {
                assert_eq!(snapshot.generation, 3);
                assert_eq!(sorted_objectives(&snapshot.solutions), vec![vec![1.0, 2.0], vec![2.0, 1.0]]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn panic_payloads_are_readable() {
        let text: Box<dyn Any + Send> = Box::new("boom");
        let owned: Box<dyn Any + Send> = Box::new(String::from("bang"));
        let other: Box<dyn Any + Send> = Box::new(7u8);

        assert_eq!(panic_message(&*text), "boom");
        assert_eq!(panic_message(&*owned), "bang");
        assert_eq!(panic_message(&*other), "unknown panic");
    }
}
