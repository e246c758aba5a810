//! Observer pattern for turn-by-turn state inspection.
//!
//! Observers receive immutable snapshots after each advance; they can
//! never affect the simulation. Errors raised by an observer are logged
//! and do not block the turn loop.

use crate::events::TurnEvent;
use crate::state::WorldState;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Immutable post-turn snapshot, shared zero-copy between observers.
#[derive(Clone)]
pub struct Snapshot {
    pub state: Arc<WorldState>,
    pub turn: u32,
    /// State checksum for replay verification (0 if disabled).
    pub checksum: u64,
}

impl Snapshot {
    pub fn new(state: WorldState, checksum: u64) -> Self {
        let turn = state.turn;
        Self {
            state: Arc::new(state),
            turn,
            checksum,
        }
    }
}

#[derive(Debug, Error)]
pub enum ObserverError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub trait SimObserver: Send + Sync {
    /// Called after each turn with the new snapshot and its event digest.
    fn on_turn(&self, snapshot: &Snapshot, events: &[TurnEvent]) -> Result<(), ObserverError>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}

pub struct ObserverRegistry {
    observers: Vec<Box<dyn SimObserver>>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self { observers: vec![] }
    }

    pub fn register(&mut self, observer: Box<dyn SimObserver>) {
        log::info!("Registered observer: {}", observer.name());
        self.observers.push(observer);
    }

    /// Notify every observer; failures are logged, never propagated.
    pub fn notify(&self, snapshot: &Snapshot, events: &[TurnEvent]) {
        for observer in &self.observers {
            if let Err(e) = observer.on_turn(snapshot, events) {
                log::warn!("Observer '{}' error: {}", observer.name(), e);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl Default for ObserverRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared observers can be registered while the caller keeps a handle.
impl<T: SimObserver + ?Sized> SimObserver for Arc<T> {
    fn on_turn(&self, snapshot: &Snapshot, events: &[TurnEvent]) -> Result<(), ObserverError> {
        (**self).on_turn(snapshot, events)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Records every digest it sees, for replay inspection and tests.
#[derive(Default)]
pub struct EventLogObserver {
    log: Mutex<Vec<(u32, Vec<TurnEvent>)>>,
}

impl EventLogObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded (turn, events) pairs, in notification order.
    pub fn history(&self) -> Vec<(u32, Vec<TurnEvent>)> {
        match self.log.lock() {
            Ok(log) => log.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl SimObserver for EventLogObserver {
    fn on_turn(&self, snapshot: &Snapshot, events: &[TurnEvent]) -> Result<(), ObserverError> {
        if let Ok(mut log) = self.log.lock() {
            log.push((snapshot.turn, events.to_vec()));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "event_log"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use crate::fixed::Fixed;
    use crate::testing::WorldStateBuilder;

    #[test]
    fn test_event_log_records_turns() {
        let observer = EventLogObserver::new();
        let mut registry = ObserverRegistry::new();
        assert!(registry.is_empty());

        let state = WorldStateBuilder::new().build();
        let snapshot = Snapshot::new(state, 0);
        let events = vec![TurnEvent {
            kind: EventKind::Crisis,
            priority: Fixed::from_int(90),
            title: "rhineland crisis update".to_string(),
            description: String::new(),
        }];

        observer.on_turn(&snapshot, &events).unwrap();
        registry.register(Box::new(observer));
        assert_eq!(registry.len(), 1);

        // Registry notification is non-blocking even with no events.
        registry.notify(&snapshot, &[]);
    }

    #[test]
    fn test_history_preserves_order() {
        let observer = EventLogObserver::new();
        for turn in 1..=3u32 {
            let state = WorldStateBuilder::new().build();
            let mut state = state;
            state.turn = turn;
            observer.on_turn(&Snapshot::new(state, 0), &[]).unwrap();
        }
        let history = observer.history();
        let turns: Vec<u32> = history.iter().map(|(t, _)| *t).collect();
        assert_eq!(turns, [1, 2, 3]);
    }
}
