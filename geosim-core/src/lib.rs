//! # Geopolitical Simulation Core
//!
//! Deterministic turn-based world simulation set in the late 1930s.
//!
//! This crate implements the core loop: snapshot → decisions + AI
//! actions → new snapshot. It is designed for replay determinism: every
//! turn is a pure fold over the previous state, including the carried
//! RNG stream.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌───────────────────┐     ┌──────────────┐
//! │  Strategist  │────▶│ SelectedOptions + │────▶│ advance_turn │
//! │  (AI decide) │     │ NationActions     │     │  (pure fold) │
//! └──────────────┘     └───────────────────┘     └──────┬───────┘
//!                                                       │
//!                      ┌──────────────┐          ┌──────▼───────┐
//!                      │  Observers   │◀─────────│  WorldState  │
//!                      │  (side fx)   │          │ + TurnEvents │
//!                      └──────────────┘          └──────────────┘
//! ```
//!
//! ## Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`WorldState`] | Complete snapshot (player, nations, crises, globals) |
//! | [`advance_turn`] | Pure function: `(state, selections) -> state + events` |
//! | [`generate_decisions`] | Ephemeral per-turn decision set for the player |
//! | [`NationAi`] | Trait for AI nation decision making |
//! | [`SimObserver`] | Trait for observing post-turn snapshots |

pub mod ai;
pub mod analysis;
pub mod bounded;
pub mod config;
pub mod crisis;
pub mod decisions;
pub mod effect;
pub mod enrichment;
pub mod events;
pub mod fixed;
pub mod geography;
pub mod observer;
pub mod personality;
pub mod save;
pub mod scenario;
pub mod state;
pub mod step;
pub mod testing;


pub use ai::{NationAction, NationAi, StabilizationMethod, StrategicAssessment, Strategist};
pub use analysis::{analyze, WorldAnalysis};
pub use bounded::{new_divergence, new_percent, BoundedFixed, Percent};
pub use config::SimConfig;
pub use crisis::{Crises, Crisis, CrisisKind, CrisisTemplate};
pub use decisions::{generate_decisions, Decision, DecisionCategory, DecisionOption, DecisionSet};
pub use effect::Effect;
pub use events::{EventKind, TurnEvent};
pub use fixed::Fixed;
pub use observer::{EventLogObserver, ObserverRegistry, SimObserver, Snapshot};
pub use personality::Personality;
pub use save::{SaveError, SaveGame};
pub use scenario::{world_1936, ScenarioError};
pub use state::{Date, Nation, NationId, PlayerState, WorldState};
pub use step::{advance_turn, ActionError, SelectedOptions, TurnOutcome, MIN_SELECTIONS};
