//! AI decision-making subsystem.
//!
//! Each non-player nation runs once per turn through a [`NationAi`]
//! implementation and produces zero or more [`NationAction`]s. The
//! built-in [`Strategist`] is a pure function of the snapshot and the
//! static personality table: no RNG, no hidden state, so a turn replays
//! identically from the same `WorldState`.

pub mod strategist;

pub use strategist::{
    Constraints, Opportunity, OpportunityKind, StrategicAssessment, Strategist, Threat,
    ThreatKind,
};

use crate::fixed::Fixed;
use crate::state::{NationId, WorldState};
use serde::{Deserialize, Serialize};

/// How a nation calms an internal crisis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StabilizationMethod {
    Purge,
    Reform,
}

/// An intended action for the current turn.
///
/// Emission order is fixed: threat response, then opportunity
/// exploitation, then internal crisis handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NationAction {
    /// Mobilize against the most severe military threat.
    MilitaryPreparation { target: NationId, intensity: Fixed },
    /// Pressure a weak neighbor. The only action with a direct effect on
    /// the world fold: it raises global fascism and spawns a crisis.
    AggressiveAction { target: NationId, intensity: Fixed },
    /// Stabilize at home, by purge or by reform.
    InternalAction { method: StabilizationMethod },
}

/// Decision seam for AI-controlled nations.
///
/// Implementations must be deterministic for a given snapshot: the turn
/// transition re-derives decisions rather than caching them.
pub trait NationAi {
    fn name(&self) -> &'static str;

    /// Choose this nation's actions for the turn. Returns an empty list
    /// to pass, including when `nation` is not in the snapshot.
    fn decide(&self, nation: &str, state: &WorldState) -> Vec<NationAction>;
}
