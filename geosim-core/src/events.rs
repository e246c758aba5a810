//! Turn-event summaries.
//!
//! Each advance produces a short, prioritized digest of what happened:
//! crisis updates, openings worth attention, emergent patterns, and AI
//! moves. Events are presentation data; they carry no gameplay state.

use crate::analysis::{EconomicTrend, WorldAnalysis};
use crate::crisis::Crisis;
use crate::fixed::Fixed;
use crate::state::{Ideology, Trend, WorldState};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Crisis,
    Opportunity,
    Emergent,
    AiAction,
    CrisisExpired,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnEvent {
    pub kind: EventKind,
    pub priority: Fixed,
    pub title: String,
    pub description: String,
}

/// One update per active crisis, weighted by its severity.
pub fn crisis_events(state: &WorldState) -> Vec<TurnEvent> {
    state
        .crises
        .active
        .iter()
        .map(|crisis| TurnEvent {
            kind: EventKind::Crisis,
            priority: crisis.severity.get(),
            title: format!("{} crisis update", crisis.id),
            description: format!(
                "Crisis severity: {}. Time remaining: {} turns.",
                crisis.severity.get(),
                crisis.time_pressure
            ),
        })
        .collect()
}

/// Favorable openings: a recovering world economy, and allies whose
/// warmth and trust invite deeper cooperation.
pub fn opportunity_events(state: &WorldState, analysis: &WorldAnalysis) -> Vec<TurnEvent> {
    let mut events = Vec::new();

    if analysis.global_economy.trend == EconomicTrend::Recovery {
        events.push(TurnEvent {
            kind: EventKind::Opportunity,
            priority: Fixed::from_int(60),
            title: "Global economic recovery".to_string(),
            description: "Improving global economy creates openings for leadership".to_string(),
        });
    }

    let player = &state.player.nation;
    for ((a, b), rel) in &state.relationships {
        let other = if a == player {
            b
        } else if b == player {
            a
        } else {
            continue;
        };
        if rel.value.get() > Fixed::from_int(70) && rel.trust.get() > Fixed::from_int(60) {
            events.push(TurnEvent {
                kind: EventKind::Opportunity,
                priority: Fixed::from_int(50),
                title: format!("Strengthen alliance with {other}"),
                description: "High trust creates opportunity for deeper cooperation".to_string(),
            });
        }
    }

    events
}

/// Patterns that cut across single nations.
pub fn emergent_events(state: &WorldState) -> Vec<TurnEvent> {
    let mut events = Vec::new();

    if let Some(fascism) = state.global.ideology.get(&Ideology::Fascism) {
        if fascism.strength.get() > Fixed::from_int(35) && fascism.trend == Trend::Rising {
            events.push(TurnEvent {
                kind: EventKind::Emergent,
                priority: Fixed::from_int(70),
                title: "Rising fascist tide".to_string(),
                description: "Fascist ideology spreading rapidly across multiple nations"
                    .to_string(),
            });
        }
    }

    events
}

/// Report of an AI nation moving against a neighbor.
pub fn aggression_event(nation: &str, target: &str) -> TurnEvent {
    TurnEvent {
        kind: EventKind::AiAction,
        priority: Fixed::from_int(80),
        title: format!("{nation} takes aggressive action"),
        description: format!("{nation} applies military pressure against {target}"),
    }
}

/// Report of a crisis leaving the board.
pub fn expiry_event(crisis: &Crisis) -> TurnEvent {
    TurnEvent {
        kind: EventKind::CrisisExpired,
        priority: crisis.severity.get(),
        title: format!("{} crisis concluded", crisis.id),
        description: format!(
            "The {} crisis has run its course at severity {}.",
            crisis.id,
            crisis.severity.get()
        ),
    }
}

/// Sort by priority descending and keep the top `max`. The sort is
/// stable, so ties keep their generation order.
pub fn prioritize(mut events: Vec<TurnEvent>, max: usize) -> Vec<TurnEvent> {
    events.sort_by_key(|e| std::cmp::Reverse(e.priority.raw()));
    events.truncate(max);
    events
}
