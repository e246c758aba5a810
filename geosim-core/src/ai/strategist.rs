//! Personality-driven nation strategist.
//!
//! Evaluates threats, opportunities, and constraints from the snapshot,
//! then applies three independent decision rules gated on the nation's
//! personality traits. Scores are heuristics tuned as game content, not
//! physical quantities.

use crate::ai::{NationAction, NationAi, StabilizationMethod};
use crate::fixed::Fixed;
use crate::geography;
use crate::personality::{self, Personality};
use crate::state::{Nation, NationId, WorldState};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreatKind {
    /// A hostile nation with clearly superior strength.
    Military { source: NationId },
    /// The nation's own economy is contracting.
    Economic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threat {
    pub kind: ThreatKind,
    pub severity: Fixed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpportunityKind {
    /// A weak neighbor that could be pressured.
    Expansion { target: NationId },
    /// A friendly nation worth courting.
    Alliance { target: NationId },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub kind: OpportunityKind,
    /// Success probability for expansion, mutual benefit for alliances;
    /// both on a 0-100 scale and compared directly when picking the best.
    pub score: Fixed,
}

/// Limits on what the nation can sustain this turn. Advisory: surfaced
/// for observers and tests, not consumed by the decision rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraints {
    pub low_treasury: bool,
    pub low_readiness: bool,
    pub unstable: bool,
    pub isolated: bool,
}

/// Full strategic picture for one nation, re-derived from the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategicAssessment {
    pub personality: Personality,
    pub threats: Vec<Threat>,
    pub opportunities: Vec<Opportunity>,
    pub constraints: Constraints,
}

/// Deterministic, personality-based AI.
#[derive(Debug, Default)]
pub struct Strategist;

impl Strategist {
    pub fn new() -> Self {
        Self
    }

    /// Assess the strategic situation of `nation`. Returns `None` when
    /// the nation is not part of the snapshot.
    pub fn assess(&self, nation: &str, state: &WorldState) -> Option<StrategicAssessment> {
        let me = state.nations.get(nation)?;
        let personality = personality::profile(nation);

        Some(StrategicAssessment {
            personality,
            threats: evaluate_threats(nation, me, state),
            opportunities: evaluate_opportunities(nation, me, &personality, state),
            constraints: evaluate_constraints(nation, me, state),
        })
    }
}

fn evaluate_threats(nation: &str, me: &Nation, state: &WorldState) -> Vec<Threat> {
    let mut threats = Vec::new();
    let my_strength = me.military.total_strength.get();
    // A nation with zero strength treats everyone armed as overwhelming.
    let denom = if my_strength == Fixed::ZERO {
        Fixed::ONE
    } else {
        my_strength
    };

    for (other_id, other) in &state.nations {
        if other_id == nation {
            continue;
        }
        let relationship = state.relation_value(nation, other_id);
        let balance = other.military.total_strength.get().div(denom);

        if relationship < Fixed::from_int(30) && balance > Fixed::from_raw(12_000) {
            threats.push(Threat {
                kind: ThreatKind::Military {
                    source: other_id.clone(),
                },
                severity: (Fixed::HUNDRED - relationship).mul(balance),
            });
        }
    }

    if me.economy.gdp_growth < Fixed::from_int(-2) {
        threats.push(Threat {
            kind: ThreatKind::Economic,
            severity: me.economy.gdp_growth.abs().mul(Fixed::from_int(10)),
        });
    }

    threats
}

fn evaluate_opportunities(
    nation: &str,
    me: &Nation,
    personality: &Personality,
    state: &WorldState,
) -> Vec<Opportunity> {
    let mut opportunities = Vec::new();
    let my_strength = me.military.total_strength.get();

    // Expansion: only aggressive nations scan for weak neighbors.
    if personality.aggression > Fixed::from_int(70) {
        for neighbor in geography::neighbors(nation) {
            let Some(target) = state.nations.get(*neighbor) else {
                continue;
            };
            let target_strength = target.military.total_strength.get();
            if target_strength < my_strength.mul(Fixed::HALF) {
                opportunities.push(Opportunity {
                    kind: OpportunityKind::Expansion {
                        target: (*neighbor).to_string(),
                    },
                    score: expansion_success(nation, neighbor, my_strength, target_strength, state),
                });
            }
        }
    }

    // Alliances: any nation (the player included) we already get on with.
    let candidates = state
        .nations
        .keys()
        .cloned()
        .chain(std::iter::once(state.player.nation.clone()));
    for candidate in candidates {
        if candidate == nation {
            continue;
        }
        let relationship = state.relation_value(nation, &candidate);
        if relationship <= Fixed::from_int(60) {
            continue;
        }
        let Some(ally) = state.nation_record(&candidate) else {
            continue;
        };
        let economy_score = (me.economy.gdp + ally.economy.gdp).div(Fixed::from_int(20));
        let mutual = (relationship + economy_score)
            .div(Fixed::from_int(2))
            .clamp(Fixed::ZERO, Fixed::HUNDRED);
        opportunities.push(Opportunity {
            kind: OpportunityKind::Alliance { target: candidate },
            score: mutual,
        });
    }

    opportunities
}

/// Chance of successfully pressuring `target`:
/// 50 + (strength ratio - 1) * 20 - (relationship - 50) * 0.5, in [5, 95].
fn expansion_success(
    nation: &str,
    target: &str,
    my_strength: Fixed,
    target_strength: Fixed,
    state: &WorldState,
) -> Fixed {
    let denom = if target_strength == Fixed::ZERO {
        Fixed::ONE
    } else {
        target_strength
    };
    let balance = my_strength.div(denom);
    let relationship = state.relation_value(nation, target);

    let score = Fixed::from_int(50) + (balance - Fixed::ONE).mul(Fixed::from_int(20))
        - (relationship - Fixed::from_int(50)).mul(Fixed::HALF);
    score.clamp(Fixed::from_int(5), Fixed::from_int(95))
}

fn evaluate_constraints(nation: &str, me: &Nation, state: &WorldState) -> Constraints {
    Constraints {
        low_treasury: me.economy.treasury < Fixed::from_int(20),
        low_readiness: me.military.readiness.get() < Fixed::from_int(40),
        unstable: me.internal_stability.get() < Fixed::from_int(60),
        isolated: state.hostile_relation_count(nation) > 2,
    }
}

impl NationAi for Strategist {
    fn name(&self) -> &'static str {
        "Strategist"
    }

    fn decide(&self, nation: &str, state: &WorldState) -> Vec<NationAction> {
        let Some(assessment) = self.assess(nation, state) else {
            return Vec::new();
        };
        let Some(me) = state.nations.get(nation) else {
            return Vec::new();
        };
        let personality = &assessment.personality;
        let mut actions = Vec::new();

        // 1. Threat response. Only military threats have a mobilization
        // target; ties keep the earliest entry.
        if !assessment.threats.is_empty() && personality.rationality > Fixed::from_int(60) {
            let mut most_severe: Option<&Threat> = None;
            for threat in &assessment.threats {
                if most_severe.map_or(true, |best| threat.severity > best.severity) {
                    most_severe = Some(threat);
                }
            }
            if let Some(Threat {
                kind: ThreatKind::Military { source },
                severity,
            }) = most_severe
            {
                actions.push(NationAction::MilitaryPreparation {
                    target: source.clone(),
                    intensity: (*severity).min(Fixed::HUNDRED),
                });
            }
        }

        // 2. Opportunity exploitation: only confident expansions turn
        // into open aggression.
        if !assessment.opportunities.is_empty() && personality.opportunism > Fixed::from_int(70) {
            let mut best: Option<&Opportunity> = None;
            for opportunity in &assessment.opportunities {
                if best.map_or(true, |b| opportunity.score > b.score) {
                    best = Some(opportunity);
                }
            }
            if let Some(Opportunity {
                kind: OpportunityKind::Expansion { target },
                score,
            }) = best
            {
                if *score > Fixed::from_int(70) {
                    actions.push(NationAction::AggressiveAction {
                        target: target.clone(),
                        intensity: personality.aggression,
                    });
                }
            }
        }

        // 3. Internal crisis handling.
        if me.internal_stability.get() < Fixed::from_int(50) {
            let method = if personality.ideology > Fixed::from_int(70) {
                StabilizationMethod::Purge
            } else {
                StabilizationMethod::Reform
            };
            actions.push(NationAction::InternalAction { method });
        }

        actions
    }
}
