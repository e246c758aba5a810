//! The turn transition.
//!
//! `advance_turn` is a pure fold: it never mutates its input snapshot,
//! and a given (snapshot, selections) pair always produces the same
//! output, including the carried RNG state. Replaying a saved game is
//! therefore just re-running the fold.

use crate::ai::{NationAction, NationAi, Strategist};
use crate::analysis::analyze;
use crate::bounded::new_percent;
use crate::config::SimConfig;
use crate::crisis::{promote_due, run_crisis_tick, Crisis, CrisisKind};
use crate::decisions::{generate_decisions, DecisionCategory};
use crate::events::{
    aggression_event, crisis_events, emergent_events, expiry_event, opportunity_events,
    prioritize, TurnEvent,
};
use crate::fixed::Fixed;
use crate::state::{Divergence, Ideology, WorldState};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("turn requires at least {required} selected decisions, got {selected}")]
    NotEnoughDecisions { selected: usize, required: usize },
}

/// Minimum number of decision slots that must be filled to end a turn.
pub const MIN_SELECTIONS: usize = 2;

/// The player's picks for this turn: one option id per category.
pub type SelectedOptions = BTreeMap<DecisionCategory, String>;

#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub state: WorldState,
    pub events: Vec<TurnEvent>,
}

/// Advance the world by one turn.
///
/// Phases, in order: resolve the player's selected decisions, let AI
/// nations act, advance the calendar, age and expire crises, promote
/// due potential crises, then assemble the event digest.
#[tracing::instrument(skip_all, fields(turn = state.turn))]
pub fn advance_turn(
    state: &WorldState,
    selected: &SelectedOptions,
    config: &SimConfig,
) -> Result<TurnOutcome, ActionError> {
    // 1. A turn needs real commitment from the player.
    if selected.len() < MIN_SELECTIONS {
        return Err(ActionError::NotEnoughDecisions {
            selected: selected.len(),
            required: MIN_SELECTIONS,
        });
    }

    let mut new = state.clone();
    let mut events: Vec<TurnEvent> = Vec::new();

    // 2. Resolve decisions against the set generated from the input
    //    snapshot, so selections made from stale ids resolve or warn
    //    deterministically.
    let analysis = analyze(state);
    let decisions = generate_decisions(state, &analysis);
    for (category, option_id) in selected {
        let Some(decision) = decisions.get(category) else {
            log::warn!("Selection for unknown decision category {category:?}");
            continue;
        };
        let Some(option) = decision.options.iter().find(|o| &o.id == option_id) else {
            log::warn!("Unknown option {option_id} in category {category:?}");
            continue;
        };

        log::info!("Turn {}: resolving {}", state.turn, option.id);
        for effect in &option.effects {
            effect.apply(&mut new);
            if let Some(delta) = effect.divergence() {
                if delta > Fixed::from_int(50) {
                    new.timeline.major_divergences.push(Divergence {
                        turn: state.turn,
                        title: option.title.clone(),
                        score: delta,
                    });
                }
            }
        }
    }

    // 3. AI nations act on the same snapshot the player saw.
    let strategist = Strategist::new();
    for nation in state.nations.keys() {
        for action in strategist.decide(nation, state) {
            match action {
                NationAction::AggressiveAction { target, intensity } => {
                    log::info!("{nation} moves against {target} (intensity {intensity})");
                    if let Some(fascism) = new.global.ideology.get_mut(&Ideology::Fascism) {
                        fascism.strength.add(Fixed::from_int(2));
                    }
                    new.crises.active.push(Crisis {
                        id: format!("{nation}_aggression_t{}", state.turn),
                        kind: CrisisKind::Military,
                        severity: new_percent(60),
                        escalation_rate: Fixed::from_int(5),
                        participants: vec![nation.clone(), target.clone()],
                        time_pressure: 5,
                        possible_outcomes: Vec::new(),
                    });
                    events.push(aggression_event(nation, &target));
                }
                NationAction::MilitaryPreparation { target, intensity } => {
                    log::debug!("{nation} prepares against {target} (intensity {intensity})");
                }
                NationAction::InternalAction { method } => {
                    log::debug!("{nation} stabilizes internally via {method:?}");
                }
            }
        }
    }

    // 4. Calendar.
    new.turn += 1;
    new.date = new.date.next_month();

    // 5. Crisis aging and expiry.
    for expired in run_crisis_tick(&mut new.crises) {
        events.push(expiry_event(&expired));
    }

    // 6. Stochastic promotion of potential crises. The RNG is reseeded
    //    from the carried state and the next state is written back, so
    //    the stream survives save/load.
    let mut rng = StdRng::seed_from_u64(new.rng_state);
    promote_due(&mut new.crises, new.date, &mut rng);
    new.rng_state = rng.gen();

    // 7. Event digest from the post-turn world.
    let post_analysis = analyze(&new);
    events.extend(crisis_events(&new));
    events.extend(opportunity_events(&new, &post_analysis));
    events.extend(emergent_events(&new));
    let events = prioritize(events, config.max_turn_events);

    if config.checksum_frequency > 0 && new.turn % config.checksum_frequency == 0 {
        log::debug!("Turn {} checksum: {:016x}", new.turn, new.checksum());
    }

    Ok(TurnOutcome { state: new, events })
}
