//! Typed decision effects.
//!
//! Every effect a decision option can carry is a variant, so application
//! is total and enumerable: there is no stringly-keyed field lookup that
//! could silently miss.

use crate::fixed::Fixed;
use crate::state::{NationId, WorldState};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    AdjustGdp(Fixed),
    AdjustUnemployment(Fixed),
    AdjustTreasury(Fixed),
    AdjustDebt(Fixed),
    AdjustMilitaryStrength(Fixed),
    AdjustReadiness(Fixed),
    AdjustPublicSupport(Fixed),
    AdjustCongressSupport(Fixed),
    AdjustLegitimacy(Fixed),
    /// Shift the timeline divergence score. Divergences above 50 are
    /// additionally recorded on the timeline by the turn transition.
    AdjustDivergence(Fixed),
    /// Shift the global trade protectionism indicator.
    AdjustProtectionism(Fixed),
    /// Shift the player's relationship value with a nation.
    AdjustRelationship { nation: NationId, delta: Fixed },
    /// Shift the strength of one of the player's domestic factions.
    /// Unknown faction names are a scenario bug and are logged.
    AdjustFactionStrength { faction: String, delta: Fixed },
}

impl Effect {
    /// Apply this effect to the world. Targets the player nation except
    /// for the global-system and relationship variants.
    pub fn apply(&self, state: &mut WorldState) {
        match self {
            Effect::AdjustGdp(delta) => state.player.record.economy.gdp += *delta,
            Effect::AdjustUnemployment(delta) => {
                state.player.record.economy.unemployment.add(*delta);
            }
            Effect::AdjustTreasury(delta) => state.player.record.economy.treasury += *delta,
            Effect::AdjustDebt(delta) => state.player.record.economy.debt += *delta,
            Effect::AdjustMilitaryStrength(delta) => {
                state.player.record.military.total_strength.add(*delta);
            }
            Effect::AdjustReadiness(delta) => {
                state.player.record.military.readiness.add(*delta);
            }
            Effect::AdjustPublicSupport(delta) => {
                state.player.politics.public_support.add(*delta);
            }
            Effect::AdjustCongressSupport(delta) => {
                state.player.politics.congress_support.add(*delta);
            }
            Effect::AdjustLegitimacy(delta) => state.player.record.legitimacy.add(*delta),
            Effect::AdjustDivergence(delta) => {
                state.timeline.divergence_score.add(*delta);
            }
            Effect::AdjustProtectionism(delta) => {
                state.global.trade.protectionism.add(*delta);
            }
            Effect::AdjustRelationship { nation, delta } => {
                let player = state.player.nation.clone();
                state.relation_mut(&player, nation).value.add(*delta);
            }
            Effect::AdjustFactionStrength { faction, delta } => {
                match state.player.politics.factions.get_mut(faction) {
                    Some(f) => f.strength.add(*delta),
                    None => log::warn!("Effect targets unknown faction {faction}"),
                }
            }
        }
    }

    /// Divergence delta carried by this effect, if any.
    pub fn divergence(&self) -> Option<Fixed> {
        match self {
            Effect::AdjustDivergence(delta) => Some(*delta),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounded::new_percent;
    use crate::state::Faction;

    #[test]
    fn test_player_field_effects() {
        let mut state = WorldState::default();
        let gdp = state.player.record.economy.gdp;

        Effect::AdjustGdp(Fixed::from_int(20)).apply(&mut state);
        assert_eq!(state.player.record.economy.gdp, gdp + Fixed::from_int(20));

        Effect::AdjustUnemployment(Fixed::from_int(-8)).apply(&mut state);
        assert_eq!(
            state.player.record.economy.unemployment.get(),
            Fixed::ZERO // default 5 minus 8, clamped at 0
        );
    }

    #[test]
    fn test_relationship_effect_creates_record() {
        let mut state = WorldState::default();
        Effect::AdjustRelationship {
            nation: "britain".to_string(),
            delta: Fixed::from_int(15),
        }
        .apply(&mut state);

        assert_eq!(state.relation_value("usa", "britain"), Fixed::from_int(65));
    }

    #[test]
    fn test_unknown_faction_is_ignored() {
        let mut state = WorldState::default();
        state.player.politics.factions.insert(
            "isolationists".to_string(),
            Faction {
                strength: new_percent(75),
                leader: String::new(),
                mood: String::new(),
                goals: vec![],
            },
        );

        // No panic, no change elsewhere.
        Effect::AdjustFactionStrength {
            faction: "monarchists".to_string(),
            delta: Fixed::from_int(10),
        }
        .apply(&mut state);

        Effect::AdjustFactionStrength {
            faction: "isolationists".to_string(),
            delta: Fixed::from_int(-50),
        }
        .apply(&mut state);
        assert_eq!(
            state.player.politics.factions["isolationists"].strength.get(),
            Fixed::from_int(25)
        );
    }
}
