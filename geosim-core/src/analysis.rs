//! Derived world analysis.
//!
//! A pure projection from a `WorldState` snapshot to the aggregate view
//! that decision generation and the UI read: power balance, economic
//! trend, regional stability, crisis potential, and player influence.
//! Nothing here is stored; it is re-derived on demand and therefore
//! always consistent with the snapshot it was computed from.

use crate::fixed::Fixed;
use crate::state::{Ideology, NationId, WorldState};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerScore {
    pub economic: Fixed,
    pub military: Fixed,
    pub diplomatic: Fixed,
    pub technological: Fixed,
    pub internal: Fixed,
    pub total: Fixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EconomicTrend {
    Recovery,
    Stagnation,
    Depression,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalEconomy {
    pub total_gdp: Fixed,
    pub avg_growth: Fixed,
    pub trade_volume: Fixed,
    pub protectionism: Fixed,
    pub trend: EconomicTrend,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldAnalysis {
    pub power_balance: BTreeMap<NationId, PowerScore>,
    pub global_economy: GlobalEconomy,
    /// Current strength of each world ideology.
    pub ideology_balance: BTreeMap<Ideology, Fixed>,
    pub regional_stability: BTreeMap<String, Fixed>,
    pub crisis_potential: Fixed,
    pub player_influence: Fixed,
}

/// Project the full derived view from a snapshot.
pub fn analyze(state: &WorldState) -> WorldAnalysis {
    let mut power_balance = BTreeMap::new();
    for id in state
        .nations
        .keys()
        .cloned()
        .chain(std::iter::once(state.player.nation.clone()))
    {
        power_balance.insert(id.clone(), power_score(&id, state));
    }

    WorldAnalysis {
        power_balance,
        global_economy: global_economy(state),
        ideology_balance: state
            .global
            .ideology
            .iter()
            .map(|(ideology, s)| (*ideology, s.strength.get()))
            .collect(),
        regional_stability: regional_stability(state),
        crisis_potential: crisis_potential(state),
        player_influence: player_influence(state),
    }
}

fn power_score(id: &NationId, state: &WorldState) -> PowerScore {
    let Some(nation) = state.nation_record(id) else {
        // Unreachable for ids taken from the snapshot itself; scored as a
        // nonentity if callers probe an unknown id.
        return PowerScore {
            economic: Fixed::ZERO,
            military: Fixed::ZERO,
            diplomatic: Fixed::ZERO,
            technological: Fixed::ZERO,
            internal: Fixed::ZERO,
            total: Fixed::ZERO,
        };
    };

    let economic = nation
        .economy
        .gdp
        .div(Fixed::from_int(1000))
        .mul(Fixed::from_int(30));
    let military = nation.military.total_strength.get();
    let diplomatic = diplomatic_influence(id, state);
    let technological = nation.military.tech_level.get();
    let internal = nation.legitimacy.get();
    let total = (economic + military + diplomatic + technological + internal)
        .div(Fixed::from_int(5));

    PowerScore {
        economic,
        military,
        diplomatic,
        technological,
        internal,
        total,
    }
}

/// Diplomatic standing: 50 plus bonuses for every warm relationship
/// (value > 70: +5, trust > 70: +5, trade > 70: +3), capped at 100.
pub fn diplomatic_influence(nation: &str, state: &WorldState) -> Fixed {
    let mut influence = Fixed::from_int(50);
    for ((a, b), rel) in &state.relationships {
        if a != nation && b != nation {
            continue;
        }
        if rel.value.get() > Fixed::from_int(70) {
            influence += Fixed::from_int(5);
        }
        if rel.trust.get() > Fixed::from_int(70) {
            influence += Fixed::from_int(5);
        }
        if rel.trade.get() > Fixed::from_int(70) {
            influence += Fixed::from_int(3);
        }
    }
    influence.min(Fixed::HUNDRED)
}

fn global_economy(state: &WorldState) -> GlobalEconomy {
    let mut total_gdp = state.player.record.economy.gdp;
    let mut growth_sum = Fixed::ZERO;
    for nation in state.nations.values() {
        total_gdp += nation.economy.gdp;
        growth_sum += nation.economy.gdp_growth;
    }
    let avg_growth = if state.nations.is_empty() {
        Fixed::ZERO
    } else {
        growth_sum.div(Fixed::from_int(state.nations.len() as i64))
    };

    let trend = if avg_growth > Fixed::from_int(2) {
        EconomicTrend::Recovery
    } else if avg_growth > Fixed::from_int(-2) {
        EconomicTrend::Stagnation
    } else {
        EconomicTrend::Depression
    };

    GlobalEconomy {
        total_gdp,
        avg_growth,
        trade_volume: state.global.trade.total_volume,
        protectionism: state.global.trade.protectionism.get(),
        trend,
    }
}

fn regional_stability(state: &WorldState) -> BTreeMap<String, Fixed> {
    let regions: [(&str, &[&str]); 3] = [
        ("europe", &["germany", "france", "britain"]),
        ("asia", &["japan"]),
        ("americas", &["usa"]),
    ];

    let mut out = BTreeMap::new();
    for (region, members) in regions {
        let mut stability = Fixed::from_int(70);
        for member in members {
            let Some(nation) = state.nation_record(member) else {
                continue;
            };
            if nation.military.total_strength.get() > Fixed::from_int(70) {
                stability -= Fixed::from_int(10);
            }
            if nation.economy.gdp_growth < Fixed::from_int(-2) {
                stability -= Fixed::from_int(5);
            }
        }
        out.insert(
            region.to_string(),
            stability.clamp(Fixed::ZERO, Fixed::HUNDRED),
        );
    }
    out
}

/// Likelihood of new trouble: a floor of 30 pushed up by active crises,
/// trade protectionism, and the global strength of fascism; capped at 100.
pub fn crisis_potential(state: &WorldState) -> Fixed {
    let mut potential = Fixed::from_int(30);

    for crisis in &state.crises.active {
        potential += crisis.severity.get().mul(Fixed::from_raw(3_000));
    }

    if state.global.trade.protectionism.get() > Fixed::from_int(70) {
        potential += Fixed::from_int(10);
    }

    let fascism = state.global.ideology_strength(Ideology::Fascism);
    if fascism > Fixed::from_int(30) {
        potential += fascism.mul(Fixed::HALF);
    }

    potential.min(Fixed::HUNDRED)
}

/// How much weight the player carries abroad: economic size, military
/// strength, warm relationships, minus a penalty for drifting off the
/// historical timeline. Clamped to [0, 100].
pub fn player_influence(state: &WorldState) -> Fixed {
    let player = &state.player;
    let mut influence = Fixed::from_int(50);

    influence += player.record.economy.gdp.div(Fixed::from_int(50)) - Fixed::from_int(10);
    influence += (player.record.military.total_strength.get() - Fixed::from_int(50))
        .mul(Fixed::HALF);

    for ((a, b), rel) in &state.relationships {
        if (a == &player.nation || b == &player.nation)
            && rel.value.get() > Fixed::from_int(70)
        {
            influence += Fixed::from_int(2);
        }
    }

    influence -= state
        .timeline
        .divergence_score
        .get()
        .mul(Fixed::from_raw(2_000));

    influence.clamp(Fixed::ZERO, Fixed::HUNDRED)
}
