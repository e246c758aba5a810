//! Scenario construction: the built-in January 1936 start and loading
//! of external scenarios from JSON.

use crate::bounded::new_percent;
use crate::crisis::{Crisis, CrisisKind, CrisisOutcome, CrisisTemplate};
use crate::fixed::Fixed;
use crate::personality;
use crate::state::{
    Date, Faction, Ideology, IdeologyState, MilitaryBranch, Nation, Relationship, Trend,
    WorldState,
};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse scenario: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Deserialize a scenario from JSON, logging any nations that will run
/// on the default AI personality.
pub fn from_json(json: &str) -> Result<WorldState, ScenarioError> {
    let state: WorldState = serde_json::from_str(json)?;
    warn_defaulted_personalities(&state);
    Ok(state)
}

/// Load a scenario from a JSON file on disk.
pub fn load_file(path: &Path) -> Result<WorldState, ScenarioError> {
    let json = std::fs::read_to_string(path)?;
    from_json(&json)
}

fn warn_defaulted_personalities(state: &WorldState) {
    for nation in personality::validate(state) {
        log::warn!("No personality profile for {nation}, using defaults");
    }
}

/// The built-in scenario: the world of January 1936, with the player at
/// the helm of the United States.
pub fn world_1936(seed: u64) -> WorldState {
    let mut state = WorldState::default();
    state.turn = 1;
    state.date = Date::new(1936, 1);
    state.rng_seed = seed;
    state.rng_state = seed;

    build_player(&mut state);
    build_nations(&mut state);
    build_relationships(&mut state);
    build_global_systems(&mut state);
    build_crises(&mut state);

    warn_defaulted_personalities(&state);
    state
}

fn build_player(state: &mut WorldState) {
    let player = &mut state.player;
    player.nation = "usa".to_string();

    let record = &mut player.record;
    record.leader = "Franklin D. Roosevelt".to_string();
    record.government = "democratic".to_string();
    record.legitimacy = new_percent(85);
    record.internal_stability = new_percent(75);

    record.economy.gdp = Fixed::from_int(1000);
    record.economy.gdp_growth = Fixed::from_f32(-2.5);
    record.economy.unemployment = new_percent(17);
    record.economy.treasury = Fixed::from_int(45);
    record.economy.debt = Fixed::from_int(42);

    record.military.total_strength = new_percent(45);
    record.military.readiness = new_percent(60);
    record.military.tech_level = new_percent(65);
    record.military.branches = BTreeMap::from([
        (
            "army".to_string(),
            MilitaryBranch {
                personnel: 180_000,
                doctrine: "defensive".to_string(),
            },
        ),
        (
            "navy".to_string(),
            MilitaryBranch {
                personnel: 120_000,
                doctrine: "two_ocean".to_string(),
            },
        ),
        (
            "airforce".to_string(),
            MilitaryBranch {
                personnel: 20_000,
                doctrine: "strategic_bombing".to_string(),
            },
        ),
    ]);

    player.politics.public_support = new_percent(72);
    player.politics.congress_support = new_percent(68);
    player.politics.factions = BTreeMap::from([
        (
            "isolationists".to_string(),
            Faction {
                strength: new_percent(75),
                leader: "Charles Lindbergh".to_string(),
                mood: "aggressive".to_string(),
                goals: vec!["avoid_war".to_string(), "america_first".to_string()],
            },
        ),
        (
            "interventionists".to_string(),
            Faction {
                strength: new_percent(25),
                leader: "William Allen White".to_string(),
                mood: "concerned".to_string(),
                goals: vec!["support_allies".to_string(), "military_buildup".to_string()],
            },
        ),
        (
            "progressives".to_string(),
            Faction {
                strength: new_percent(65),
                leader: "Harold Ickes".to_string(),
                mood: "hopeful".to_string(),
                goals: vec!["expand_new_deal".to_string(), "labor_rights".to_string()],
            },
        ),
        (
            "business".to_string(),
            Faction {
                strength: new_percent(45),
                leader: "Chamber of Commerce".to_string(),
                mood: "worried".to_string(),
                goals: vec!["reduce_regulation".to_string(), "lower_taxes".to_string()],
            },
        ),
    ]);

    player.society.population = 128_000_000;
    player.society.urbanization = new_percent(56);
    player.society.literacy = new_percent(94);
}

struct NationSpec {
    id: &'static str,
    leader: &'static str,
    government: &'static str,
    legitimacy: i64,
    stability: i64,
    gdp: i64,
    growth: f32,
    unemployment: i64,
    strength: i64,
    readiness: i64,
}

fn build_nations(state: &mut WorldState) {
    let specs = [
        NationSpec {
            id: "germany",
            leader: "Adolf Hitler",
            government: "fascist",
            legitimacy: 80,
            stability: 85,
            gdp: 450,
            growth: 8.5,
            unemployment: 4,
            strength: 65,
            readiness: 75,
        },
        NationSpec {
            id: "britain",
            leader: "Stanley Baldwin",
            government: "conservative",
            legitimacy: 75,
            stability: 65,
            gdp: 520,
            growth: 2.1,
            unemployment: 11,
            strength: 55,
            readiness: 45,
        },
        NationSpec {
            id: "france",
            leader: "Léon Blum",
            government: "popular_front",
            legitimacy: 60,
            stability: 30,
            gdp: 280,
            growth: -0.5,
            unemployment: 15,
            strength: 50,
            readiness: 60,
        },
        NationSpec {
            id: "japan",
            leader: "Emperor Hirohito",
            government: "military_dominated",
            legitimacy: 90,
            stability: 80,
            gdp: 220,
            growth: 5.2,
            unemployment: 6,
            strength: 70,
            readiness: 80,
        },
        NationSpec {
            id: "soviet_union",
            leader: "Joseph Stalin",
            government: "communist",
            legitimacy: 70,
            stability: 90,
            gdp: 380,
            growth: 12.5,
            unemployment: 0,
            strength: 60,
            readiness: 40,
        },
    ];

    for spec in specs {
        let mut nation = Nation::default();
        nation.leader = spec.leader.to_string();
        nation.government = spec.government.to_string();
        nation.legitimacy = new_percent(spec.legitimacy);
        nation.internal_stability = new_percent(spec.stability);
        nation.economy.gdp = Fixed::from_int(spec.gdp);
        nation.economy.gdp_growth = Fixed::from_f32(spec.growth);
        nation.economy.unemployment = new_percent(spec.unemployment);
        nation.military.total_strength = new_percent(spec.strength);
        nation.military.readiness = new_percent(spec.readiness);
        state.nations.insert(spec.id.to_string(), nation);
    }
}

fn build_relationships(state: &mut WorldState) {
    let rows: [(&str, i64, i64, i64, Trend, &[&str]); 5] = [
        ("britain", 75, 60, 85, Trend::Stable, &["trade"]),
        ("france", 70, 55, 60, Trend::Stable, &[]),
        ("germany", 25, 10, 30, Trend::Declining, &[]),
        ("japan", 20, 15, 45, Trend::Hostile, &[]),
        ("soviet_union", 35, 30, 5, Trend::Cautious, &[]),
    ];

    for (other, value, trust, trade, trend, treaties) in rows {
        state.relationships.insert(
            ("usa".to_string(), other.to_string()),
            Relationship {
                value: new_percent(value),
                trust: new_percent(trust),
                trade: new_percent(trade),
                trend,
                treaties: treaties.iter().map(|t| t.to_string()).collect(),
            },
        );
    }
}

fn build_global_systems(state: &mut WorldState) {
    let global = &mut state.global;

    global.trade.total_volume = Fixed::from_int(2500);
    global.trade.growth_rate = Fixed::from_f32(-3.5);
    global.trade.protectionism = new_percent(75);
    global.trade.currency_stability = new_percent(60);

    global.ideology = BTreeMap::from([
        (
            Ideology::Democracy,
            IdeologyState {
                strength: new_percent(45),
                trend: Trend::Declining,
            },
        ),
        (
            Ideology::Fascism,
            IdeologyState {
                strength: new_percent(30),
                trend: Trend::Rising,
            },
        ),
        (
            Ideology::Communism,
            IdeologyState {
                strength: new_percent(20),
                trend: Trend::Stable,
            },
        ),
        (
            Ideology::Authoritarianism,
            IdeologyState {
                strength: new_percent(5),
                trend: Trend::Stable,
            },
        ),
    ]);

    global.technology.military = new_percent(65);
    global.technology.civilian = new_percent(75);
}

fn build_crises(state: &mut WorldState) {
    state.crises.active = vec![
        Crisis {
            id: "rhineland".to_string(),
            kind: CrisisKind::Diplomatic,
            severity: new_percent(90),
            escalation_rate: Fixed::from_int(5),
            participants: vec![
                "germany".to_string(),
                "france".to_string(),
                "britain".to_string(),
            ],
            time_pressure: 3,
            possible_outcomes: vec![
                CrisisOutcome {
                    id: "war".to_string(),
                    probability: new_percent(15),
                },
                CrisisOutcome {
                    id: "acceptance".to_string(),
                    probability: new_percent(70),
                },
                CrisisOutcome {
                    id: "compromise".to_string(),
                    probability: new_percent(15),
                },
            ],
        },
        Crisis {
            id: "spanish_civil_war".to_string(),
            kind: CrisisKind::ProxyConflict,
            severity: new_percent(70),
            escalation_rate: Fixed::from_int(3),
            participants: vec![
                "spain_republicans".to_string(),
                "spain_nationalists".to_string(),
            ],
            time_pressure: 24,
            possible_outcomes: vec![
                CrisisOutcome {
                    id: "republican_victory".to_string(),
                    probability: new_percent(30),
                },
                CrisisOutcome {
                    id: "nationalist_victory".to_string(),
                    probability: new_percent(60),
                },
                CrisisOutcome {
                    id: "international_war".to_string(),
                    probability: new_percent(10),
                },
            ],
        },
    ];

    state.crises.potential = vec![
        CrisisTemplate {
            id: "china_incident".to_string(),
            trigger_conditions: BTreeMap::from([
                ("japan_aggression".to_string(), Fixed::from_int(80)),
                ("china_weakness".to_string(), Fixed::from_int(70)),
            ]),
            probability: new_percent(85),
            earliest_date: Date::new(1937, 7),
        },
        CrisisTemplate {
            id: "anschluss".to_string(),
            trigger_conditions: BTreeMap::from([
                ("german_strength".to_string(), Fixed::from_int(70)),
                ("austrian_weakness".to_string(), Fixed::from_int(80)),
            ]),
            probability: new_percent(90),
            earliest_date: Date::new(1938, 3),
        },
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_scenario_shape() {
        let state = world_1936(42);

        assert_eq!(state.turn, 1);
        assert_eq!(state.date, Date::new(1936, 1));
        assert_eq!(state.rng_state, 42);
        assert_eq!(state.nations.len(), 5);
        assert_eq!(state.crises.active.len(), 2);
        assert_eq!(state.crises.potential.len(), 2);

        let rhineland = &state.crises.active[0];
        assert_eq!(rhineland.id, "rhineland");
        assert_eq!(rhineland.severity.get(), Fixed::from_int(90));
        assert_eq!(rhineland.time_pressure, 3);

        assert_eq!(
            state.relation_value("usa", "britain"),
            Fixed::from_int(75)
        );
        // Unlisted pairs read as neutral.
        assert_eq!(
            state.relation_value("germany", "japan"),
            Fixed::from_int(50)
        );
    }

    #[test]
    fn test_scenario_roundtrips_through_json() {
        let state = world_1936(7);
        let json = serde_json::to_string(&state).unwrap();
        let loaded = from_json(&json).unwrap();
        assert_eq!(
            serde_json::to_string(&loaded).unwrap(),
            serde_json::to_string(&state).unwrap()
        );
    }

    #[test]
    fn test_all_major_powers_have_personalities() {
        let state = world_1936(1);
        assert!(personality::validate(&state).is_empty());
    }
}
