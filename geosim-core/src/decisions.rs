//! Per-turn decision generation.
//!
//! Decisions are ephemeral: regenerated from the current snapshot every
//! turn, never persisted, and selected by id. Generation is a pure
//! function of the snapshot and its [`WorldAnalysis`], so two calls on
//! the same state produce identical sets.

use crate::analysis::{diplomatic_influence, WorldAnalysis};
use crate::crisis::{Crisis, CrisisKind};
use crate::effect::Effect;
use crate::fixed::Fixed;
use crate::state::{Ideology, WorldState};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which slot of the turn a decision occupies. Crisis responses carry
/// the crisis id, so several can coexist in one set.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionCategory {
    Crisis(String),
    Strategic,
    Economic,
    Military,
    Diplomatic,
    Domestic,
    Special,
}

/// An indicator a decision option nominally requires. Display data for
/// the player; selection is not blocked on these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    DiplomaticInfluence,
    MilitaryStrength,
    PublicSupport,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    pub indicator: Indicator,
    pub threshold: Fixed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionOption {
    pub id: String,
    pub title: String,
    pub description: String,
    pub requirements: Vec<Requirement>,
    /// Estimated success in percent, where the outcome is uncertain.
    pub success_chance: Option<Fixed>,
    pub effects: Vec<Effect>,
    pub consequences: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub title: String,
    pub description: String,
    pub urgent: bool,
    pub critical: bool,
    pub options: Vec<DecisionOption>,
}

pub type DecisionSet = BTreeMap<DecisionCategory, Decision>;

/// Generate the full decision set for the current turn.
pub fn generate_decisions(state: &WorldState, analysis: &WorldAnalysis) -> DecisionSet {
    let mut decisions = DecisionSet::new();

    for crisis in &state.crises.active {
        decisions.insert(
            DecisionCategory::Crisis(crisis.id.clone()),
            crisis_decision(crisis, state, analysis),
        );
    }

    if analysis.player_influence > Fixed::from_int(60) {
        decisions.insert(DecisionCategory::Strategic, strategic_decision());
    }

    decisions.insert(DecisionCategory::Economic, economic_decision(state, analysis));

    if analysis.crisis_potential > Fixed::from_int(70)
        || state.player.record.military.total_strength.get() < Fixed::from_int(50)
    {
        decisions.insert(DecisionCategory::Military, military_decision());
    }

    decisions.insert(DecisionCategory::Diplomatic, diplomatic_decision(state));
    decisions.insert(DecisionCategory::Domestic, domestic_decision());

    if let Some(special) = divergence_decision(state) {
        decisions.insert(DecisionCategory::Special, special);
    }

    decisions
}

fn option(id: &str, title: &str, description: &str) -> DecisionOption {
    DecisionOption {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        requirements: Vec::new(),
        success_chance: None,
        effects: Vec::new(),
        consequences: Vec::new(),
    }
}

fn crisis_decision(crisis: &Crisis, state: &WorldState, analysis: &WorldAnalysis) -> Decision {
    let mut options = Vec::new();

    if crisis.kind == CrisisKind::Diplomatic {
        let mut diplomatic = option(
            "diplomatic_solution",
            "Diplomatic Intervention",
            &format!("Use national influence to mediate the {} crisis", crisis.id),
        );
        diplomatic.requirements = vec![Requirement {
            indicator: Indicator::DiplomaticInfluence,
            threshold: Fixed::from_int(60),
        }];
        diplomatic.success_chance = Some(diplomatic_success(crisis, state, analysis));
        diplomatic.consequences = vec![format!(
            "Affects relations with {}",
            crisis.participants.join(", ")
        )];
        options.push(diplomatic);

        if crisis.severity.get() > Fixed::from_int(80) {
            let mut deterrence = option(
                "military_deterrence",
                "Military Deterrence",
                "Deploy forces to deter escalation",
            );
            deterrence.requirements = vec![
                Requirement {
                    indicator: Indicator::MilitaryStrength,
                    threshold: Fixed::from_int(50),
                },
                Requirement {
                    indicator: Indicator::PublicSupport,
                    threshold: Fixed::from_int(60),
                },
            ];
            deterrence.success_chance = Some(deterrence_success(state));
            deterrence.consequences =
                vec!["Risk of escalation to wider conflict".to_string()];
            options.push(deterrence);
        }
    }

    let mut neutrality = option(
        "maintain_neutrality",
        "Maintain Neutrality",
        "Avoid direct involvement in the crisis",
    );
    neutrality.success_chance = Some(Fixed::HUNDRED);
    neutrality.consequences = vec![
        "Preserves isolationist support".to_string(),
        "May embolden aggressors".to_string(),
    ];
    options.push(neutrality);

    Decision {
        title: format!("{} crisis response", crisis.id),
        description: format!(
            "Crisis severity: {}/100. Time pressure: {} turns.",
            crisis.severity.get(),
            crisis.time_pressure
        ),
        urgent: crisis.time_pressure <= 2,
        critical: false,
        options,
    }
}

///// Mediation chance: base 50, shifted by standing abroad and by trust
/// with each crisis participant. Clamped to [10, 90].
fn diplomatic_success(crisis: &Crisis, state: &WorldState, analysis: &WorldAnalysis) -> Fixed {
    let mut chance = Fixed::from_int(50);
    chance += (analysis.player_influence - Fixed::from_int(50)).mul(Fixed::HALF);

    for participant in &crisis.participants {
        if let Some(rel) = state.relation(&state.player.nation, participant) {
            chance +=
                (rel.trust.get() - Fixed::from_int(50)).mul(Fixed::from_raw(3_000));
        }
    }

    chance.clamp(Fixed::from_int(10), Fixed::from_int(90))
}

/// Deterrence chance: base 40, weighted on strength, readiness, and
/// public support. Clamped to [20, 85].
fn deterrence_success(state: &WorldState) -> Fixed {
    let military = &state.player.record.military;
    let fifty = Fixed::from_int(50);

    let chance = Fixed::from_int(40)
        + (military.total_strength.get() - fifty).mul(Fixed::from_raw(8_000))
        + (military.readiness.get() - fifty).mul(Fixed::from_raw(4_000))
        + (state.player.politics.public_support.get() - fifty).mul(Fixed::from_raw(3_000));

    chance.clamp(Fixed::from_int(20), Fixed::from_int(85))
}

fn strategic_decision() -> Decision {
    let mut charter = option(
        "atlantic_charter",
        "Propose Atlantic Charter",
        "Create a framework for democratic cooperation",
    );
    charter.effects = vec![Effect::AdjustRelationship {
        nation: "britain".to_string(),
        delta: Fixed::from_int(10),
    }];
    charter.consequences = vec!["Strengthens democratic alliance".to_string()];

    let mut arsenal = option(
        "arsenal_democracy",
        "Arsenal of Democracy",
        "Retool industry to supply democratic nations",
    );
    arsenal.effects = vec![
        Effect::AdjustGdp(Fixed::from_int(15)),
        Effect::AdjustCongressSupport(Fixed::from_int(-5)),
    ];
    arsenal.consequences = vec!["Ends the neutrality debate".to_string()];

    let mut freedoms = option(
        "four_freedoms",
        "Articulate Four Freedoms",
        "Define national values for a global audience",
    );
    freedoms.effects = vec![Effect::AdjustPublicSupport(Fixed::from_int(8))];
    freedoms.consequences = vec!["Moral leadership".to_string()];

    Decision {
        title: "Strategic Initiative".to_string(),
        description: "High influence allows for bold strategic moves".to_string(),
        urgent: false,
        critical: false,
        options: vec![charter, arsenal, freedoms],
    }
}

fn economic_decision(state: &WorldState, analysis: &WorldAnalysis) -> Decision {
    let mut options = Vec::new();

    if state.player.record.economy.unemployment.get() > Fixed::from_int(15) {
        let mut works = option(
            "massive_works",
            "Massive Public Works",
            "Launch an unprecedented infrastructure program",
        );
        works.effects = vec![
            Effect::AdjustUnemployment(Fixed::from_int(-8)),
            Effect::AdjustDebt(Fixed::from_int(10)),
        ];
        works.consequences = vec!["Debt increases".to_string()];
        options.push(works);
    }

    if analysis.global_economy.protectionism > Fixed::from_int(70) {
        let mut trade = option(
            "trade_liberalization",
            "Trade Liberalization Initiative",
            "Lead an effort to reduce global trade barriers",
        );
        trade.effects = vec![
            Effect::AdjustProtectionism(Fixed::from_int(-10)),
            Effect::AdjustGdp(Fixed::from_int(10)),
        ];
        trade.consequences = vec!["Domestic opposition".to_string()];
        options.push(trade);
    }

    let mut balanced = option(
        "balanced_approach",
        "Balanced Economic Policy",
        "Moderate spending with targeted investments",
    );
    balanced.effects = vec![Effect::AdjustGdp(Fixed::from_int(5))];
    balanced.consequences = vec!["Gradual improvement".to_string()];
    options.push(balanced);

    Decision {
        title: "Economic Policy".to_string(),
        description: "Guide economic recovery and growth".to_string(),
        urgent: false,
        critical: false,
        options,
    }
}

fn military_decision() -> Decision {
    let mut buildup = option(
        "rapid_buildup",
        "Rapid Military Buildup",
        "Dramatically expand military forces",
    );
    buildup.effects = vec![
        Effect::AdjustMilitaryStrength(Fixed::from_int(20)),
        Effect::AdjustTreasury(Fixed::from_int(-10)),
    ];
    buildup.consequences = vec!["Isolationist opposition".to_string()];

    let mut naval = option(
        "naval_focus",
        "Two-Ocean Navy",
        "Focus on naval supremacy in both oceans",
    );
    naval.effects = vec![
        Effect::AdjustMilitaryStrength(Fixed::from_int(10)),
        Effect::AdjustReadiness(Fixed::from_int(10)),
        Effect::AdjustTreasury(Fixed::from_int(-15)),
    ];
    naval.consequences = vec!["Expensive program".to_string()];

    let mut air = option(
        "air_power",
        "Air Power Doctrine",
        "Invest heavily in strategic bombing capability",
    );
    air.effects = vec![
        Effect::AdjustMilitaryStrength(Fixed::from_int(8)),
        Effect::AdjustReadiness(Fixed::from_int(5)),
        Effect::AdjustTreasury(Fixed::from_int(-12)),
    ];
    air.consequences = vec!["New warfare doctrine".to_string()];

    Decision {
        title: "Military Policy".to_string(),
        description: "Prepare for potential conflicts".to_string(),
        urgent: false,
        critical: false,
        options: vec![buildup, naval, air],
    }
}

fn diplomatic_decision(state: &WorldState) -> Decision {
    let player = &state.player.nation;
    let mut options = Vec::new();

    for ((a, b), rel) in &state.relationships {
        let other = if a == player {
            b
        } else if b == player {
            a
        } else {
            continue;
        };
        // Germany stays off the outreach list in every configuration.
        if other == "germany" || rel.value.get() >= Fixed::from_int(40) {
            continue;
        }

        let mut improve = option(
            &format!("improve_{other}"),
            &format!("Improve Relations with {other}"),
            &format!("Diplomatic outreach to improve {other} relations"),
        );
        improve.effects = vec![Effect::AdjustRelationship {
            nation: other.clone(),
            delta: Fixed::from_int(15),
        }];
        improve.consequences = vec!["May anger rivals".to_string()];
        options.push(improve);
        if options.len() == 3 {
            break;
        }
    }

    if options.is_empty() {
        let mut maintain = option(
            "maintain_balance",
            "Maintain Diplomatic Balance",
            "Continue the current diplomatic approach",
        );
        maintain.consequences = vec!["Flexibility preserved".to_string()];
        options.push(maintain);
    }

    Decision {
        title: "Diplomatic Initiative".to_string(),
        description: "Shape international relationships".to_string(),
        urgent: false,
        critical: false,
        options,
    }
}

fn domestic_decision() -> Decision {
    let mut social = option(
        "social_security_expansion",
        "Expand Social Security",
        "Broaden social safety net coverage",
    );
    social.effects = vec![
        Effect::AdjustPublicSupport(Fixed::from_int(10)),
        Effect::AdjustDebt(Fixed::from_int(5)),
    ];
    social.consequences = vec!["Fiscal conservatives oppose".to_string()];

    let mut labor = option(
        "labor_relations",
        "Labor Relations Act",
        "Strengthen worker rights and unions",
    );
    labor.effects = vec![
        Effect::AdjustFactionStrength {
            faction: "progressives".to_string(),
            delta: Fixed::from_int(15),
        },
        Effect::AdjustFactionStrength {
            faction: "business".to_string(),
            delta: Fixed::from_int(-10),
        },
    ];
    labor.consequences = vec!["Business opposition".to_string()];

    let mut rural = option(
        "rural_development",
        "Rural Development Program",
        "Target aid to agricultural regions",
    );
    rural.effects = vec![
        Effect::AdjustGdp(Fixed::from_int(3)),
        Effect::AdjustPublicSupport(Fixed::from_int(5)),
    ];
    rural.consequences = vec!["Agricultural recovery".to_string()];

    Decision {
        title: "Domestic Policy".to_string(),
        description: "Address internal challenges".to_string(),
        urgent: false,
        critical: false,
        options: vec![social, labor, rural],
    }
}

/// Timeline-altering decisions, offered only when their historical
/// window is open. Each carries a large divergence delta; the turn
/// transition records deltas above 50 on the timeline.
fn divergence_decision(state: &WorldState) -> Option<Decision> {
    let mut options = Vec::new();

    let rhineland_active = state.crises.active.iter().any(|c| c.id == "rhineland");
    if state.date.year == 1936 && rhineland_active {
        let mut intervention = option(
            "early_intervention",
            "Military Intervention Doctrine",
            "Abandon isolationism and commit to intervention against treaty violations",
        );
        intervention.effects = vec![
            Effect::AdjustDivergence(Fixed::from_int(100)),
            Effect::AdjustFactionStrength {
                faction: "isolationists".to_string(),
                delta: Fixed::from_int(-50),
            },
            Effect::AdjustMilitaryStrength(Fixed::from_int(20)),
        ];
        intervention.consequences = vec![
            "Immediate end to isolationism".to_string(),
            "Possible early world war".to_string(),
        ];
        options.push(intervention);
    }

    let business_strength = state
        .player
        .politics
        .factions
        .get("business")
        .map(|f| f.strength.get())
        .unwrap_or(Fixed::ZERO);
    if business_strength > Fixed::from_int(70)
        && state.player.politics.public_support.get() < Fixed::from_int(50)
    {
        let mut plot = option(
            "business_plot",
            "Investigate Business Plot",
            "Uncover a rumored conspiracy to overthrow the government",
        );
        plot.effects = vec![Effect::AdjustDivergence(Fixed::from_int(95))];
        plot.consequences = vec!["Massive political crisis".to_string()];
        options.push(plot);
    }

    let fascism = state.global.ideology_strength(Ideology::Fascism);
    if fascism > Fixed::from_int(40)
        && state.relation_value(&state.player.nation, "soviet_union") > Fixed::from_int(40)
    {
        let mut alliance = option(
            "soviet_alliance",
            "Early Soviet Cooperation",
            "Propose unprecedented cooperation against fascism",
        );
        alliance.effects = vec![
            Effect::AdjustDivergence(Fixed::from_int(85)),
            Effect::AdjustRelationship {
                nation: "soviet_union".to_string(),
                delta: Fixed::from_int(40),
            },
            Effect::AdjustRelationship {
                nation: "germany".to_string(),
                delta: Fixed::from_int(-30),
            },
        ];
        alliance.consequences = vec!["Domestic political explosion".to_string()];
        options.push(alliance);
    }

    if options.is_empty() {
        return None;
    }

    Some(Decision {
        title: "Historical Divergence Points".to_string(),
        description: "Decisions that will fundamentally alter the timeline".to_string(),
        urgent: false,
        critical: true,
        options,
    })
}

/// Convenience wrapper used by the decision UI for requirement display.
pub fn indicator_value(indicator: Indicator, state: &WorldState) -> Fixed {
    match indicator {
        Indicator::DiplomaticInfluence => diplomatic_influence(&state.player.nation, state),
        Indicator::MilitaryStrength => state.player.record.military.total_strength.get(),
        Indicator::PublicSupport => state.player.politics.public_support.get(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::bounded::new_percent;
    use crate::state::{IdeologyState, Trend};
    use crate::testing::WorldStateBuilder;

    fn generate(state: &WorldState) -> DecisionSet {
        let analysis = analyze(state);
        generate_decisions(state, &analysis)
    }

    fn crisis(id: &str, kind: CrisisKind, severity: i64, time_pressure: u32) -> Crisis {
        Crisis {
            id: id.to_string(),
            kind,
            severity: new_percent(severity),
            escalation_rate: Fixed::from_int(5),
            participants: vec!["germany".to_string(), "france".to_string()],
            time_pressure,
            possible_outcomes: vec![],
        }
    }

    #[test]
    fn test_indicator_values_read_player_state() {
        let state = WorldStateBuilder::new()
            .player(|p| {
                p.record.military.total_strength = new_percent(62);
                p.politics.public_support = new_percent(48);
            })
            .build();

        assert_eq!(
            indicator_value(Indicator::MilitaryStrength, &state),
            Fixed::from_int(62)
        );
        assert_eq!(
            indicator_value(Indicator::PublicSupport, &state),
            Fixed::from_int(48)
        );
        // No foreign ties in the builder default, so influence sits at base.
        assert_eq!(
            indicator_value(Indicator::DiplomaticInfluence, &state),
            Fixed::from_int(50)
        );
    }

    #[test]
    fn test_massive_works_gated_on_unemployment() {
        let state = WorldStateBuilder::new()
            .player(|p| {
                p.record.economy.gdp_growth = Fixed::from_int(-5);
                p.record.economy.unemployment = new_percent(20);
            })
            .build();
        let decisions = generate(&state);
        let economic = &decisions[&DecisionCategory::Economic];
        assert!(economic.options.iter().any(|o| o.id == "massive_works"));

        let state = WorldStateBuilder::new()
            .player(|p| p.record.economy.unemployment = new_percent(10))
            .build();
        let decisions = generate(&state);
        let economic = &decisions[&DecisionCategory::Economic];
        assert!(!economic.options.iter().any(|o| o.id == "massive_works"));
        // The fallback option is always offered.
        assert!(economic.options.iter().any(|o| o.id == "balanced_approach"));
    }

    #[test]
    fn test_military_category_gated() {
        // Default strength 50, crisis potential 30: no military slot.
        let state = WorldStateBuilder::new().build();
        assert!(!generate(&state).contains_key(&DecisionCategory::Military));

        let state = WorldStateBuilder::new()
            .player(|p| p.record.military.total_strength = new_percent(40))
            .build();
        assert!(generate(&state).contains_key(&DecisionCategory::Military));
    }

    #[test]
    fn test_crisis_options_by_severity() {
        let state = WorldStateBuilder::new()
            .with_crisis(crisis("rhineland", CrisisKind::Diplomatic, 90, 2))
            .build();
        let decisions = generate(&state);
        let response = &decisions[&DecisionCategory::Crisis("rhineland".to_string())];

        assert!(response.urgent);
        let ids: Vec<_> = response.options.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(
            ids,
            ["diplomatic_solution", "military_deterrence", "maintain_neutrality"]
        );

        // Below the deterrence threshold only mediation and neutrality remain.
        let state = WorldStateBuilder::new()
            .with_crisis(crisis("rhineland", CrisisKind::Diplomatic, 70, 5))
            .build();
        let decisions = generate(&state);
        let response = &decisions[&DecisionCategory::Crisis("rhineland".to_string())];
        assert!(!response.urgent);
        assert!(!response.options.iter().any(|o| o.id == "military_deterrence"));
    }

    #[test]
    fn test_neutrality_is_certain() {
        let state = WorldStateBuilder::new()
            .with_crisis(crisis("rhineland", CrisisKind::Military, 90, 3))
            .build();
        let decisions = generate(&state);
        let response = &decisions[&DecisionCategory::Crisis("rhineland".to_string())];
        let neutrality = response
            .options
            .iter()
            .find(|o| o.id == "maintain_neutrality")
            .unwrap();
        assert_eq!(neutrality.success_chance, Some(Fixed::HUNDRED));
        assert!(neutrality.effects.is_empty());
    }

    #[test]
    fn test_diplomatic_outreach_excludes_germany() {
        let state = WorldStateBuilder::new()
            .with_relationship("usa", "germany", 25)
            .with_relationship("usa", "japan", 20)
            .build();
        let decisions = generate(&state);
        let diplomatic = &decisions[&DecisionCategory::Diplomatic];
        let ids: Vec<_> = diplomatic.options.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, ["improve_japan"]);
    }

    #[test]
    fn test_diplomatic_fallback_when_no_cold_relations() {
        let state = WorldStateBuilder::new()
            .with_relationship("usa", "britain", 75)
            .build();
        let decisions = generate(&state);
        let diplomatic = &decisions[&DecisionCategory::Diplomatic];
        assert_eq!(diplomatic.options[0].id, "maintain_balance");
    }

    #[test]
    fn test_soviet_alliance_divergence_gate() {
        let mut state = WorldStateBuilder::new()
            .with_relationship("usa", "soviet_union", 45)
            .build();
        state.global.ideology.insert(
            Ideology::Fascism,
            IdeologyState {
                strength: new_percent(45),
                trend: Trend::Rising,
            },
        );

        let decisions = generate(&state);
        let special = &decisions[&DecisionCategory::Special];
        assert!(special.critical);
        assert!(special.options.iter().any(|o| o.id == "soviet_alliance"));

        // Cold relations close the window.
        let mut state = WorldStateBuilder::new()
            .with_relationship("usa", "soviet_union", 35)
            .build();
        state.global.ideology.insert(
            Ideology::Fascism,
            IdeologyState {
                strength: new_percent(45),
                trend: Trend::Rising,
            },
        );
        assert!(!generate(&state).contains_key(&DecisionCategory::Special));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let state = WorldStateBuilder::new()
            .with_nation("germany")
            .with_crisis(crisis("rhineland", CrisisKind::Diplomatic, 90, 3))
            .with_relationship("usa", "germany", 25)
            .build();

        let a = generate(&state);
        let b = generate(&state);
        assert_eq!(a, b);
    }

    #[test]
    fn test_deterrence_success_clamped() {
        let state = WorldStateBuilder::new()
            .player(|p| {
                p.record.military.total_strength = new_percent(100);
                p.record.military.readiness = new_percent(100);
                p.politics.public_support = new_percent(100);
            })
            .build();
        assert_eq!(deterrence_success(&state), Fixed::from_int(85));

        let state = WorldStateBuilder::new()
            .player(|p| {
                p.record.military.total_strength = new_percent(0);
                p.record.military.readiness = new_percent(0);
                p.politics.public_support = new_percent(0);
            })
            .build();
        assert_eq!(deterrence_success(&state), Fixed::from_int(20));
    }
}
