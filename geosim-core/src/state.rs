//! World state: the root aggregate of the simulation.
//!
//! A [`WorldState`] is a complete snapshot. It is never mutated in place
//! by callers; [`crate::step::advance_turn`] clones it and returns a new
//! snapshot, so any previously published state stays valid for readers.

use crate::bounded::{new_divergence, new_percent, BoundedFixed, Percent};
use crate::crisis::Crises;
use crate::fixed::Fixed;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Simulation calendar date. Months are 1-12; the day is not modeled,
/// one turn is one month.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Date {
    pub year: i32,
    pub month: u8,
}

impl Date {
    pub const fn new(year: i32, month: u8) -> Self {
        Self { year, month }
    }

    /// The following month, wrapping 12 into January of the next year.
    pub const fn next_month(self) -> Self {
        if self.month >= 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl Default for Date {
    fn default() -> Self {
        Self::new(1936, 1)
    }
}

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Nation identifier, e.g. "germany" or "soviet_union".
pub type NationId = String;

/// Economic indicators. GDP, growth, treasury and debt are unclamped;
/// unemployment is a percentage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Economy {
    pub gdp: Fixed,
    pub gdp_growth: Fixed,
    pub unemployment: Percent,
    pub treasury: Fixed,
    pub debt: Fixed,
}

impl Default for Economy {
    fn default() -> Self {
        Self {
            gdp: Fixed::from_int(100),
            gdp_growth: Fixed::ZERO,
            unemployment: new_percent(5),
            treasury: Fixed::from_int(50),
            debt: Fixed::ZERO,
        }
    }
}

/// A single service branch. Detail only; turn logic reads the aggregate
/// strength and readiness on [`Military`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MilitaryBranch {
    pub personnel: u64,
    pub doctrine: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Military {
    pub total_strength: Percent,
    pub readiness: Percent,
    pub tech_level: Percent,
    pub branches: BTreeMap<String, MilitaryBranch>,
}

impl Default for Military {
    fn default() -> Self {
        Self {
            total_strength: new_percent(50),
            readiness: new_percent(50),
            tech_level: new_percent(50),
            branches: BTreeMap::new(),
        }
    }
}

/// One simulated country.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Nation {
    pub leader: String,
    pub government: String,
    pub legitimacy: Percent,
    pub internal_stability: Percent,
    pub economy: Economy,
    pub military: Military,
}

impl Default for Nation {
    fn default() -> Self {
        Self {
            leader: String::new(),
            government: String::new(),
            legitimacy: new_percent(70),
            internal_stability: new_percent(70),
            economy: Economy::default(),
            military: Military::default(),
        }
    }
}

/// A domestic political faction of the player nation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faction {
    pub strength: Percent,
    pub leader: String,
    pub mood: String,
    pub goals: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Politics {
    pub public_support: Percent,
    pub congress_support: Percent,
    pub factions: BTreeMap<String, Faction>,
}

impl Default for Politics {
    fn default() -> Self {
        Self {
            public_support: new_percent(50),
            congress_support: new_percent(50),
            factions: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Society {
    pub population: u64,
    pub urbanization: Percent,
    pub literacy: Percent,
}

impl Default for Society {
    fn default() -> Self {
        Self {
            population: 0,
            urbanization: new_percent(50),
            literacy: new_percent(90),
        }
    }
}

/// The human-controlled country: a nation record plus domestic politics
/// and society, which only the player has.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    pub nation: NationId,
    pub record: Nation,
    pub politics: Politics,
    pub society: Society,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            nation: "usa".to_string(),
            record: Nation::default(),
            politics: Politics::default(),
            society: Society::default(),
        }
    }
}

/// Direction of a relationship or indicator over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Rising,
    Stable,
    Declining,
    Cautious,
    Hostile,
}

/// A bilateral relationship record.
///
/// Storage is asymmetric: only one direction of a pair is populated,
/// so lookups must go through [`WorldState::relation`], which checks
/// both orderings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    pub value: Percent,
    pub trust: Percent,
    pub trade: Percent,
    pub trend: Trend,
    pub treaties: Vec<String>,
}

impl Default for Relationship {
    fn default() -> Self {
        Self {
            value: new_percent(50),
            trust: new_percent(50),
            trade: new_percent(50),
            trend: Trend::Stable,
            treaties: Vec::new(),
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Ideology {
    Democracy,
    Fascism,
    Communism,
    Authoritarianism,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdeologyState {
    pub strength: Percent,
    pub trend: Trend,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeSystem {
    pub total_volume: Fixed,
    pub growth_rate: Fixed,
    pub protectionism: Percent,
    pub currency_stability: Percent,
}

impl Default for TradeSystem {
    fn default() -> Self {
        Self {
            total_volume: Fixed::ZERO,
            growth_rate: Fixed::ZERO,
            protectionism: new_percent(50),
            currency_stability: new_percent(50),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnologyRace {
    pub military: Percent,
    pub civilian: Percent,
}

impl Default for TechnologyRace {
    fn default() -> Self {
        Self {
            military: new_percent(50),
            civilian: new_percent(50),
        }
    }
}

/// Global trade / ideology / technology aggregates, mutated by player
/// decisions and AI actions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalSystems {
    pub trade: TradeSystem,
    pub ideology: BTreeMap<Ideology, IdeologyState>,
    pub technology: TechnologyRace,
}

impl GlobalSystems {
    /// Current global strength of an ideology; 0 if untracked.
    pub fn ideology_strength(&self, ideology: Ideology) -> Fixed {
        self.ideology
            .get(&ideology)
            .map(|s| s.strength.get())
            .unwrap_or(Fixed::ZERO)
    }
}

/// A recorded departure from the scripted historical baseline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Divergence {
    pub turn: u32,
    pub title: String,
    pub score: Fixed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeline {
    pub divergence_score: BoundedFixed,
    pub major_divergences: Vec<Divergence>,
}

impl Default for Timeline {
    fn default() -> Self {
        Self {
            divergence_score: new_divergence(),
            major_divergences: Vec::new(),
        }
    }
}

/// Complete simulation snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldState {
    pub turn: u32,
    pub date: Date,
    pub rng_seed: u64,
    /// Current RNG state, carried between turns for replay determinism.
    pub rng_state: u64,
    pub player: PlayerState,
    pub nations: BTreeMap<NationId, Nation>,
    /// Bilateral relationships, one direction populated per pair.
    /// Serialized as a sequence of (a, b, record) entries; JSON maps
    /// cannot carry tuple keys.
    #[serde(with = "relationship_entries")]
    pub relationships: BTreeMap<(NationId, NationId), Relationship>,
    pub global: GlobalSystems,
    pub crises: Crises,
    pub timeline: Timeline,
}

impl WorldState {
    /// Relationship record between two nations, checking both storage
    /// directions.
    pub fn relation(&self, a: &str, b: &str) -> Option<&Relationship> {
        self.relationships
            .get(&(a.to_string(), b.to_string()))
            .or_else(|| self.relationships.get(&(b.to_string(), a.to_string())))
    }

    /// Relationship value between two nations; 50 (neutral) if no record
    /// exists in either direction.
    pub fn relation_value(&self, a: &str, b: &str) -> Fixed {
        self.relation(a, b)
            .map(|r| r.value.get())
            .unwrap_or(Fixed::from_int(50))
    }

    /// Mutable relationship record, inserting a neutral default (keyed
    /// `(a, b)`) if neither direction exists yet.
    pub fn relation_mut(&mut self, a: &str, b: &str) -> &mut Relationship {
        let backward = (b.to_string(), a.to_string());
        let key = if self.relationships.contains_key(&backward) {
            backward
        } else {
            (a.to_string(), b.to_string())
        };
        self.relationships.entry(key).or_default()
    }

    /// Number of stored relationships involving `nation` with value
    /// below 40.
    pub fn hostile_relation_count(&self, nation: &str) -> usize {
        self.relationships
            .iter()
            .filter(|((a, b), rel)| {
                (a == nation || b == nation) && rel.value.get() < Fixed::from_int(40)
            })
            .count()
    }

    /// Nation record by id, including the player's.
    pub fn nation_record(&self, id: &str) -> Option<&Nation> {
        if id == self.player.nation {
            Some(&self.player.record)
        } else {
            self.nations.get(id)
        }
    }

    /// Deterministic checksum of the snapshot, for replay validation and
    /// divergence debugging. Identical states produce identical checksums.
    pub fn checksum(&self) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        self.turn.hash(&mut hasher);
        self.date.hash(&mut hasher);
        self.rng_state.hash(&mut hasher);

        self.player.nation.hash(&mut hasher);
        self.player.record.economy.gdp.hash(&mut hasher);
        self.player.record.economy.treasury.hash(&mut hasher);
        self.player.record.military.total_strength.get().hash(&mut hasher);
        self.player.politics.public_support.get().hash(&mut hasher);

        // BTreeMap iteration is already sorted, so this is stable.
        for (id, nation) in &self.nations {
            id.hash(&mut hasher);
            nation.economy.gdp.hash(&mut hasher);
            nation.military.total_strength.get().hash(&mut hasher);
            nation.internal_stability.get().hash(&mut hasher);
        }

        for ((a, b), rel) in &self.relationships {
            a.hash(&mut hasher);
            b.hash(&mut hasher);
            rel.value.get().hash(&mut hasher);
        }

        for crisis in &self.crises.active {
            crisis.id.hash(&mut hasher);
            crisis.severity.get().hash(&mut hasher);
            crisis.time_pressure.hash(&mut hasher);
        }

        self.timeline.divergence_score.get().hash(&mut hasher);

        hasher.finish()
    }
}

/// Serde adapter for the tuple-keyed relationship map. JSON object keys
/// must be strings, so the map round-trips as `[[a, b, record], ...]`.
mod relationship_entries {
    use super::{NationId, Relationship};
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<S>(
        map: &BTreeMap<(NationId, NationId), Relationship>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(map.len()))?;
        for ((a, b), rel) in map {
            seq.serialize_element(&(a, b, rel))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D>(
        deserializer: D,
    ) -> Result<BTreeMap<(NationId, NationId), Relationship>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries: Vec<(NationId, NationId, Relationship)> = Vec::deserialize(deserializer)?;
        Ok(entries.into_iter().map(|(a, b, rel)| ((a, b), rel)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_wraparound() {
        let d = Date::new(1936, 12);
        assert_eq!(d.next_month(), Date::new(1937, 1));
        assert_eq!(Date::new(1936, 3).next_month(), Date::new(1936, 4));
    }

    #[test]
    fn test_date_ordering_is_total() {
        // (1938, 1) is after an earliest date of (1937, 7) even though
        // the month field alone is smaller.
        assert!(Date::new(1938, 1) >= Date::new(1937, 7));
        assert!(Date::new(1937, 6) < Date::new(1937, 7));
    }

    #[test]
    fn test_relation_lookup_checks_both_directions() {
        let mut state = WorldState::default();
        let mut rel = Relationship::default();
        rel.value = new_percent(25);
        state
            .relationships
            .insert(("usa".to_string(), "germany".to_string()), rel);

        assert_eq!(
            state.relation_value("germany", "usa"),
            Fixed::from_int(25)
        );
        assert_eq!(state.relation_value("usa", "germany"), Fixed::from_int(25));
        // Absent pair defaults to neutral 50.
        assert_eq!(state.relation_value("usa", "japan"), Fixed::from_int(50));
    }

    #[test]
    fn test_relation_mut_reuses_existing_direction() {
        let mut state = WorldState::default();
        state
            .relationships
            .insert(("usa".to_string(), "japan".to_string()), Relationship::default());

        state.relation_mut("japan", "usa").value.add(Fixed::from_int(-30));
        assert_eq!(state.relation_value("usa", "japan"), Fixed::from_int(20));
        assert_eq!(state.relationships.len(), 1);
    }

    #[test]
    fn test_relationships_survive_json_roundtrip() {
        let mut state = WorldState::default();
        let mut rel = Relationship::default();
        rel.value = new_percent(75);
        state
            .relationships
            .insert(("usa".to_string(), "britain".to_string()), rel);

        let json = serde_json::to_string(&state).unwrap();
        let back: WorldState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.relation_value("usa", "britain"), Fixed::from_int(75));
        assert_eq!(back.relationships.len(), 1);
    }

    #[test]
    fn test_checksum_stable_and_sensitive() {
        let state = WorldState::default();
        assert_eq!(state.checksum(), state.checksum());

        let mut other = state.clone();
        other.turn += 1;
        assert_ne!(state.checksum(), other.checksum());
    }

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_calendar_advances_strictly(
            year in 1900..2000i32,
            month in 1..=12u8,
            steps in 1..200usize
        ) {
            let mut date = Date::new(year, month);
            for _ in 0..steps {
                let next = date.next_month();
                prop_assert!(next > date);
                prop_assert!((1..=12).contains(&next.month));
                date = next;
            }
            // n steps of one month land exactly n months ahead.
            let total = (year as i64 * 12 + month as i64 - 1) + steps as i64;
            prop_assert_eq!(date.year as i64, total / 12);
            prop_assert_eq!(date.month as i64, total % 12 + 1);
        }
    }
}
