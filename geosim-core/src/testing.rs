//! Test helpers: fluent construction of `WorldState` fixtures.

use crate::bounded::new_percent;
use crate::crisis::{Crisis, CrisisTemplate};
use crate::state::{Date, Nation, PlayerState, Relationship, WorldState};

pub struct WorldStateBuilder {
    state: WorldState,
}

impl WorldStateBuilder {
    pub fn new() -> Self {
        let mut state = WorldState::default();
        state.turn = 1;
        state.date = Date::new(1936, 1);
        Self { state }
    }

    pub fn date(mut self, year: i32, month: u8) -> Self {
        self.state.date = Date::new(year, month);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.state.rng_seed = seed;
        self.state.rng_state = seed;
        self
    }

    /// Insert a nation with defaults.
    pub fn with_nation(self, id: &str) -> Self {
        self.nation(id, |_| {})
    }

    /// Insert a nation and customize it.
    pub fn nation(mut self, id: &str, configure: impl FnOnce(&mut Nation)) -> Self {
        let mut nation = Nation::default();
        configure(&mut nation);
        self.state.nations.insert(id.to_string(), nation);
        self
    }

    /// Customize the player.
    pub fn player(mut self, configure: impl FnOnce(&mut PlayerState)) -> Self {
        configure(&mut self.state.player);
        self
    }

    /// Store a one-directional relationship record with the given value.
    pub fn with_relationship(mut self, a: &str, b: &str, value: i64) -> Self {
        let mut rel = Relationship::default();
        rel.value = new_percent(value);
        self.state
            .relationships
            .insert((a.to_string(), b.to_string()), rel);
        self
    }

    pub fn with_crisis(mut self, crisis: Crisis) -> Self {
        self.state.crises.active.push(crisis);
        self
    }

    pub fn with_potential(mut self, template: CrisisTemplate) -> Self {
        self.state.crises.potential.push(template);
        self
    }

    pub fn build(self) -> WorldState {
        self.state
    }
}

impl Default for WorldStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
