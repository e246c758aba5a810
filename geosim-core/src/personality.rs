//! Static nation personality profiles.
//!
//! Four traits in 0-100 drive the decision engine. The table is fixed
//! game content; nations without an entry use [`Personality::DEFAULT`]
//! (all traits 50). [`validate`] surfaces which nations fall back to the
//! default so a scenario author can see it at load time instead of
//! discovering it in play.

use crate::fixed::Fixed;
use crate::state::WorldState;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Personality {
    pub aggression: Fixed,
    pub opportunism: Fixed,
    pub rationality: Fixed,
    pub ideology: Fixed,
}

impl Personality {
    /// Profile for nations absent from the table.
    pub const DEFAULT: Personality = Personality {
        aggression: Fixed::from_int(50),
        opportunism: Fixed::from_int(50),
        rationality: Fixed::from_int(50),
        ideology: Fixed::from_int(50),
    };

    const fn new(aggression: i64, opportunism: i64, rationality: i64, ideology: i64) -> Self {
        Self {
            aggression: Fixed::from_int(aggression),
            opportunism: Fixed::from_int(opportunism),
            rationality: Fixed::from_int(rationality),
            ideology: Fixed::from_int(ideology),
        }
    }
}

/// Personality profile for a nation id.
pub fn profile(nation: &str) -> Personality {
    match nation {
        "germany" => Personality::new(85, 90, 60, 95),
        "britain" => Personality::new(30, 50, 80, 40),
        "france" => Personality::new(25, 40, 70, 35),
        "japan" => Personality::new(80, 85, 65, 85),
        "soviet_union" => Personality::new(70, 75, 75, 90),
        "italy" => Personality::new(65, 80, 50, 70),
        _ => Personality::DEFAULT,
    }
}

/// Nations present in the world that will use the default profile.
pub fn validate(state: &WorldState) -> Vec<String> {
    state
        .nations
        .keys()
        .filter(|id| profile(id) == Personality::DEFAULT)
        .cloned()
        .collect()
}
