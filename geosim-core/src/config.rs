use serde::{Deserialize, Serialize};

/// Simulation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Compute a state checksum every N turns (0 = disabled).
    pub checksum_frequency: u32,
    /// Cap on prioritized turn-event summaries returned per turn.
    pub max_turn_events: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            checksum_frequency: 1,
            max_turn_events: 5,
        }
    }
}
