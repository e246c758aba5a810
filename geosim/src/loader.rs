use anyhow::Result;
use geosim_core::{scenario, WorldState};
use std::path::Path;

/// Load the starting state: a JSON scenario file if one was given,
/// otherwise the built-in January 1936 start seeded from the CLI.
pub fn load_initial_state(scenario_path: Option<&Path>, seed: u64) -> Result<WorldState> {
    match scenario_path {
        Some(path) => {
            log::info!("Loading scenario from {}", path.display());
            let state = scenario::load_file(path)?;
            log::info!(
                "Scenario loaded: turn {}, {} nations, {} active crises",
                state.turn,
                state.nations.len(),
                state.crises.active.len()
            );
            Ok(state)
        }
        None => {
            log::info!("Using built-in 1936 scenario (seed {seed})");
            Ok(scenario::world_1936(seed))
        }
    }
}
