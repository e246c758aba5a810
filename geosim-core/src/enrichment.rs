//! External enrichment seams.
//!
//! The leader roster can be decorated with portraits and lore fetched
//! from outside services. Both collaborators sit behind traits so the
//! core never depends on an HTTP stack, and both degrade: any failure
//! leaves the previous value in place and is reported to the log, never
//! to the turn loop.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("lookup failed: {0}")]
    Lookup(String),
    #[error("response missing expected field: {0}")]
    MissingField(&'static str),
}

/// Resolves a free-text identifier to a portrait image URL.
pub trait PortraitSource {
    fn portrait_url(&self, query: &str) -> Result<String, EnrichmentError>;
}

/// Produces freeform descriptive text for a named character.
/// Invoked only on explicit request, never during a turn transition.
pub trait LoreSource {
    fn lore(&self, name: &str) -> Result<String, EnrichmentError>;
}

/// A display entry for one world leader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderProfile {
    pub name: String,
    pub nation: String,
    pub portrait_url: Option<String>,
    pub lore: Option<String>,
}

impl LeaderProfile {
    pub fn new(name: &str, nation: &str) -> Self {
        Self {
            name: name.to_string(),
            nation: nation.to_string(),
            portrait_url: None,
            lore: None,
        }
    }

    /// Fetch and attach a portrait, keeping the existing value when the
    /// source fails.
    pub fn with_portrait(mut self, source: &dyn PortraitSource) -> Self {
        match source.portrait_url(&self.name) {
            Ok(url) => self.portrait_url = Some(url),
            Err(e) => {
                log::warn!("Portrait lookup for {} failed: {e}", self.name);
            }
        }
        self
    }

    /// Fetch and attach lore text, keeping the existing value when the
    /// source fails.
    pub fn with_lore(mut self, source: &dyn LoreSource) -> Self {
        match source.lore(&self.name) {
            Ok(text) => self.lore = Some(text),
            Err(e) => {
                log::warn!("Lore lookup for {} failed: {e}", self.name);
            }
        }
        self
    }
}

/// Build the roster from a snapshot: the player's leader plus every AI
/// nation's leader, in nation order.
pub fn leader_roster(state: &crate::state::WorldState) -> Vec<LeaderProfile> {
    let mut roster = vec![LeaderProfile::new(
        &state.player.record.leader,
        &state.player.nation,
    )];
    for (id, nation) in &state.nations {
        roster.push(LeaderProfile::new(&nation.leader, id));
    }
    roster
}
