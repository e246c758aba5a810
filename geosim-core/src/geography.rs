//! Static land/sea adjacency between the simulated great powers.
//!
//! Coarse by design: the map has six AI nations plus the player, and the
//! decision engine only needs "who can plausibly pressure whom". The USA
//! is an ocean away from everyone and has no neighbors here.

/// Neighbors of a nation. Unknown nations have none.
pub fn neighbors(nation: &str) -> &'static [&'static str] {
    match nation {
        "germany" => &["france", "italy"],
        "france" => &["germany", "italy", "britain"],
        "britain" => &["france"],
        "italy" => &["france", "germany"],
        "japan" => &["soviet_union"],
        "soviet_union" => &["japan"],
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacency_is_symmetric() {
        let all = ["germany", "france", "britain", "italy", "japan", "soviet_union"];
        for nation in all {
            for neighbor in neighbors(nation) {
                assert!(
                    neighbors(neighbor).contains(&nation),
                    "{nation} -> {neighbor} is one-directional"
                );
            }
        }
    }

    #[test]
    fn test_player_has_no_land_neighbors() {
        assert!(neighbors("usa").is_empty());
    }
}
