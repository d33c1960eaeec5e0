//! Buchholz tiebreak: sum of opponents' current points.

use crate::models::{PlayerId, Standing};

/// Sum of the current `points` of every entry in the player's
/// `opponents_faced`.
///
/// Opponents missing from `standings` (e.g. withdrawn and purged) contribute
/// 0; an opponent faced twice counts once per game. Returns 0.0 for a player
/// with no recorded opponents, or for a player id not in the set.
pub fn compute_buchholz(player_id: PlayerId, standings: &[Standing]) -> f64 {
    let player = match standings.iter().find(|s| s.player_id == player_id) {
        Some(p) => p,
        None => return 0.0,
    };
    player
        .opponents_faced
        .iter()
        .filter_map(|opponent| standings.iter().find(|s| s.player_id == *opponent))
        .map(|opponent| opponent.points)
        .sum()
}

/// Refresh every player's `buchholz_score` from the full set.
///
/// Works from a snapshot so every score is computed against the same points
/// regardless of update order. Run once per round after results are applied,
/// never patched incrementally.
pub fn refresh_buchholz_scores(standings: &mut [Standing]) {
    let snapshot = standings.to_vec();
    for standing in standings.iter_mut() {
        standing.buchholz_score = compute_buchholz(standing.player_id, &snapshot);
    }
}
