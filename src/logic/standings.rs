//! Standings updater: fold a completed round's results back into standings.

use crate::logic::tiebreak::refresh_buchholz_scores;
use crate::models::{
    Pairing, PairingId, PlayerId, RoundOutcome, RoundResult, Standing, TournamentError,
};
use chrono::Utc;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Stable sort by `points` descending, then `buchholz_score` descending.
/// Ties keep their prior relative order. The pairing generator and the
/// updater share this comparator so pairing order and ranks always agree.
pub fn sort_standings(standings: &mut [Standing]) {
    standings.sort_by(|a, b| {
        b.points
            .partial_cmp(&a.points)
            .unwrap_or(Ordering::Equal)
            .then(
                b.buchholz_score
                    .partial_cmp(&a.buchholz_score)
                    .unwrap_or(Ordering::Equal),
            )
    });
}

/// Assign `rank = position + 1` in the current order.
pub fn assign_ranks(standings: &mut [Standing]) {
    for (index, standing) in standings.iter_mut().enumerate() {
        standing.rank = index as u32 + 1;
    }
}

/// Apply a completed round's results to the standings.
///
/// `pairings` is the persisted pairing set of the round the results belong
/// to. The whole batch is validated before anything is touched: every result
/// must reference a pairing from that set, reference it at most once, and
/// only touch players present in `standings`; otherwise the standings are
/// left exactly as they were. After the outcomes are applied, every
/// Buchholz score is refreshed against post-round points, the set is
/// re-sorted and re-ranked, and `last_updated` is stamped.
pub fn apply_round_results(
    standings: &mut [Standing],
    pairings: &[Pairing],
    results: &[RoundResult],
) -> Result<(), TournamentError> {
    validate_results(standings, pairings, results)?;

    for result in results {
        let pairing = pairings
            .iter()
            .find(|p| p.id == result.pairing_id)
            .ok_or(TournamentError::UnknownPairing(result.pairing_id))?;
        apply_outcome(standings, pairing, result.outcome)?;
    }

    refresh_buchholz_scores(standings);
    sort_standings(standings);
    assign_ranks(standings);
    let now = Utc::now();
    for standing in standings.iter_mut() {
        standing.last_updated = now;
    }

    log::debug!(
        "Applied {} result(s); {} standings re-ranked",
        results.len(),
        standings.len()
    );
    Ok(())
}

/// Check a result batch without mutating anything, so a malformed batch is
/// rejected all-or-nothing.
fn validate_results(
    standings: &[Standing],
    pairings: &[Pairing],
    results: &[RoundResult],
) -> Result<(), TournamentError> {
    let mut seen: HashSet<PairingId> = HashSet::new();
    for result in results {
        let pairing = pairings
            .iter()
            .find(|p| p.id == result.pairing_id)
            .ok_or(TournamentError::UnknownPairing(result.pairing_id))?;
        if !seen.insert(result.pairing_id) {
            return Err(TournamentError::DuplicateResult(result.pairing_id));
        }
        for player_id in touched_players(pairing, result.outcome) {
            if !standings.iter().any(|s| s.player_id == player_id) {
                return Err(TournamentError::InconsistentOutcome {
                    pairing_id: pairing.id,
                    player_id,
                });
            }
        }
    }
    Ok(())
}

/// Players an outcome mutates: both for games, only the named one for byes.
fn touched_players(pairing: &Pairing, outcome: RoundOutcome) -> Vec<PlayerId> {
    match outcome {
        RoundOutcome::Player1Win | RoundOutcome::Player2Win | RoundOutcome::Draw => {
            vec![pairing.player1_id, pairing.player2_id]
        }
        RoundOutcome::HalfByePlayer1 => vec![pairing.player1_id],
        RoundOutcome::HalfByePlayer2 => vec![pairing.player2_id],
    }
}

/// Apply a single outcome to the two (or one) players it touches.
/// A half bye is not a game: half a point and the round marker, nothing else.
fn apply_outcome(
    standings: &mut [Standing],
    pairing: &Pairing,
    outcome: RoundOutcome,
) -> Result<(), TournamentError> {
    let p1 = pairing.player1_id;
    let p2 = pairing.player2_id;
    match outcome {
        RoundOutcome::Player1Win => {
            standing_mut(standings, p1, pairing.id)?.record_win(p2);
            standing_mut(standings, p2, pairing.id)?.record_loss(p1);
        }
        RoundOutcome::Player2Win => {
            standing_mut(standings, p2, pairing.id)?.record_win(p1);
            standing_mut(standings, p1, pairing.id)?.record_loss(p2);
        }
        RoundOutcome::Draw => {
            standing_mut(standings, p1, pairing.id)?.record_draw(p2);
            standing_mut(standings, p2, pairing.id)?.record_draw(p1);
        }
        RoundOutcome::HalfByePlayer1 => {
            standing_mut(standings, p1, pairing.id)?.record_half_point_bye(pairing.round);
        }
        RoundOutcome::HalfByePlayer2 => {
            standing_mut(standings, p2, pairing.id)?.record_half_point_bye(pairing.round);
        }
    }
    Ok(())
}

/// Mutable standing lookup for a player named by a result.
fn standing_mut(
    standings: &mut [Standing],
    player_id: PlayerId,
    pairing_id: PairingId,
) -> Result<&mut Standing, TournamentError> {
    standings
        .iter_mut()
        .find(|s| s.player_id == player_id)
        .ok_or(TournamentError::InconsistentOutcome {
            pairing_id,
            player_id,
        })
}
