//! Pairing generation: one round of Swiss pairings with bye handling and
//! rematch avoidance.

use crate::logic::bye::select_forced_bye;
use crate::logic::standings::sort_standings;
use crate::models::{Pairing, PlayerId, RoundPairings, Standing, TournamentError};

/// Generate the pairings for one round.
///
/// 1. Sort a working copy by points, then Buchholz.
/// 2. Partition: players with a half-point bye scheduled for `round` sit
///    out, withdrawn players are dropped entirely.
/// 3. If the remaining pool is odd, the forced-bye selector removes one
///    player and that player is recorded as byed for `round`.
/// 4. Walk the pool top down, pairing neighbours while skipping rematches;
///    when every remaining opponent is a rematch the pair stands anyway.
///
/// The only writes back into `standings` are the forced-bye round markers.
/// Rematches and extra byes are logged, never errors: a round always comes
/// out pairable.
pub fn generate_pairings(
    standings: &mut [Standing],
    round: u32,
) -> Result<RoundPairings, TournamentError> {
    if standings.is_empty() {
        return Err(TournamentError::EmptyStandings);
    }
    let tournament_id = standings[0].tournament_id;

    let mut sorted: Vec<Standing> = standings.to_vec();
    sort_standings(&mut sorted);

    // Partition before any pairing: half byes out first, withdrawn gone.
    let mut half_point_byes: Vec<PlayerId> = Vec::new();
    let mut pool: Vec<Standing> = Vec::new();
    for standing in sorted {
        if standing.withdrawn {
            continue;
        }
        if standing.has_bye_in(round) {
            half_point_byes.push(standing.player_id);
        } else {
            pool.push(standing);
        }
    }

    let mut forced_byes: Vec<Standing> = Vec::new();
    if pool.is_empty() {
        // Everyone was withdrawn or already byed; a round with no games.
        return Ok(RoundPairings {
            tournament_id,
            round,
            pairings: Vec::new(),
            forced_byes: Vec::new(),
            half_point_byes,
        });
    }
    if pool.len() % 2 == 1 {
        if let Some(selected) = select_forced_bye(&mut pool, round) {
            forced_byes.push(selected);
        }
    }

    let pairings = pair_pool(&mut pool, round, &mut forced_byes);

    // Write the forced-bye rounds back into the caller's standings.
    for selected in &forced_byes {
        if let Some(standing) = standings
            .iter_mut()
            .find(|s| s.player_id == selected.player_id)
        {
            standing.record_forced_bye(round);
        }
    }

    log::debug!(
        "Round {}: {} pairing(s), {} forced bye(s), {} half-point bye(s)",
        round,
        pairings.len(),
        forced_byes.len(),
        half_point_byes.len()
    );
    Ok(RoundPairings {
        tournament_id,
        round,
        pairings,
        forced_byes: forced_byes.into_iter().map(|s| s.player_id).collect(),
        half_point_byes,
    })
}

/// Pair an even-sized, sorted pool top down. The pool may still end up
/// producing an extra forced bye when a displaced player has faced every
/// remaining opponent.
fn pair_pool(pool: &mut Vec<Standing>, round: u32, forced_byes: &mut Vec<Standing>) -> Vec<Pairing> {
    let mut pairings = Vec::new();
    while !pool.is_empty() {
        let p1 = pool.remove(0);
        if pool.is_empty() {
            log::warn!(
                "Round {}: no opponent left for {}, extra forced bye",
                round,
                p1.player_name
            );
            forced_byes.push(byed(p1, round));
            break;
        }

        if !p1.has_faced(pool[0].player_id) {
            let p2 = pool.remove(0);
            pairings.push(Pairing::new(round, &p1, &p2));
            continue;
        }

        match find_fresh_opponent(&p1, pool) {
            Some(q_index) => {
                // Pair p1 with the first fresh opponent further down, then
                // try to re-pair the neighbour that got displaced.
                let q = pool.remove(q_index);
                pairings.push(Pairing::new(round, &p1, &q));
                let p2 = pool.remove(0);
                match find_fresh_opponent(&p2, pool) {
                    Some(r_index) => {
                        let r = pool.remove(r_index);
                        pairings.push(Pairing::new(round, &p2, &r));
                    }
                    None => {
                        log::warn!(
                            "Round {}: displaced {} has faced everyone left, extra forced bye",
                            round,
                            p2.player_name
                        );
                        forced_byes.push(byed(p2, round));
                    }
                }
            }
            None => {
                let p2 = pool.remove(0);
                log::warn!(
                    "Round {}: rematch {} vs {}, no alternative opponent",
                    round,
                    p1.player_name,
                    p2.player_name
                );
                pairings.push(Pairing::new(round, &p1, &p2));
            }
        }
    }
    pairings
}

fn find_fresh_opponent(player: &Standing, pool: &[Standing]) -> Option<usize> {
    pool.iter().position(|q| !player.has_faced(q.player_id))
}

fn byed(mut standing: Standing, round: u32) -> Standing {
    standing.record_forced_bye(round);
    standing
}
