//! In-memory tournament store: the reference source and sink for standings
//! and generated rounds.
//!
//! Work on one tournament is serialized on that tournament's own lock;
//! different tournaments proceed in parallel. The outer map lock is held
//! only long enough to look a record up.

use crate::logic::{apply_round_results, assign_ranks, generate_pairings, sort_standings};
use crate::models::{
    Pairing, PlayerId, RoundPairings, RoundResult, Standing, TournamentError, TournamentId,
};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

/// Everything the store keeps for one tournament.
#[derive(Debug, Default)]
struct TournamentRecord {
    standings: Vec<Standing>,
    rounds: BTreeMap<u32, RoundPairings>,
    /// Rounds whose results have been applied. A round goes in here once and
    /// its results can never be applied again.
    scored_rounds: BTreeSet<u32>,
}

/// Thread-safe store keyed by tournament id.
///
/// Every mutation builds the new standings on a clone and swaps the clone
/// in whole, so readers only ever observe a complete snapshot. A poisoned
/// lock is recovered for the same reason: the record behind it is always
/// a consistent snapshot, never a half-applied update.
#[derive(Debug, Default)]
pub struct TournamentStore {
    tournaments: RwLock<HashMap<TournamentId, Arc<Mutex<TournamentRecord>>>>,
}

impl TournamentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tournament with its initial standings. The standings are
    /// sorted and ranked on the way in, replacing any previous record under
    /// the same id.
    pub fn register_tournament(&self, tournament_id: TournamentId, mut standings: Vec<Standing>) {
        sort_standings(&mut standings);
        assign_ranks(&mut standings);
        let record = TournamentRecord {
            standings,
            rounds: BTreeMap::new(),
            scored_rounds: BTreeSet::new(),
        };
        let mut map = self
            .tournaments
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        map.insert(tournament_id, Arc::new(Mutex::new(record)));
        log::info!("Registered tournament {}", tournament_id);
    }

    fn record(
        &self,
        tournament_id: TournamentId,
    ) -> Result<Arc<Mutex<TournamentRecord>>, TournamentError> {
        let map = self
            .tournaments
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        map.get(&tournament_id)
            .cloned()
            .ok_or(TournamentError::UnknownTournament(tournament_id))
    }

    /// Current standings snapshot, in rank order.
    pub fn standings(&self, tournament_id: TournamentId) -> Result<Vec<Standing>, TournamentError> {
        let record = self.record(tournament_id)?;
        let guard = record.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.standings.clone())
    }

    /// Generate (or return the already generated) pairings for `round`.
    ///
    /// Calling this twice for the same round hands back the stored pairings
    /// unchanged, so retries never double-charge forced byes.
    pub fn generate_round(
        &self,
        tournament_id: TournamentId,
        round: u32,
    ) -> Result<RoundPairings, TournamentError> {
        let record = self.record(tournament_id)?;
        let mut guard = record.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = guard.rounds.get(&round) {
            log::debug!("Round {} already generated, returning stored pairings", round);
            return Ok(existing.clone());
        }
        let mut standings = guard.standings.clone();
        let round_pairings = generate_pairings(&mut standings, round)?;
        guard.standings = standings;
        guard.rounds.insert(round, round_pairings.clone());
        Ok(round_pairings)
    }

    /// Apply a round's results and return the re-ranked standings.
    ///
    /// Results must reference pairings stored for `round`; a batch that
    /// fails validation leaves the stored standings untouched. Each round
    /// takes exactly one successful submission: a resubmission is rejected
    /// so the same games can never be credited twice.
    pub fn record_round_results(
        &self,
        tournament_id: TournamentId,
        round: u32,
        results: &[RoundResult],
    ) -> Result<Vec<Standing>, TournamentError> {
        let record = self.record(tournament_id)?;
        let mut guard = record.lock().unwrap_or_else(PoisonError::into_inner);
        if guard.scored_rounds.contains(&round) {
            return Err(TournamentError::RoundAlreadyScored(round));
        }
        let pairings: Vec<Pairing> = guard
            .rounds
            .get(&round)
            .map(|r| r.pairings.clone())
            .unwrap_or_default();
        let mut standings = guard.standings.clone();
        apply_round_results(&mut standings, &pairings, results)?;
        guard.standings = standings;
        guard.scored_rounds.insert(round);
        Ok(guard.standings.clone())
    }

    /// Stored pairings for `round`, if that round was generated.
    pub fn round_pairings(
        &self,
        tournament_id: TournamentId,
        round: u32,
    ) -> Result<Option<RoundPairings>, TournamentError> {
        let record = self.record(tournament_id)?;
        let guard = record.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.rounds.get(&round).cloned())
    }

    /// Schedule a half-point bye for a player in a round not yet paired.
    ///
    /// The half point is granted at scheduling time; the player sits out
    /// when the round is generated. Rank refreshes with the next applied
    /// results. Once a round's pairings exist the player is already in one,
    /// so the request is rejected; a bye granted after pairing goes through
    /// the `HalfByePlayer1`/`HalfByePlayer2` outcomes instead.
    pub fn schedule_half_point_bye(
        &self,
        tournament_id: TournamentId,
        player_id: PlayerId,
        round: u32,
    ) -> Result<(), TournamentError> {
        let record = self.record(tournament_id)?;
        let mut guard = record.lock().unwrap_or_else(PoisonError::into_inner);
        if guard.rounds.contains_key(&round) {
            return Err(TournamentError::RoundAlreadyPaired(round));
        }
        let standing = guard
            .standings
            .iter_mut()
            .find(|s| s.player_id == player_id)
            .ok_or(TournamentError::PlayerNotFound(player_id))?;
        standing.record_half_point_bye(round);
        log::info!(
            "Scheduled half-point bye for {} in round {}",
            standing.player_name,
            round
        );
        Ok(())
    }

    /// Mark a player withdrawn (or reinstate them). Withdrawn players keep
    /// their standing but are never paired.
    pub fn set_withdrawn(
        &self,
        tournament_id: TournamentId,
        player_id: PlayerId,
        withdrawn: bool,
    ) -> Result<(), TournamentError> {
        let record = self.record(tournament_id)?;
        let mut guard = record.lock().unwrap_or_else(PoisonError::into_inner);
        let standing = guard
            .standings
            .iter_mut()
            .find(|s| s.player_id == player_id)
            .ok_or(TournamentError::PlayerNotFound(player_id))?;
        standing.withdrawn = withdrawn;
        log::info!(
            "Player {} withdrawn={} in tournament {}",
            standing.player_name,
            withdrawn,
            tournament_id
        );
        Ok(())
    }

    /// Drop a tournament from the store. Returns whether it existed.
    pub fn remove_tournament(&self, tournament_id: TournamentId) -> bool {
        let mut map = self
            .tournaments
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let removed = map.remove(&tournament_id).is_some();
        if removed {
            log::info!("Removed tournament {}", tournament_id);
        }
        removed
    }
}
