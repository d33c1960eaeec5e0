//! Standing: one player's cumulative record within one tournament.

use crate::models::tournament::TournamentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Unique identifier for a player (used in pairings and lookups).
pub type PlayerId = Uuid;

/// Points for a won game.
pub const WIN_POINTS: f64 = 1.0;
/// Points for each side of a drawn game.
pub const DRAW_POINTS: f64 = 0.5;
/// Points for an administratively assigned half-point bye.
pub const HALF_BYE_POINTS: f64 = 0.5;

/// One player's state within one tournament.
///
/// Created once per player when the tournament roster is registered, then
/// mutated only by the standings updater (plus forced-bye bookkeeping during
/// pairing). `games_played == wins + losses + draws` always holds; byes are
/// not games and never touch those counters or `opponents_faced`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub tournament_id: TournamentId,
    pub player_id: PlayerId,
    pub player_name: String,
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    /// 1 per win, 0.5 per draw or half-point bye, 0 per loss or forced bye.
    pub points: f64,
    /// Sum of the current points of every opponent faced; refreshed from the
    /// full standings set every round, never patched incrementally.
    pub buchholz_score: f64,
    /// One entry per completed game, in order played. Byes never append.
    pub opponents_faced: Vec<PlayerId>,
    /// Rounds in which this player received any kind of bye.
    pub bye_rounds: BTreeSet<u32>,
    /// 1-based position after sorting; 0 until ranked for the first time.
    pub rank: u32,
    /// Withdrawn players are excluded from pairing but kept for display.
    pub withdrawn: bool,
    pub last_updated: DateTime<Utc>,
}

impl Standing {
    /// Create a zeroed standing for one player of the given tournament.
    pub fn new(
        tournament_id: TournamentId,
        player_id: PlayerId,
        name: impl Into<String>,
    ) -> Self {
        Self {
            tournament_id,
            player_id,
            player_name: name.into(),
            games_played: 0,
            wins: 0,
            losses: 0,
            draws: 0,
            points: 0.0,
            buchholz_score: 0.0,
            opponents_faced: Vec::new(),
            bye_rounds: BTreeSet::new(),
            rank: 0,
            withdrawn: false,
            last_updated: Utc::now(),
        }
    }

    /// Whether this player has already played `opponent`.
    pub fn has_faced(&self, opponent: PlayerId) -> bool {
        self.opponents_faced.contains(&opponent)
    }

    /// Whether this player holds a bye (of either kind) for `round`.
    pub fn has_bye_in(&self, round: u32) -> bool {
        self.bye_rounds.contains(&round)
    }

    /// Record a won game against `opponent`.
    pub fn record_win(&mut self, opponent: PlayerId) {
        self.wins += 1;
        self.games_played += 1;
        self.points += WIN_POINTS;
        self.opponents_faced.push(opponent);
    }

    /// Record a lost game against `opponent`.
    pub fn record_loss(&mut self, opponent: PlayerId) {
        self.losses += 1;
        self.games_played += 1;
        self.opponents_faced.push(opponent);
    }

    /// Record a drawn game against `opponent`.
    pub fn record_draw(&mut self, opponent: PlayerId) {
        self.draws += 1;
        self.games_played += 1;
        self.points += DRAW_POINTS;
        self.opponents_faced.push(opponent);
    }

    /// Record a half-point bye for `round`. No game is recorded.
    pub fn record_half_point_bye(&mut self, round: u32) {
        self.points += HALF_BYE_POINTS;
        self.bye_rounds.insert(round);
    }

    /// Record a forced (full) bye for `round`. Worth no points.
    pub fn record_forced_bye(&mut self, round: u32) {
        self.bye_rounds.insert(round);
    }
}
