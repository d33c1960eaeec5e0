//! Pairing: one scheduled game, and the round pairing result triple.

use crate::models::standing::{PlayerId, Standing};
use crate::models::tournament::TournamentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a pairing.
pub type PairingId = Uuid;

/// A single scheduled game between two players of one round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pairing {
    pub id: PairingId,
    pub tournament_id: TournamentId,
    pub round: u32,
    pub player1_id: PlayerId,
    pub player1_name: String,
    pub player2_id: PlayerId,
    pub player2_name: String,
    pub created_at: DateTime<Utc>,
}

impl Pairing {
    /// Pair two players for a round; `player1` is the earlier player in sort
    /// order. Assigns a fresh id and stamps the creation time.
    pub fn new(round: u32, player1: &Standing, player2: &Standing) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id: player1.tournament_id,
            round,
            player1_id: player1.player_id,
            player1_name: player1.player_name.clone(),
            player2_id: player2.player_id,
            player2_name: player2.player_name.clone(),
            created_at: Utc::now(),
        }
    }
}

/// Everything produced for one round: scheduled games plus the two bye lists.
///
/// The bye lists are disjoint and duplicate-free. Every active, non-withdrawn
/// player of the round appears in exactly one pairing or exactly one bye
/// list; withdrawn players appear nowhere.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundPairings {
    pub tournament_id: TournamentId,
    pub round: u32,
    pub pairings: Vec<Pairing>,
    /// Players sitting out with a full bye (odd pool, or unpairable after a
    /// rematch displacement). Worth no points.
    pub forced_byes: Vec<PlayerId>,
    /// Players whose half-point bye for this round was assigned before
    /// pairing ran.
    pub half_point_byes: Vec<PlayerId>,
}
