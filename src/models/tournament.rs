//! Tournament id and the engine error type.

use crate::models::pairing::PairingId;
use crate::models::standing::PlayerId;
use uuid::Uuid;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Errors surfaced by pairing generation, result application, and the store.
///
/// Rematches and extra forced byes are deliberately absent: they are valid,
/// if suboptimal, pairing outcomes and are only logged.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Pairing was requested with an empty standings set.
    EmptyStandings,
    /// A result references a pairing id not in that round's pairing set.
    UnknownPairing(PairingId),
    /// A result outcome touches a player with no Standing in the set.
    InconsistentOutcome {
        pairing_id: PairingId,
        player_id: PlayerId,
    },
    /// Two results in one batch reference the same pairing.
    DuplicateResult(PairingId),
    /// No tournament registered under this id.
    UnknownTournament(TournamentId),
    /// Player not found in the tournament's standings.
    PlayerNotFound(PlayerId),
    /// The round's pairings were already generated.
    RoundAlreadyPaired(u32),
    /// The round's results were already applied.
    RoundAlreadyScored(u32),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::EmptyStandings => write!(f, "No players to pair"),
            TournamentError::UnknownPairing(id) => {
                write!(f, "No pairing {} in this round", id)
            }
            TournamentError::InconsistentOutcome {
                pairing_id,
                player_id,
            } => {
                write!(
                    f,
                    "Result for pairing {} names player {} with no standing",
                    pairing_id, player_id
                )
            }
            TournamentError::DuplicateResult(id) => {
                write!(f, "More than one result for pairing {}", id)
            }
            TournamentError::UnknownTournament(id) => write!(f, "No tournament {}", id),
            TournamentError::PlayerNotFound(id) => write!(f, "Player {} not in standings", id),
            TournamentError::RoundAlreadyPaired(round) => {
                write!(f, "Round {} already has pairings", round)
            }
            TournamentError::RoundAlreadyScored(round) => {
                write!(f, "Round {} results already recorded", round)
            }
        }
    }
}

impl std::error::Error for TournamentError {}
