//! Round outcomes: the result entered for each pairing once the round ends.

use crate::models::pairing::PairingId;
use serde::{Deserialize, Serialize};

/// How a scheduled pairing resolved.
///
/// The half-bye tags are corrections: the named player took a half-point bye
/// instead of playing, the game never happened, and nobody records a game.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundOutcome {
    Player1Win,
    Player2Win,
    Draw,
    HalfByePlayer1,
    HalfByePlayer2,
}

/// One entered result: which pairing, and how it resolved.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    pub pairing_id: PairingId,
    pub outcome: RoundOutcome,
}
