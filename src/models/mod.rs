//! Data structures for the pairing engine: standings, pairings, outcomes.

mod outcome;
mod pairing;
mod standing;
mod tournament;

pub use outcome::{RoundOutcome, RoundResult};
pub use pairing::{Pairing, PairingId, RoundPairings};
pub use standing::{PlayerId, Standing, DRAW_POINTS, HALF_BYE_POINTS, WIN_POINTS};
pub use tournament::{TournamentError, TournamentId};
