//! Swiss-system tournament pairing and standings engine.
//!
//! The logic layer computes rounds over caller-owned standings: pairing with
//! rematch avoidance, forced and half-point byes, result application with
//! Buchholz tiebreaks and re-ranking. [`TournamentStore`] wraps the same
//! functions in an in-memory store that serializes all work per tournament;
//! different tournaments never block each other.
//!
//! Callers that persist standings themselves must uphold the same contract
//! the store does: one writer at a time per tournament, and every write a
//! complete snapshot.

pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    apply_round_results, assign_ranks, compute_buchholz, generate_pairings,
    refresh_buchholz_scores, select_forced_bye, sort_standings,
};
pub use models::{
    Pairing, PairingId, PlayerId, RoundOutcome, RoundPairings, RoundResult, Standing,
    TournamentError, TournamentId, DRAW_POINTS, HALF_BYE_POINTS, WIN_POINTS,
};
pub use store::TournamentStore;
