//! Tournament business logic: pairing, byes, tiebreaks, standings.

mod bye;
mod pairing;
mod standings;
mod tiebreak;

pub use bye::select_forced_bye;
pub use pairing::generate_pairings;
pub use standings::{apply_round_results, assign_ranks, sort_standings};
pub use tiebreak::{compute_buchholz, refresh_buchholz_scores};
