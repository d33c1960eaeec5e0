//! Forced-bye selection for odd pairing pools.

use crate::models::Standing;

/// Pick the forced-bye player out of an already-sorted pool.
///
/// Prefers the lowest-ranked (last in sort order) player who has never had a
/// bye of any kind; if every player has had one, takes the lowest-ranked
/// player overall. The selected player is removed from the pool and returned
/// with the bye round recorded. Deterministic given identical pool order.
/// Returns `None` only for an empty pool.
pub fn select_forced_bye(pool: &mut Vec<Standing>, round: u32) -> Option<Standing> {
    if pool.is_empty() {
        return None;
    }
    let index = pool
        .iter()
        .rposition(|s| s.bye_rounds.is_empty())
        .unwrap_or(pool.len() - 1);
    let mut selected = pool.remove(index);
    selected.record_forced_bye(round);
    Some(selected)
}
