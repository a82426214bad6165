//! Bounded most-recent-first history of successful generations.
//!
//! Pure policy only: the caller owns the list and its storage. Restoring a
//! past entry into the form does not remove it here, and nothing
//! deduplicates; the list is a log, not a set.

use crate::GenerationResult;

/// Entries the demo keeps.
pub const MAX_HISTORY: usize = 5;

/// Prepend `result` and truncate to `max_size`.
///
/// `max_size = 0` yields an empty list.
pub fn record_result(
    history: &[GenerationResult],
    result: GenerationResult,
    max_size: usize,
) -> Vec<GenerationResult> {
    let mut next = Vec::with_capacity(history.len() + 1);
    next.push(result);
    next.extend(history.iter().cloned());
    next.truncate(max_size);
    next
}

/// The empty history.
pub fn clear_history() -> Vec<GenerationResult> {
    Vec::new()
}
