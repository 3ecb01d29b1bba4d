//! Score ordering of collected modules

use crate::crawl::Entry;
use core::cmp::Reverse;

/// Order entries by descending score.
///
/// The sort is stable, so entries with equal scores keep their discovery order.
#[must_use]
pub fn rank(mut entries: Vec<Entry>) -> Vec<Entry> {
    entries.sort_by_key(|entry| Reverse(entry.score()));
    entries
}
