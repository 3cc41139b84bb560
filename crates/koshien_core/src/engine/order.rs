//! Circular batting-order comparison.
//!
//! Within a half-inning the lineup rotates: if the recorded leadoff slot is 7,
//! true chronological order is 7, 8, 9, 1, 2... Keys lineup-sheet-before the
//! anchor are treated as having wrapped. This replaces the old "add 100 to
//! the numeric order" trick with an explicit anchor.

use std::cmp::Ordering;

use crate::models::OrderKey;

/// Compares two order keys in rotation order starting from `anchor`.
pub fn circular_cmp(a: OrderKey, b: OrderKey, anchor: OrderKey) -> Ordering {
    let wrap_a = a < anchor;
    let wrap_b = b < anchor;
    wrap_a.cmp(&wrap_b).then_with(|| a.cmp(&b))
}

/// Stable-sorts items by their order key in rotation order from `anchor`.
/// Stability preserves recorded order for repeat plate appearances of the
/// same slot within one half-inning.
pub fn sort_circular<T>(items: &mut [T], anchor: OrderKey, key: impl Fn(&T) -> OrderKey) {
    items.sort_by(|a, b| circular_cmp(key(a), key(b), anchor));
}
