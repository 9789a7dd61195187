//! Key selection over sorted rate tables.
//!
//! Every table keyed by a continuous value (grammage, quantity threshold)
//! goes through one of these two functions, so the fallback rules live in one
//! place.

use std::collections::BTreeMap;

/// A table keyed by quantity thresholds.
pub type ThresholdTable<V> = BTreeMap<u32, V>;

/// Entry of the smallest threshold `>= value`, or the largest threshold when
/// `value` exceeds all of them. `None` only for an empty table.
///
/// ```rust
/// use pressquote_core::rate_card::lookup::{at_or_above, ThresholdTable};
///
/// let table: ThresholdTable<f64> = [(100, 0.35), (300, 0.30)].into_iter().collect();
/// assert_eq!(at_or_above(&table, 1), Some((100, &0.35)));
/// assert_eq!(at_or_above(&table, 101), Some((300, &0.30)));
/// assert_eq!(at_or_above(&table, 5000), Some((300, &0.30)));
/// ```
pub fn at_or_above<V>(table: &BTreeMap<u32, V>, value: u32) -> Option<(u32, &V)> {
    table
        .range(value..)
        .next()
        .or_else(|| table.iter().next_back())
        .map(|(k, v)| (*k, v))
}

/// Entry whose key is numerically closest to `value`.
///
/// On a tie the lower key wins.
///
/// ```rust
/// use pressquote_core::rate_card::lookup::nearest;
/// use std::collections::BTreeMap;
///
/// let table: BTreeMap<u32, f64> = [(80, 1.15), (90, 1.00)].into_iter().collect();
/// assert_eq!(nearest(&table, 85), Some((80, &1.15)));
/// assert_eq!(nearest(&table, 86), Some((90, &1.00)));
/// assert_eq!(nearest(&table, 10), Some((80, &1.15)));
/// ```
pub fn nearest<V>(table: &BTreeMap<u32, V>, value: u32) -> Option<(u32, &V)> {
    let below = table.range(..=value).next_back();
    let above = table.range(value..).next();

    let picked = match (below, above) {
        (Some(b), Some(a)) => {
            if a.0 - value < value - b.0 {
                a
            } else {
                b
            }
        }
        (Some(b), None) => b,
        (None, Some(a)) => a,
        (None, None) => return None,
    };

    Some((*picked.0, picked.1))
}
