//! Historical/recent bar merging.

use tracing::debug;
use types::Bar;

/// Merge a historical series with freshly acquired bars.
///
/// The result is sorted ascending by timestamp with duplicate timestamps
/// collapsed to the later occurrence, so a re-downloaded week overwrites
/// whatever the historical file already had for those rows.
pub fn merge(historical: Vec<Bar>, recent: Vec<Bar>) -> Vec<Bar> {
    let mut all = historical;
    all.extend(recent);
    // Stable sort keeps historical-before-recent within equal timestamps.
    all.sort_by_key(|b| b.timestamp);

    let mut merged: Vec<Bar> = Vec::with_capacity(all.len());
    for bar in all {
        match merged.last_mut() {
            Some(prev) if prev.timestamp == bar.timestamp => *prev = bar,
            _ => merged.push(bar),
        }
    }

    debug!(rows = merged.len(), "merged bar series");
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn ts(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 2, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn bar(day: u32, hour: u32, close: f64) -> Bar {
        Bar::new(ts(day, hour), 1.0, 1.1, 0.9, close)
    }

    #[test]
    fn test_merge_sorts_and_interleaves() {
        let merged = merge(
            vec![bar(3, 0, 1.0), bar(3, 2, 1.2)],
            vec![bar(3, 1, 1.1), bar(3, 3, 1.3)],
        );
        let closes: Vec<f64> = merged.iter().map(|b| b.close).collect();
        assert_eq!(closes, vec![1.0, 1.1, 1.2, 1.3]);
    }

    #[test]
    fn test_duplicates_keep_last() {
        let merged = merge(
            vec![bar(3, 0, 1.0), bar(3, 1, 9.9)],
            vec![bar(3, 1, 1.1)],
        );
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[1].close, 1.1);
    }

    #[test]
    fn test_empty_sides() {
        assert_eq!(merge(vec![], vec![bar(3, 0, 1.0)]).len(), 1);
        assert_eq!(merge(vec![bar(3, 0, 1.0)], vec![]).len(), 1);
        assert!(merge(vec![], vec![]).is_empty());
    }
}
