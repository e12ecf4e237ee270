//! Trading-session label vocabulary.
//!
//! The label set is closed: four plain sessions, three overlaps, and a
//! `None` fallback. The canonical snake_case names double as the one-hot
//! indicator column names, so they are part of the output contract and must
//! not change.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Market-session category for a single row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionLabel {
    #[serde(rename = "sydney")]
    Sydney,
    #[serde(rename = "tokyo")]
    Tokyo,
    #[serde(rename = "london")]
    London,
    #[serde(rename = "new_york")]
    NewYork,
    #[serde(rename = "overlap_sydney_tokyo")]
    OverlapSydneyTokyo,
    #[serde(rename = "overlap_tokyo_london")]
    OverlapTokyoLondon,
    #[serde(rename = "overlap_london_newyork")]
    OverlapLondonNewYork,
    /// Fallback for times matching no window. Unreachable while the session
    /// tables cover the full day, kept as a safety net.
    #[serde(rename = "none")]
    None,
}

impl SessionLabel {
    /// Every label, in the fixed order used for one-hot encoding.
    pub const ALL: [SessionLabel; 8] = [
        SessionLabel::Sydney,
        SessionLabel::Tokyo,
        SessionLabel::London,
        SessionLabel::NewYork,
        SessionLabel::OverlapSydneyTokyo,
        SessionLabel::OverlapTokyoLondon,
        SessionLabel::OverlapLondonNewYork,
        SessionLabel::None,
    ];

    /// Canonical snake_case name, also the indicator column name.
    pub fn as_str(self) -> &'static str {
        match self {
            SessionLabel::Sydney => "sydney",
            SessionLabel::Tokyo => "tokyo",
            SessionLabel::London => "london",
            SessionLabel::NewYork => "new_york",
            SessionLabel::OverlapSydneyTokyo => "overlap_sydney_tokyo",
            SessionLabel::OverlapTokyoLondon => "overlap_tokyo_london",
            SessionLabel::OverlapLondonNewYork => "overlap_london_newyork",
            SessionLabel::None => "none",
        }
    }

    /// Check if this is an overlap label.
    pub fn is_overlap(self) -> bool {
        matches!(
            self,
            SessionLabel::OverlapSydneyTokyo
                | SessionLabel::OverlapTokyoLondon
                | SessionLabel::OverlapLondonNewYork
        )
    }
}

impl fmt::Display for SessionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
