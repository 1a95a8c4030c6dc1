use serde::{Deserialize, Serialize};

/// Title used when the source record has none.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Artist name used when the source record has none.
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Canonical track, built once per raw record by the normalizer.
///
/// Every field is present. Missing source data is represented by the
/// sentinels documented on each field, never by a missing value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Source identifier, empty if the source had none.
    pub id: String,
    pub title: String,
    pub artist: String,
    /// Source artist identifier, empty if the source had none.
    pub artist_id: String,
    /// Album title, empty if the source had no album.
    pub album: String,
    pub duration_seconds: u64,
    /// `m:ss`, always derived from `duration_seconds`.
    pub duration_formatted: String,
    /// Catalog rank, 0 when absent.
    pub popularity: u64,
    pub explicit: bool,
    pub cover_url: String,
    pub preview_url: String,
    pub release_date: Option<String>,
    pub release_year: Option<i32>,
    pub decade: Option<i32>,
}

/// Formats a duration in seconds as `minutes:seconds`, seconds zero-padded.
pub fn format_duration(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Floors a year to its decade (1999 -> 1990, 2000 -> 2000).
pub fn decade_of(year: i32) -> i32 {
    year.div_euclid(10) * 10
}
