//! Batch statistics computed from normalized tracks.
//!
//! All rounded figures (artist average popularity, average duration,
//! explicit percentage) use round-half-up on non-negative integers, computed
//! without floating point so results are exact and reproducible.
//!
//! Artists with the same average popularity keep the order in which they
//! first appear in the input.

use crate::catalog::Track;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Maximum number of artists reported in [`Stats::top_artists`].
pub const TOP_ARTISTS_LIMIT: usize = 10;

/// Per-artist summary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistRollup {
    pub name: String,
    pub track_count: u64,
    pub avg_popularity: u64,
}

/// Summary of one batch of tracks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_tracks: u64,
    pub top_artists: Vec<ArtistRollup>,
    /// Decade -> number of tracks. Tracks without a decade are not counted.
    pub decade_histogram: BTreeMap<i32, u64>,
    pub avg_duration_seconds: u64,
    pub explicit_count: u64,
    pub explicit_percent: u64,
}

struct RollupAccumulator<'a> {
    name: &'a str,
    track_count: u64,
    popularity_sum: u128,
}

impl<'a> RollupAccumulator<'a> {
    fn new(name: &'a str) -> Self {
        Self {
            name,
            track_count: 0,
            popularity_sum: 0,
        }
    }

    fn add(&mut self, popularity: u64) {
        self.track_count += 1;
        self.popularity_sum += u128::from(popularity);
    }

    fn finish(self) -> ArtistRollup {
        ArtistRollup {
            name: self.name.to_string(),
            track_count: self.track_count,
            avg_popularity: rounded_div(self.popularity_sum, u128::from(self.track_count)),
        }
    }
}

/// Computes the statistics for a batch.
///
/// Returns `None` for an empty batch, there is nothing to average.
pub fn aggregate(tracks: &[Track]) -> Option<Stats> {
    if tracks.is_empty() {
        return None;
    }
    let total_tracks = tracks.len() as u64;

    // Widened so that extreme upstream values cannot overflow the sum
    let duration_sum: u128 = tracks.iter().map(|t| u128::from(t.duration_seconds)).sum();
    let explicit_count = tracks.iter().filter(|t| t.explicit).count() as u64;

    Some(Stats {
        total_tracks,
        top_artists: top_artists(tracks, TOP_ARTISTS_LIMIT),
        decade_histogram: decade_histogram(tracks),
        avg_duration_seconds: rounded_div(duration_sum, u128::from(total_tracks)),
        explicit_count,
        explicit_percent: rounded_div(u128::from(explicit_count) * 100, u128::from(total_tracks)),
    })
}

/// Groups tracks by exact artist name and returns the `limit` artists with
/// the highest average popularity.
pub fn top_artists(tracks: &[Track], limit: usize) -> Vec<ArtistRollup> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<RollupAccumulator> = Vec::new();

    for track in tracks {
        let slot = *index.entry(track.artist.as_str()).or_insert_with(|| {
            groups.push(RollupAccumulator::new(&track.artist));
            groups.len() - 1
        });
        groups[slot].add(track.popularity);
    }

    let mut rollups: Vec<ArtistRollup> = groups
        .into_iter()
        .map(RollupAccumulator::finish)
        .collect();
    // Stable: ties stay in first-appearance order
    rollups.sort_by(|a, b| b.avg_popularity.cmp(&a.avg_popularity));
    rollups.truncate(limit);
    rollups
}

/// Counts tracks per release decade, skipping tracks without one.
pub fn decade_histogram(tracks: &[Track]) -> BTreeMap<i32, u64> {
    let mut histogram = BTreeMap::new();
    for decade in tracks.iter().filter_map(|t| t.decade) {
        *histogram.entry(decade).or_insert(0) += 1;
    }
    histogram
}

/// `numerator / denominator` rounded half up. `denominator` must be non-zero.
///
/// Callers pass sums of `u64` values divided by their count, so the mean
/// always fits back into a `u64`; the conversion saturates regardless.
fn rounded_div(numerator: u128, denominator: u128) -> u64 {
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    let rounded = if remainder * 2 >= denominator {
        quotient + 1
    } else {
        quotient
    };
    u64::try_from(rounded).unwrap_or(u64::MAX)
}
