//! Raw record to canonical track normalization.
//!
//! Fallback rules applied to missing or unusable source data:
//! - title -> [`UNKNOWN_TITLE`], artist name -> [`UNKNOWN_ARTIST`]
//! - track/artist ids, album title, cover and preview -> empty string
//! - duration and rank -> 0 (negative values are clamped to 0 as well)
//! - explicit flag -> false
//! - release date -> `None`; an unparseable date keeps `release_date` but
//!   yields `release_year = None` and `decade = None`

use super::raw::RawRecord;
use super::track::{decade_of, format_duration, Track, UNKNOWN_ARTIST, UNKNOWN_TITLE};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use tracing::debug;

/// Normalizes a whole batch. One track per record, in input order.
pub fn normalize(records: &[RawRecord]) -> Vec<Track> {
    records.iter().map(normalize_record).collect()
}

/// Normalizes a single raw record. Never fails.
pub fn normalize_record(raw: &RawRecord) -> Track {
    let artist = raw.artist.as_ref();
    let album = raw.album.as_ref();

    let duration_seconds = non_negative(raw.duration);

    let release_date = album
        .and_then(|a| a.release_date.as_deref())
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string);
    let release_year = release_date.as_deref().and_then(|date| {
        let year = parse_release_year(date);
        if year.is_none() {
            debug!("Ignoring unparseable release date {:?}", date);
        }
        year
    });

    Track {
        id: raw.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
        title: raw
            .title
            .clone()
            .unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
        artist: artist
            .and_then(|a| a.name.clone())
            .unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
        artist_id: artist
            .and_then(|a| a.id.as_ref())
            .map(|id| id.to_string())
            .unwrap_or_default(),
        album: album.and_then(|a| a.title.clone()).unwrap_or_default(),
        duration_seconds,
        duration_formatted: format_duration(duration_seconds),
        popularity: non_negative(raw.rank),
        explicit: raw.explicit_lyrics.unwrap_or(false),
        cover_url: album
            .and_then(|a| a.cover_medium.clone().or_else(|| a.cover.clone()))
            .unwrap_or_default(),
        preview_url: raw.preview.clone().unwrap_or_default(),
        release_date,
        release_year,
        decade: release_year.map(decade_of),
    }
}

/// Best-effort extraction of the calendar year from a release date string.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps, `YYYY-MM-DDTHH:MM:SS`,
/// `YYYY-MM` and bare `YYYY`. Anything else yields `None`. Year 0 is the
/// unknown-date placeholder some catalogs use (`0000-00-00`, `0000`) and is
/// rejected in every form.
pub fn parse_release_year(date: &str) -> Option<i32> {
    parse_year(date.trim()).filter(|&year| year != 0)
}

fn parse_year(date: &str) -> Option<i32> {
    if let Ok(d) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return Some(d.year());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
        return Some(dt.year());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.year());
    }
    if let Ok(d) = NaiveDate::parse_from_str(&format!("{}-01", date), "%Y-%m-%d") {
        return Some(d.year());
    }
    if date.len() == 4 && date.bytes().all(|b| b.is_ascii_digit()) {
        return date.parse().ok();
    }
    None
}

fn non_negative(value: Option<i64>) -> u64 {
    value.and_then(|v| u64::try_from(v).ok()).unwrap_or(0)
}
