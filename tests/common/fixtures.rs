//! Test fixture creation
//!
//! Writes the per-term JSON files read by the file-backed catalog source.

use super::constants::*;
use anyhow::Result;
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

fn reference_batch() -> Value {
    json!({
        "data": [
            {
                "id": 1,
                "title": "First",
                "duration": 200,
                "rank": 10,
                "explicit_lyrics": false,
                "artist": {"id": 100, "name": "A"},
                "album": {"id": 1000, "title": "Early", "cover_medium": "https://img/1", "release_date": "1999-05-01"}
            },
            {
                "id": 2,
                "title": "Second",
                "duration": 220,
                "rank": 20,
                "explicit_lyrics": true,
                "artist": {"id": 100, "name": "A"},
                "album": {"id": 1001, "title": "Later", "cover": "https://img/2", "release_date": "2001-01-01"}
            },
            {
                "id": 3,
                "title": "Third",
                "duration": 180,
                "rank": 50,
                "explicit_lyrics": false,
                "artist": {"id": 200, "name": "B"}
            }
        ],
        "total": 3
    })
}

fn messy_batch() -> Value {
    json!([
        {
            "id": "r-1",
            "title": "Loud",
            "duration": "245",
            "rank": "900",
            "explicit_lyrics": 1,
            "artist": {"name": "Riff"},
            "album": {"release_date": "not-a-date"}
        },
        {
            "id": 42,
            "duration": -5,
            "artist": "not an object",
            "album": {"release_date": "0000-00-00"}
        },
        "garbage entry"
    ])
}

fn top_batch() -> Value {
    let tracks: Vec<Value> = (1..=TOP_TRACK_COUNT)
        .map(|i| {
            json!({
                "id": i,
                "title": format!("Hit {}", i),
                "duration": 150 + i,
                "rank": 1000 * i,
                "explicit_lyrics": i % 4 == 0,
                "artist": {"id": i, "name": format!("Artist {}", i)},
                "album": {"release_date": format!("{}-06-01", 1960 + 5 * i)}
            })
        })
        .collect();
    json!({ "data": tracks, "total": TOP_TRACK_COUNT })
}

/// Creates a temporary data directory with one JSON file per fixture term.
pub fn create_test_data_dir() -> Result<TempDir> {
    let dir = TempDir::new()?;
    let write = |term: &str, body: String| fs::write(dir.path().join(format!("{}.json", term)), body);

    write(REFERENCE_TERM, reference_batch().to_string())?;
    write(MESSY_TERM, messy_batch().to_string())?;
    write("top", top_batch().to_string())?;
    write(EMPTY_TERM, json!({"data": [], "total": 0}).to_string())?;
    write(
        API_ERROR_TERM,
        json!({"error": {"type": "Exception", "message": "Quota limit exceeded", "code": 4}})
            .to_string(),
    )?;
    write(CORRUPT_TERM, "{\"data\": [".to_string())?;

    Ok(dir)
}
