//! End-to-end tests for the ETL trigger endpoint
//!
//! Covers normalization and aggregation as seen through the HTTP API, genre
//! preset resolution and upstream failures.

mod common;

use common::{
    TestClient, TestServer, ALL_PRESET_ID, API_ERROR_TERM, CORRUPT_TERM, EMPTY_TERM,
    MESSY_TERM, MISSING_TERM, REFERENCE_AVG_DURATION, REFERENCE_EXPLICIT_COUNT,
    REFERENCE_EXPLICIT_PERCENT, REFERENCE_TERM, REFERENCE_TOTAL_TRACKS, TOP_TRACK_COUNT,
};
use reqwest::StatusCode;
use serde_json::{json, Value};

// =============================================================================
// Reference Scenario
// =============================================================================

#[tokio::test]
async fn test_etl_reference_batch_stats() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.run_etl(REFERENCE_TERM).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);

    let stats = &body["data"]["stats"];
    assert_eq!(stats["totalTracks"], REFERENCE_TOTAL_TRACKS);
    assert_eq!(
        stats["topArtists"],
        json!([
            {"name": "B", "trackCount": 1, "avgPopularity": 50},
            {"name": "A", "trackCount": 2, "avgPopularity": 15}
        ])
    );
    assert_eq!(stats["decadeHistogram"], json!({"1990": 1, "2000": 1}));
    assert_eq!(stats["avgDurationSeconds"], REFERENCE_AVG_DURATION);
    assert_eq!(stats["explicitCount"], REFERENCE_EXPLICIT_COUNT);
    assert_eq!(stats["explicitPercent"], REFERENCE_EXPLICIT_PERCENT);
}

#[tokio::test]
async fn test_etl_tracks_are_normalized_in_order() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let body: Value = client.run_etl(REFERENCE_TERM).await.json().await.unwrap();
    let tracks = body["data"]["tracks"].as_array().unwrap();

    let ids: Vec<&str> = tracks.iter().map(|t| t["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);

    assert_eq!(tracks[0]["durationFormatted"], "3:20");
    assert_eq!(tracks[0]["releaseYear"], 1999);
    assert_eq!(tracks[0]["decade"], 1990);
    assert_eq!(tracks[0]["coverUrl"], "https://img/1");
    // cover_medium absent, falls back to cover
    assert_eq!(tracks[1]["coverUrl"], "https://img/2");

    // No album at all
    assert_eq!(tracks[2]["album"], "");
    assert_eq!(tracks[2]["releaseDate"], Value::Null);
    assert_eq!(tracks[2]["releaseYear"], Value::Null);
    assert_eq!(tracks[2]["decade"], Value::Null);
}

// =============================================================================
// Lenient Input
// =============================================================================

#[tokio::test]
async fn test_etl_messy_records_fall_back_to_defaults() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.run_etl(MESSY_TERM).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    let tracks = body["data"]["tracks"].as_array().unwrap();
    // The non-object entry is skipped
    assert_eq!(tracks.len(), 2);

    assert_eq!(tracks[0]["id"], "r-1");
    assert_eq!(tracks[0]["durationSeconds"], 245);
    assert_eq!(tracks[0]["durationFormatted"], "4:05");
    assert_eq!(tracks[0]["popularity"], 900);
    assert_eq!(tracks[0]["explicit"], true);
    assert_eq!(tracks[0]["releaseDate"], "not-a-date");
    assert_eq!(tracks[0]["releaseYear"], Value::Null);

    assert_eq!(tracks[1]["id"], "42");
    assert_eq!(tracks[1]["title"], "Unknown Title");
    assert_eq!(tracks[1]["artist"], "Unknown Artist");
    assert_eq!(tracks[1]["durationSeconds"], 0);
    assert_eq!(tracks[1]["durationFormatted"], "0:00");
    assert_eq!(tracks[1]["popularity"], 0);
    assert_eq!(tracks[1]["decade"], Value::Null);

    let stats = &body["data"]["stats"];
    assert_eq!(stats["totalTracks"], 2);
    assert_eq!(stats["decadeHistogram"], json!({}));
    assert_eq!(stats["explicitPercent"], 50);
}

#[tokio::test]
async fn test_etl_empty_batch_has_null_stats() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.run_etl(EMPTY_TERM).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["tracks"], json!([]));
    assert_eq!(body["data"]["stats"], Value::Null);
}

// =============================================================================
// Genre Presets
// =============================================================================

#[tokio::test]
async fn test_all_preset_resolves_to_top_chart() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.run_etl(ALL_PRESET_ID).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["term"], "top");
    assert_eq!(
        body["data"]["tracks"].as_array().unwrap().len(),
        TOP_TRACK_COUNT
    );

    // Twelve distinct artists, only ten make the list
    let top_artists = body["data"]["stats"]["topArtists"].as_array().unwrap();
    assert_eq!(top_artists.len(), 10);
    assert_eq!(top_artists[0]["name"], "Artist 12");
    let popularity: Vec<u64> = top_artists
        .iter()
        .map(|a| a["avgPopularity"].as_u64().unwrap())
        .collect();
    assert!(popularity.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn test_get_genres() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.get_genres().await;
    assert_eq!(response.status(), StatusCode::OK);

    let genres: Vec<Value> = response.json().await.unwrap();
    let ids: Vec<&str> = genres.iter().map(|g| g["id"].as_str().unwrap()).collect();
    assert_eq!(
        ids,
        vec!["all", "pop", "rock", "rap", "electronic", "jazz", "classical", "rnb"]
    );
    assert_eq!(genres[0]["query"], "top");
}

// =============================================================================
// Upstream Failures
// =============================================================================

#[tokio::test]
async fn test_etl_upstream_failures_return_bad_gateway() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    for term in [MISSING_TERM, API_ERROR_TERM, CORRUPT_TERM] {
        let response = client.run_etl(term).await;
        assert_eq!(
            response.status(),
            StatusCode::BAD_GATEWAY,
            "Unexpected status for '{}'",
            term
        );

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["success"], false);
        assert!(body["error"].is_string());
        assert!(body.get("data").is_none());
    }
}

#[tokio::test]
async fn test_etl_api_error_message_is_forwarded() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let body: Value = client.run_etl(API_ERROR_TERM).await.json().await.unwrap();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Quota limit exceeded"));
}
