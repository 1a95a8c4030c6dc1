//! HTTP client for end-to-end tests
//!
//! Wraps reqwest with one method per server endpoint.
//! When API routes change, update only this file.

use super::constants::*;
use reqwest::Response;
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    async fn get(&self, path: &str) -> Response {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("Request failed")
    }

    /// GET /
    pub async fn get_home(&self) -> Response {
        self.get("/").await
    }

    /// GET /api/genres
    pub async fn get_genres(&self) -> Response {
        self.get("/api/genres").await
    }

    /// GET /api/etl/{term}
    pub async fn run_etl(&self, term: &str) -> Response {
        self.get(&format!("/api/etl/{}", urlencoding::encode(term)))
            .await
    }

    /// GET /api/snapshot
    pub async fn get_snapshot(&self) -> Response {
        self.get("/api/snapshot").await
    }
}
