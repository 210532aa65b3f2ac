//! Thin `reqwest` client for the essay grader API.

use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

pub struct TestClient {
    client: reqwest::Client,
    base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub async fn health(&self) -> reqwest::Result<HealthResponse> {
        self.client
            .get(format!("{}/healthz", self.base_url))
            .send()
            .await?
            .json()
            .await
    }

    pub async fn index(&self) -> reqwest::Result<reqwest::Response> {
        self.client.get(format!("{}/", self.base_url)).send().await
    }

    pub async fn analyze(&self, text: &str, context: &str) -> reqwest::Result<reqwest::Response> {
        self.analyze_raw(json!({"text": text, "context": context}))
            .await
    }

    pub async fn analyze_raw(&self, body: Value) -> reqwest::Result<reqwest::Response> {
        self.client
            .post(format!("{}/analyze", self.base_url))
            .json(&body)
            .send()
            .await
    }
}
