//! Numeric trivia client
//!
//! Fetches a short fact about a number from the trivia service and degrades
//! to the configured fallback on any failure.

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::config::FactConfig;
use crate::logger;

#[derive(Debug, Error)]
pub enum FactError {
    #[error("failed to build HTTP client: {0}")]
    Client(reqwest::Error),
    #[error("request failed: {0}")]
    Request(reqwest::Error),
    #[error("trivia service returned HTTP {0}")]
    Status(u16),
    #[error("malformed trivia payload: {0}")]
    Decode(reqwest::Error),
    #[error("trivia payload has no text")]
    EmptyText,
}

/// Structured body returned by the trivia service when `?json` is requested
#[derive(Debug, Deserialize)]
struct FactPayload {
    text: String,
}

/// Shared client for the trivia service. Cheap to clone.
#[derive(Debug, Clone)]
pub struct FunFactClient {
    client: reqwest::Client,
    base_url: String,
    topic: String,
    fallback: Option<String>,
}

impl FunFactClient {
    /// Build the client. Lookups never outlive `request_budget`, even when
    /// `timeout_ms` is 0.
    pub fn new(config: &FactConfig, request_budget: Duration) -> Result<Self, FactError> {
        let timeout = match config.timeout_ms {
            0 => request_budget,
            ms => Duration::from_millis(ms).min(request_budget),
        };
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FactError::Client)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            topic: config.topic.clone(),
            fallback: config.fallback_text.clone(),
        })
    }

    /// URL of the structured fact for `n`
    pub fn url_for(&self, n: i64) -> String {
        format!("{}/{n}/{}?json", self.base_url, self.topic)
    }

    /// Fetch the fact text for `n`, surfacing every failure
    pub async fn fetch(&self, n: i64) -> Result<String, FactError> {
        let response = self
            .client
            .get(self.url_for(n))
            .send()
            .await
            .map_err(FactError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FactError::Status(status.as_u16()));
        }

        let payload: FactPayload = response.json().await.map_err(FactError::Decode)?;
        let text = payload.text.trim();
        if text.is_empty() {
            return Err(FactError::EmptyText);
        }
        Ok(text.to_string())
    }

    /// Fetch the fact text for `n`, substituting the fallback on failure.
    ///
    /// Never retried.
    pub async fn fun_fact(&self, n: i64) -> Option<String> {
        match self.fetch(n).await {
            Ok(text) => Some(text),
            Err(e) => {
                logger::log_warning(&format!("Fun fact lookup for {n} failed: {e}"));
                self.fallback.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::closed_port_url;
    use httpmock::prelude::*;
    use serde_json::json;

    const BUDGET: Duration = Duration::from_secs(30);

    fn client_for(base_url: String) -> FunFactClient {
        FunFactClient::new(
            &FactConfig {
                base_url,
                timeout_ms: 500,
                ..FactConfig::default()
            },
            BUDGET,
        )
        .unwrap()
    }

    #[test]
    fn test_url_for() {
        let client = client_for("http://numbers.test/".to_string());
        assert_eq!(client.url_for(153), "http://numbers.test/153/math?json");
        assert_eq!(client.url_for(-4), "http://numbers.test/-4/math?json");
    }

    #[tokio::test]
    async fn test_fetch_extracts_text() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/153/math");
                then.status(200).json_body(json!({
                    "text": "153 is a narcissistic number.",
                    "number": 153,
                    "found": true,
                    "type": "math"
                }));
            })
            .await;

        let client = client_for(server.base_url());
        let fact = client.fetch(153).await.unwrap();
        assert_eq!(fact, "153 is a narcissistic number.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/7/math");
                then.status(503);
            })
            .await;

        let client = client_for(server.base_url());
        assert!(matches!(client.fetch(7).await, Err(FactError::Status(503))));
        assert_eq!(client.fun_fact(7).await, None);
    }

    #[tokio::test]
    async fn test_malformed_body_falls_back() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/8/math");
                then.status(200).body("8 is the first cube.");
            })
            .await;

        let client = client_for(server.base_url());
        assert!(matches!(client.fetch(8).await, Err(FactError::Decode(_))));
        assert_eq!(client.fun_fact(8).await, None);
    }

    #[tokio::test]
    async fn test_empty_text_is_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/9/math");
                then.status(200).json_body(json!({"text": "  "}));
            })
            .await;

        let client = client_for(server.base_url());
        assert!(matches!(client.fetch(9).await, Err(FactError::EmptyText)));
    }

    #[tokio::test]
    async fn test_unreachable_service_uses_fallback_text() {
        let client = FunFactClient::new(
            &FactConfig {
                base_url: closed_port_url(),
                timeout_ms: 500,
                fallback_text: Some("No fun fact available.".to_string()),
                ..FactConfig::default()
            },
            BUDGET,
        )
        .unwrap();

        assert!(matches!(client.fetch(1).await, Err(FactError::Request(_))));
        assert_eq!(
            client.fun_fact(1).await.as_deref(),
            Some("No fun fact available.")
        );
    }

    #[tokio::test]
    async fn test_slow_service_times_out() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/5/math");
                then.status(200)
                    .json_body(json!({"text": "5 is prime."}))
                    .delay(Duration::from_secs(2));
            })
            .await;

        let client = FunFactClient::new(
            &FactConfig {
                base_url: server.base_url(),
                timeout_ms: 100,
                ..FactConfig::default()
            },
            BUDGET,
        )
        .unwrap();
        assert_eq!(client.fun_fact(5).await, None);
    }

    #[tokio::test]
    async fn test_zero_timeout_still_capped_by_request_budget() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/12/math");
                then.status(200)
                    .json_body(json!({"text": "12 is a dozen."}))
                    .delay(Duration::from_secs(3));
            })
            .await;

        let client = FunFactClient::new(
            &FactConfig {
                base_url: server.base_url(),
                timeout_ms: 0,
                ..FactConfig::default()
            },
            Duration::from_millis(200),
        )
        .unwrap();

        let started = std::time::Instant::now();
        assert!(matches!(client.fetch(12).await, Err(FactError::Request(_))));
        assert!(started.elapsed() < Duration::from_secs(2));
    }
}
