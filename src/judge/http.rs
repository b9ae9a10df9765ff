//! HTTP judge client implementation.
//!
//! Implements the JudgeClient trait against the external judgment service's
//! single validate endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::JudgeConfig;
use crate::error::{QuestError, Result};
use crate::judge::{JudgeClient, Verdict, DEFAULT_FEEDBACK};

/// Default timeout for judge requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP judge client configuration.
#[derive(Debug, Clone)]
pub struct JudgeClientConfig {
    /// URL of the validate endpoint.
    pub endpoint: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl JudgeClientConfig {
    /// Creates a new config with the given endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

impl From<&JudgeConfig> for JudgeClientConfig {
    fn from(config: &JudgeConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            timeout_secs: config.timeout_secs,
        }
    }
}

/// HTTP judge client.
#[derive(Debug, Clone)]
pub struct HttpJudgeClient {
    config: JudgeClientConfig,
    client: Client,
}

impl HttpJudgeClient {
    /// Creates a new judge client with the given configuration.
    pub fn new(config: JudgeClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| QuestError::judge(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl JudgeClient for HttpJudgeClient {
    async fn judge(&self, prompt: &str) -> Result<Verdict> {
        let request = JudgeRequest { prompt };

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    QuestError::judge("Request timed out")
                } else if e.is_connect() {
                    QuestError::judge(format!(
                        "Failed to connect to judge at {}",
                        self.config.endpoint
                    ))
                } else {
                    QuestError::judge(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| QuestError::judge(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(QuestError::judge(format!(
                "Judge API error ({}): {}",
                status, body
            )));
        }

        let response: JudgeResponse = serde_json::from_str(&body)
            .map_err(|e| QuestError::judge(format!("Failed to parse response: {}", e)))?;

        Ok(response.into_verdict())
    }
}

// Judge API types

#[derive(Debug, Serialize)]
struct JudgeRequest<'a> {
    prompt: &'a str,
}

/// Judge response with both fields optional.
///
/// A judge that omits a field still produces a usable verdict; only an
/// unparseable body is fatal.
#[derive(Debug, Deserialize)]
struct JudgeResponse {
    is_correct: Option<bool>,
    feedback: Option<String>,
}

impl JudgeResponse {
    fn into_verdict(self) -> Verdict {
        Verdict {
            is_correct: self.is_correct.unwrap_or(false),
            feedback: self.feedback.unwrap_or_else(|| DEFAULT_FEEDBACK.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_new() {
        let config = JudgeClientConfig::new("http://localhost:8090/validate");
        assert_eq!(config.endpoint, "http://localhost:8090/validate");
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_config_with_timeout() {
        let config = JudgeClientConfig::new("http://localhost:8090/validate").with_timeout(5);
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_config_from_judge_config() {
        let judge = JudgeConfig {
            endpoint: "http://judge:1234/v".to_string(),
            timeout_secs: 12,
        };
        let config = JudgeClientConfig::from(&judge);
        assert_eq!(config.endpoint, "http://judge:1234/v");
        assert_eq!(config.timeout_secs, 12);
    }

    #[test]
    fn test_response_with_all_fields() {
        let response: JudgeResponse =
            serde_json::from_str(r#"{"is_correct": true, "feedback": "good"}"#).unwrap();
        let verdict = response.into_verdict();
        assert!(verdict.is_correct);
        assert_eq!(verdict.feedback, "good");
    }

    #[test]
    fn test_response_missing_correctness_defaults_false() {
        let response: JudgeResponse =
            serde_json::from_str(r#"{"feedback": "hmm"}"#).unwrap();
        let verdict = response.into_verdict();
        assert!(!verdict.is_correct);
        assert_eq!(verdict.feedback, "hmm");
    }

    #[test]
    fn test_response_missing_feedback_gets_default() {
        let response: JudgeResponse =
            serde_json::from_str(r#"{"is_correct": true}"#).unwrap();
        let verdict = response.into_verdict();
        assert!(verdict.is_correct);
        assert_eq!(verdict.feedback, DEFAULT_FEEDBACK);
    }

    #[test]
    fn test_response_empty_object_defaults_everything() {
        let response: JudgeResponse = serde_json::from_str("{}").unwrap();
        let verdict = response.into_verdict();
        assert!(!verdict.is_correct);
        assert_eq!(verdict.feedback, DEFAULT_FEEDBACK);
    }

    #[test]
    fn test_malformed_body_does_not_parse() {
        let result = serde_json::from_str::<JudgeResponse>("not json");
        assert!(result.is_err());
    }
}
