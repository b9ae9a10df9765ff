//! REST data backend implementation.
//!
//! Talks to a PostgREST-style data API: query execution goes through a
//! stored procedure endpoint, progress records live in a table resource.
//! Every call carries the service-level bearer credential.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use std::time::Duration;

use crate::backend::{DataBackend, ExecuteOutcome, ProgressRecord, Row};
use crate::config::BackendConfig;
use crate::error::{QuestError, Result};

/// Path of the stored procedure that executes learner queries.
const EXECUTE_RPC_PATH: &str = "/rest/v1/rpc/execute_sql_learning_query";

/// Path of the progress record table resource.
const PROGRESS_PATH: &str = "/rest/v1/user_progress";

/// REST data backend client.
#[derive(Debug, Clone)]
pub struct RestBackend {
    config: BackendConfig,
    client: Client,
}

impl RestBackend {
    /// Creates a new backend client with the given configuration.
    pub fn new(config: BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| QuestError::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Applies the service credential headers expected by the data API.
    fn authenticate(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.config.service_key)
            .bearer_auth(&self.config.service_key)
    }

    fn execute_url(&self) -> String {
        format!("{}{}", self.config.url, EXECUTE_RPC_PATH)
    }

    fn progress_url(&self) -> String {
        format!("{}{}", self.config.url, PROGRESS_PATH)
    }

    fn execute_timeout(&self) -> Duration {
        Duration::from_secs(self.config.execute_timeout_secs)
    }

    fn progress_timeout(&self) -> Duration {
        Duration::from_secs(self.config.progress_timeout_secs)
    }
}

#[async_trait]
impl DataBackend for RestBackend {
    async fn execute_query(&self, sql: &str) -> Result<ExecuteOutcome> {
        let request = ExecuteRequest { sql_query: sql };

        let response = self
            .authenticate(self.client.post(self.execute_url()))
            .timeout(self.execute_timeout())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    QuestError::execution("Request timed out")
                } else if e.is_connect() {
                    QuestError::execution(format!(
                        "Failed to connect to data API at {}",
                        self.config.url
                    ))
                } else {
                    QuestError::execution(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        if status.is_success() {
            let rows: Vec<Row> = response
                .json()
                .await
                .map_err(|e| QuestError::execution(format!("Failed to parse rows: {}", e)))?;
            Ok(ExecuteOutcome::Rows(rows))
        } else {
            // The backend ran but refused the query; its error body is
            // learner-facing feedback, not a request failure.
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Ok(ExecuteOutcome::Rejected(body))
        }
    }

    async fn find_progress(
        &self,
        user_id: &str,
        challenge_id: &str,
    ) -> Result<Option<ProgressRecord>> {
        let response = self
            .authenticate(self.client.get(self.progress_url()))
            .timeout(self.progress_timeout())
            .query(&[
                ("user_id", format!("eq.{user_id}")),
                ("challenge_id", format!("eq.{challenge_id}")),
                ("limit", "1".to_string()),
            ])
            .send()
            .await
            .map_err(|e| QuestError::progress(format!("Lookup request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(QuestError::progress(format!(
                "Lookup failed ({}): {}",
                status, body
            )));
        }

        let mut records: Vec<ProgressRecord> = response
            .json()
            .await
            .map_err(|e| QuestError::progress(format!("Failed to parse lookup response: {}", e)))?;

        Ok(if records.is_empty() {
            None
        } else {
            Some(records.swap_remove(0))
        })
    }

    async fn update_progress(&self, record_id: i64) -> Result<()> {
        let update = ProgressUpdate {
            completed_at: Utc::now(),
        };

        let response = self
            .authenticate(self.client.patch(self.progress_url()))
            .timeout(self.progress_timeout())
            .query(&[("id", format!("eq.{record_id}"))])
            .json(&update)
            .send()
            .await
            .map_err(|e| QuestError::progress(format!("Update request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(QuestError::progress(format!(
                "Update failed ({}): {}",
                status, body
            )));
        }

        Ok(())
    }

    async fn insert_progress(&self, user_id: &str, challenge_id: &str) -> Result<()> {
        let insert = ProgressInsert {
            user_id,
            challenge_id,
            completed_at: Utc::now(),
        };

        let response = self
            .authenticate(self.client.post(self.progress_url()))
            .timeout(self.progress_timeout())
            .json(&insert)
            .send()
            .await
            .map_err(|e| QuestError::progress(format!("Insert request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(QuestError::progress(format!(
                "Insert failed ({}): {}",
                status, body
            )));
        }

        Ok(())
    }
}

// Data API wire types

#[derive(Debug, Serialize)]
struct ExecuteRequest<'a> {
    sql_query: &'a str,
}

#[derive(Debug, Serialize)]
struct ProgressUpdate {
    completed_at: chrono::DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct ProgressInsert<'a> {
    user_id: &'a str,
    challenge_id: &'a str,
    completed_at: chrono::DateTime<Utc>,
}
