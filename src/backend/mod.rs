//! Data backend abstraction for SqlQuest.
//!
//! Provides a trait-based interface to the remote relational store that
//! executes learner queries and owns progress records, allowing the real
//! REST implementation and the test mock to be used interchangeably.

mod mock;
mod rest;
mod types;

pub use mock::MockBackend;
pub use rest::RestBackend;
pub use types::{ExecuteOutcome, ProgressRecord, Row, TableData};

use async_trait::async_trait;

use crate::error::Result;

/// Trait defining the interface to the data backend.
///
/// `execute_query` separates transport failures (the `Err` channel, fatal
/// to the request) from backend-side query rejection (`ExecuteOutcome::
/// Rejected`, absorbed by the pipeline). The progress operations return
/// `QuestError::Progress` on any failure; callers decide whether that is
/// fatal — the validation pipeline deliberately treats it as not.
#[async_trait]
pub trait DataBackend: Send + Sync {
    /// Executes a read query and returns rows or the backend's rejection.
    async fn execute_query(&self, sql: &str) -> Result<ExecuteOutcome>;

    /// Finds the progress record for a (learner, challenge) pair, if any.
    async fn find_progress(
        &self,
        user_id: &str,
        challenge_id: &str,
    ) -> Result<Option<ProgressRecord>>;

    /// Sets an existing progress record's completion timestamp to now.
    async fn update_progress(&self, record_id: i64) -> Result<()>;

    /// Inserts a new progress record with completion timestamp now.
    async fn insert_progress(&self, user_id: &str, challenge_id: &str) -> Result<()>;
}
