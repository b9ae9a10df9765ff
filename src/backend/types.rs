//! Data backend result types.
//!
//! Defines the structures exchanged with the remote data store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single result row: column name to JSON value, in column order.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// An ordered result set from query execution.
pub type TableData = Vec<Row>;

/// Outcome of submitting a query to the backend.
///
/// A rejected query is an ordinary, recoverable outcome; only transport
/// failures travel on the error channel. The pipeline relies on this split
/// to keep fatal and recoverable cases apart.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecuteOutcome {
    /// The backend ran the query and returned rows.
    Rows(TableData),
    /// The backend refused the query (bad SQL, permissions, ...) with the
    /// given error text.
    Rejected(String),
}

impl ExecuteOutcome {
    /// Returns the rows if the query was accepted.
    pub fn rows(&self) -> Option<&TableData> {
        match self {
            Self::Rows(rows) => Some(rows),
            Self::Rejected(_) => None,
        }
    }

    /// Returns true if the backend refused the query.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

/// A learner's completion record for one challenge.
///
/// Owned by the data backend; we only read it back to decide between the
/// update and insert paths of the upsert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    /// Backend-assigned record identifier.
    pub id: i64,
    /// Learner identifier.
    pub user_id: String,
    /// Challenge identifier.
    pub challenge_id: String,
    /// When the learner completed the challenge.
    pub completed_at: DateTime<Utc>,
}
