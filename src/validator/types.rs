//! Request and response types for the validation pipeline.

use serde::{Deserialize, Serialize};

use crate::backend::TableData;

/// A learning exercise, as supplied by the caller.
///
/// Never stored by the pipeline. A challenge without an `id` cannot have
/// progress recorded against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    /// Challenge identifier; absence disables progress persistence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Short title shown to the learner.
    pub title: String,

    /// Freeform natural-language description of the exercise.
    pub description: String,
}

/// One unit of validation work. Consumed once, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRequest {
    /// The challenge being attempted.
    pub challenge: Challenge,

    /// The learner's candidate SQL query.
    pub query: String,

    /// Learner identifier; absence disables progress persistence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Final output of the validation pipeline.
///
/// `table_data` is present only when `is_correct` is true: a verdict demoted
/// by an execution failure drops its result set along with its correctness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResponse {
    /// Post-demotion correctness.
    pub is_correct: bool,

    /// Post-amendment feedback for the learner.
    pub feedback: String,

    /// Rows produced by the executed query, when it ran and succeeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_data: Option<TableData>,
}
