//! The validation pipeline.
//!
//! Sequences the three dependent remote calls — judge, execute, persist —
//! under the partial-failure policy: a judge failure or an unreachable
//! backend fails the request, a backend-rejected query demotes the verdict,
//! and a progress-persistence failure is logged and discarded.

mod types;

pub use types::{Challenge, ValidationRequest, ValidationResponse};

use std::sync::Arc;
use tracing::{debug, warn};

use crate::backend::{DataBackend, ExecuteOutcome};
use crate::error::Result;
use crate::judge::{build_prompt, JudgeClient};

/// How a progress upsert was satisfied. Logged, never branched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProgressOutcome {
    Inserted,
    Updated,
}

/// Drives a validation request through the judge, the backend, and the
/// progress store.
///
/// Holds no per-request state; one instance serves all requests
/// concurrently.
pub struct QueryValidator {
    judge: Arc<dyn JudgeClient>,
    backend: Arc<dyn DataBackend>,
}

impl QueryValidator {
    /// Creates a validator over the given collaborators.
    pub fn new(judge: Arc<dyn JudgeClient>, backend: Arc<dyn DataBackend>) -> Self {
        Self { judge, backend }
    }

    /// Validates a learner's query against a challenge.
    ///
    /// Stage 1 judges the query; if correct, stage 2 executes it; if still
    /// correct and both identifiers are present, stage 3 records progress.
    /// Only stages 1 and 2 can fail the request, and stage 2 only for
    /// transport faults — a query the backend rejects comes back as a
    /// successful response with `is_correct` demoted to false.
    pub async fn validate(&self, request: &ValidationRequest) -> Result<ValidationResponse> {
        // Stage 1: judgment. The only stage whose failure is always fatal.
        let prompt = build_prompt(&request.challenge, &request.query);
        let mut verdict = self.judge.judge(&prompt).await?;

        // Stage 2: execution, gated on the verdict.
        let mut table_data = None;
        if verdict.is_correct {
            match self.backend.execute_query(&request.query).await? {
                ExecuteOutcome::Rows(rows) => table_data = Some(rows),
                ExecuteOutcome::Rejected(error_text) => verdict.demote(&error_text),
            }
        }

        // Stage 3: best-effort progress. Requires a still-correct verdict
        // and both identifiers; its outcome never reaches the response.
        if verdict.is_correct {
            if let (Some(user_id), Some(challenge_id)) =
                (request.user_id.as_deref(), request.challenge.id.as_deref())
            {
                match self.record_progress(user_id, challenge_id).await {
                    Ok(outcome) => {
                        debug!(user_id, challenge_id, ?outcome, "progress recorded");
                    }
                    Err(e) => {
                        warn!(user_id, challenge_id, "failed to record progress: {e}");
                    }
                }
            }
        }

        Ok(ValidationResponse {
            is_correct: verdict.is_correct,
            feedback: verdict.feedback,
            table_data,
        })
    }

    /// Upserts the completion record for a (learner, challenge) pair.
    async fn record_progress(&self, user_id: &str, challenge_id: &str) -> Result<ProgressOutcome> {
        match self.backend.find_progress(user_id, challenge_id).await? {
            Some(record) => {
                self.backend.update_progress(record.id).await?;
                Ok(ProgressOutcome::Updated)
            }
            None => {
                self.backend.insert_progress(user_id, challenge_id).await?;
                Ok(ProgressOutcome::Inserted)
            }
        }
    }
}
