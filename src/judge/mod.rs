//! Judge service integration for SqlQuest.
//!
//! Provides the trait seam and implementations for the external service
//! that scores a candidate query against a challenge description.

mod http;
mod mock;
pub mod prompt;

pub use http::{HttpJudgeClient, JudgeClientConfig};
pub use mock::MockJudgeClient;
pub use prompt::build_prompt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Feedback used when the judge response carries none.
pub const DEFAULT_FEEDBACK: &str = "Unable to validate query.";

/// Separator prefix used when execution failure text is appended to feedback.
const EXECUTION_FAILURE_PREFIX: &str =
    "\n\nHowever, there was an error executing the query: ";

/// The correctness/feedback pair produced by the judge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Whether the judge considers the query correct for the challenge.
    pub is_correct: bool,
    /// Human-readable feedback for the learner.
    pub feedback: String,
}

impl Verdict {
    /// Creates a verdict with the given correctness and feedback.
    pub fn new(is_correct: bool, feedback: impl Into<String>) -> Self {
        Self {
            is_correct,
            feedback: feedback.into(),
        }
    }

    /// Overrides a previously-true verdict after a downstream execution
    /// failure.
    ///
    /// Correctness drops to false and the backend's error text is appended
    /// to the existing feedback after a blank-line separator. Correctness
    /// never moves in the other direction.
    pub fn demote(&mut self, error_text: &str) {
        self.is_correct = false;
        self.feedback.push_str(EXECUTION_FAILURE_PREFIX);
        self.feedback.push_str(error_text);
    }
}

/// Trait for judge clients that score candidate queries.
///
/// Implementations must be thread-safe (Send + Sync) to support concurrent
/// request handling.
#[async_trait]
pub trait JudgeClient: Send + Sync {
    /// Submits a judgment prompt and returns the verdict.
    ///
    /// Any transport failure, timeout, or malformed response is an error;
    /// missing fields inside a well-formed response are defaulted instead.
    async fn judge(&self, prompt: &str) -> Result<Verdict>;
}
