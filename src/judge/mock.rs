//! Mock judge client for testing.
//!
//! Returns a scripted verdict or failure without making network calls.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::error::{QuestError, Result};
use crate::judge::{JudgeClient, Verdict};

/// Mock judge client with a scripted outcome.
///
/// Records every prompt it receives so tests can assert on prompt content
/// and call counts.
#[derive(Debug, Default)]
pub struct MockJudgeClient {
    verdict: Option<Verdict>,
    failure: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl MockJudgeClient {
    /// Creates a mock that judges every query correct with the given feedback.
    pub fn correct(feedback: impl Into<String>) -> Self {
        Self {
            verdict: Some(Verdict::new(true, feedback)),
            ..Self::default()
        }
    }

    /// Creates a mock that judges every query incorrect with the given feedback.
    pub fn incorrect(feedback: impl Into<String>) -> Self {
        Self {
            verdict: Some(Verdict::new(false, feedback)),
            ..Self::default()
        }
    }

    /// Creates a mock that fails every judgment with the given message.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// Returns the prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Returns the number of judgments requested.
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl JudgeClient for MockJudgeClient {
    async fn judge(&self, prompt: &str) -> Result<Verdict> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        if let Some(message) = &self.failure {
            return Err(QuestError::judge(message.clone()));
        }

        Ok(self
            .verdict
            .clone()
            .unwrap_or_else(|| Verdict::new(false, "no verdict scripted")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_correct_mock() {
        let mock = MockJudgeClient::correct("nice");
        let verdict = mock.judge("prompt").await.unwrap();
        assert!(verdict.is_correct);
        assert_eq!(verdict.feedback, "nice");
    }

    #[tokio::test]
    async fn test_incorrect_mock() {
        let mock = MockJudgeClient::incorrect("try again");
        let verdict = mock.judge("prompt").await.unwrap();
        assert!(!verdict.is_correct);
    }

    #[tokio::test]
    async fn test_failing_mock() {
        let mock = MockJudgeClient::failing("down for maintenance");
        let err = mock.judge("prompt").await.unwrap_err();
        assert_eq!(err.category(), "Judge Error");
    }

    #[tokio::test]
    async fn test_mock_records_prompts() {
        let mock = MockJudgeClient::correct("ok");
        mock.judge("first").await.unwrap();
        mock.judge("second").await.unwrap();

        assert_eq!(mock.call_count(), 2);
        assert_eq!(mock.prompts(), vec!["first", "second"]);
    }
}
