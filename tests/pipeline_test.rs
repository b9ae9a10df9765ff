//! Validation pipeline integration tests.
//!
//! Exercises the judge → execute → persist sequence end to end against mock
//! collaborators, asserting on both the response and which remote calls
//! were made.

use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

use sql_quest::backend::{MockBackend, Row, TableData};
use sql_quest::judge::MockJudgeClient;
use sql_quest::validator::{Challenge, QueryValidator, ValidationRequest};

fn request() -> ValidationRequest {
    ValidationRequest {
        challenge: Challenge {
            id: Some("c1".to_string()),
            title: "Join basics".to_string(),
            description: "List each order with its customer's email.".to_string(),
        },
        query: "SELECT 1".to_string(),
        user_id: Some("u1".to_string()),
    }
}

fn rows_x1() -> TableData {
    let mut row = Row::new();
    row.insert("x".to_string(), json!(1));
    vec![row]
}

fn build_validator(judge: MockJudgeClient, backend: Arc<MockBackend>) -> QueryValidator {
    QueryValidator::new(Arc::new(judge), backend)
}

#[tokio::test]
async fn incorrect_verdict_never_touches_the_backend() {
    let backend = Arc::new(MockBackend::new().with_rows(rows_x1()));
    let validator = build_validator(MockJudgeClient::incorrect("Missing the join."), backend.clone());

    let response = validator.validate(&request()).await.unwrap();

    assert!(!response.is_correct);
    assert_eq!(response.feedback, "Missing the join.");
    assert!(response.table_data.is_none());
    assert_eq!(backend.execute_calls(), 0);
    assert_eq!(backend.progress_calls(), 0);
}

#[tokio::test]
async fn correct_verdict_returns_exactly_the_executed_rows() {
    let backend = Arc::new(MockBackend::new().with_rows(rows_x1()));
    let validator = build_validator(MockJudgeClient::correct("good"), backend.clone());

    let response = validator.validate(&request()).await.unwrap();

    assert!(response.is_correct);
    assert_eq!(response.feedback, "good");
    assert_eq!(response.table_data, Some(rows_x1()));
    assert_eq!(backend.execute_calls(), 1);
}

#[tokio::test]
async fn rejected_query_demotes_and_keeps_both_feedback_texts() {
    let backend = Arc::new(MockBackend::new().with_rejection("permission denied for table orders"));
    let validator = build_validator(MockJudgeClient::correct("Looks correct."), backend.clone());

    let response = validator.validate(&request()).await.unwrap();

    assert!(!response.is_correct);
    assert!(response.table_data.is_none());
    assert!(response.feedback.contains("Looks correct."));
    assert!(response.feedback.contains("permission denied for table orders"));
    assert!(response
        .feedback
        .contains("\n\nHowever, there was an error executing the query: "));
}

#[tokio::test]
async fn persistence_failures_are_invisible_in_the_response() {
    for backend in [
        MockBackend::new().with_rows(rows_x1()).with_failing_lookup(),
        MockBackend::new().with_rows(rows_x1()).with_failing_insert(),
        MockBackend::new()
            .with_rows(rows_x1())
            .with_progress_record("u1", "c1")
            .with_failing_update(),
    ] {
        let validator = build_validator(MockJudgeClient::correct("good"), Arc::new(backend));

        let response = validator.validate(&request()).await.unwrap();

        assert!(response.is_correct);
        assert_eq!(response.feedback, "good");
        assert_eq!(response.table_data, Some(rows_x1()));
    }
}

#[tokio::test]
async fn absent_identifiers_skip_progress_entirely() {
    // No user id
    let backend = Arc::new(MockBackend::new());
    let validator = build_validator(MockJudgeClient::correct("good"), backend.clone());
    let mut req = request();
    req.user_id = None;
    validator.validate(&req).await.unwrap();
    assert_eq!(backend.progress_calls(), 0);

    // No challenge id
    let backend = Arc::new(MockBackend::new());
    let validator = build_validator(MockJudgeClient::correct("good"), backend.clone());
    let mut req = request();
    req.challenge.id = None;
    validator.validate(&req).await.unwrap();
    assert_eq!(backend.progress_calls(), 0);
}

#[tokio::test]
async fn repeat_completion_updates_instead_of_duplicating() {
    let backend = Arc::new(MockBackend::new().with_rows(rows_x1()));
    let validator = build_validator(MockJudgeClient::correct("good"), backend.clone());

    validator.validate(&request()).await.unwrap();
    validator.validate(&request()).await.unwrap();

    assert_eq!(backend.insert_calls(), 1);
    assert_eq!(backend.update_calls(), 1);
    assert_eq!(backend.progress_records().len(), 1);
}

#[tokio::test]
async fn judge_failure_is_fatal_before_any_backend_call() {
    let backend = Arc::new(MockBackend::new().with_rows(rows_x1()));
    let validator = build_validator(MockJudgeClient::failing("timed out"), backend.clone());

    let err = validator.validate(&request()).await.unwrap_err();

    assert_eq!(err.category(), "Judge Error");
    assert_eq!(backend.execute_calls(), 0);
    assert_eq!(backend.progress_calls(), 0);
}

#[tokio::test]
async fn execution_transport_failure_is_fatal_but_distinct_from_rejection() {
    let backend = Arc::new(MockBackend::new().with_transport_failure());
    let validator = build_validator(MockJudgeClient::correct("good"), backend.clone());

    let err = validator.validate(&request()).await.unwrap_err();

    assert_eq!(err.category(), "Execution Error");
    // The fatal path never reaches the progress store either
    assert_eq!(backend.progress_calls(), 0);
}

#[tokio::test]
async fn progress_is_keyed_per_learner_and_challenge() {
    let backend = Arc::new(MockBackend::new().with_rows(rows_x1()));
    let pipeline = build_validator(MockJudgeClient::correct("good"), backend.clone());

    pipeline.validate(&request()).await.unwrap();

    let mut other = request();
    other.user_id = Some("u2".to_string());
    pipeline.validate(&other).await.unwrap();

    assert_eq!(backend.insert_calls(), 2);
    assert_eq!(backend.progress_records().len(), 2);
}
