//! Mock data backend for testing.
//!
//! Keeps progress records in memory, scripts execution outcomes, and counts
//! every call so tests can assert which stages ran.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;

use crate::backend::{DataBackend, ExecuteOutcome, ProgressRecord, TableData};
use crate::error::{QuestError, Result};

/// Scripted result for `execute_query`.
#[derive(Debug, Clone)]
enum ExecuteScript {
    Rows(TableData),
    Rejected(String),
    TransportFailure,
}

#[derive(Debug, Default)]
struct Inner {
    records: Vec<ProgressRecord>,
    next_id: i64,
    execute_calls: usize,
    find_calls: usize,
    update_calls: usize,
    insert_calls: usize,
}

/// In-memory mock of the data backend.
#[derive(Debug)]
pub struct MockBackend {
    execute: ExecuteScript,
    fail_find: bool,
    fail_update: bool,
    fail_insert: bool,
    inner: Mutex<Inner>,
}

impl MockBackend {
    /// Creates a mock that executes every query successfully with no rows.
    pub fn new() -> Self {
        Self {
            execute: ExecuteScript::Rows(Vec::new()),
            fail_find: false,
            fail_update: false,
            fail_insert: false,
            inner: Mutex::new(Inner {
                next_id: 1,
                ..Inner::default()
            }),
        }
    }

    /// Scripts `execute_query` to return the given rows.
    pub fn with_rows(mut self, rows: TableData) -> Self {
        self.execute = ExecuteScript::Rows(rows);
        self
    }

    /// Scripts `execute_query` to be rejected with the given error text.
    pub fn with_rejection(mut self, error_text: impl Into<String>) -> Self {
        self.execute = ExecuteScript::Rejected(error_text.into());
        self
    }

    /// Scripts `execute_query` to fail at the transport level.
    pub fn with_transport_failure(mut self) -> Self {
        self.execute = ExecuteScript::TransportFailure;
        self
    }

    /// Makes progress lookups fail.
    pub fn with_failing_lookup(mut self) -> Self {
        self.fail_find = true;
        self
    }

    /// Makes progress updates fail.
    pub fn with_failing_update(mut self) -> Self {
        self.fail_update = true;
        self
    }

    /// Makes progress inserts fail.
    pub fn with_failing_insert(mut self) -> Self {
        self.fail_insert = true;
        self
    }

    /// Seeds an existing progress record.
    pub fn with_progress_record(self, user_id: &str, challenge_id: &str) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.records.push(ProgressRecord {
                id,
                user_id: user_id.to_string(),
                challenge_id: challenge_id.to_string(),
                completed_at: Utc::now(),
            });
        }
        self
    }

    /// Returns a copy of the stored progress records.
    pub fn progress_records(&self) -> Vec<ProgressRecord> {
        self.inner.lock().unwrap().records.clone()
    }

    /// Number of `execute_query` calls made.
    pub fn execute_calls(&self) -> usize {
        self.inner.lock().unwrap().execute_calls
    }

    /// Number of `find_progress` calls made.
    pub fn find_calls(&self) -> usize {
        self.inner.lock().unwrap().find_calls
    }

    /// Number of `update_progress` calls made.
    pub fn update_calls(&self) -> usize {
        self.inner.lock().unwrap().update_calls
    }

    /// Number of `insert_progress` calls made.
    pub fn insert_calls(&self) -> usize {
        self.inner.lock().unwrap().insert_calls
    }

    /// Total calls to the progress endpoints.
    pub fn progress_calls(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.find_calls + inner.update_calls + inner.insert_calls
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DataBackend for MockBackend {
    async fn execute_query(&self, _sql: &str) -> Result<ExecuteOutcome> {
        self.inner.lock().unwrap().execute_calls += 1;

        match &self.execute {
            ExecuteScript::Rows(rows) => Ok(ExecuteOutcome::Rows(rows.clone())),
            ExecuteScript::Rejected(text) => Ok(ExecuteOutcome::Rejected(text.clone())),
            ExecuteScript::TransportFailure => {
                Err(QuestError::execution("Failed to connect to data API"))
            }
        }
    }

    async fn find_progress(
        &self,
        user_id: &str,
        challenge_id: &str,
    ) -> Result<Option<ProgressRecord>> {
        let mut inner = self.inner.lock().unwrap();
        inner.find_calls += 1;

        if self.fail_find {
            return Err(QuestError::progress("Lookup failed (503): unavailable"));
        }

        Ok(inner
            .records
            .iter()
            .find(|r| r.user_id == user_id && r.challenge_id == challenge_id)
            .cloned())
    }

    async fn update_progress(&self, record_id: i64) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.update_calls += 1;

        if self.fail_update {
            return Err(QuestError::progress("Update failed (503): unavailable"));
        }

        let record = inner
            .records
            .iter_mut()
            .find(|r| r.id == record_id)
            .ok_or_else(|| QuestError::progress(format!("No record with id {record_id}")))?;
        record.completed_at = Utc::now();

        Ok(())
    }

    async fn insert_progress(&self, user_id: &str, challenge_id: &str) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.insert_calls += 1;

        if self.fail_insert {
            return Err(QuestError::progress("Insert failed (503): unavailable"));
        }

        let id = inner.next_id;
        inner.next_id += 1;
        inner.records.push(ProgressRecord {
            id,
            user_id: user_id.to_string(),
            challenge_id: challenge_id.to_string(),
            completed_at: Utc::now(),
        });

        Ok(())
    }
}
