//! Reconciling answer cache: optimistic local edits with a dirty set,
//! idempotent-guarded remote fetch, and best-effort batch flush.
//!
//! The store is the in-memory source of truth for the session; the remote
//! answer repository is the durable store. Local edits never block on the
//! network.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::storage::AnswerRepository;

/// Wire form of a single answer, as exchanged with the persistence
/// collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredAnswer {
    value: String,
    updated_at: DateTime<Utc>,
}

/// Outcome of one `sync_dirty` pass. Failed question ids remain dirty and
/// will be retried on the next pass.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    pub synced: usize,
    pub failed: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerStore {
    answers: BTreeMap<String, StoredAnswer>,
    dirty: BTreeSet<String>,
    has_fetched: bool,
    #[serde(skip)]
    fetch_in_flight: bool,
}

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_fetched(&self) -> bool {
        self.has_fetched
    }

    /// Fetch the remote snapshot once per session. No-ops if a snapshot was
    /// already fetched or a fetch is in flight. On success the server
    /// snapshot becomes the authoritative baseline: the local set is replaced
    /// and all dirty flags clear. On failure `has_fetched` stays unset so an
    /// explicit retry is possible, and local optimistic edits are untouched.
    pub async fn fetch_from(&mut self, repo: &dyn AnswerRepository) -> Result<()> {
        if self.has_fetched || self.fetch_in_flight {
            return Ok(());
        }
        self.fetch_in_flight = true;
        let fetched = repo.fetch_all().await;
        self.fetch_in_flight = false;

        let records = fetched?;
        let now = Utc::now();
        self.answers = records
            .into_iter()
            .map(|r| (r.question, StoredAnswer { value: r.answer, updated_at: now }))
            .collect();
        self.dirty.clear();
        self.has_fetched = true;
        debug!(answers = self.answers.len(), "answer snapshot loaded");
        Ok(())
    }

    /// Upsert a local answer and mark it dirty. Purely local.
    pub fn set(&mut self, question_id: &str, value: impl Into<String>) {
        self.answers.insert(
            question_id.to_string(),
            StoredAnswer { value: value.into(), updated_at: Utc::now() },
        );
        self.dirty.insert(question_id.to_string());
    }

    pub fn get(&self, question_id: &str) -> Option<&str> {
        self.answers.get(question_id).map(|a| a.value.as_str())
    }

    /// An answer counts only when present and non-blank.
    pub fn is_answered(&self, question_id: &str) -> bool {
        self.get(question_id).is_some_and(|v| !v.trim().is_empty())
    }

    pub fn dirty_count(&self) -> usize {
        self.dirty.len()
    }

    /// Flush every dirty answer, one write per entry. Each confirmed write
    /// clears that entry's dirty flag; a failed write leaves it dirty and
    /// does not block the remaining entries.
    pub async fn sync_dirty(&mut self, repo: &dyn AnswerRepository) -> SyncReport {
        let pending: Vec<String> = self.dirty.iter().cloned().collect();
        let mut report = SyncReport::default();
        for question_id in pending {
            let Some(stored) = self.answers.get(&question_id) else {
                self.dirty.remove(&question_id);
                continue;
            };
            let record = AnswerRecord {
                question: question_id.clone(),
                answer: stored.value.clone(),
            };
            match repo.save(&record).await {
                Ok(()) => {
                    self.dirty.remove(&question_id);
                    report.synced += 1;
                }
                Err(err) => {
                    warn!(question = %question_id, error = %err, "answer flush failed, entry stays dirty");
                    report.failed.push(question_id);
                }
            }
        }
        report
    }
}
