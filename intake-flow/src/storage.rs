//! Collaborator traits and storage backends.
//!
//! `QuestionCatalog` and `AnswerRepository` are the external REST
//! collaborators of the wizard; `SessionStorage` persists wizard sessions
//! between requests. In-memory implementations back tests and single-node
//! deployments, the Postgres implementation backs durable deployments.

use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::sync::Arc;

use crate::answers::AnswerRecord;
use crate::catalog::Question;
use crate::error::Result;
use crate::wizard::Wizard;

/// A wizard session: one user's questionnaire flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub wizard: Wizard,
}

impl Session {
    pub fn new(id: String, wizard: Wizard) -> Self {
        Self { id, wizard }
    }
}

/// Source of the immutable question catalog.
#[async_trait]
pub trait QuestionCatalog: Send + Sync {
    async fn fetch_questions(&self) -> Result<Vec<Question>>;
}

/// Durable store for answers. `save` must be idempotent on repeated
/// identical writes.
#[async_trait]
pub trait AnswerRepository: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<AnswerRecord>>;
    async fn save(&self, record: &AnswerRecord) -> Result<()>;
}

/// Store for wizard sessions.
#[async_trait]
pub trait SessionStorage: Send + Sync {
    async fn save(&self, session: Session) -> Result<()>;
    async fn get(&self, id: &str) -> Result<Option<Session>>;
    async fn delete(&self, id: &str) -> Result<()>;
}

/// Catalog served from a fixed in-memory question list.
pub struct InMemoryQuestionCatalog {
    questions: Vec<Question>,
}

impl InMemoryQuestionCatalog {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }
}

#[async_trait]
impl QuestionCatalog for InMemoryQuestionCatalog {
    async fn fetch_questions(&self) -> Result<Vec<Question>> {
        Ok(self.questions.clone())
    }
}

/// In-memory answer repository.
pub struct InMemoryAnswerRepository {
    answers: Arc<DashMap<String, String>>,
}

impl InMemoryAnswerRepository {
    pub fn new() -> Self {
        Self { answers: Arc::new(DashMap::new()) }
    }

    /// Seed or overwrite an answer directly, bypassing the wire contract.
    pub fn insert(&self, question: &str, answer: &str) {
        self.answers.insert(question.to_string(), answer.to_string());
    }

    pub fn get(&self, question: &str) -> Option<String> {
        self.answers.get(question).map(|entry| entry.clone())
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

impl Default for InMemoryAnswerRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnswerRepository for InMemoryAnswerRepository {
    async fn fetch_all(&self) -> Result<Vec<AnswerRecord>> {
        Ok(self
            .answers
            .iter()
            .map(|entry| AnswerRecord {
                question: entry.key().clone(),
                answer: entry.value().clone(),
            })
            .collect())
    }

    async fn save(&self, record: &AnswerRecord) -> Result<()> {
        self.answers.insert(record.question.clone(), record.answer.clone());
        Ok(())
    }
}

/// In-memory implementation of SessionStorage.
pub struct InMemorySessionStorage {
    sessions: Arc<DashMap<String, Session>>,
}

impl InMemorySessionStorage {
    pub fn new() -> Self {
        Self { sessions: Arc::new(DashMap::new()) }
    }
}

impl Default for InMemorySessionStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStorage for InMemorySessionStorage {
    async fn save(&self, session: Session) -> Result<()> {
        self.sessions.insert(session.id.clone(), session);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Session>> {
        Ok(self.sessions.get(id).map(|entry| entry.clone()))
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.sessions.remove(id);
        Ok(())
    }
}

/// PostgreSQL-backed session storage. The wizard state is stored as a single
/// jsonb column and upserted per save.
pub struct PostgresSessionStorage {
    pool: PgPool,
}

impl PostgresSessionStorage {
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS intake_sessions (
                id TEXT PRIMARY KEY,
                wizard JSONB NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )",
        )
        .execute(&pool)
        .await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl SessionStorage for PostgresSessionStorage {
    async fn save(&self, session: Session) -> Result<()> {
        let wizard = serde_json::to_value(&session.wizard)?;
        sqlx::query(
            "INSERT INTO intake_sessions (id, wizard, updated_at)
             VALUES ($1, $2, now())
             ON CONFLICT (id) DO UPDATE SET wizard = EXCLUDED.wizard, updated_at = now()",
        )
        .bind(&session.id)
        .bind(wizard)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Session>> {
        let row = sqlx::query("SELECT wizard FROM intake_sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => {
                let wizard: serde_json::Value = row.try_get("wizard")?;
                let wizard: Wizard = serde_json::from_value(wizard)?;
                Ok(Some(Session { id: id.to_string(), wizard }))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &str) -> Result<()> {
        sqlx::query("DELETE FROM intake_sessions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
