//! HTTP implementations of the catalog and answer collaborators.
//!
//! Both speak the plain JSON contracts of the backing REST API: the catalog
//! is a `GET` returning `Question[]`, answers are a `GET` returning all
//! `{ question, answer }` pairs and a `POST` accepting one pair.

use async_trait::async_trait;
use reqwest::Client;

use crate::answers::AnswerRecord;
use crate::catalog::Question;
use crate::error::{Result, WizardError};
use crate::storage::{AnswerRepository, QuestionCatalog};

pub struct HttpQuestionCatalog {
    client: Client,
    url: String,
}

impl HttpQuestionCatalog {
    pub fn new(url: impl Into<String>) -> Self {
        Self { client: Client::new(), url: url.into() }
    }
}

#[async_trait]
impl QuestionCatalog for HttpQuestionCatalog {
    async fn fetch_questions(&self) -> Result<Vec<Question>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| WizardError::CatalogFetch(e.to_string()))?;
        response
            .json::<Vec<Question>>()
            .await
            .map_err(|e| WizardError::CatalogFetch(e.to_string()))
    }
}

pub struct HttpAnswerRepository {
    client: Client,
    url: String,
}

impl HttpAnswerRepository {
    pub fn new(url: impl Into<String>) -> Self {
        Self { client: Client::new(), url: url.into() }
    }
}

#[async_trait]
impl AnswerRepository for HttpAnswerRepository {
    async fn fetch_all(&self) -> Result<Vec<AnswerRecord>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| WizardError::AnswerFetch(e.to_string()))?;
        response
            .json::<Vec<AnswerRecord>>()
            .await
            .map_err(|e| WizardError::AnswerFetch(e.to_string()))
    }

    async fn save(&self, record: &AnswerRecord) -> Result<()> {
        self.client
            .post(&self.url)
            .json(record)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| WizardError::AnswerWrite {
                question: record.question.clone(),
                message: e.to_string(),
            })?;
        Ok(())
    }
}
