use std::sync::Arc;

use chrono::NaiveDate;
use http::StatusCode;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use url::Url;

use crate::models::{ClassDay, ClassRecord, Modality, Participant, TeacherProfile, WorkshopRecord};

/// Fallback shown when the backend rejects a call without an explanation.
/// The admin UI renders these messages directly, hence the Spanish.
pub const FALLBACK_MESSAGE: &str = "No se pudo completar la operación";

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
    #[error("backend returned an unreadable response")]
    InvalidBody(#[source] reqwest::Error),
}

/// Class creation/update body in the shape the studio backend expects.
/// Field names are the backend's, Spanish `modalidad` included; `type` is
/// always sent as a list even though old records may hold a bare string.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClassPayload {
    pub title: String,
    #[serde(rename = "type")]
    pub class_type: Vec<String>,
    pub day: ClassDay,
    pub hour: String,
    pub teacher: String,
    pub duration: u32,
    pub max_participants: u32,
    pub description: String,
    pub modalidad: Modality,
}

/// Workshop creation body. Unlike classes, the backend spells this one
/// `modality`; both spellings are kept as-is.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopPayload {
    pub title: String,
    pub day: NaiveDate,
    pub hour_start: String,
    pub hour_end: String,
    pub price: f64,
    pub modality: Modality,
    pub max_participants: u32,
    pub description: String,
    pub images: Vec<Url>,
}

/// REST client for the studio backend. Stateless apart from the base URL;
/// every call forwards the caller's bearer token, and timeouts are the
/// reqwest defaults.
#[derive(Clone)]
pub struct StudioBackend {
    client: reqwest::Client,
    base_url: Arc<Url>,
}

impl StudioBackend {
    pub fn new(base_url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: Arc::new(base_url),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    pub async fn list_teachers(&self, token: &str) -> Result<Vec<TeacherProfile>, BackendError> {
        let response = self
            .client
            .get(self.endpoint("/api/teachers"))
            .bearer_auth(token)
            .send()
            .await?;
        Self::expect_json(response).await
    }

    pub async fn list_classes(&self, token: &str) -> Result<Vec<ClassRecord>, BackendError> {
        let response = self
            .client
            .get(self.endpoint("/api/classes"))
            .bearer_auth(token)
            .send()
            .await?;
        Self::expect_json(response).await
    }

    pub async fn fetch_class(&self, token: &str, id: &str) -> Result<ClassRecord, BackendError> {
        let response = self
            .client
            .get(self.endpoint(&format!("/api/classes/{id}")))
            .bearer_auth(token)
            .send()
            .await?;
        Self::expect_json(response).await
    }

    pub async fn create_class(
        &self,
        token: &str,
        payload: &ClassPayload,
    ) -> Result<ClassRecord, BackendError> {
        let response = self
            .client
            .post(self.endpoint("/api/classes/create"))
            .bearer_auth(token)
            .json(payload)
            .send()
            .await?;
        Self::expect_json(response).await
    }

    pub async fn update_class(
        &self,
        token: &str,
        id: &str,
        payload: &ClassPayload,
    ) -> Result<ClassRecord, BackendError> {
        let response = self
            .client
            .put(self.endpoint(&format!("/api/classes/{id}")))
            .bearer_auth(token)
            .json(payload)
            .send()
            .await?;
        Self::expect_json(response).await
    }

    pub async fn class_participants(
        &self,
        token: &str,
        id: &str,
    ) -> Result<Vec<Participant>, BackendError> {
        let response = self
            .client
            .get(self.endpoint(&format!("/api/classes/{id}/participants")))
            .bearer_auth(token)
            .send()
            .await?;
        Self::expect_json(response).await
    }

    pub async fn create_workshop(
        &self,
        token: &str,
        payload: &WorkshopPayload,
    ) -> Result<WorkshopRecord, BackendError> {
        let response = self
            .client
            .post(self.endpoint("/api/workshops"))
            .bearer_auth(token)
            .json(payload)
            .send()
            .await?;
        Self::expect_json(response).await
    }

    pub async fn fetch_workshop(&self, token: &str, id: &str) -> Result<WorkshopRecord, BackendError> {
        let response = self
            .client
            .get(self.endpoint(&format!("/api/workshops/{id}")))
            .bearer_auth(token)
            .send()
            .await?;
        Self::expect_json(response).await
    }

    pub async fn workshop_participants(
        &self,
        token: &str,
        id: &str,
    ) -> Result<Vec<Participant>, BackendError> {
        let response = self
            .client
            .get(self.endpoint(&format!("/api/workshops/{id}/participants")))
            .bearer_auth(token)
            .send()
            .await?;
        Self::expect_json(response).await
    }

    /// Boundary check for every backend reply: 2xx bodies must decode into
    /// the expected shape, anything else is probed for a server-provided
    /// message to pass through.
    async fn expect_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, BackendError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = failure_text(&body).unwrap_or_else(|| FALLBACK_MESSAGE.to_string());
            return Err(BackendError::Rejected { status, message });
        }
        response.json::<T>().await.map_err(BackendError::InvalidBody)
    }
}

/// Pulls a human-readable message out of a backend error body, which uses
/// either `message` or `error` depending on the endpoint.
fn failure_text(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct Failure {
        #[serde(default)]
        message: Option<String>,
        #[serde(default)]
        error: Option<String>,
    }

    let parsed: Failure = serde_json::from_str(body).ok()?;
    for candidate in [parsed.message, parsed.error] {
        if let Some(text) = candidate {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
    }
    None
}
