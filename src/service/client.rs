//! HTTP client for the triage service
//!
//! Speaks the service's JSON API: `GET /paciente-exemplo` for example data and
//! `POST /api/triagem` for classification.

use super::{ServiceError, ServiceResult, TriageService};
use crate::state::{PatientData, TriageResult};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;

const EXAMPLE_PATH: &str = "/paciente-exemplo";
const TRIAGE_PATH: &str = "/api/triagem";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const MAX_BODY_MESSAGE: usize = 200;

/// Client for the triage HTTP service
pub struct HttpTriageService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTriageService {
    pub fn new(base_url: impl Into<String>) -> ServiceResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Decode a success body, or turn a failure status into `ServiceError::Status`
    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> ServiceResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Status {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// The server's `error` field if the body carries one.
///
/// Otherwise a short plain-text body is used as is; HTML pages and long
/// bodies give way to the status reason phrase.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Some(message) = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
    {
        return message;
    }
    let body = body.trim();
    let plain = !body.is_empty() && !body.starts_with('<');
    if plain && body.chars().count() <= MAX_BODY_MESSAGE {
        return body.to_string();
    }
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

#[async_trait]
impl TriageService for HttpTriageService {
    fn base_url(&self) -> String {
        self.base_url.clone()
    }

    async fn fetch_example_patient(&self) -> ServiceResult<Value> {
        tracing::debug!(url = %self.url(EXAMPLE_PATH), "fetching example patient");
        let response = self.client.get(self.url(EXAMPLE_PATH)).send().await?;
        let value: Value = Self::read_json(response).await?;
        if !value.is_object() {
            return Err(ServiceError::Decode(
                "example patient is not a JSON object".to_string(),
            ));
        }
        Ok(value)
    }

    async fn submit_triage(&self, patient: &PatientData) -> ServiceResult<TriageResult> {
        tracing::debug!(url = %self.url(TRIAGE_PATH), "submitting triage");
        let response = self
            .client
            .post(self.url(TRIAGE_PATH))
            .json(patient)
            .send()
            .await?;
        Self::read_json(response).await
    }
}
