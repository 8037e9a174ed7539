//! Trait abstraction for the triage service to enable mocking in tests

use super::ServiceResult;
use crate::state::{PatientData, TriageResult};
use async_trait::async_trait;
use serde_json::Value;

/// Operations the client needs from the triage service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TriageService: Send + Sync {
    /// Base URL requests are sent to
    fn base_url(&self) -> String;

    /// Fetch a generated example patient as a JSON object
    async fn fetch_example_patient(&self) -> ServiceResult<Value>;

    /// Classify a patient
    async fn submit_triage(&self, patient: &PatientData) -> ServiceResult<TriageResult>;
}
