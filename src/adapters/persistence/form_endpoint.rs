//! Form-endpoint adapter. Implements PersistencePort by POSTing the flat
//! booking fields to a hosted form backend.

use crate::domain::{BookingRecord, DomainError};
use crate::ports::PersistencePort;
use reqwest::Client;

/// HTTP adapter for the persistence collaborator.
///
/// The upstream form service acknowledges with a 2xx; anything else is
/// surfaced as a persistence error so the orchestrator never assumes an
/// unverified write went through.
pub struct FormEndpointStore {
    client: Client,
    url: String,
}

impl FormEndpointStore {
    pub fn new(url: String) -> Self {
        Self {
            client: Client::new(),
            url,
        }
    }
}

#[async_trait::async_trait]
impl PersistencePort for FormEndpointStore {
    async fn record(&self, record: &BookingRecord) -> Result<(), DomainError> {
        let res = self
            .client
            .post(&self.url)
            .form(record)
            .send()
            .await
            .map_err(|e| DomainError::Persistence(format!("request failed: {}", e)))?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_else(|_| "unknown".to_string());
            return Err(DomainError::Persistence(format!(
                "form endpoint error {}: {}",
                status, text
            )));
        }

        Ok(())
    }
}
