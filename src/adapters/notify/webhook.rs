//! Webhook notifier. Implements NotifierPort by POSTing the operator message
//! to a chat/webhook URL as JSON.

use crate::domain::DomainError;
use crate::ports::NotifierPort;
use reqwest::Client;

/// HTTP adapter for the notification collaborator.
pub struct WebhookNotifier {
    client: Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: String) -> Self {
        Self {
            client: Client::new(),
            url,
        }
    }
}

#[async_trait::async_trait]
impl NotifierPort for WebhookNotifier {
    async fn notify_operator(&self, message: &str) -> Result<(), DomainError> {
        let body = serde_json::json!({ "text": message });

        let res = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::Notify(format!("request failed: {}", e)))?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_else(|_| "unknown".to_string());
            return Err(DomainError::Notify(format!(
                "webhook error {}: {}",
                status, text
            )));
        }

        Ok(())
    }
}
