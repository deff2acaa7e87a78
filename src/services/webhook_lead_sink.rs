use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, warn};

use super::lead_sink::{LeadSink, SinkError};
use crate::models::lead::{Choice, LeadSubmission};

/// Forwards each lead as a JSON POST to an external endpoint.
pub struct WebhookLeadSink {
    client: Client,
    url: String,
}

impl WebhookLeadSink {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SinkError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, url))
    }

    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl LeadSink for WebhookLeadSink {
    async fn deliver(&self, submission: &LeadSubmission) -> Result<(), SinkError> {
        let res = self.client.post(&self.url).json(submission).send().await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "lead webhook rejected submission");
            return Err(SinkError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        info!(service_type = submission.service_type().as_str(), "forwarded lead");
        Ok(())
    }
}
