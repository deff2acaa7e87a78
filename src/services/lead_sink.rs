use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

use crate::models::lead::LeadSubmission;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("webhook rejected lead with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Destination for validated leads.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LeadSink: Send + Sync {
    async fn deliver(&self, submission: &LeadSubmission) -> Result<(), SinkError>;
}
