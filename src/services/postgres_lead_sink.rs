use async_trait::async_trait;
use sqlx::{types::Json, PgPool};
use tracing::info;

use super::lead_sink::{LeadSink, SinkError};
use crate::models::lead::{Choice, LeadSubmission};

/// Stores each lead as a row in `lead_submissions`.
pub struct PostgresLeadSink {
    pub pool: PgPool,
}

#[async_trait]
impl LeadSink for PostgresLeadSink {
    async fn deliver(&self, submission: &LeadSubmission) -> Result<(), SinkError> {
        let contact = submission.contact();
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO lead_submissions (service_type, name, email, payload)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(submission.service_type().as_str())
        .bind(&contact.name)
        .bind(&contact.email)
        .bind(Json(submission))
        .fetch_one(&self.pool)
        .await?;

        info!(lead_id = id, service_type = submission.service_type().as_str(), "stored lead");
        Ok(())
    }
}
