use async_trait::async_trait;
use thiserror::Error;

use crate::models::user::{NewUser, UserAccount};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("an account with email {email} already exists")]
    UniqueViolation { email: String },
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserAccount>, RepositoryError>;

    /// Fails with [`RepositoryError::UniqueViolation`] when the email is taken.
    async fn create_user(&self, new_user: &NewUser) -> Result<UserAccount, RepositoryError>;
}
