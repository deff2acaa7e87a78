use async_trait::async_trait;
use sqlx::PgPool;

use super::user_repository::{RepositoryError, UserRepository};
use crate::models::user::{NewUser, OauthProvider, UserAccount};

pub struct PostgresUserRepository {
    pub pool: PgPool,
}

const USER_COLUMNS: &str = "id, fname, email, provider, external_id, role, updated_at, created_at";

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserAccount>, RepositoryError> {
        let user = sqlx::query_as::<_, UserAccount>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create_user(&self, new_user: &NewUser) -> Result<UserAccount, RepositoryError> {
        let result = sqlx::query_as::<_, UserAccount>(&format!(
            r#"
            INSERT INTO users (fname, email, provider, external_id, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(new_user.provider.map(OauthProvider::as_str))
        .bind(&new_user.external_id)
        .bind(new_user.role_or_default())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(RepositoryError::UniqueViolation {
                    email: new_user.email.clone(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }
}
