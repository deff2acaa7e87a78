use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use super::user_repository::{RepositoryError, UserRepository};
use crate::models::user::{NewUser, OauthProvider, UserAccount};

/// In-memory `users` table with the same uniqueness rule as Postgres.
#[derive(Default)]
pub struct MockDb {
    pub users: Mutex<Vec<UserAccount>>,
}

#[async_trait]
impl UserRepository for MockDb {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserAccount>, RepositoryError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn create_user(&self, new_user: &NewUser) -> Result<UserAccount, RepositoryError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == new_user.email) {
            return Err(RepositoryError::UniqueViolation {
                email: new_user.email.clone(),
            });
        }

        let now = Utc::now().naive_utc();
        let user = UserAccount {
            id: users.len() as i32 + 1,
            name: new_user.name.clone(),
            email: new_user.email.clone(),
            provider: new_user.provider.map(|p| OauthProvider::as_str(p).to_string()),
            external_id: new_user.external_id.clone(),
            role: new_user.role_or_default().to_string(),
            updated_at: Some(now),
            created_at: Some(now),
        };
        users.push(user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Ada".into(),
            email: email.into(),
            provider: None,
            external_id: "ext-1".into(),
            role: None,
        }
    }

    #[tokio::test]
    async fn second_account_with_same_email_is_rejected() {
        let db = MockDb::default();

        let first = db.create_user(&new_user("ada@example.com")).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(first.role, "customer");

        let err = db.create_user(&new_user("ada@example.com")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::UniqueViolation { ref email } if email == "ada@example.com"));

        let other = db.create_user(&new_user("grace@example.com")).await.unwrap();
        assert_eq!(other.id, 2);
    }

    #[tokio::test]
    async fn finds_created_account_by_email() {
        let db = MockDb::default();
        db.create_user(&new_user("ada@example.com")).await.unwrap();

        let found = db.find_user_by_email("ada@example.com").await.unwrap();
        assert_eq!(found.map(|u| u.external_id), Some("ext-1".to_string()));
        assert!(db.find_user_by_email("nobody@example.com").await.unwrap().is_none());
    }
}
