use core::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::utils::validation::{is_email, max_chars, FieldErrors};

pub const DEFAULT_ROLE: &str = "customer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OauthProvider {
    Google,
    Github,
    Apple,
    Email,
}

impl OauthProvider {
    pub fn as_str(self) -> &'static str {
        match self {
            OauthProvider::Google => "google",
            OauthProvider::Github => "github",
            OauthProvider::Apple => "apple",
            OauthProvider::Email => "email",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        [
            OauthProvider::Google,
            OauthProvider::Github,
            OauthProvider::Apple,
            OauthProvider::Email,
        ]
        .into_iter()
        .find(|p| p.as_str() == tag)
    }
}

impl fmt::Display for OauthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OauthProvider::Google => "Google",
            OauthProvider::Github => "GitHub",
            OauthProvider::Apple => "Apple",
            OauthProvider::Email => "Email",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct UserAccount {
    pub id: i32,
    #[sqlx(rename = "fname")]
    pub name: String,
    pub email: String,
    pub provider: Option<String>,
    pub external_id: String,
    pub role: String,
    pub updated_at: Option<NaiveDateTime>,
    pub created_at: Option<NaiveDateTime>,
}

impl UserAccount {
    pub fn is_linked_to(&self, provider: Option<OauthProvider>) -> bool {
        self.provider.as_deref() == provider.map(OauthProvider::as_str)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub provider: Option<OauthProvider>,
    pub external_id: String,
    #[serde(default)]
    pub role: Option<String>,
}

impl NewUser {
    pub fn role_or_default(&self) -> &str {
        self.role.as_deref().unwrap_or(DEFAULT_ROLE)
    }

    /// Checks the values fit the `users` columns before they reach the store.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.name.trim().is_empty() {
            errors.push("name", "Name is required.");
        } else {
            errors.check("name", max_chars(&self.name, 100, "Name must be at most 100 characters long."));
        }

        if !is_email(&self.email) {
            errors.push("email", "Invalid email address.");
        } else {
            errors.check("email", max_chars(&self.email, 100, "Email must be at most 100 characters long."));
        }

        if self.external_id.trim().is_empty() {
            errors.push("external_id", "External id is required.");
        } else {
            errors.check(
                "external_id",
                max_chars(&self.external_id, 100, "External id must be at most 100 characters long."),
            );
        }

        if let Some(role) = &self.role {
            if role.trim().is_empty() {
                errors.push("role", "Role cannot be empty.");
            } else {
                errors.check("role", max_chars(role, 12, "Role must be at most 12 characters long."));
            }
        }

        errors.into_result(|| ())
    }
}
