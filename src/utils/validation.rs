//! Field-level validation primitives shared by the lead form and account
//! creation.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::Url;
use serde::Serialize;

// Local part may not start with a dot and `..` is rejected separately,
// since the regex engine has no lookaround.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z0-9_'+\-.]*[a-z0-9_+\-]@([a-z0-9][a-z0-9\-]*\.)+[a-z]{2,}$")
        .expect("EMAIL_REGEX: invalid regex pattern")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Ordered list of per-field messages. Empty means the input is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Records `result` under `field` when it carries a message.
    pub fn check(&mut self, field: &'static str, result: Result<(), String>) {
        if let Err(message) = result {
            self.push(field, message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Messages recorded for one field, in the order they were found.
    #[cfg(test)]
    pub fn messages_for(&self, field: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.message.as_str())
            .collect()
    }

    #[cfg(test)]
    pub fn has(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// `Ok(value)` when nothing was recorded, otherwise the errors.
    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

pub fn is_email(value: &str) -> bool {
    !value.starts_with('.') && !value.contains("..") && EMAIL_REGEX.is_match(value)
}

pub fn is_url(value: &str) -> bool {
    Url::parse(value).is_ok()
}

pub fn min_chars(value: &str, min: usize, message: &str) -> Result<(), String> {
    if value.chars().count() >= min {
        Ok(())
    } else {
        Err(message.to_string())
    }
}

pub fn max_chars(value: &str, max: usize, message: &str) -> Result<(), String> {
    if value.chars().count() <= max {
        Ok(())
    } else {
        Err(message.to_string())
    }
}

/// Message for a value outside a fixed set of tags.
pub fn enum_message(expected: &[&str], received: &str) -> String {
    let expected = expected
        .iter()
        .map(|tag| format!("'{}'", tag))
        .collect::<Vec<_>>()
        .join(" | ");
    format!("Invalid enum value. Expected {}, received '{}'", expected, received)
}

/// Empty or whitespace-only optional input counts as not provided.
pub fn non_blank(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
