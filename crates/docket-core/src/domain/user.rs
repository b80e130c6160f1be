use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use super::UserId;
use crate::error::DomainError;

/// Minimum accepted password length at sign-up.
pub const MIN_PASSWORD_LEN: usize = 8;

/// User entity - represents a user in the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw sign-up input as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct SignUp {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub password: String,
}

impl SignUp {
    /// Check the input and return the normalized email.
    pub fn validate(&self) -> Result<String, DomainError> {
        if self.first_name.trim().is_empty() {
            return Err(DomainError::Validation(
                "First name can't be empty".to_string(),
            ));
        }

        let email = normalize_email(&self.email);
        if !email.validate_email() {
            return Err(DomainError::Validation(
                "Email should be of the form - username@mail.domain".to_string(),
            ));
        }

        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(DomainError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        Ok(email)
    }
}

/// A validated user ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    /// Build from validated sign-up input and an already computed hash.
    pub fn new(input: &SignUp, email: String, password_hash: String) -> Self {
        let last_name = input
            .last_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Self {
            first_name: input.first_name.trim().to_string(),
            last_name,
            email,
            password_hash,
        }
    }
}

/// Emails are matched case-insensitively.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Mask an email for logging to avoid PII in logs.
pub fn mask_email(email: &str) -> String {
    match email.find('@') {
        Some(at_pos) => {
            let (local, domain) = email.split_at(at_pos);
            match local.chars().next() {
                Some(first) if local.chars().count() > 1 => format!("{first}***{domain}"),
                _ => format!("***{domain}"),
            }
        }
        None => "***".to_string(),
    }
}
