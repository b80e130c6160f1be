//! Sign-up and login.

use std::sync::Arc;

use crate::domain::{NewUser, SignUp, User, UserId, mask_email, normalize_email};
use crate::error::{DomainError, RepoError};
use crate::ports::{BaseRepository, PasswordService, UserRepository};

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, passwords: Arc<dyn PasswordService>) -> Self {
        Self { users, passwords }
    }

    /// Register a new account.
    pub async fn sign_up(&self, input: &SignUp) -> Result<User, DomainError> {
        let email = input.validate()?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(DomainError::Duplicate(
                "This email is already registered, Please use some other email".to_string(),
            ));
        }

        let password_hash = self
            .passwords
            .hash(&input.password)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let user = self
            .users
            .insert(NewUser::new(input, email, password_hash))
            .await
            .map_err(|e| match e {
                RepoError::Constraint(msg) => DomainError::Duplicate(msg),
                other => other.into(),
            })?;

        tracing::info!(user_id = user.id, email = %mask_email(&user.email), "User signed up");
        Ok(user)
    }

    /// Check credentials. Unknown emails and wrong passwords are
    /// indistinguishable to the caller.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, DomainError> {
        let email = normalize_email(email);

        let Some(user) = self.users.find_by_email(&email).await? else {
            tracing::debug!(email = %mask_email(&email), "Login for unknown email");
            return Err(DomainError::Unauthorized);
        };

        let valid = match self.passwords.verify(password, &user.password_hash) {
            Ok(valid) => valid,
            Err(e) => {
                tracing::warn!(user_id = user.id, error = %e, "Stored password hash unreadable");
                false
            }
        };

        if !valid {
            tracing::debug!(user_id = user.id, "Login with wrong password");
            return Err(DomainError::Unauthorized);
        }

        Ok(user)
    }

    pub async fn find_by_id(&self, user_id: UserId) -> Result<User, DomainError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "User",
                id: user_id,
            })
    }

    /// Used to greet the user above their list.
    pub async fn first_name(&self, user_id: UserId) -> Result<String, DomainError> {
        Ok(self.find_by_id(user_id).await?.first_name)
    }
}
