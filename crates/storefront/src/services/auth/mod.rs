//! Mock authentication service.
//!
//! There is no identity provider behind this service. Every sign-in succeeds
//! after a short artificial delay and produces an identity derived from the
//! input: the email's local part becomes the display name, or a fixed
//! placeholder for social sign-in. Passwords are accepted but never checked.
//!
//! The signed-in identity is persisted under [`keys::CURRENT_USER`] and
//! restored on startup.

mod error;

use std::time::Duration;

pub use error::AuthError;

use secrecy::SecretString;
use tracing::instrument;

use mycart_core::{Email, UserId};

use crate::models::User;
use crate::storage::{SharedStorage, keys, load_json, save_json};

/// Email used for every social sign-in.
pub const SOCIAL_EMAIL: &str = "user@gmail.com";

/// Display name used for every social sign-in.
pub const SOCIAL_NAME: &str = "Google User";

/// Mock authentication service holding the current identity.
pub struct AuthService {
    storage: SharedStorage,
    delay: Duration,
    current: Option<User>,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("delay", &self.delay)
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

impl AuthService {
    /// Restore the signed-in identity from storage.
    ///
    /// A missing or malformed record means nobody is signed in.
    #[instrument(skip(storage))]
    pub fn load(storage: SharedStorage, delay: Duration) -> Self {
        let current = match load_json::<User>(storage.as_ref(), keys::CURRENT_USER) {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable stored user");
                None
            }
        };

        Self {
            storage,
            delay,
            current,
        }
    }

    /// The signed-in user, if any.
    #[must_use]
    pub const fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// Sign in with email and password.
    ///
    /// The password is accepted for interface parity and not checked.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` for a malformed email, or
    /// `AuthError::Storage` if the identity cannot be persisted.
    #[instrument(skip(self, _password))]
    pub async fn sign_in(
        &mut self,
        email: &str,
        _password: &SecretString,
    ) -> Result<User, AuthError> {
        let email = Email::parse(email)?;
        self.simulate_latency().await;

        let name = email.local_part().to_string();
        self.establish(User {
            id: UserId::new(format!("user_{}", now_millis())),
            email,
            name,
        })
    }

    /// Create an account and sign in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail`, `AuthError::EmptyName`, or
    /// `AuthError::Storage` if the identity cannot be persisted.
    #[instrument(skip(self, _password))]
    pub async fn sign_up(
        &mut self,
        email: &str,
        _password: &SecretString,
        name: &str,
    ) -> Result<User, AuthError> {
        let email = Email::parse(email)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(AuthError::EmptyName);
        }
        self.simulate_latency().await;

        self.establish(User {
            id: UserId::new(format!("user_{}", now_millis())),
            email,
            name: name.to_string(),
        })
    }

    /// Sign in through the (simulated) Google provider.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the identity cannot be persisted.
    #[instrument(skip(self))]
    pub async fn sign_in_with_google(&mut self) -> Result<User, AuthError> {
        self.simulate_latency().await;

        self.establish(User {
            id: UserId::new(format!("user_google_{}", now_millis())),
            email: Email::parse(SOCIAL_EMAIL)?,
            name: SOCIAL_NAME.to_string(),
        })
    }

    /// Forget the current identity and its stored record.
    #[instrument(skip(self))]
    pub fn sign_out(&mut self) {
        if let Some(user) = self.current.take() {
            tracing::info!(user_id = %user.id, "Signed out");
        }
        if let Err(e) = self.storage.remove(keys::CURRENT_USER) {
            tracing::warn!(error = %e, "Failed to remove stored user");
        }
    }

    fn establish(&mut self, user: User) -> Result<User, AuthError> {
        save_json(self.storage.as_ref(), keys::CURRENT_USER, &user)?;
        tracing::info!(user_id = %user.id, "Signed in");
        self.current = Some(user.clone());
        Ok(user)
    }

    async fn simulate_latency(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
