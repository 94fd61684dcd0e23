//! Session service: the single logged-in user and mock authentication.
//!
//! The session is one JSON-encoded [`User`] stored under
//! [`StorageKey::SESSION`]. Login and signup wait for an artificial delay
//! before touching the store, mimicking a network round trip.

use std::sync::Arc;
use std::time::Duration;

use mockable::Clock;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{
    CredentialDirectory, CredentialDirectoryError, KeyValueStore, KeyValueStoreError, Sleeper,
    StorageKey,
};
use crate::domain::store_errors::map_store_error;
use crate::domain::{
    Error, LoginCredentials, PASSWORD_MIN_LENGTH, SignupRequest, User, UserId,
};

/// Default artificial delay applied to login and signup.
pub const DEFAULT_AUTH_DELAY: Duration = Duration::from_millis(1000);

/// Message returned for every failed login, whatever the cause.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";

/// Session service over a key-value store and a credential directory.
pub struct SessionService<S, C> {
    store: Arc<S>,
    directory: Arc<C>,
    sleeper: Arc<dyn Sleeper>,
    clock: Arc<dyn Clock>,
    auth_delay: Duration,
}

impl<S, C> SessionService<S, C> {
    /// Create a service using [`DEFAULT_AUTH_DELAY`].
    pub fn new(
        store: Arc<S>,
        directory: Arc<C>,
        sleeper: Arc<dyn Sleeper>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            directory,
            sleeper,
            clock,
            auth_delay: DEFAULT_AUTH_DELAY,
        }
    }

    /// Override the artificial delay applied to login and signup.
    pub fn with_auth_delay(mut self, auth_delay: Duration) -> Self {
        self.auth_delay = auth_delay;
        self
    }

    /// Delay awaited before login and signup.
    pub fn auth_delay(&self) -> Duration {
        self.auth_delay
    }
}

impl<S, C> SessionService<S, C>
where
    S: KeyValueStore,
    C: CredentialDirectory,
{
    fn map_directory_error(error: CredentialDirectoryError) -> Error {
        match error {
            CredentialDirectoryError::Unavailable { message } => {
                Error::service_unavailable(format!("credential directory unavailable: {message}"))
            }
        }
    }

    fn persist(&self, user: &User) -> Result<(), Error> {
        let encoded = serde_json::to_string(user)
            .map_err(|err| Error::internal(format!("failed to encode session: {err}")))?;
        self.store
            .set(&StorageKey::SESSION, &encoded)
            .map_err(map_store_error)
    }

    /// Read the current session.
    ///
    /// An entry that no longer parses as a [`User`], including one whose
    /// bytes are not text, is removed and treated as logged out.
    pub fn load(&self) -> Result<Option<User>, Error> {
        let decoded = match self.store.get(&StorageKey::SESSION) {
            Ok(None) => return Ok(None),
            Ok(Some(raw)) => serde_json::from_str::<User>(&raw).map_err(|err| err.to_string()),
            Err(err @ KeyValueStoreError::Corrupt { .. }) => Err(err.to_string()),
            Err(err) => return Err(map_store_error(err)),
        };

        match decoded {
            Ok(user) => Ok(Some(user)),
            Err(reason) => {
                warn!(key = %StorageKey::SESSION, error = %reason, "discarding unreadable session");
                self.store
                    .remove(&StorageKey::SESSION)
                    .map_err(map_store_error)?;
                Ok(None)
            }
        }
    }

    /// Return the current user or fail with `unauthorized`.
    pub fn require_user(&self) -> Result<User, Error> {
        self.load()?
            .ok_or_else(|| Error::unauthorized("Please log in to continue"))
    }

    /// Authenticate against the credential directory and start a session.
    ///
    /// Unknown emails and wrong passwords fail identically, and a failed
    /// attempt leaves any existing session untouched.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        self.sleeper.sleep(self.auth_delay).await;

        let user = self
            .directory
            .find_user(credentials)
            .map_err(Self::map_directory_error)?
            .ok_or_else(|| Error::unauthorized(INVALID_CREDENTIALS_MESSAGE))?;

        self.persist(&user)?;
        info!(user_id = %user.id(), "logged in");
        Ok(user)
    }

    /// Create an account and start a session for it.
    ///
    /// The new user id is the current Unix time in milliseconds. Emails are
    /// not checked for uniqueness.
    pub async fn signup(&self, request: &SignupRequest) -> Result<User, Error> {
        self.sleeper.sleep(self.auth_delay).await;

        if request.password().chars().count() < PASSWORD_MIN_LENGTH {
            return Err(
                Error::invalid_request("Password must be at least 6 characters")
                    .with_details(json!({ "field": "password", "min": PASSWORD_MIN_LENGTH })),
            );
        }

        let id = UserId::from_timestamp_millis(self.clock.utc().timestamp_millis());
        let user = User::new(id, request.email(), request.name());
        self.persist(&user)?;
        info!(user_id = %user.id(), "signed up");
        Ok(user)
    }

    /// End the session. Logging out while logged out succeeds.
    pub fn logout(&self) -> Result<(), Error> {
        self.store
            .remove(&StorageKey::SESSION)
            .map_err(map_store_error)?;
        info!("logged out");
        Ok(())
    }
}

#[cfg(test)]
#[path = "session_service_tests.rs"]
mod tests;
