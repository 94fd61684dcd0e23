//! Driven port for the table of accounts accepted at login.
//!
//! Services ask the directory whether an email/password pair is known and
//! receive the matching [`User`]. The directory does not distinguish an
//! unknown email from a wrong password.

#[cfg(any(test, feature = "test-support"))]
use crate::domain::UserId;
use crate::domain::{LoginCredentials, User};

use super::define_port_error;

define_port_error! {
    /// Errors raised by credential directory adapters.
    pub enum CredentialDirectoryError {
        /// The directory could not be loaded.
        Unavailable { message: String } =>
            "credential directory unavailable: {message}",
    }
}

/// Port for credential lookups.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialDirectory: Send + Sync {
    /// Return the user whose email and password both match exactly.
    fn find_user(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Option<User>, CredentialDirectoryError>;
}

/// In-memory directory holding the two built-in demo accounts, for tests.
///
/// Both `admin@ticketapp.com` and `user@ticketapp.com` accept
/// `password123`.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCredentialDirectory;

#[cfg(any(test, feature = "test-support"))]
const FIXTURE_PASSWORD: &str = "password123";
#[cfg(any(test, feature = "test-support"))]
const FIXTURE_ACCOUNTS: [(&str, &str, &str); 2] = [
    ("1", "admin@ticketapp.com", "Admin User"),
    ("2", "user@ticketapp.com", "Test User"),
];

#[cfg(any(test, feature = "test-support"))]
impl CredentialDirectory for FixtureCredentialDirectory {
    fn find_user(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Option<User>, CredentialDirectoryError> {
        if credentials.password() != FIXTURE_PASSWORD {
            return Ok(None);
        }
        FIXTURE_ACCOUNTS
            .iter()
            .find(|(_, email, _)| *email == credentials.email())
            .map(|(id, email, name)| {
                UserId::new(id)
                    .map(|id| User::new(id, *email, *name))
                    .map_err(|err| {
                        CredentialDirectoryError::unavailable(format!(
                            "invalid fixture user id: {err}"
                        ))
                    })
            })
            .transpose()
    }
}
