//! Error types for the demo-accounts crate.
//!
//! Registry loading is the only fallible operation; every failure is a
//! variant of [`RegistryError`] so callers can decide whether to fall back to
//! the built-in accounts.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or validating an account registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The registry file could not be read.
    #[error("failed to read account registry at '{path}': {message}")]
    IoError {
        /// Path to the registry file.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The registry JSON is malformed or missing required fields.
    #[error("invalid account registry JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The registry version is not supported.
    #[error("unsupported account registry version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the registry.
        actual: u32,
    },

    /// The registry contains no accounts.
    #[error("account registry contains no accounts")]
    EmptyAccounts,

    /// An account field was blank once trimmed.
    #[error("account at index {index} has an empty {field}")]
    EmptyField {
        /// Index of the offending account.
        index: usize,
        /// Name of the blank field.
        field: &'static str,
    },

    /// An account email does not look like `local@domain.tld`.
    #[error("account at index {index} has an invalid email: {value}")]
    InvalidEmail {
        /// Index of the offending account.
        index: usize,
        /// The rejected email.
        value: String,
    },

    /// An account password is shorter than the signup minimum.
    #[error("account at index {index} has a password shorter than {min} characters")]
    PasswordTooShort {
        /// Index of the offending account.
        index: usize,
        /// Minimum accepted length.
        min: usize,
    },

    /// Two accounts share the same email.
    #[error("email '{email}' is registered more than once")]
    DuplicateEmail {
        /// The repeated email.
        email: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_formats_correctly() {
        let err = RegistryError::IoError {
            path: Utf8PathBuf::from("/tmp/accounts.json"),
            message: "file not found".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "failed to read account registry at '/tmp/accounts.json': file not found"
        );
    }

    #[test]
    fn empty_field_formats_correctly() {
        let err = RegistryError::EmptyField {
            index: 1,
            field: "name",
        };
        assert_eq!(err.to_string(), "account at index 1 has an empty name");
    }

    #[test]
    fn password_too_short_formats_correctly() {
        let err = RegistryError::PasswordTooShort { index: 0, min: 6 };
        assert_eq!(
            err.to_string(),
            "account at index 0 has a password shorter than 6 characters"
        );
    }

    #[test]
    fn duplicate_email_formats_correctly() {
        let err = RegistryError::DuplicateEmail {
            email: "admin@ticketapp.com".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "email 'admin@ticketapp.com' is registered more than once"
        );
    }
}
