//! Driven port for the string key-value store backing sessions and tickets.
//!
//! The store maps a [`StorageKey`] to an opaque string value. Services own
//! the encoding of those values; adapters only move strings in and out.

use std::borrow::Cow;
use std::fmt;

use super::define_port_error;

/// Validation errors returned by [`StorageKey::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageKeyError {
    Empty,
    InvalidCharacter { character: char },
}

impl fmt::Display for StorageKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "storage key must not be empty"),
            Self::InvalidCharacter { character } => write!(
                f,
                "storage key may only contain ASCII letters, digits, '_' or '-', found {character:?}",
            ),
        }
    }
}

impl std::error::Error for StorageKeyError {}

/// Name of a value in the key-value store.
///
/// ## Invariants
/// - Non-empty and limited to `[A-Za-z0-9_-]`, so adapters may use the key
///   as a file name without escaping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StorageKey(Cow<'static, str>);

impl StorageKey {
    /// Key holding the current session user.
    pub const SESSION: Self = Self(Cow::Borrowed("ticketapp_session"));
    /// Key holding the ticket collection.
    pub const TICKETS: Self = Self(Cow::Borrowed("ticketapp_tickets"));

    /// Validate and construct a key.
    ///
    /// # Examples
    /// ```
    /// use ticketapp::domain::ports::StorageKey;
    ///
    /// assert!(StorageKey::new("ticketapp_tickets").is_ok());
    /// assert!(StorageKey::new("../escape").is_err());
    /// ```
    pub fn new(key: impl Into<String>) -> Result<Self, StorageKeyError> {
        let key = key.into();
        if key.is_empty() {
            return Err(StorageKeyError::Empty);
        }
        if let Some(character) = key
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
        {
            return Err(StorageKeyError::InvalidCharacter { character });
        }
        Ok(Self(Cow::Owned(key)))
    }

    /// Borrow the key as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_ref()
    }
}

impl AsRef<str> for StorageKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

define_port_error! {
    /// Errors raised by key-value store adapters.
    pub enum KeyValueStoreError {
        /// The backing store could not be opened.
        Unavailable { message: String } =>
            "key-value store unavailable: {message}",
        /// Reading a value failed.
        Read { key: String, message: String } =>
            "failed to read {key}: {message}",
        /// Writing or removing a value failed.
        Write { key: String, message: String } =>
            "failed to write {key}: {message}",
        /// The stored bytes are not a string value.
        Corrupt { key: String } =>
            "stored value for {key} is not valid UTF-8",
    }
}

/// Port for the string key-value store.
///
/// Implementations must make `set` atomic per key: a reader never observes
/// a partially written value.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the value stored under `key`, or `None` when absent.
    ///
    /// Bytes that cannot be decoded as a string yield
    /// [`KeyValueStoreError::Corrupt`].
    fn get(&self, key: &StorageKey) -> Result<Option<String>, KeyValueStoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &StorageKey, value: &str) -> Result<(), KeyValueStoreError>;

    /// Remove `key`. Removing an absent key succeeds.
    fn remove(&self, key: &StorageKey) -> Result<(), KeyValueStoreError>;
}
