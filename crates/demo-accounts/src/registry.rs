//! Account registry types and JSON parsing.
//!
//! The registry is the credential table consulted at login: each entry pairs
//! an email and password with the user record a successful login yields. The
//! built-in table holds the two accounts shipped with the demo; a replacement
//! can be loaded from a versioned JSON file.

use std::collections::HashSet;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs::Dir};
use serde::Deserialize;

use crate::error::RegistryError;
use crate::validation::{PASSWORD_MIN_LENGTH, is_valid_email};

/// Current supported registry version.
const SUPPORTED_VERSION: u32 = 1;

/// Password shared by both built-in accounts.
const BUILTIN_PASSWORD: &str = "password123";

/// A single demo account and the user record it logs in as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoAccount {
    id: String,
    email: String,
    password: String,
    name: String,
}

impl DemoAccount {
    fn new(id: &str, email: &str, password: &str, name: &str) -> Self {
        Self {
            id: id.to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
            name: name.to_owned(),
        }
    }

    /// Returns the fixed user identifier for this account.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the login email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }
}

/// The table of demo accounts consulted at login.
///
/// # Example
///
/// ```
/// use demo_accounts::AccountRegistry;
///
/// let registry = AccountRegistry::builtin();
/// assert_eq!(registry.accounts().len(), 2);
/// assert!(registry.find_by_credentials("admin@ticketapp.com", "password123").is_some());
/// assert!(registry.find_by_credentials("admin@ticketapp.com", "nope").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRegistry {
    accounts: Vec<DemoAccount>,
}

impl AccountRegistry {
    /// Returns the two accounts shipped with the demo.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            accounts: vec![
                DemoAccount::new("1", "admin@ticketapp.com", BUILTIN_PASSWORD, "Admin User"),
                DemoAccount::new("2", "user@ticketapp.com", BUILTIN_PASSWORD, "Test User"),
            ],
        }
    }

    /// Parses an account registry from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if:
    /// - The JSON is malformed or has unknown fields
    /// - The version is unsupported
    /// - The account list is empty
    /// - Any account has a blank field, a malformed email, or a short password
    /// - Two accounts share an email
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let raw: RawAccountRegistry =
            serde_json::from_str(json).map_err(|e| RegistryError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    /// Loads an account registry from a JSON file.
    ///
    /// The parent directory is opened as a capability so only the named file
    /// is read.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Utf8Path) -> Result<Self, RegistryError> {
        let io_error = |message: String| RegistryError::IoError {
            path: path.to_path_buf(),
            message,
        };
        let file_name = path
            .file_name()
            .ok_or_else(|| io_error("registry path must be a file".to_owned()))?;
        let parent = match path.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent.to_path_buf(),
            _ => Utf8PathBuf::from("."),
        };
        let dir = Dir::open_ambient_dir(&parent, ambient_authority())
            .map_err(|err| io_error(err.to_string()))?;
        let contents = dir
            .read_to_string(file_name)
            .map_err(|err| io_error(err.to_string()))?;

        Self::from_json(&contents)
    }

    fn from_raw(raw: RawAccountRegistry) -> Result<Self, RegistryError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(RegistryError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        if raw.accounts.is_empty() {
            return Err(RegistryError::EmptyAccounts);
        }

        let mut seen = HashSet::new();
        let mut accounts = Vec::with_capacity(raw.accounts.len());
        for (index, account) in raw.accounts.into_iter().enumerate() {
            let validated = validate_account(index, account)?;
            if !seen.insert(validated.email.clone()) {
                return Err(RegistryError::DuplicateEmail {
                    email: validated.email,
                });
            }
            accounts.push(validated);
        }

        Ok(Self { accounts })
    }

    /// Returns all accounts in registry order.
    #[must_use]
    pub fn accounts(&self) -> &[DemoAccount] {
        &self.accounts
    }

    /// Finds the account whose email and password both match exactly.
    ///
    /// Returns `None` for an unknown email and for a wrong password alike.
    #[must_use]
    pub fn find_by_credentials(&self, email: &str, password: &str) -> Option<&DemoAccount> {
        self.accounts
            .iter()
            .find(|account| account.matches(email, password))
    }
}

impl Default for AccountRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn validate_account(index: usize, raw: RawDemoAccount) -> Result<DemoAccount, RegistryError> {
    let id = required(index, "id", &raw.id)?;
    let email = required(index, "email", &raw.email)?;
    let name = required(index, "name", &raw.name)?;

    if !is_valid_email(email) {
        return Err(RegistryError::InvalidEmail {
            index,
            value: raw.email,
        });
    }
    if raw.password.chars().count() < PASSWORD_MIN_LENGTH {
        return Err(RegistryError::PasswordTooShort {
            index,
            min: PASSWORD_MIN_LENGTH,
        });
    }

    Ok(DemoAccount::new(id, email, &raw.password, name))
}

fn required<'a>(
    index: usize,
    field: &'static str,
    value: &'a str,
) -> Result<&'a str, RegistryError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RegistryError::EmptyField { index, field });
    }
    Ok(trimmed)
}

/// Raw JSON representation for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawAccountRegistry {
    version: u32,
    accounts: Vec<RawDemoAccount>,
}

/// Raw JSON representation of a single account.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawDemoAccount {
    id: String,
    email: String,
    password: String,
    name: String,
}
