//! Credential directory backed by the demo account registry.

use camino::Utf8Path;
use demo_accounts::{AccountRegistry, DemoAccount, RegistryError};
use tracing::info;

use crate::domain::ports::{CredentialDirectory, CredentialDirectoryError};
use crate::domain::{LoginCredentials, User, UserId};

/// [`CredentialDirectory`] over a [`demo_accounts::AccountRegistry`].
#[derive(Debug, Clone, Default)]
pub struct RegistryCredentialDirectory {
    registry: AccountRegistry,
}

impl RegistryCredentialDirectory {
    /// Directory with the built-in demo accounts.
    pub fn builtin() -> Self {
        Self::new(AccountRegistry::builtin())
    }

    /// Wrap an already loaded registry.
    pub fn new(registry: AccountRegistry) -> Self {
        Self { registry }
    }

    /// Load the registry from `path`, or use the built-in accounts when no
    /// path is given.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when the file cannot be read or is invalid.
    pub fn load(path: Option<&Utf8Path>) -> Result<Self, RegistryError> {
        let Some(path) = path else {
            return Ok(Self::builtin());
        };
        let registry = AccountRegistry::from_file(path)?;
        info!(%path, accounts = registry.accounts().len(), "loaded demo accounts");
        Ok(Self::new(registry))
    }

    /// Number of known accounts.
    pub fn len(&self) -> usize {
        self.registry.accounts().len()
    }

    /// `true` when the directory holds no accounts.
    pub fn is_empty(&self) -> bool {
        self.registry.accounts().is_empty()
    }
}

fn to_user(account: &DemoAccount) -> Result<User, CredentialDirectoryError> {
    let id = UserId::new(account.id()).map_err(|err| {
        CredentialDirectoryError::unavailable(format!("invalid account id: {err}"))
    })?;
    Ok(User::new(id, account.email(), account.name()))
}

impl CredentialDirectory for RegistryCredentialDirectory {
    fn find_user(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Option<User>, CredentialDirectoryError> {
        self.registry
            .find_by_credentials(credentials.email(), credentials.password())
            .map(to_user)
            .transpose()
    }
}
