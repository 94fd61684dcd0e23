//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod credential_directory;
mod key_value_store;
mod sleeper;

#[cfg(test)]
pub use credential_directory::MockCredentialDirectory;
pub use credential_directory::{CredentialDirectory, CredentialDirectoryError};
#[cfg(any(test, feature = "test-support"))]
pub use credential_directory::FixtureCredentialDirectory;
#[cfg(test)]
pub use key_value_store::MockKeyValueStore;
pub use key_value_store::{KeyValueStore, KeyValueStoreError, StorageKey, StorageKeyError};
pub use sleeper::Sleeper;
