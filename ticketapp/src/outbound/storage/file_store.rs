//! Directory-backed key-value store.
//!
//! Each key is stored as `<key>.json` inside the data directory. The
//! directory is opened once as a `cap_std` capability, so the store can only
//! touch files beneath it.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs::Dir};
use tracing::debug;

use crate::domain::ports::{KeyValueStore, KeyValueStoreError, StorageKey};

use super::atomic_io::write_atomic;

/// Key-value store persisting each key as a JSON file.
///
/// # Examples
/// ```no_run
/// use camino::Utf8Path;
/// use ticketapp::domain::ports::{KeyValueStore, StorageKey};
/// use ticketapp::outbound::storage::FileKeyValueStore;
///
/// let store = FileKeyValueStore::open(Utf8Path::new(".ticketapp"))?;
/// store.set(&StorageKey::TICKETS, "[]")?;
/// assert_eq!(store.get(&StorageKey::TICKETS)?.as_deref(), Some("[]"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct FileKeyValueStore {
    root: Utf8PathBuf,
    dir: Dir,
}

impl FileKeyValueStore {
    /// Open the store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueStoreError::Unavailable`] when the directory cannot
    /// be created or opened.
    pub fn open(root: &Utf8Path) -> Result<Self, KeyValueStoreError> {
        let unavailable =
            |err: io::Error| KeyValueStoreError::unavailable(format!("{root}: {err}"));
        Dir::create_ambient_dir_all(root, ambient_authority()).map_err(unavailable)?;
        let dir = Dir::open_ambient_dir(root, ambient_authority()).map_err(unavailable)?;
        Ok(Self {
            root: root.to_path_buf(),
            dir,
        })
    }

    /// Directory holding the stored values.
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &StorageKey) -> Utf8PathBuf {
        self.root.join(file_name(key))
    }
}

fn file_name(key: &StorageKey) -> String {
    format!("{key}.json")
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &StorageKey) -> Result<Option<String>, KeyValueStoreError> {
        let bytes = match self.dir.read(file_name(key)) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(KeyValueStoreError::read(key.as_str(), err.to_string())),
        };
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|_| KeyValueStoreError::corrupt(key.as_str()))
    }

    fn set(&self, key: &StorageKey, value: &str) -> Result<(), KeyValueStoreError> {
        write_atomic(&self.dir, &file_name(key), value)
            .map_err(|err| KeyValueStoreError::write(key.as_str(), err.to_string()))?;
        debug!(%key, bytes = value.len(), "stored value");
        Ok(())
    }

    fn remove(&self, key: &StorageKey) -> Result<(), KeyValueStoreError> {
        match self.dir.remove_file(file_name(key)) {
            Ok(()) => {
                debug!(%key, "removed value");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(KeyValueStoreError::write(key.as_str(), err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::test_support::TempDataDir;
    use rstest::{fixture, rstest};

    #[fixture]
    fn data_dir() -> TempDataDir {
        TempDataDir::new()
    }

    #[rstest]
    fn missing_key_reads_as_none(data_dir: TempDataDir) {
        let store = FileKeyValueStore::open(data_dir.path()).expect("open store");
        assert_eq!(store.get(&StorageKey::SESSION).expect("get"), None);
    }

    #[rstest]
    fn values_land_in_named_files(data_dir: TempDataDir) {
        let store = FileKeyValueStore::open(data_dir.path()).expect("open store");
        store.set(&StorageKey::TICKETS, "[]").expect("set");

        let path = store.path_for(&StorageKey::TICKETS);
        assert_eq!(path.file_name(), Some("ticketapp_tickets.json"));
        assert_eq!(store.get(&StorageKey::TICKETS).expect("get").as_deref(), Some("[]"));
    }

    #[rstest]
    fn remove_is_idempotent(data_dir: TempDataDir) {
        let store = FileKeyValueStore::open(data_dir.path()).expect("open store");
        store.set(&StorageKey::SESSION, "{}").expect("set");

        store.remove(&StorageKey::SESSION).expect("first remove");
        store.remove(&StorageKey::SESSION).expect("second remove");

        assert_eq!(store.get(&StorageKey::SESSION).expect("get"), None);
    }

    #[rstest]
    fn undecodable_bytes_are_reported_as_corrupt(data_dir: TempDataDir) {
        let store = FileKeyValueStore::open(data_dir.path()).expect("open store");
        store
            .dir
            .write("ticketapp_session.json", [0xff, 0xfe, 0x00])
            .expect("seed bytes");

        assert_eq!(
            store.get(&StorageKey::SESSION),
            Err(KeyValueStoreError::corrupt("ticketapp_session"))
        );
    }

    #[rstest]
    fn open_creates_nested_directories(data_dir: TempDataDir) {
        let nested = data_dir.path().join("a").join("b");
        let store = FileKeyValueStore::open(&nested).expect("open store");
        assert_eq!(store.root(), nested.as_path());
    }
}
