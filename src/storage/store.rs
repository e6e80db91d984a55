//! Key/value stores holding persisted wedding data.
//!
//! A store maps string keys to string values, the way browser local storage
//! does. The [`DirectoryStore`] keeps one JSON file per key; the
//! [`MemoryStore`] keeps everything in a map.

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

/// Read access to persisted items.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unusable or the backing storage cannot
    /// be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
}

/// Errors raised by a [`KeyValueStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The key cannot name an item (empty, or would escape the store).
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),
    /// The backing storage could not be read.
    #[error("failed to read storage item '{key}'")]
    Io {
        /// The key being read.
        key: String,
        /// The underlying failure.
        #[source]
        source: io::Error,
    },
}

/// A filesystem backed store: one `<key>.json` file per item under `root`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Opens a store rooted at the given directory.
    ///
    /// The directory does not have to exist; a missing directory holds no
    /// items.
    #[must_use]
    pub const fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// The directory items are stored in.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The file that holds `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidKey`] if the key is empty, contains a path
    /// separator, or starts with a dot.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        if key.is_empty() || key.starts_with('.') || key.contains(['/', '\\', '\0']) {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueStore for DirectoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::trace!("No item at {}", path.display());
                Ok(None)
            }
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}

/// An in-memory store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn set_item(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.items.insert(key.into(), value.into());
    }

    /// Builder-style [`Self::set_item`].
    #[must_use]
    pub fn with_item(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_item(key, value);
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.get(key).cloned())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get_item(key)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn directory_store_reads_json_files() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("wedding_users.json"), "{}").unwrap();
        let store = DirectoryStore::new(tmp.path().to_path_buf());

        assert_eq!(
            store.get_item("wedding_users").unwrap().as_deref(),
            Some("{}")
        );
    }

    #[test]
    fn missing_items_and_directories_are_empty() {
        let tmp = TempDir::new().unwrap();
        let store = DirectoryStore::new(tmp.path().to_path_buf());
        assert_eq!(store.get_item("wedding_users").unwrap(), None);

        let absent = DirectoryStore::new(tmp.path().join("nowhere"));
        assert_eq!(absent.get_item("wedding_users").unwrap(), None);
    }

    #[test]
    fn keys_cannot_escape_the_root() {
        let store = DirectoryStore::new(PathBuf::from("/tmp/store"));

        for key in ["", "../secrets", "a/b", "a\\b", ".hidden"] {
            assert!(
                matches!(store.path_for(key), Err(StoreError::InvalidKey(_))),
                "{key:?} should be rejected"
            );
        }
        assert_eq!(
            store.path_for("wedding_data_u1").unwrap(),
            PathBuf::from("/tmp/store/wedding_data_u1.json")
        );
    }

    #[test]
    fn unreadable_item_is_an_error() {
        let tmp = TempDir::new().unwrap();
        // A directory where a file is expected cannot be read as a string.
        fs::create_dir(tmp.path().join("wedding_users.json")).unwrap();
        let store = DirectoryStore::new(tmp.path().to_path_buf());

        assert!(matches!(
            store.get_item("wedding_users"),
            Err(StoreError::Io { .. })
        ));
    }

    #[test]
    fn memory_store_round_trips_items() {
        let mut store = MemoryStore::new().with_item("a", "1");
        store.set_item("a", "2");

        assert_eq!(store.get_item("a").unwrap().as_deref(), Some("2"));
        assert_eq!(store.get_item("b").unwrap(), None);
    }
}
