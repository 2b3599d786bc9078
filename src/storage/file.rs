//! File-backed store: one `<key>.json` file per key inside a data directory.

use super::{KeyValueStore, StorageError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) the data directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            key: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    /// Write to a temp file then rename, so a crash never leaves half a file behind.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        let io_err = |source: std::io::Error| StorageError::Io {
            key: key.to_string(),
            source,
        };
        fs::write(&tmp, value).map_err(io_err)?;
        fs::rename(&tmp, &path).map_err(io_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("scoreboard-store-{}", Uuid::new_v4()))
    }

    #[test]
    fn missing_key_reads_as_none() {
        let dir = temp_dir();
        let store = FileStore::open(&dir).unwrap();
        assert_eq!(store.get("players").unwrap(), None);
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn set_then_get_returns_value_and_leaves_no_temp_file() {
        let dir = temp_dir();
        let mut store = FileStore::open(&dir).unwrap();
        store.set("history", "[]").unwrap();
        store.set("history", "[1]").unwrap();
        assert_eq!(store.get("history").unwrap().as_deref(), Some("[1]"));
        assert!(dir.join("history.json").exists());
        assert!(!dir.join("history.json.tmp").exists());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn open_creates_nested_directory() {
        let dir = temp_dir().join("nested");
        let store = FileStore::open(&dir).unwrap();
        assert!(store.dir().is_dir());
        fs::remove_dir_all(dir.parent().unwrap()).unwrap();
    }
}
