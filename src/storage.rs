use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StorageError;

/// Small text documents kept under one data directory.
#[derive(Debug, Clone)]
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// `Ok(None)` when the document does not exist yet.
    pub fn load_text(&self, name: &str) -> Result<Option<String>, StorageError> {
        let path = self.path(name);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    /// Writes through a sibling temp file so a torn write never replaces
    /// the previous document.
    pub fn save_text(&self, name: &str, text: &str) -> Result<(), StorageError> {
        let path = self.path(name);
        let tmp = self.path(&format!("{name}.tmp"));
        fs::write(&tmp, text).map_err(|source| StorageError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| StorageError::Io { path, source })
    }

    pub fn load_json<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, StorageError> {
        let Some(text) = self.load_text(name)? else {
            return Ok(None);
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| StorageError::Malformed {
                path: self.path(name),
                source,
            })
    }

    pub fn save_json<T: Serialize>(&self, name: &str, value: &T) -> Result<(), StorageError> {
        let text = serde_json::to_string_pretty(value).map_err(|source| {
            StorageError::Malformed {
                path: self.path(name),
                source,
            }
        })?;
        self.save_text(name, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_document_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path());
        assert!(storage.load_text("nope.json").unwrap().is_none());
    }

    #[test]
    fn text_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path());
        storage.save_text("doc.json", "{\"a\":1}").unwrap();
        assert_eq!(
            storage.load_text("doc.json").unwrap().as_deref(),
            Some("{\"a\":1}")
        );
        assert!(!storage.path("doc.json.tmp").exists());
    }

    #[test]
    fn malformed_json_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path());
        storage.save_text("doc.json", "{not json").unwrap();
        let err = storage.load_json::<Vec<u32>>("doc.json").unwrap_err();
        assert!(matches!(err, StorageError::Malformed { .. }));
    }

    #[test]
    fn write_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path().join("missing"));
        let err = storage.save_text("doc.json", "[]").unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
    }
}
