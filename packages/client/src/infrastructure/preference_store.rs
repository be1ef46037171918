//! JSON file backed [`PreferenceStore`].
//!
//! The file holds a flat string map, e.g. `{"tuganire-theme": "light"}`.
//! It is re-read on every `get`, so a value written by one run is what the
//! next run sees.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use crate::{domain::PreferenceStore, error::ClientError};

pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, ClientError> {
        match fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(source) => Err(ClientError::Storage {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn save(&self, values: &BTreeMap<String, String>) -> Result<(), ClientError> {
        let storage_error = |source| ClientError::Storage {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(storage_error)?;
        }

        // write-then-rename so a crash never leaves a truncated file
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(values)?).map_err(storage_error)?;
        fs::rename(&tmp, &self.path).map_err(storage_error)
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.load() {
            Ok(mut values) => values.remove(key),
            Err(e) => {
                tracing::warn!("Ignoring unreadable preferences: {}", e);
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        // a corrupt file is replaced rather than blocking the write
        let mut values = self.load().unwrap_or_default();
        values.insert(key.to_string(), value.to_string());
        self.save(&values)
    }
}
