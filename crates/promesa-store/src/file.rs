//! Preference storage in a single JSON object file.
//!
//! The file is shared between tabs/processes, so `get` re-reads it on every
//! call and `set` replaces it through a temp-file rename. Last write wins;
//! the record is eventually consistent across writers.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{debug, warn};

use promesa_i18n::{PreferenceStore, StoreError};

/// Key-value store persisted as one JSON object file.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    /// Use the given file. Nothing is created until the first write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Where the store lives on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<Map<String, Value>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(StoreError::Read(e.to_string())),
        };

        let value: Value =
            serde_json::from_str(&text).map_err(|e| StoreError::Read(e.to_string()))?;
        match value {
            Value::Object(map) => Ok(map),
            _ => Err(StoreError::Read("store root is not a JSON object".into())),
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .read_map()?
            .get(key)
            .and_then(Value::as_str)
            .map(String::from))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        // A corrupt store must not make writes impossible; start fresh.
        let mut map = match self.read_map() {
            Ok(map) => map,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "rewriting unreadable preference store");
                Map::new()
            }
        };
        map.insert(key.to_string(), Value::String(value.to_string()));

        let text = serde_json::to_string_pretty(&Value::Object(map))
            .map_err(|e| StoreError::Write(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| StoreError::Write(e.to_string()))?;
            }
        }

        write_atomic(&self.path, text.as_bytes()).map_err(|e| StoreError::Write(e.to_string()))
    }
}

/// Write through a same-directory temp file and rename, so readers in other
/// processes never observe a partially written store.
fn write_atomic(path: &Path, content: &[u8]) -> io::Result<()> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("preferences");
    let temp_path = path.with_file_name(format!(".{file_name}.tmp.{}", std::process::id()));

    debug!("writing to temp file: {:?}", temp_path);
    {
        let mut file = File::create(&temp_path)?;
        file.write_all(content)?;
        file.sync_all()?;
    }

    match fs::rename(&temp_path, path) {
        Ok(()) => Ok(()),
        Err(e) => {
            let _ = fs::remove_file(&temp_path);
            Err(e)
        }
    }
}
