//! Test utilities for Promesa crates.

use std::path::PathBuf;
use tempfile::TempDir;

/// Creates a temporary directory that is cleaned up on drop.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Creates a temporary preference file seeded with the given language code,
/// returning the directory guard and the file path.
pub fn seeded_prefs(language_code: &str) -> (TempDir, PathBuf) {
    let dir = temp_dir();
    let path = dir.path().join("preferences.json");
    let content = format!("{{\n  \"app_language\": \"{language_code}\"\n}}\n");
    std::fs::write(&path, content).expect("Failed to write preference file");
    (dir, path)
}

/// Path for a preference file that does not exist yet.
pub fn empty_prefs() -> (TempDir, PathBuf) {
    let dir = temp_dir();
    let path = dir.path().join("preferences.json");
    (dir, path)
}

/// Assert that a Result is Ok and return the value.
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a Result is Err.
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(_) => {}
        }
    };
}
