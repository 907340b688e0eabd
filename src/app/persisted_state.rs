// SPDX-License-Identifier: MPL-2.0
//! Application state persistence using CBOR format.
//!
//! Holds what the app remembers between sessions without it being a
//! preference: today only the directory the file picker last opened.
//! User-editable settings live in `settings.toml` instead.
//!
//! # Path Resolution
//!
//! 1. `load_from()`/`save_to()` with an explicit directory
//! 2. `--data-dir` or `PLANT_DOCTOR_DATA_DIR`
//! 3. Platform-specific data directory

use super::paths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// State file name within the app data directory.
const STATE_FILE: &str = "state.cbor";

const LOAD_WARNING: &str = "notification-state-load-error";
const SAVE_WARNING: &str = "notification-state-save-error";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppState {
    /// Initial directory of the file picker.
    #[serde(default)]
    pub last_open_directory: Option<PathBuf>,
}

impl AppState {
    /// Loads state from the default location.
    ///
    /// Returns the state and an optional warning key. A missing file is not
    /// a warning; an unreadable or corrupt one is.
    pub fn load() -> (Self, Option<String>) {
        Self::load_from(None)
    }

    pub fn load_from(base_dir: Option<PathBuf>) -> (Self, Option<String>) {
        let Some(path) = state_file_path(base_dir) else {
            return (Self::default(), None);
        };

        if !path.exists() {
            return (Self::default(), None);
        }

        let loaded = fs::File::open(&path)
            .ok()
            .and_then(|file| ciborium::from_reader(BufReader::new(file)).ok());

        match loaded {
            Some(state) => (state, None),
            None => (Self::default(), Some(LOAD_WARNING.to_string())),
        }
    }

    /// Saves state to the default location, returning a warning key on
    /// failure.
    pub fn save(&self) -> Option<String> {
        self.save_to(None)
    }

    pub fn save_to(&self, base_dir: Option<PathBuf>) -> Option<String> {
        let Some(path) = state_file_path(base_dir) else {
            return Some(SAVE_WARNING.to_string());
        };

        if let Some(parent) = path.parent() {
            if fs::create_dir_all(parent).is_err() {
                return Some(SAVE_WARNING.to_string());
            }
        }

        let written = fs::File::create(&path)
            .ok()
            .is_some_and(|file| ciborium::into_writer(self, BufWriter::new(file)).is_ok());

        if written {
            None
        } else {
            Some(SAVE_WARNING.to_string())
        }
    }

    /// Remembers the directory containing `file_path`. Paths without a parent
    /// leave the state unchanged.
    pub fn set_last_open_directory_from_file(&mut self, file_path: &Path) {
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.last_open_directory = Some(parent.to_path_buf());
        }
    }

    /// The remembered directory, if it still exists.
    #[must_use]
    pub fn existing_open_directory(&self) -> Option<&Path> {
        self.last_open_directory
            .as_deref()
            .filter(|dir| dir.is_dir())
    }
}

fn state_file_path(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_data_dir_with_override(base_dir).map(|mut path| {
        path.push(STATE_FILE);
        path
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_state_has_no_last_directory() {
        assert!(AppState::default().last_open_directory.is_none());
    }

    #[test]
    fn set_last_open_directory_extracts_parent() {
        let mut state = AppState::default();
        state.set_last_open_directory_from_file(Path::new("/home/user/crops/tomato.jpg"));
        assert_eq!(
            state.last_open_directory,
            Some(PathBuf::from("/home/user/crops"))
        );
    }

    #[test]
    fn set_last_open_directory_ignores_root_and_bare_names() {
        let mut state = AppState::default();
        state.set_last_open_directory_from_file(Path::new("/"));
        state.set_last_open_directory_from_file(Path::new("leaf.png"));
        assert!(state.last_open_directory.is_none());
    }

    #[test]
    fn save_to_and_load_from_custom_directory() {
        let temp_dir = tempdir().expect("create temp dir");
        let base_dir = temp_dir.path().to_path_buf();

        let original = AppState {
            last_open_directory: Some(PathBuf::from("/test/open/directory")),
        };

        assert!(original.save_to(Some(base_dir.clone())).is_none());
        assert!(base_dir.join(STATE_FILE).exists());

        let (loaded, warning) = AppState::load_from(Some(base_dir));
        assert!(warning.is_none());
        assert_eq!(original, loaded);
    }

    #[test]
    fn load_from_empty_directory_returns_default() {
        let temp_dir = tempdir().expect("create temp dir");
        let (state, warning) = AppState::load_from(Some(temp_dir.path().to_path_buf()));
        assert!(warning.is_none(), "should not warn for missing file");
        assert_eq!(state, AppState::default());
    }

    #[test]
    fn load_from_corrupted_file_returns_default_with_warning() {
        let temp_dir = tempdir().expect("create temp dir");
        let base_dir = temp_dir.path().to_path_buf();
        fs::write(base_dir.join(STATE_FILE), "not valid cbor data").expect("write file");

        let (state, warning) = AppState::load_from(Some(base_dir));
        assert_eq!(warning.as_deref(), Some(LOAD_WARNING));
        assert_eq!(state, AppState::default());
    }

    #[test]
    fn save_creates_parent_directories() {
        let temp_dir = tempdir().expect("create temp dir");
        let nested_dir = temp_dir.path().join("nested").join("deeply");

        let state = AppState {
            last_open_directory: Some(PathBuf::from("/test")),
        };
        assert!(state.save_to(Some(nested_dir.clone())).is_none());
        assert!(nested_dir.join(STATE_FILE).exists());
    }

    #[test]
    fn existing_open_directory_skips_deleted_dirs() {
        let temp_dir = tempdir().expect("create temp dir");
        let mut state = AppState {
            last_open_directory: Some(temp_dir.path().to_path_buf()),
        };
        assert_eq!(state.existing_open_directory(), Some(temp_dir.path()));

        state.last_open_directory = Some(PathBuf::from("/definitely/not/here"));
        assert!(state.existing_open_directory().is_none());
    }
}
