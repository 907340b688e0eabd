// SPDX-License-Identifier: MPL-2.0
//! Where PlantDoctor keeps its files.
//!
//! Two directories are used: the config directory (holds `settings.toml`)
//! and the data directory (holds the small persisted UI state).
//!
//! # Path Resolution Order
//!
//! 1. **Explicit override** - parameter to `_with_override()` functions (for tests)
//! 2. **CLI arguments** (`--data-dir`, `--config-dir`) - set via [`init_cli_overrides`]
//! 3. **Environment variables** (`PLANT_DOCTOR_DATA_DIR`, `PLANT_DOCTOR_CONFIG_DIR`)
//! 4. **Platform default** - via `dirs` crate

use std::path::PathBuf;
use std::sync::OnceLock;

/// Application name used for directory naming.
pub(crate) const APP_NAME: &str = "PlantDoctor";

/// Environment variable to override the data directory.
pub const ENV_DATA_DIR: &str = "PLANT_DOCTOR_DATA_DIR";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "PLANT_DOCTOR_CONFIG_DIR";

static CLI_DATA_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();
static CLI_CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Records the `--data-dir` and `--config-dir` CLI arguments.
///
/// Only the first call has an effect; later calls are ignored so that
/// relaunching the Iced boot closure cannot change directories mid-run.
pub fn init_cli_overrides(data_dir: Option<String>, config_dir: Option<String>) {
    let _ = CLI_DATA_DIR.set(data_dir.map(PathBuf::from));
    let _ = CLI_CONFIG_DIR.set(config_dir.map(PathBuf::from));
}

fn cli_data_dir() -> Option<PathBuf> {
    CLI_DATA_DIR.get().and_then(Clone::clone)
}

fn cli_config_dir() -> Option<PathBuf> {
    CLI_CONFIG_DIR.get().and_then(Clone::clone)
}

fn env_dir(var: &str) -> Option<PathBuf> {
    std::env::var(var)
        .ok()
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Returns the application data directory path.
///
/// Platform defaults:
/// - Linux: `~/.local/share/PlantDoctor/`
/// - macOS: `~/Library/Application Support/PlantDoctor/`
/// - Windows: `C:\Users\<User>\AppData\Roaming\PlantDoctor\`
pub fn get_app_data_dir() -> Option<PathBuf> {
    get_app_data_dir_with_override(None)
}

/// Returns the application data directory path with an optional override.
pub fn get_app_data_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    override_path
        .or_else(cli_data_dir)
        .or_else(|| env_dir(ENV_DATA_DIR))
        .or_else(|| {
            dirs::data_dir().map(|mut path| {
                path.push(APP_NAME);
                path
            })
        })
}

/// Returns the application config directory path.
///
/// Platform defaults:
/// - Linux: `~/.config/PlantDoctor/`
/// - macOS: `~/Library/Application Support/PlantDoctor/`
/// - Windows: `C:\Users\<User>\AppData\Roaming\PlantDoctor\`
pub fn get_app_config_dir() -> Option<PathBuf> {
    get_app_config_dir_with_override(None)
}

/// Returns the application config directory path with an optional override.
pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    override_path
        .or_else(cli_config_dir)
        .or_else(|| env_dir(ENV_CONFIG_DIR))
        .or_else(|| {
            dirs::config_dir().map(|mut path| {
                path.push(APP_NAME);
                path
            })
        })
}
