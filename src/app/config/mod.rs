// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language and theme mode
//! - `[capture]` - Camera device selection
//! - `[analysis]` - Simulated analyzer confidence range and latency
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `PLANT_DOCTOR_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! Out-of-range values are clamped when loaded, so a hand-edited file can
//! never push the analyzer outside `0..=100`.
//!
//! # Examples
//!
//! ```no_run
//! use plant_doctor::app::config;
//! use std::path::Path;
//!
//! let (mut config, _warning) = config::load();
//! config.analysis.simulated_delay_ms = 0;
//! config::save_to_path(&config, Path::new("settings.toml")).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Application theme mode (light, dark, or system).
    #[serde(
        default = "default_theme_mode",
        deserialize_with = "deserialize_theme_mode"
    )]
    pub theme_mode: ThemeMode,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            language: None,
            theme_mode: default_theme_mode(),
        }
    }
}

/// Camera capture settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaptureConfig {
    /// Index of the camera device used by "Take Photo".
    #[serde(default = "default_camera_index")]
    pub camera_index: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            camera_index: DEFAULT_CAMERA_INDEX,
        }
    }
}

/// Simulated analysis settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisConfig {
    /// Lowest confidence the analyzer may report.
    #[serde(default = "default_min_confidence")]
    pub min_confidence: u8,

    /// Highest confidence the analyzer may report.
    #[serde(default = "default_max_confidence")]
    pub max_confidence: u8,

    /// Artificial latency before a result is produced.
    #[serde(default = "default_simulated_delay_ms")]
    pub simulated_delay_ms: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            max_confidence: DEFAULT_MAX_CONFIDENCE,
            simulated_delay_ms: DEFAULT_SIMULATED_DELAY_MS,
        }
    }
}

impl AnalysisConfig {
    /// Returns the confidence range as an ordered, clamped pair.
    pub fn confidence_range(&self) -> (u8, u8) {
        let min = self.min_confidence.min(MAX_CONFIDENCE);
        let max = self.max_confidence.min(MAX_CONFIDENCE);
        if min <= max {
            (min, max)
        } else {
            (max, min)
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub capture: CaptureConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,
}

impl Config {
    /// Clamps every value into its documented bounds.
    pub fn sanitized(mut self) -> Self {
        self.capture.camera_index = self.capture.camera_index.min(MAX_CAMERA_INDEX);

        let (min, max) = self.analysis.confidence_range();
        self.analysis.min_confidence = min;
        self.analysis.max_confidence = max;
        self.analysis.simulated_delay_ms =
            self.analysis.simulated_delay_ms.min(MAX_SIMULATED_DELAY_MS);

        self
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_theme_mode() -> ThemeMode {
    ThemeMode::System
}

fn default_camera_index() -> u32 {
    DEFAULT_CAMERA_INDEX
}

fn default_min_confidence() -> u8 {
    DEFAULT_MIN_CONFIDENCE
}

fn default_max_confidence() -> u8 {
    DEFAULT_MAX_CONFIDENCE
}

fn default_simulated_delay_ms() -> u64 {
    DEFAULT_SIMULATED_DELAY_MS
}

fn deserialize_theme_mode<'de, D>(deserializer: D) -> std::result::Result<ThemeMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    match raw.to_lowercase().as_str() {
        "light" => Ok(ThemeMode::Light),
        "dark" => Ok(ThemeMode::Dark),
        "system" => Ok(ThemeMode::System),
        other => Err(D::Error::custom(format!("invalid theme_mode: {}", other))),
    }
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with the i18n key of a warning to show the user.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(_) => {
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config.sanitized())
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            general: GeneralConfig {
                language: Some("fr".to_string()),
                theme_mode: ThemeMode::Light,
            },
            capture: CaptureConfig { camera_index: 2 },
            analysis: AnalysisConfig {
                min_confidence: 50,
                max_confidence: 90,
                simulated_delay_ms: 0,
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        match load_from_path(&config_path) {
            Err(Error::Config(message)) => assert!(message.contains("expected")),
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn default_config_has_expected_values() {
        let config = Config::default();
        assert_eq!(config.general.language, None);
        assert_eq!(config.general.theme_mode, ThemeMode::System);
        assert_eq!(config.capture.camera_index, 0);
        assert_eq!(config.analysis.min_confidence, 60);
        assert_eq!(config.analysis.max_confidence, 100);
        assert_eq!(config.analysis.simulated_delay_ms, DEFAULT_SIMULATED_DELAY_MS);
    }

    #[test]
    fn partial_file_fills_missing_sections_with_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[capture]\ncamera_index = 1\n").expect("write file");

        let loaded = load_from_path(&config_path).expect("failed to load config");
        assert_eq!(loaded.capture.camera_index, 1);
        assert_eq!(loaded.analysis, AnalysisConfig::default());
        assert_eq!(loaded.general, GeneralConfig::default());
    }

    #[test]
    fn out_of_range_values_are_clamped_on_load() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(
            &config_path,
            "[capture]\ncamera_index = 99\n\n[analysis]\nmin_confidence = 250\nmax_confidence = 70\nsimulated_delay_ms = 999999\n",
        )
        .expect("write file");

        let loaded = load_from_path(&config_path).expect("failed to load config");
        assert_eq!(loaded.capture.camera_index, MAX_CAMERA_INDEX);
        assert_eq!(loaded.analysis.min_confidence, 70);
        assert_eq!(loaded.analysis.max_confidence, 100);
        assert_eq!(loaded.analysis.simulated_delay_ms, MAX_SIMULATED_DELAY_MS);
    }

    #[test]
    fn confidence_range_swaps_inverted_bounds() {
        let analysis = AnalysisConfig {
            min_confidence: 95,
            max_confidence: 65,
            simulated_delay_ms: 0,
        };
        assert_eq!(analysis.confidence_range(), (65, 95));
    }

    #[test]
    fn invalid_theme_mode_is_a_config_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[general]\ntheme_mode = \"sepia\"\n").expect("write file");

        assert!(matches!(load_from_path(&config_path), Err(Error::Config(_))));
    }

    #[test]
    fn saved_file_is_found_through_override_directory() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let base_dir = temp_dir.path().to_path_buf();

        let config = Config {
            general: GeneralConfig {
                language: Some("en-US".to_string()),
                theme_mode: ThemeMode::Dark,
            },
            ..Config::default()
        };

        save_to_path(&config, &base_dir.join("settings.toml")).expect("save should succeed");
        assert!(base_dir.join("settings.toml").exists());

        let (loaded, warning) = load_with_override(Some(base_dir));
        assert!(warning.is_none(), "load should succeed without warning");
        assert_eq!(loaded.general.theme_mode, ThemeMode::Dark);
    }

    #[test]
    fn load_with_override_from_empty_directory_returns_default() {
        let temp_dir = tempdir().expect("failed to create temp dir");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert!(warning.is_none(), "should not warn for missing file");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_with_override_from_corrupted_file_returns_default_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let base_dir = temp_dir.path().to_path_buf();
        fs::write(base_dir.join("settings.toml"), "not = valid = toml").expect("write file");

        let (config, warning) = load_with_override(Some(base_dir));
        assert_eq!(warning.as_deref(), Some("notification-config-load-error"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn saved_config_uses_sectioned_format() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");

        save_to_path(&Config::default(), &config_path).expect("failed to save config");
        let content = fs::read_to_string(&config_path).expect("read file");

        assert!(content.contains("[general]"));
        assert!(content.contains("[capture]"));
        assert!(content.contains("[analysis]"));
    }
}
