// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Capture**: Camera device selection
//! - **Analysis**: Simulated confidence range and latency
//! - **Confidence tiers**: Thresholds used by the result screen

// ==========================================================================
// Capture Defaults
// ==========================================================================

/// Default camera device index (the first device the OS reports).
pub const DEFAULT_CAMERA_INDEX: u32 = 0;

/// Highest camera index accepted from the config file.
pub const MAX_CAMERA_INDEX: u32 = 15;

// ==========================================================================
// Analysis Defaults
// ==========================================================================

/// Lowest confidence the simulated analyzer produces by default.
pub const DEFAULT_MIN_CONFIDENCE: u8 = 60;

/// Highest confidence the simulated analyzer produces by default.
pub const DEFAULT_MAX_CONFIDENCE: u8 = 100;

/// Upper bound of any confidence value (percent).
pub const MAX_CONFIDENCE: u8 = 100;

/// Default simulated analysis latency.
pub const DEFAULT_SIMULATED_DELAY_MS: u64 = 800;

/// Maximum simulated analysis latency.
pub const MAX_SIMULATED_DELAY_MS: u64 = 10_000;

// ==========================================================================
// Confidence Tier Thresholds
// ==========================================================================

/// Confidence at or above which the result is rated high (green).
pub const HIGH_CONFIDENCE_THRESHOLD: u8 = 90;

/// Confidence at or above which the result is rated medium (yellow).
pub const MEDIUM_CONFIDENCE_THRESHOLD: u8 = 75;

/// Confidence at or above which the result is rated low (orange).
pub const LOW_CONFIDENCE_THRESHOLD: u8 = 60;

/// Confidence at or above which the success icon is shown.
pub const SUCCESS_ICON_THRESHOLD: u8 = 80;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_CAMERA_INDEX <= MAX_CAMERA_INDEX);

    assert!(DEFAULT_MIN_CONFIDENCE <= DEFAULT_MAX_CONFIDENCE);
    assert!(DEFAULT_MAX_CONFIDENCE <= MAX_CONFIDENCE);
    assert!(DEFAULT_SIMULATED_DELAY_MS <= MAX_SIMULATED_DELAY_MS);

    // Tiers must be strictly descending
    assert!(HIGH_CONFIDENCE_THRESHOLD <= MAX_CONFIDENCE);
    assert!(HIGH_CONFIDENCE_THRESHOLD > MEDIUM_CONFIDENCE_THRESHOLD);
    assert!(MEDIUM_CONFIDENCE_THRESHOLD > LOW_CONFIDENCE_THRESHOLD);
    assert!(SUCCESS_ICON_THRESHOLD > MEDIUM_CONFIDENCE_THRESHOLD);
    assert!(SUCCESS_ICON_THRESHOLD < HIGH_CONFIDENCE_THRESHOLD);
};
