// SPDX-License-Identifier: MPL-2.0
//! Diagnosis results and their confidence classification.
//!
//! A [`DiagnosisResult`] is produced by an [`analyzer::Analyzer`] and never
//! modified afterwards. Every field is optional on the wire: accessors
//! substitute fixed defaults, so a partial record always renders.

pub mod analyzer;

use crate::app::config::{
    HIGH_CONFIDENCE_THRESHOLD, LOW_CONFIDENCE_THRESHOLD, MAX_CONFIDENCE,
    MEDIUM_CONFIDENCE_THRESHOLD, SUCCESS_ICON_THRESHOLD,
};
use crate::ui::design_tokens::palette;
use iced::Color;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub const DEFAULT_NAME: &str = "Unknown Plant";
pub const DEFAULT_DESCRIPTION: &str = "No description available";
pub const DEFAULT_TREATMENT: &str = "No treatment information available";

/// Percentage in `0.0..=100.0`.
///
/// Out-of-range inputs are clamped and non-numbers become 0. The value is
/// kept unrounded so tier and icon thresholds see the exact score.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
#[serde(transparent)]
pub struct Confidence(f64);

impl Confidence {
    #[must_use]
    pub fn new(value: u8) -> Self {
        Self(f64::from(value.min(MAX_CONFIDENCE)))
    }

    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, f64::from(MAX_CONFIDENCE)))
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Display form with at most one decimal: `87`, `89.5`.
    ///
    /// Truncated rather than rounded so the label never shows a threshold
    /// the score did not reach.
    #[must_use]
    pub fn label(self) -> String {
        // Epsilon absorbs binary representation error, e.g. 79.6 * 10.
        let tenths = (self.0 * 10.0 + 1e-9).floor() / 10.0;
        let text = format!("{tenths:.1}");
        match text.strip_suffix(".0") {
            Some(whole) => whole.to_string(),
            None => text,
        }
    }

    #[must_use]
    pub fn tier(self) -> ConfidenceTier {
        ConfidenceTier::for_confidence(self)
    }

    #[must_use]
    pub fn icon(self) -> ResultIcon {
        ResultIcon::for_confidence(self)
    }
}

impl<'de> Deserialize<'de> for Confidence {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<f64>::deserialize(deserializer)?;
        Ok(raw.map_or_else(Confidence::default, Confidence::from_f64))
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.label())
    }
}

/// Four-band rating driving the result color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceTier {
    /// 90 and above, green.
    High,
    /// 75 up to 90, yellow.
    Medium,
    /// 60 up to 75, orange.
    Low,
    /// Below 60, red.
    None,
}

impl ConfidenceTier {
    #[must_use]
    pub fn for_confidence(confidence: Confidence) -> Self {
        let value = confidence.value();
        if value >= f64::from(HIGH_CONFIDENCE_THRESHOLD) {
            ConfidenceTier::High
        } else if value >= f64::from(MEDIUM_CONFIDENCE_THRESHOLD) {
            ConfidenceTier::Medium
        } else if value >= f64::from(LOW_CONFIDENCE_THRESHOLD) {
            ConfidenceTier::Low
        } else {
            ConfidenceTier::None
        }
    }

    #[must_use]
    pub fn color(self) -> Color {
        match self {
            ConfidenceTier::High => palette::TIER_HIGH,
            ConfidenceTier::Medium => palette::TIER_MEDIUM,
            ConfidenceTier::Low => palette::TIER_LOW,
            ConfidenceTier::None => palette::TIER_NONE,
        }
    }

    #[must_use]
    pub fn label_key(self) -> &'static str {
        match self {
            ConfidenceTier::High => "result-tier-high",
            ConfidenceTier::Medium => "result-tier-medium",
            ConfidenceTier::Low => "result-tier-low",
            ConfidenceTier::None => "result-tier-none",
        }
    }

    /// Stable name used in the diagnostics log.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ConfidenceTier::High => "high",
            ConfidenceTier::Medium => "medium",
            ConfidenceTier::Low => "low",
            ConfidenceTier::None => "none",
        }
    }
}

/// Header icon of the result card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultIcon {
    Success,
    Warning,
}

impl ResultIcon {
    #[must_use]
    pub fn for_confidence(confidence: Confidence) -> Self {
        if confidence.value() >= f64::from(SUCCESS_ICON_THRESHOLD) {
            ResultIcon::Success
        } else {
            ResultIcon::Warning
        }
    }
}

/// Outcome of one analysis.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DiagnosisResult {
    #[serde(default, deserialize_with = "non_blank")]
    name: Option<String>,
    #[serde(default)]
    confidence: Confidence,
    #[serde(default, deserialize_with = "non_blank")]
    description: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    treatment: Option<String>,
}

/// Missing, null and blank strings all count as absent.
fn non_blank<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}

fn present(value: impl Into<String>) -> Option<String> {
    Some(value.into()).filter(|s: &String| !s.trim().is_empty())
}

impl DiagnosisResult {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        confidence: Confidence,
        description: impl Into<String>,
        treatment: impl Into<String>,
    ) -> Self {
        Self {
            name: present(name),
            confidence,
            description: present(description),
            treatment: present(treatment),
        }
    }

    /// Parses a result document such as `{"name": "...", "confidence": 87}`.
    ///
    /// # Errors
    ///
    /// Fails only when the input is not a JSON object of the expected shape;
    /// absent fields are never an error.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_NAME)
    }

    #[must_use]
    pub fn confidence(&self) -> Confidence {
        self.confidence
    }

    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or(DEFAULT_DESCRIPTION)
    }

    #[must_use]
    pub fn treatment(&self) -> &str {
        self.treatment.as_deref().unwrap_or(DEFAULT_TREATMENT)
    }

    #[must_use]
    pub fn tier(&self) -> ConfidenceTier {
        self.confidence.tier()
    }

    #[must_use]
    pub fn icon(&self) -> ResultIcon {
        self.confidence.icon()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn tiers_follow_thresholds() {
        let cases = [
            (95, ConfidenceTier::High),
            (80, ConfidenceTier::Medium),
            (65, ConfidenceTier::Low),
            (40, ConfidenceTier::None),
        ];
        for (value, expected) in cases {
            assert_eq!(Confidence::new(value).tier(), expected, "confidence {value}");
        }
    }

    #[test]
    fn tier_boundaries_are_inclusive() {
        assert_eq!(Confidence::new(90).tier(), ConfidenceTier::High);
        assert_eq!(Confidence::new(89).tier(), ConfidenceTier::Medium);
        assert_eq!(Confidence::new(75).tier(), ConfidenceTier::Medium);
        assert_eq!(Confidence::new(74).tier(), ConfidenceTier::Low);
        assert_eq!(Confidence::new(60).tier(), ConfidenceTier::Low);
        assert_eq!(Confidence::new(59).tier(), ConfidenceTier::None);
        assert_eq!(Confidence::new(0).tier(), ConfidenceTier::None);
    }

    #[test]
    fn tier_colors_match_palette() {
        assert_eq!(ConfidenceTier::High.color(), palette::TIER_HIGH);
        assert_eq!(ConfidenceTier::Medium.color(), palette::TIER_MEDIUM);
        assert_eq!(ConfidenceTier::Low.color(), palette::TIER_LOW);
        assert_eq!(ConfidenceTier::None.color(), palette::TIER_NONE);
    }

    #[test]
    fn icon_switches_at_eighty() {
        assert_eq!(Confidence::new(100).icon(), ResultIcon::Success);
        assert_eq!(Confidence::new(80).icon(), ResultIcon::Success);
        assert_eq!(Confidence::new(79).icon(), ResultIcon::Warning);
        assert_eq!(Confidence::new(0).icon(), ResultIcon::Warning);
    }

    #[test]
    fn confidence_is_clamped_but_not_rounded() {
        assert_abs_diff_eq!(Confidence::new(250).value(), 100.0);
        assert_abs_diff_eq!(Confidence::from_f64(-3.0).value(), 0.0);
        assert_abs_diff_eq!(Confidence::from_f64(150.0).value(), 100.0);
        assert_abs_diff_eq!(Confidence::from_f64(79.6).value(), 79.6);
        assert_abs_diff_eq!(Confidence::from_f64(f64::NAN).value(), 0.0);
    }

    #[test]
    fn fractional_scores_stay_below_their_threshold() {
        assert_eq!(Confidence::from_f64(89.9).tier(), ConfidenceTier::Medium);
        assert_eq!(Confidence::from_f64(89.5).tier(), ConfidenceTier::Medium);
        assert_eq!(Confidence::from_f64(74.99).tier(), ConfidenceTier::Low);
        assert_eq!(Confidence::from_f64(59.5).tier(), ConfidenceTier::None);
        assert_eq!(Confidence::from_f64(79.9).icon(), ResultIcon::Warning);
        assert_eq!(Confidence::from_f64(79.6).icon(), ResultIcon::Warning);
        assert_eq!(Confidence::from_f64(80.0).icon(), ResultIcon::Success);
    }

    #[test]
    fn confidence_displays_as_percentage() {
        assert_eq!(Confidence::new(87).to_string(), "87%");
        assert_eq!(Confidence::from_f64(89.5).to_string(), "89.5%");
        assert_eq!(Confidence::from_f64(89.96).label(), "89.9");
        assert_eq!(Confidence::from_f64(79.6).label(), "79.6");
        assert_eq!(Confidence::new(100).label(), "100");
        assert_eq!(Confidence::from_f64(42.123).label(), "42.1");
    }

    #[test]
    fn empty_record_uses_all_defaults() {
        let result = DiagnosisResult::from_json("{}").expect("valid json");
        assert_eq!(result.name(), "Unknown Plant");
        assert_abs_diff_eq!(result.confidence().value(), 0.0);
        assert_eq!(result.description(), "No description available");
        assert_eq!(result.treatment(), "No treatment information available");
        assert_eq!(result.tier(), ConfidenceTier::None);
        assert_eq!(result.icon(), ResultIcon::Warning);
    }

    #[test]
    fn missing_treatment_uses_default_text() {
        let result = DiagnosisResult::from_json(
            r#"{"name": "Leaf Rust", "confidence": 92, "description": "Orange pustules."}"#,
        )
        .expect("valid json");

        assert_eq!(result.name(), "Leaf Rust");
        assert_abs_diff_eq!(result.confidence().value(), 92.0);
        assert_eq!(result.treatment(), DEFAULT_TREATMENT);
    }

    #[test]
    fn null_and_blank_fields_use_defaults() {
        let result = DiagnosisResult::from_json(
            r#"{"name": "  ", "confidence": null, "description": null, "treatment": ""}"#,
        )
        .expect("valid json");

        assert_eq!(result.name(), DEFAULT_NAME);
        assert_abs_diff_eq!(result.confidence().value(), 0.0);
        assert_eq!(result.description(), DEFAULT_DESCRIPTION);
        assert_eq!(result.treatment(), DEFAULT_TREATMENT);
    }

    #[test]
    fn fractional_and_out_of_range_confidence_in_json() {
        let high = DiagnosisResult::from_json(r#"{"confidence": 130.2}"#).expect("valid json");
        assert_abs_diff_eq!(high.confidence().value(), 100.0);

        let medium = DiagnosisResult::from_json(r#"{"confidence": 89.5}"#).expect("valid json");
        assert_eq!(medium.tier(), ConfidenceTier::Medium);
        assert_eq!(medium.confidence().to_string(), "89.5%");

        let warning = DiagnosisResult::from_json(r#"{"confidence": 79.6}"#).expect("valid json");
        assert_eq!(warning.icon(), ResultIcon::Warning);

        let none = DiagnosisResult::from_json(r#"{"confidence": 59.5}"#).expect("valid json");
        assert_eq!(none.tier(), ConfidenceTier::None);
    }

    #[test]
    fn unexpected_shape_is_an_error() {
        assert!(DiagnosisResult::from_json("[1, 2]").is_err());
        assert!(DiagnosisResult::from_json(r#"{"confidence": "high"}"#).is_err());
    }

    #[test]
    fn new_treats_blank_strings_as_missing() {
        let result = DiagnosisResult::new("", Confidence::new(70), "Spots", " ");
        assert_eq!(result.name(), DEFAULT_NAME);
        assert_eq!(result.description(), "Spots");
        assert_eq!(result.treatment(), DEFAULT_TREATMENT);
    }
}
