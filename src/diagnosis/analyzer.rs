// SPDX-License-Identifier: MPL-2.0
//! Analysis port and the simulated analyzer.
//!
//! The [`Analyzer`] trait is the seam between the acquisition flow and
//! whatever produces a [`DiagnosisResult`]. Only [`MockAnalyzer`] ships
//! today: it ignores the pixels and returns a fixed diagnosis with a random
//! confidence.

use super::{Confidence, DiagnosisResult};
use crate::acquisition::ImageSource;
use crate::app::config::AnalysisConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::sync::{Mutex, PoisonError};

pub const MOCK_NAME: &str = "Example Disease";
pub const MOCK_DESCRIPTION: &str = "This is a sample description of the disease.";
pub const MOCK_TREATMENT: &str = "Sample treatment recommendation.";

// =============================================================================
// AnalysisError
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// The submitted source holds no bytes.
    EmptyImage,

    /// The analyzer could not produce a result.
    Failed(String),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::EmptyImage => write!(f, "No image data to analyze"),
            AnalysisError::Failed(msg) => write!(f, "Analysis failed: {msg}"),
        }
    }
}

impl std::error::Error for AnalysisError {}

impl From<AnalysisError> for crate::error::Error {
    fn from(err: AnalysisError) -> Self {
        crate::error::Error::Analysis(err.to_string())
    }
}

// =============================================================================
// Analyzer Trait
// =============================================================================

/// Port for plant image analysis.
///
/// Implementations must be `Send + Sync`: the app calls them from a
/// background task.
pub trait Analyzer: Send + Sync {
    /// Produces a diagnosis for the given image.
    ///
    /// # Errors
    ///
    /// Returns an [`AnalysisError`] when the image is empty or the analysis
    /// itself fails.
    fn analyze(&self, image: &ImageSource) -> Result<DiagnosisResult, AnalysisError>;
}

// =============================================================================
// MockAnalyzer
// =============================================================================

/// Simulated analyzer with a uniformly random confidence.
#[derive(Debug)]
pub struct MockAnalyzer {
    rng: Mutex<StdRng>,
    min_confidence: u8,
    max_confidence: u8,
}

impl MockAnalyzer {
    /// Analyzer drawing from the configured confidence range.
    #[must_use]
    pub fn new(config: &AnalysisConfig) -> Self {
        Self::with_rng(StdRng::from_entropy(), config)
    }

    /// Deterministic analyzer, used by tests and benchmarks.
    #[must_use]
    pub fn seeded(seed: u64, config: &AnalysisConfig) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), config)
    }

    fn with_rng(rng: StdRng, config: &AnalysisConfig) -> Self {
        let (min_confidence, max_confidence) = config.confidence_range();
        Self {
            rng: Mutex::new(rng),
            min_confidence,
            max_confidence,
        }
    }

    /// Inclusive range of confidences this analyzer can return.
    #[must_use]
    pub fn confidence_range(&self) -> (u8, u8) {
        (self.min_confidence, self.max_confidence)
    }
}

impl Default for MockAnalyzer {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}

impl Analyzer for MockAnalyzer {
    fn analyze(&self, image: &ImageSource) -> Result<DiagnosisResult, AnalysisError> {
        if image.is_empty() {
            return Err(AnalysisError::EmptyImage);
        }

        // A poisoned lock still holds a usable generator.
        let value = self
            .rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .gen_range(self.min_confidence..=self.max_confidence);

        Ok(DiagnosisResult::new(
            MOCK_NAME,
            Confidence::new(value),
            MOCK_DESCRIPTION,
            MOCK_TREATMENT,
        ))
    }
}
