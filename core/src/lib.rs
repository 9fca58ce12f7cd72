//! # PSYCHE Core: Psychometric Evaluation Engine
//!
//! Statistical quality evaluation for machine- and human-authored
//! certification-exam questions: item difficulty and discrimination,
//! distractor efficiency, internal-consistency reliability, Rasch (1PL)
//! difficulty calibration, and content/construct validity, aggregated
//! into per-item analysis results, calibrated difficulty labels, and
//! improvement recommendations.
//!
//! The crate has no wire protocol or storage of its own. Question
//! entities arrive from a generation layer and response data from a
//! test-delivery system, both as plain read-only records defined in
//! [`domain`]; every analysis is a pure function call into
//! [`psychometrics`], and results go back to the caller for persistence
//! or further revision.
//!
//! ```
//! use psyche_core::{PsychometricEvaluationEngine, ResponseRecord};
//! use std::collections::HashMap;
//!
//! let engine = PsychometricEvaluationEngine::new();
//! let responses: Vec<ResponseRecord> = (0..20)
//!     .map(|i| ResponseRecord::new(format!("examinee-{i}"), i % 3 != 0))
//!     .collect();
//! let abilities: HashMap<String, f64> = (0..20)
//!     .map(|i| (format!("examinee-{i}"), i as f64 / 20.0))
//!     .collect();
//! let difficulty = engine.rasch_difficulty(&responses, &abilities);
//! assert!(difficulty.is_finite());
//! ```

pub mod domain;
pub mod error;
pub mod psychometrics;

// Re-export the working surface so users can write
// `use psyche_core::PsychometricEvaluationEngine` directly.
pub use domain::{
    AbilityEstimates, BloomLevel, Choice, ChoiceId, ChoiceSelectionCounts, Difficulty,
    DistractorType, ExamineeRecord, Explanation, ItemObservations, Question, QuestionFormat,
    QuestionId, QuestionMetadata, ResponseRecord, UserId,
};
pub use error::{PsychometricError, PsychometricResult};
pub use psychometrics::{
    DiscriminationCalculator, IrtModelApplicator, ItemAnalysisResult, PsychometricConfig,
    PsychometricEvaluationEngine, ReliabilityAnalyzer, ValidityEvaluator,
};
