//! Psychometric evaluation of certification-exam items.
//!
//! This subsystem turns raw examinee response data into statistically
//! grounded quality metrics per question and per test.
//!
//! ## Theoretical foundation
//!
//! The calculators implement classical test theory alongside a simplified
//! item-response-theory calibration:
//!
//! 1. **Item analysis**: empirical difficulty (proportion correct) and the
//!    upper/lower-group discrimination index over Kelley's 27% extreme
//!    groups.
//! 2. **Distractor analysis**: per-choice efficiency against the
//!    theoretically even split of non-correct selection mass.
//! 3. **Reliability**: Cronbach's alpha internal consistency with
//!    alpha-if-item-deleted contributions.
//! 4. **IRT calibration**: one-parameter (Rasch) difficulty estimation by
//!    bounded fixed-point iteration.
//! 5. **Validity**: syllabus topic coverage and ordinal cognitive-level
//!    agreement.
//!
//! All computation is synchronous and pure; per-item analyses are
//! independent, and the engine's batch entry point exploits that with a
//! parallel fan-out over immutable snapshots.

pub mod config;
pub mod discrimination;
pub mod engine;
pub mod irt;
pub mod reliability;
pub mod stats;
pub mod validity;

pub use config::PsychometricConfig;
pub use discrimination::DiscriminationCalculator;
pub use engine::{ItemAnalysisResult, PsychometricEvaluationEngine};
pub use irt::IrtModelApplicator;
pub use reliability::ReliabilityAnalyzer;
pub use validity::ValidityEvaluator;
