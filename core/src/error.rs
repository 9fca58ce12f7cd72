//! Error types shared across the evaluation core.
//!
//! Statistical insufficiency (small samples, empty selection counts,
//! degenerate variances) is an expected steady-state condition and is
//! reported through documented neutral return values, never through these
//! errors. The variants below cover the single class of defensive checks
//! this core performs: caller-contract violations that would otherwise
//! produce misleading statistics.

use thiserror::Error;

/// Evaluation error types with precise error semantics
#[derive(Error, Debug)]
pub enum PsychometricError {
    /// A question with no answer choices was handed to distractor analysis
    #[error("question {question_id} has no answer choices to analyze")]
    EmptyChoiceList {
        /// Identifier of the offending question
        question_id: String,
    },

    /// A configuration field holds a structurally impossible value
    #[error("invalid configuration for {field}: {reason}")]
    InvalidConfiguration {
        /// Name of the rejected field
        field: &'static str,
        /// Why the value is unusable
        reason: String,
    },

    /// A label could not be parsed into its domain enumeration
    #[error("unknown {kind} label {value:?} (expected one of: {expected})")]
    UnknownLabel {
        /// Which enumeration was being parsed
        kind: &'static str,
        /// The rejected input
        value: String,
        /// Comma-separated list of accepted labels
        expected: &'static str,
    },
}

/// Type alias for results produced by the evaluation core
pub type PsychometricResult<T> = Result<T, PsychometricError>;
