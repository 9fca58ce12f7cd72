//! Engine configuration.
//!
//! Every tunable the evaluation core reads is a named, typed field here.
//! The defaults are classical-test-theory conventions (Kelley's 27% group
//! split, the 0.3 good-discriminator cutoff, the 0.1 low-efficiency
//! cutoff) and should not be changed without new domain guidance; options
//! the core does not read are unrepresentable rather than silently
//! ignored.

use serde::{Deserialize, Serialize};

use crate::error::{PsychometricError, PsychometricResult};

/// Fraction of the ranked sample forming each discrimination group
const DEFAULT_GROUP_FRACTION: f64 = 0.27;

/// Minimum responses required before a discrimination index is reported
const DEFAULT_MIN_DISCRIMINATION_SAMPLE: usize = 10;

/// Discrimination index at or above which an item separates well
const DEFAULT_GOOD_DISCRIMINATION: f64 = 0.3;

/// Distractor efficiency below which a choice is flagged for rework
const DEFAULT_LOW_EFFICIENCY: f64 = 0.1;

/// Tunable thresholds and iteration bounds for the evaluation engine
///
/// Constructed explicitly by the caller and handed to
/// [`PsychometricEvaluationEngine`](crate::psychometrics::PsychometricEvaluationEngine);
/// there is no ambient global configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PsychometricConfig {
    /// Fraction of ranked examinees in each of the upper and lower groups
    pub group_fraction: f64,

    /// Minimum response count for a meaningful discrimination index
    pub min_discrimination_sample: usize,

    /// Discrimination index considered good separation
    pub good_discrimination_threshold: f64,

    /// Distractor efficiency below which a choice is flagged
    pub low_efficiency_threshold: f64,

    /// Difficulty index strictly above this is labeled easy
    pub easy_threshold: f64,

    /// Difficulty index strictly below this is labeled hard
    pub hard_threshold: f64,

    /// Difficulty index above which an item is flagged as far too easy
    pub very_easy_threshold: f64,

    /// Difficulty index below which an item is flagged as far too hard
    pub very_hard_threshold: f64,

    /// Non-negative discrimination below this triggers a rework suggestion
    pub low_discrimination_threshold: f64,

    /// Cognitive-level agreement below this triggers a mismatch suggestion
    pub bloom_mismatch_threshold: f64,

    /// Iteration cap for Rasch difficulty estimation
    pub max_calibration_iterations: usize,

    /// Parameter-change threshold that ends Rasch estimation early
    pub convergence_threshold: f64,

    /// Weight of the expert rating in blended content validity
    pub expert_weight: f64,
}

impl Default for PsychometricConfig {
    fn default() -> Self {
        Self {
            group_fraction: DEFAULT_GROUP_FRACTION,
            min_discrimination_sample: DEFAULT_MIN_DISCRIMINATION_SAMPLE,
            good_discrimination_threshold: DEFAULT_GOOD_DISCRIMINATION,
            low_efficiency_threshold: DEFAULT_LOW_EFFICIENCY,
            easy_threshold: 0.7,
            hard_threshold: 0.4,
            very_easy_threshold: 0.9,
            very_hard_threshold: 0.2,
            low_discrimination_threshold: 0.2,
            bloom_mismatch_threshold: 0.6,
            max_calibration_iterations: 20,
            convergence_threshold: 1e-3,
            expert_weight: 0.4,
        }
    }
}

impl PsychometricConfig {
    /// Reject structurally impossible settings
    ///
    /// Guards only what would break the algorithms (empty or overlapping
    /// groups, a zero iteration budget, inverted difficulty bands);
    /// questionable-but-usable values are the caller's judgment.
    pub fn validate(&self) -> PsychometricResult<()> {
        if !(self.group_fraction > 0.0 && self.group_fraction <= 0.5) {
            return Err(PsychometricError::InvalidConfiguration {
                field: "group_fraction",
                reason: format!(
                    "{} is outside (0, 0.5]; upper and lower groups must not overlap",
                    self.group_fraction
                ),
            });
        }
        if self.min_discrimination_sample == 0 {
            return Err(PsychometricError::InvalidConfiguration {
                field: "min_discrimination_sample",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.easy_threshold <= self.hard_threshold {
            return Err(PsychometricError::InvalidConfiguration {
                field: "easy_threshold",
                reason: format!(
                    "{} does not exceed hard_threshold {}",
                    self.easy_threshold, self.hard_threshold
                ),
            });
        }
        for (field, value) in [
            ("easy_threshold", self.easy_threshold),
            ("hard_threshold", self.hard_threshold),
            ("very_easy_threshold", self.very_easy_threshold),
            ("very_hard_threshold", self.very_hard_threshold),
            ("low_efficiency_threshold", self.low_efficiency_threshold),
            ("low_discrimination_threshold", self.low_discrimination_threshold),
            ("bloom_mismatch_threshold", self.bloom_mismatch_threshold),
            ("expert_weight", self.expert_weight),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(PsychometricError::InvalidConfiguration {
                    field,
                    reason: format!("{value} is outside [0, 1]"),
                });
            }
        }
        if self.good_discrimination_threshold <= 0.0 || self.good_discrimination_threshold > 1.0 {
            return Err(PsychometricError::InvalidConfiguration {
                field: "good_discrimination_threshold",
                reason: format!(
                    "{} is outside (0, 1]",
                    self.good_discrimination_threshold
                ),
            });
        }
        if self.max_calibration_iterations == 0 {
            return Err(PsychometricError::InvalidConfiguration {
                field: "max_calibration_iterations",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.convergence_threshold <= 0.0 || !self.convergence_threshold.is_finite() {
            return Err(PsychometricError::InvalidConfiguration {
                field: "convergence_threshold",
                reason: format!("{} is not a positive finite value", self.convergence_threshold),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_domain_conventions() {
        let config = PsychometricConfig::default();
        assert!((config.group_fraction - 0.27).abs() < 1e-12);
        assert_eq!(config.min_discrimination_sample, 10);
        assert!((config.good_discrimination_threshold - 0.3).abs() < 1e-12);
        assert!((config.low_efficiency_threshold - 0.1).abs() < 1e-12);
        assert_eq!(config.max_calibration_iterations, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overlapping_groups_rejected() {
        let config = PsychometricConfig {
            group_fraction: 0.6,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("group_fraction"));
    }

    #[test]
    fn test_inverted_difficulty_bands_rejected() {
        let config = PsychometricConfig {
            easy_threshold: 0.3,
            hard_threshold: 0.4,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_iteration_budget_rejected() {
        let config = PsychometricConfig {
            max_calibration_iterations: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_out_of_range_threshold_rejected() {
        let config = PsychometricConfig {
            expert_weight: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        let config = PsychometricConfig {
            convergence_threshold: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
