//! Response data records supplied by the test-delivery layer.
//!
//! All identifiers are opaque strings assigned by the caller. Each record
//! is an immutable snapshot; the engine never mutates response data, which
//! is what makes batch analysis trivially parallel.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::question::{ChoiceId, QuestionId};

/// Identifier of an examinee, assigned by the caller
pub type UserId = String;

/// Per-choice selection tallies across all attempts at one question
pub type ChoiceSelectionCounts = HashMap<ChoiceId, u64>;

/// Per-examinee ability or overall-score estimates
pub type AbilityEstimates = HashMap<UserId, f64>;

/// One examinee's correctness per question, the reliability input row
pub type ExamineeRecord = HashMap<QuestionId, bool>;

/// A single examinee's scored attempt at a single question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseRecord {
    /// Examinee identifier
    pub user_id: UserId,

    /// Whether the attempt was scored correct
    pub correct: bool,
}

impl ResponseRecord {
    /// Create a response record
    pub fn new(user_id: impl Into<UserId>, correct: bool) -> Self {
        Self {
            user_id: user_id.into(),
            correct,
        }
    }
}

/// Everything observed about one question, bundled for batch analysis
///
/// Each analyzed item owns its snapshot, so a batch of these can be
/// processed concurrently without coordination.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemObservations {
    /// Scored attempts at this question
    pub responses: Vec<ResponseRecord>,

    /// Selection tallies per answer choice
    pub choice_selections: ChoiceSelectionCounts,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_record_construction() {
        let r = ResponseRecord::new("user-1", true);
        assert_eq!(r.user_id, "user-1");
        assert!(r.correct);
    }

    #[test]
    fn test_observations_default_is_empty() {
        let obs = ItemObservations::default();
        assert!(obs.responses.is_empty());
        assert!(obs.choice_selections.is_empty());
    }
}
