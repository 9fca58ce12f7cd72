//! Domain records consumed by the evaluation engine.
//!
//! The generation layer produces question entities; the test-delivery
//! layer produces response data. Both arrive here as plain read-only
//! records; this module defines their shapes and structural invariants
//! and nothing else. No persistence or generation logic lives in the core.

mod question;
mod response;

pub use question::{
    BloomLevel, Choice, ChoiceId, Difficulty, DistractorType, Explanation, Question,
    QuestionFormat, QuestionId, QuestionMetadata,
};
pub use response::{
    AbilityEstimates, ChoiceSelectionCounts, ExamineeRecord, ItemObservations, ResponseRecord,
    UserId,
};
