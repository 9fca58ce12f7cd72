//! Question entities and their classification vocabulary.
//!
//! These records are produced by the generation layer and consumed
//! read-only by the evaluation engine. Label parsing is strict: the string
//! forms are the stable SCREAMING_SNAKE identifiers used by the wider
//! system, and anything else is rejected with an error naming the accepted
//! set.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PsychometricError, PsychometricResult};

/// Identifier of a question, assigned by the caller
pub type QuestionId = String;

/// Identifier of a single answer choice
pub type ChoiceId = String;

/// Coarse difficulty banding attached to a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    /// Most examinees are expected to answer correctly
    Easy,
    /// Balanced band targeted by well-calibrated items
    Medium,
    /// Only well-prepared examinees are expected to answer correctly
    Hard,
}

impl Difficulty {
    /// Stable label used in serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = PsychometricError;

    fn from_str(s: &str) -> PsychometricResult<Self> {
        match s {
            "EASY" => Ok(Difficulty::Easy),
            "MEDIUM" => Ok(Difficulty::Medium),
            "HARD" => Ok(Difficulty::Hard),
            other => Err(PsychometricError::UnknownLabel {
                kind: "difficulty",
                value: other.to_string(),
                expected: "EASY, MEDIUM, HARD",
            }),
        }
    }
}

/// Bloom's-taxonomy cognitive level an item is intended to assess
///
/// The six levels form an ordinal hierarchy from recall to creation;
/// construct validity scoring relies on the `rank` ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BloomLevel {
    /// Recall of facts and basic concepts
    Remember,
    /// Explanation of ideas or concepts
    Understand,
    /// Use of information in new situations
    Apply,
    /// Drawing connections among ideas
    Analyze,
    /// Justification of a stand or decision
    Evaluate,
    /// Production of new or original work
    Create,
}

impl BloomLevel {
    /// Ordinal position in the taxonomy, 1 (Remember) through 6 (Create)
    pub fn rank(&self) -> u8 {
        match self {
            BloomLevel::Remember => 1,
            BloomLevel::Understand => 2,
            BloomLevel::Apply => 3,
            BloomLevel::Analyze => 4,
            BloomLevel::Evaluate => 5,
            BloomLevel::Create => 6,
        }
    }

    /// Stable label used in serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            BloomLevel::Remember => "REMEMBER",
            BloomLevel::Understand => "UNDERSTAND",
            BloomLevel::Apply => "APPLY",
            BloomLevel::Analyze => "ANALYZE",
            BloomLevel::Evaluate => "EVALUATE",
            BloomLevel::Create => "CREATE",
        }
    }
}

impl fmt::Display for BloomLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BloomLevel {
    type Err = PsychometricError;

    fn from_str(s: &str) -> PsychometricResult<Self> {
        match s {
            "REMEMBER" => Ok(BloomLevel::Remember),
            "UNDERSTAND" => Ok(BloomLevel::Understand),
            "APPLY" => Ok(BloomLevel::Apply),
            "ANALYZE" => Ok(BloomLevel::Analyze),
            "EVALUATE" => Ok(BloomLevel::Evaluate),
            "CREATE" => Ok(BloomLevel::Create),
            other => Err(PsychometricError::UnknownLabel {
                kind: "cognitive level",
                value: other.to_string(),
                expected: "REMEMBER, UNDERSTAND, APPLY, ANALYZE, EVALUATE, CREATE",
            }),
        }
    }
}

/// Presentation format of a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionFormat {
    /// Multiple choice with exactly one keyed answer
    MultipleChoiceSingleAnswer,
    /// Multiple choice with two or more keyed answers
    MultipleChoiceMultipleAnswer,
    /// Scenario stem followed by a choice set
    ScenarioBased,
    /// Arrange the presented steps into the correct order
    Ordering,
    /// Match entries between two lists
    Matching,
    /// Select a region within an exhibit
    Hotspot,
    /// Extended case description with dependent questions
    CaseStudy,
}

impl QuestionFormat {
    /// Stable label used in serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionFormat::MultipleChoiceSingleAnswer => "MULTIPLE_CHOICE_SINGLE_ANSWER",
            QuestionFormat::MultipleChoiceMultipleAnswer => "MULTIPLE_CHOICE_MULTIPLE_ANSWER",
            QuestionFormat::ScenarioBased => "SCENARIO_BASED",
            QuestionFormat::Ordering => "ORDERING",
            QuestionFormat::Matching => "MATCHING",
            QuestionFormat::Hotspot => "HOTSPOT",
            QuestionFormat::CaseStudy => "CASE_STUDY",
        }
    }
}

impl fmt::Display for QuestionFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionFormat {
    type Err = PsychometricError;

    fn from_str(s: &str) -> PsychometricResult<Self> {
        match s {
            "MULTIPLE_CHOICE_SINGLE_ANSWER" => Ok(QuestionFormat::MultipleChoiceSingleAnswer),
            "MULTIPLE_CHOICE_MULTIPLE_ANSWER" => Ok(QuestionFormat::MultipleChoiceMultipleAnswer),
            "SCENARIO_BASED" => Ok(QuestionFormat::ScenarioBased),
            "ORDERING" => Ok(QuestionFormat::Ordering),
            "MATCHING" => Ok(QuestionFormat::Matching),
            "HOTSPOT" => Ok(QuestionFormat::Hotspot),
            "CASE_STUDY" => Ok(QuestionFormat::CaseStudy),
            other => Err(PsychometricError::UnknownLabel {
                kind: "question format",
                value: other.to_string(),
                expected: "MULTIPLE_CHOICE_SINGLE_ANSWER, MULTIPLE_CHOICE_MULTIPLE_ANSWER, \
                           SCENARIO_BASED, ORDERING, MATCHING, HOTSPOT, CASE_STUDY",
            }),
        }
    }
}

/// Design intent behind an incorrect answer choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DistractorType {
    /// Reflects a belief frequently held by unprepared examinees
    CommonMisconception,
    /// True in part but wrong in the asked context
    PartialTruth,
    /// Names a concept adjacent to the keyed answer
    SimilarConcept,
    /// On-topic but does not answer the question
    RelatedButIrrelevant,
    /// Overstated absolute that careful reading rules out
    ExtremeStatement,
}

impl DistractorType {
    /// Stable label used in serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            DistractorType::CommonMisconception => "COMMON_MISCONCEPTION",
            DistractorType::PartialTruth => "PARTIAL_TRUTH",
            DistractorType::SimilarConcept => "SIMILAR_CONCEPT",
            DistractorType::RelatedButIrrelevant => "RELATED_BUT_IRRELEVANT",
            DistractorType::ExtremeStatement => "EXTREME_STATEMENT",
        }
    }
}

impl fmt::Display for DistractorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistractorType {
    type Err = PsychometricError;

    fn from_str(s: &str) -> PsychometricResult<Self> {
        match s {
            "COMMON_MISCONCEPTION" => Ok(DistractorType::CommonMisconception),
            "PARTIAL_TRUTH" => Ok(DistractorType::PartialTruth),
            "SIMILAR_CONCEPT" => Ok(DistractorType::SimilarConcept),
            "RELATED_BUT_IRRELEVANT" => Ok(DistractorType::RelatedButIrrelevant),
            "EXTREME_STATEMENT" => Ok(DistractorType::ExtremeStatement),
            other => Err(PsychometricError::UnknownLabel {
                kind: "distractor type",
                value: other.to_string(),
                expected: "COMMON_MISCONCEPTION, PARTIAL_TRUTH, SIMILAR_CONCEPT, \
                           RELATED_BUT_IRRELEVANT, EXTREME_STATEMENT",
            }),
        }
    }
}

/// A single answer choice, immutable once created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    /// Unique choice identifier
    pub id: ChoiceId,

    /// Choice text shown to the examinee
    pub text: String,

    /// Whether this choice is keyed as correct
    pub is_correct: bool,

    /// Design intent tag, present on deliberately constructed distractors
    pub distractor_type: Option<DistractorType>,

    /// Per-choice rationale shown after answering
    pub explanation: Option<String>,
}

impl Choice {
    /// Create a plain choice without a distractor tag or rationale
    pub fn new(id: impl Into<ChoiceId>, text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            is_correct,
            distractor_type: None,
            explanation: None,
        }
    }
}

/// Structured explanation attached to a question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    /// Unique explanation identifier
    pub id: String,

    /// Overall explanation text
    pub text: String,

    /// Why the keyed answer is correct
    pub correct_answer_justification: String,

    /// Per-distractor rebuttal, keyed by choice id
    pub distractor_analysis: HashMap<ChoiceId, String>,

    /// Concepts the examinee should review
    pub related_concepts: Vec<String>,

    /// Pointers to study material
    pub learning_resources: Vec<String>,
}

/// Classification metadata attached to a question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionMetadata {
    /// Authored difficulty band
    pub difficulty: Difficulty,

    /// Syllabus topics the question covers
    pub topics: Vec<String>,

    /// Certification the question belongs to
    pub certification: String,

    /// Cognitive level the question realizes
    pub cognitive_level: BloomLevel,

    /// Exam domains the question is mapped to
    pub domains: Vec<String>,

    /// Provenance of the question, when known
    pub source: Option<String>,

    /// Syllabus or blueprint version the question targets
    pub version: Option<String>,
}

/// A certification-exam question as delivered to examinees
///
/// Invariant: a well-formed question carries at least one choice and at
/// least one keyed answer; the single-answer format carries exactly one.
/// `is_valid` checks the invariant without enforcing it at construction,
/// since questions arrive from the generation layer already persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Unique question identifier
    pub id: QuestionId,

    /// Question stem shown to the examinee
    pub text: String,

    /// Presentation format
    pub question_format: QuestionFormat,

    /// Answer choices in presentation order
    pub choices: Vec<Choice>,

    /// Classification metadata
    pub metadata: QuestionMetadata,

    /// Structured explanation, when authored
    pub explanation: Option<Explanation>,

    /// Free-form tags
    pub tags: Vec<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last-modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl Question {
    /// The keyed answer choices, in presentation order
    pub fn correct_choices(&self) -> Vec<&Choice> {
        self.choices.iter().filter(|c| c.is_correct).collect()
    }

    /// The incorrect choices, in presentation order
    pub fn distractors(&self) -> Vec<&Choice> {
        self.choices.iter().filter(|c| !c.is_correct).collect()
    }

    /// Check the structural invariant for this question's format
    pub fn is_valid(&self) -> bool {
        if self.choices.is_empty() {
            return false;
        }
        let correct = self.choices.iter().filter(|c| c.is_correct).count();
        if correct == 0 {
            return false;
        }
        if self.question_format == QuestionFormat::MultipleChoiceSingleAnswer && correct != 1 {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> QuestionMetadata {
        QuestionMetadata {
            difficulty: Difficulty::Medium,
            topics: vec!["virtual memory".to_string(), "paging".to_string()],
            certification: "os-architect".to_string(),
            cognitive_level: BloomLevel::Understand,
            domains: vec!["operating systems".to_string()],
            source: None,
            version: Some("2025".to_string()),
        }
    }

    fn question(choices: Vec<Choice>, format: QuestionFormat) -> Question {
        Question {
            id: "q-1".to_string(),
            text: "Which statement about demand paging is correct?".to_string(),
            question_format: format,
            choices,
            metadata: metadata(),
            explanation: None,
            tags: vec!["memory".to_string()],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_label_round_trips() {
        assert_eq!("MEDIUM".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert_eq!(Difficulty::Hard.as_str(), "HARD");
        assert_eq!("ANALYZE".parse::<BloomLevel>().unwrap(), BloomLevel::Analyze);
        assert_eq!(
            "MULTIPLE_CHOICE_SINGLE_ANSWER".parse::<QuestionFormat>().unwrap(),
            QuestionFormat::MultipleChoiceSingleAnswer
        );
        assert_eq!(
            "PARTIAL_TRUTH".parse::<DistractorType>().unwrap(),
            DistractorType::PartialTruth
        );
    }

    #[test]
    fn test_unknown_labels_rejected() {
        // Lowercase and arbitrary strings are both invalid
        assert!("medium".parse::<Difficulty>().is_err());
        assert!("".parse::<BloomLevel>().is_err());
        assert!("TRUE_FALSE".parse::<QuestionFormat>().is_err());
        let err = "NONSENSE".parse::<DistractorType>().unwrap_err();
        assert!(err.to_string().contains("NONSENSE"));
    }

    #[test]
    fn test_bloom_rank_ordering() {
        assert_eq!(BloomLevel::Remember.rank(), 1);
        assert_eq!(BloomLevel::Create.rank(), 6);
        assert!(BloomLevel::Apply.rank() < BloomLevel::Evaluate.rank());
    }

    #[test]
    fn test_correct_choices_and_distractors() {
        let q = question(
            vec![
                Choice::new("a", "key", true),
                Choice::new("b", "foil one", false),
                Choice::new("c", "foil two", false),
            ],
            QuestionFormat::MultipleChoiceSingleAnswer,
        );
        assert_eq!(q.correct_choices().len(), 1);
        assert_eq!(q.correct_choices()[0].id, "a");
        assert_eq!(q.distractors().len(), 2);
    }

    #[test]
    fn test_validity_invariant() {
        let valid = question(
            vec![Choice::new("a", "key", true), Choice::new("b", "foil", false)],
            QuestionFormat::MultipleChoiceSingleAnswer,
        );
        assert!(valid.is_valid());

        let no_choices = question(vec![], QuestionFormat::MultipleChoiceSingleAnswer);
        assert!(!no_choices.is_valid());

        let no_correct = question(
            vec![Choice::new("a", "foil", false), Choice::new("b", "foil", false)],
            QuestionFormat::MultipleChoiceSingleAnswer,
        );
        assert!(!no_correct.is_valid());

        // Two keys break the single-answer format but suit the multi-answer one
        let two_keys = vec![
            Choice::new("a", "key", true),
            Choice::new("b", "key", true),
            Choice::new("c", "foil", false),
        ];
        assert!(!question(two_keys.clone(), QuestionFormat::MultipleChoiceSingleAnswer).is_valid());
        assert!(question(two_keys, QuestionFormat::MultipleChoiceMultipleAnswer).is_valid());
    }

    #[test]
    fn test_question_serde_round_trip() {
        let mut q = question(
            vec![Choice::new("a", "key", true), Choice::new("b", "foil", false)],
            QuestionFormat::ScenarioBased,
        );
        q.choices[1].distractor_type = Some(DistractorType::CommonMisconception);
        let json = serde_json::to_string(&q).unwrap();
        assert!(json.contains("\"SCENARIO_BASED\""));
        assert!(json.contains("\"COMMON_MISCONCEPTION\""));
        let back: Question = serde_json::from_str(&json).unwrap();
        assert_eq!(back, q);
    }
}
