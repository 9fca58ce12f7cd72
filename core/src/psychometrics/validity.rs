//! Content and construct validity scoring.
//!
//! Content validity measures how well a question's topics sit inside the
//! certification syllabus, optionally blended with an expert rating.
//! Construct validity measures agreement between the cognitive level a
//! question realizes and the level it was intended to assess, as a linear
//! decay over the ordinal distance between taxonomy ranks. The decay is a
//! deliberate simplification: it scores hierarchy distance, not semantic
//! similarity between cognitive processes.

use std::collections::HashMap;

use crate::domain::{BloomLevel, Question, QuestionId};

use super::config::PsychometricConfig;

/// Span between the lowest and highest taxonomy ranks
const MAX_RANK_DISTANCE: f64 = 5.0;

/// Content and construct validity evaluator
#[derive(Debug, Clone)]
pub struct ValidityEvaluator {
    config: PsychometricConfig,
}

impl ValidityEvaluator {
    /// Create an evaluator with the given blend weight
    pub fn new(config: PsychometricConfig) -> Self {
        Self { config }
    }

    /// Content validity in [0, 1]
    ///
    /// The base score is the fraction of the question's topics present in
    /// `syllabus_topics` (0.0 for a topic-free question). When an expert
    /// rating exists for this question, the score blends coverage and
    /// rating with the configured expert weight.
    pub fn content_validity(
        &self,
        question: &Question,
        syllabus_topics: &[String],
        expert_ratings: Option<&HashMap<QuestionId, f64>>,
    ) -> f64 {
        let topics = &question.metadata.topics;
        if topics.is_empty() {
            return 0.0;
        }
        let covered = topics
            .iter()
            .filter(|topic| syllabus_topics.contains(topic))
            .count();
        let coverage = covered as f64 / topics.len() as f64;

        if let Some(expert_score) = expert_ratings.and_then(|ratings| ratings.get(&question.id)) {
            let w = self.config.expert_weight;
            return (1.0 - w) * coverage + w * expert_score;
        }
        coverage
    }

    /// Construct validity in [0, 1]
    ///
    /// 1.0 when the question's realized cognitive level equals the
    /// intended one; otherwise a linear decay over the rank distance,
    /// bottoming out at 0.0 for the recall-to-creation extreme.
    pub fn construct_validity(&self, question: &Question, intended: BloomLevel) -> f64 {
        let realized = question.metadata.cognitive_level;
        if realized == intended {
            return 1.0;
        }
        let distance = (f64::from(realized.rank()) - f64::from(intended.rank())).abs();
        (1.0 - distance / MAX_RANK_DISTANCE).max(0.0)
    }
}
