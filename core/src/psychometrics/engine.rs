//! Item-level and test-level psychometric evaluation.
//!
//! The engine composes the discrimination, reliability, IRT, and validity
//! calculators into a single analysis surface. One call per question
//! yields an [`ItemAnalysisResult`]; aggregate calls derive test-level
//! reliability, calibrated difficulty labels, and improvement
//! recommendations from a batch of those results.
//!
//! ## Key components
//!
//! * [`ItemAnalysisResult`]: immutable per-item quality metrics with
//!   derived categorization, quality scoring, and suggestions
//! * [`PsychometricEvaluationEngine`]: owns the calculators and a
//!   [`PsychometricConfig`]; constructed explicitly by the caller, never
//!   ambient
//!
//! Item analyses are independent of each other, so the batch entry point
//! fans out across a thread pool; every input is an immutable snapshot
//! and no locking is involved.

use std::collections::HashMap;

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::{
    AbilityEstimates, BloomLevel, ChoiceId, ChoiceSelectionCounts, Difficulty, ExamineeRecord,
    ItemObservations, Question, QuestionId, ResponseRecord,
};
use crate::error::PsychometricResult;

use super::config::PsychometricConfig;
use super::discrimination::DiscriminationCalculator;
use super::irt::IrtModelApplicator;
use super::reliability::ReliabilityAnalyzer;
use super::validity::ValidityEvaluator;

/// Quality metrics for one analyzed question item
///
/// Created once per (question, response batch) and never mutated;
/// calibration and recommendation steps only read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemAnalysisResult {
    /// Proportion of examinees answering correctly (the P-value), in [0, 1]
    pub difficulty_index: f64,

    /// Upper-vs-lower group separation, in [-1, 1]
    pub discrimination_index: f64,

    /// Efficiency score per answer choice, each in [0, 1]
    pub distractor_efficiency: HashMap<ChoiceId, f64>,

    /// Agreement between intended and realized cognitive level, in [0, 1]
    pub bloom_level_match: f64,

    /// Composite of discrimination and difficulty centering, in [0, 1]
    pub reliability_contribution: f64,
}

impl ItemAnalysisResult {
    /// Difficulty band implied by the empirical P-value
    ///
    /// Strictly above the easy threshold is easy; at or above the hard
    /// threshold is medium; below it is hard. The boundaries themselves
    /// land on medium.
    pub fn difficulty_category(&self, config: &PsychometricConfig) -> Difficulty {
        if self.difficulty_index > config.easy_threshold {
            Difficulty::Easy
        } else if self.difficulty_index >= config.hard_threshold {
            Difficulty::Medium
        } else {
            Difficulty::Hard
        }
    }

    /// Whether the item separates ability groups acceptably
    pub fn is_good_discriminator(&self, config: &PsychometricConfig) -> bool {
        self.discrimination_index >= config.good_discrimination_threshold
    }

    /// Weighted composite quality score in [0, 1]
    ///
    /// Rewards items near the 0.5 difficulty optimum with positive
    /// discrimination and effective distractors: 25% difficulty
    /// centering, 35% discrimination (ramped against the good-separation
    /// threshold), 25% mean distractor efficiency, 15% cognitive-level
    /// agreement.
    pub fn quality_score(&self, config: &PsychometricConfig) -> f64 {
        let difficulty_quality = 1.0 - 2.0 * (self.difficulty_index - 0.5).abs();
        let discrimination_quality = if self.discrimination_index > 0.0 {
            (self.discrimination_index / config.good_discrimination_threshold).min(1.0)
        } else {
            0.0
        };
        let distractor_quality = if self.distractor_efficiency.is_empty() {
            0.0
        } else {
            self.distractor_efficiency.values().sum::<f64>()
                / self.distractor_efficiency.len() as f64
        };

        difficulty_quality * 0.25
            + discrimination_quality * 0.35
            + distractor_quality * 0.25
            + self.bloom_level_match * 0.15
    }

    /// Ordered rework suggestions for this item
    ///
    /// Rules fire independently and append in a fixed order: difficulty
    /// extremes, discrimination (negative separation takes priority over
    /// merely-low separation, never both), low-efficiency distractors
    /// (offending choice ids sorted), cognitive-level mismatch. An empty
    /// list means nothing was flagged.
    pub fn improvement_suggestions(&self, config: &PsychometricConfig) -> Vec<String> {
        let mut suggestions = Vec::new();

        if self.difficulty_index > config.very_easy_threshold {
            suggestions.push(
                "Item is answered correctly by nearly everyone. Raise the challenge with a \
                 more involved concept or an application-level task."
                    .to_string(),
            );
        } else if self.difficulty_index < config.very_hard_threshold {
            suggestions.push(
                "Item is missed by nearly everyone. Consider simplifying the stem or adding \
                 supporting context."
                    .to_string(),
            );
        }

        if self.discrimination_index < 0.0 {
            suggestions.push(
                "Item discriminates negatively: lower-ability examinees outscore \
                 higher-ability ones. Review the keyed answer and the stem for ambiguity."
                    .to_string(),
            );
        } else if self.discrimination_index < config.low_discrimination_threshold {
            suggestions.push(
                "Item barely separates high- and low-ability examinees. Sharpen the contrast \
                 between the key and the distractors."
                    .to_string(),
            );
        }

        let mut weak_choices: Vec<&str> = self
            .distractor_efficiency
            .iter()
            .filter(|(_, &efficiency)| efficiency < config.low_efficiency_threshold)
            .map(|(choice, _)| choice.as_str())
            .collect();
        if !weak_choices.is_empty() {
            weak_choices.sort_unstable();
            suggestions.push(format!(
                "Choices {} attract almost no selections. Replace them with more plausible \
                 distractors.",
                weak_choices.join(", ")
            ));
        }

        if self.bloom_level_match < config.bloom_mismatch_threshold {
            suggestions.push(
                "Realized cognitive level diverges from the intended one. Rework the task \
                 toward the intended cognitive process."
                    .to_string(),
            );
        }

        suggestions
    }
}

/// Psychometric evaluation engine
///
/// Owns its calculators and configuration; callers construct one
/// explicitly and pass it wherever analysis is needed.
#[derive(Debug, Clone)]
pub struct PsychometricEvaluationEngine {
    config: PsychometricConfig,
    discrimination: DiscriminationCalculator,
    reliability: ReliabilityAnalyzer,
    irt: IrtModelApplicator,
    validity: ValidityEvaluator,
}

impl Default for PsychometricEvaluationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PsychometricEvaluationEngine {
    /// Create an engine with the default domain thresholds
    pub fn new() -> Self {
        // The default configuration is valid by construction
        Self::from_parts(PsychometricConfig::default())
    }

    /// Create an engine with an explicit, validated configuration
    pub fn with_config(config: PsychometricConfig) -> PsychometricResult<Self> {
        config.validate()?;
        Ok(Self::from_parts(config))
    }

    fn from_parts(config: PsychometricConfig) -> Self {
        Self {
            discrimination: DiscriminationCalculator::new(config.clone()),
            reliability: ReliabilityAnalyzer::new(),
            irt: IrtModelApplicator::new(config.clone()),
            validity: ValidityEvaluator::new(config.clone()),
            config,
        }
    }

    /// The configuration this engine was built with
    pub fn config(&self) -> &PsychometricConfig {
        &self.config
    }

    /// Analyze one question against its response data
    ///
    /// With zero responses the difficulty index falls back to the 0.5
    /// neutral prior; with no intended cognitive level the bloom match is
    /// 1.0. The reliability contribution combines discrimination with
    /// difficulty centering: `((d + 1) / 2) * (1 - 2|P - 0.5|)`.
    pub fn analyze_item(
        &self,
        question: &Question,
        responses: &[ResponseRecord],
        abilities: &AbilityEstimates,
        choice_selections: &ChoiceSelectionCounts,
        intended_level: Option<BloomLevel>,
    ) -> PsychometricResult<ItemAnalysisResult> {
        let total = responses.len();
        let correct = responses.iter().filter(|r| r.correct).count();
        let difficulty_index = if total == 0 {
            0.5
        } else {
            correct as f64 / total as f64
        };

        let discrimination_index = self.discrimination.discrimination_index(responses, abilities);
        let distractor_efficiency = self
            .discrimination
            .distractor_efficiency(question, choice_selections)?;

        let bloom_level_match = match intended_level {
            Some(level) => self.validity.construct_validity(question, level),
            None => 1.0,
        };

        let difficulty_quality = 1.0 - 2.0 * (difficulty_index - 0.5).abs();
        let reliability_contribution = (discrimination_index + 1.0) / 2.0 * difficulty_quality;

        debug!(
            "analyzed item {}: P={difficulty_index:.3} D={discrimination_index:.3} \
             bloom={bloom_level_match:.3}",
            question.id
        );

        Ok(ItemAnalysisResult {
            difficulty_index,
            discrimination_index,
            distractor_efficiency,
            bloom_level_match,
            reliability_contribution,
        })
    }

    /// Analyze a batch of questions in parallel
    ///
    /// Each question is paired with its own observation snapshot; a
    /// question without observations is analyzed against empty data and
    /// lands on the documented neutral values. Intended cognitive levels
    /// are looked up per question when a map is supplied.
    pub fn analyze_items(
        &self,
        questions: &[Question],
        observations: &HashMap<QuestionId, ItemObservations>,
        abilities: &AbilityEstimates,
        intended_levels: Option<&HashMap<QuestionId, BloomLevel>>,
    ) -> PsychometricResult<HashMap<QuestionId, ItemAnalysisResult>> {
        let empty = ItemObservations::default();
        questions
            .par_iter()
            .map(|question| {
                let observed = observations.get(&question.id).unwrap_or(&empty);
                let intended =
                    intended_levels.and_then(|levels| levels.get(&question.id).copied());
                self.analyze_item(
                    question,
                    &observed.responses,
                    abilities,
                    &observed.choice_selections,
                    intended,
                )
                .map(|result| (question.id.clone(), result))
            })
            .collect()
    }

    /// Test-level internal consistency (Cronbach's alpha) and per-item
    /// contributions
    pub fn evaluate_test_reliability(
        &self,
        questions: &[Question],
        responses: &[ExamineeRecord],
    ) -> (f64, HashMap<QuestionId, f64>) {
        self.reliability.internal_consistency(questions, responses)
    }

    /// Rasch (1PL) difficulty parameter for one item's response data
    pub fn rasch_difficulty(
        &self,
        responses: &[ResponseRecord],
        abilities: &AbilityEstimates,
    ) -> f64 {
        self.irt.rasch_difficulty(responses, abilities)
    }

    /// Empirically calibrated difficulty label per analyzed question
    ///
    /// Questions without an analysis result are skipped, not an error;
    /// the caller may be calibrating a subset.
    pub fn calibrate_difficulty_levels(
        &self,
        questions: &[Question],
        analysis_results: &HashMap<QuestionId, ItemAnalysisResult>,
    ) -> HashMap<QuestionId, Difficulty> {
        questions
            .iter()
            .filter_map(|question| {
                analysis_results
                    .get(&question.id)
                    .map(|result| (question.id.clone(), result.difficulty_category(&self.config)))
            })
            .collect()
    }

    /// Ordered improvement suggestions per analyzed question
    ///
    /// Questions without an analysis result are skipped. Output is
    /// deterministic for identical inputs.
    pub fn improvement_recommendations(
        &self,
        questions: &[Question],
        analysis_results: &HashMap<QuestionId, ItemAnalysisResult>,
    ) -> HashMap<QuestionId, Vec<String>> {
        questions
            .iter()
            .filter_map(|question| {
                analysis_results.get(&question.id).map(|result| {
                    (
                        question.id.clone(),
                        result.improvement_suggestions(&self.config),
                    )
                })
            })
            .collect()
    }
}
