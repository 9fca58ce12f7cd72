//! Item discrimination and distractor efficiency.
//!
//! Discrimination follows the classical upper/lower group method: rank
//! examinees by overall ability, take the top and bottom slices (27% by
//! default, after Kelley), and report the difference in proportion
//! correct. Distractor efficiency scores each incorrect choice against the
//! theoretically even split of the non-correct selection mass, penalizing
//! both neglected and over-selected distractors: an inverted-U response
//! where only near-ideal selection rates score close to 1.0.

use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

use log::debug;
use ordered_float::OrderedFloat;

use crate::domain::{AbilityEstimates, ChoiceId, ChoiceSelectionCounts, Question, ResponseRecord};
use crate::error::{PsychometricError, PsychometricResult};

use super::config::PsychometricConfig;

/// Upper/lower-group discrimination and distractor-efficiency calculator
#[derive(Debug, Clone)]
pub struct DiscriminationCalculator {
    config: PsychometricConfig,
}

impl DiscriminationCalculator {
    /// Create a calculator with the given thresholds
    pub fn new(config: PsychometricConfig) -> Self {
        Self { config }
    }

    /// Discrimination index over the upper and lower ability groups
    ///
    /// Returns a value in [-1, 1]: the proportion correct in the upper
    /// group minus the proportion correct in the lower group. Below the
    /// minimum sample size the index is 0.0, since there is too little
    /// data to rank groups meaningfully. Examinees missing from
    /// `abilities` rank with an ability of 0.0. Ties in ability keep the
    /// stable order of the input; that tie-break is accepted, not
    /// guaranteed fair.
    pub fn discrimination_index(
        &self,
        responses: &[ResponseRecord],
        abilities: &AbilityEstimates,
    ) -> f64 {
        if responses.len() < self.config.min_discrimination_sample {
            debug!(
                "discrimination: {} responses below minimum sample {}, reporting 0.0",
                responses.len(),
                self.config.min_discrimination_sample
            );
            return 0.0;
        }

        let mut ranked: Vec<(&str, f64)> = responses
            .iter()
            .map(|r| {
                (
                    r.user_id.as_str(),
                    abilities.get(&r.user_id).copied().unwrap_or(0.0),
                )
            })
            .collect();
        ranked.sort_by_key(|&(_, score)| Reverse(OrderedFloat(score)));

        let group_size = ((ranked.len() as f64 * self.config.group_fraction) as usize).max(1);
        let upper: HashSet<&str> = ranked[..group_size].iter().map(|&(user, _)| user).collect();
        let lower: HashSet<&str> = ranked[ranked.len() - group_size..]
            .iter()
            .map(|&(user, _)| user)
            .collect();

        let mut upper_correct = 0usize;
        let mut upper_total = 0usize;
        let mut lower_correct = 0usize;
        let mut lower_total = 0usize;
        for response in responses {
            if upper.contains(response.user_id.as_str()) {
                upper_total += 1;
                if response.correct {
                    upper_correct += 1;
                }
            }
            if lower.contains(response.user_id.as_str()) {
                lower_total += 1;
                if response.correct {
                    lower_correct += 1;
                }
            }
        }

        if upper_total == 0 || lower_total == 0 {
            return 0.0;
        }

        upper_correct as f64 / upper_total as f64 - lower_correct as f64 / lower_total as f64
    }

    /// Efficiency score in [0, 1] for every choice of `question`
    ///
    /// Correct choices score their raw selection rate. Each distractor is
    /// scored against the ideal rate `(1 - correct mass) / n_distractors`:
    /// a linear ramp up to the ideal, then a linear penalty for
    /// over-selection, floored at 0.0. Correct-choice rates are settled in
    /// a first pass so the ideal is independent of choice order. With no
    /// recorded selections every choice scores 0.0; a degenerate ideal of
    /// zero scores the distractor 0.0 outright.
    ///
    /// Fails fast on a question without choices, where any score would be
    /// a misleading statistic.
    pub fn distractor_efficiency(
        &self,
        question: &Question,
        selections: &ChoiceSelectionCounts,
    ) -> PsychometricResult<HashMap<ChoiceId, f64>> {
        if question.choices.is_empty() {
            return Err(PsychometricError::EmptyChoiceList {
                question_id: question.id.clone(),
            });
        }

        let total: u64 = selections.values().sum();
        if total == 0 {
            return Ok(question
                .choices
                .iter()
                .map(|choice| (choice.id.clone(), 0.0))
                .collect());
        }
        let total = total as f64;

        let mut efficiency = HashMap::with_capacity(question.choices.len());
        let mut correct_mass = 0.0;
        let mut distractor_count = 0usize;
        for choice in &question.choices {
            if choice.is_correct {
                let rate = selections.get(&choice.id).copied().unwrap_or(0) as f64 / total;
                correct_mass += rate;
                efficiency.insert(choice.id.clone(), rate);
            } else {
                distractor_count += 1;
            }
        }

        if distractor_count == 0 {
            return Ok(efficiency);
        }
        let ideal = (1.0 - correct_mass) / distractor_count as f64;

        for choice in question.choices.iter().filter(|c| !c.is_correct) {
            let actual = selections.get(&choice.id).copied().unwrap_or(0) as f64 / total;
            let score = if ideal <= f64::EPSILON {
                0.0
            } else if actual <= ideal {
                actual / ideal
            } else {
                1.0 - ((actual - ideal) / ideal).min(1.0)
            };
            efficiency.insert(choice.id.clone(), score);
        }

        Ok(efficiency)
    }
}
