//! Internal-consistency reliability.
//!
//! Cronbach's alpha over the examinee × item correctness matrix, with
//! Bessel-corrected (ddof = 1) variances throughout, plus a per-item
//! contribution diagnostic: for three or more items the standard
//! alpha-if-item-deleted difference, for exactly two items half the
//! Pearson correlation between the two item columns. Degenerate inputs
//! (a single item, fewer than two examinees, zero total-score variance)
//! report an alpha of 0.0 rather than an error.

use std::collections::HashMap;

use log::debug;
use nalgebra::DMatrix;

use crate::domain::{ExamineeRecord, Question, QuestionId};

use super::stats::{pearson_correlation, sample_variance};

/// Cronbach's-alpha analyzer over dichotomous response matrices
#[derive(Debug, Clone, Default)]
pub struct ReliabilityAnalyzer;

impl ReliabilityAnalyzer {
    /// Create an analyzer
    pub fn new() -> Self {
        Self
    }

    /// Cronbach's alpha and per-item contributions
    ///
    /// `responses` is one record per examinee; a question missing from a
    /// record counts as answered incorrectly. The contribution of an item
    /// is `alpha - alpha_if_deleted` (positive means the item supports
    /// consistency); with exactly two items it is half the correlation of
    /// the two columns, the closest two-item analogue.
    pub fn internal_consistency(
        &self,
        questions: &[Question],
        responses: &[ExamineeRecord],
    ) -> (f64, HashMap<QuestionId, f64>) {
        let n_items = questions.len();
        if n_items <= 1 || responses.len() < 2 {
            debug!(
                "reliability: {} items x {} examinees is degenerate, reporting alpha 0.0",
                n_items,
                responses.len()
            );
            return (0.0, HashMap::new());
        }

        let matrix = DMatrix::from_fn(responses.len(), n_items, |row, col| {
            if responses[row].get(&questions[col].id).copied().unwrap_or(false) {
                1.0
            } else {
                0.0
            }
        });

        let alpha = cronbach_alpha(&matrix);

        let mut contributions = HashMap::with_capacity(n_items);
        for (index, question) in questions.iter().enumerate() {
            let contribution = if n_items > 2 {
                let reduced = matrix.clone().remove_column(index);
                alpha - cronbach_alpha(&reduced)
            } else {
                let first: Vec<f64> = matrix.column(0).iter().copied().collect();
                let second: Vec<f64> = matrix.column(1).iter().copied().collect();
                pearson_correlation(&first, &second) / 2.0
            };
            contributions.insert(question.id.clone(), contribution);
        }

        (alpha, contributions)
    }
}

/// Cronbach's alpha for a 0/1 response matrix (examinees x items)
///
/// Zero total-score variance, or fewer than two columns, reports 0.0.
fn cronbach_alpha(matrix: &DMatrix<f64>) -> f64 {
    let n_items = matrix.ncols();
    if n_items <= 1 {
        return 0.0;
    }

    let item_variance_sum: f64 = (0..n_items)
        .map(|col| {
            let column: Vec<f64> = matrix.column(col).iter().copied().collect();
            sample_variance(&column)
        })
        .sum();

    let totals: Vec<f64> = (0..matrix.nrows()).map(|row| matrix.row(row).sum()).collect();
    let total_variance = sample_variance(&totals);
    if total_variance <= f64::EPSILON {
        return 0.0;
    }

    let k = n_items as f64;
    (k / (k - 1.0)) * (1.0 - item_variance_sum / total_variance)
}
