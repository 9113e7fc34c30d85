use std::sync::Arc;

use occam_table::{CompressedTable, OutputType, Value};
use serde::{Deserialize, Serialize};

use super::{BehavioralScorer, ConfigureOccam, complexity_penalty, log_candidate, log_occam};
use crate::{
    discretize::{ClassThresholds, class_weights},
    error::ScorerError,
    penalty::OccamPenalty,
    program::Program,
    score::{BehavioralScore, PenalizedScore, WORST_SCORE},
};

/// Distance between a candidate output and an observed output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorFunction {
    #[default]
    Squared,
    Absolute,
}

impl ErrorFunction {
    #[must_use]
    pub fn error(self, output: f64, target: f64) -> f64 {
        match self {
            Self::Squared => (output - target).powi(2),
            Self::Absolute => (output - target).abs(),
        }
    }
}

fn require_contin(scorer: &'static str, table: &CompressedTable) -> Result<(), ScorerError> {
    match table.output_type() {
        OutputType::Contin => Ok(()),
        found => Err(ScorerError::UnsupportedOutputType { scorer, found }),
    }
}

/// Scores a numeric candidate by its error on every observation.
///
/// Each row scores minus the occurrence-weighted error between the candidate
/// output and each observed output. A candidate output without a numeric
/// value scores [`WORST_SCORE`] on the row.
#[derive(Debug, Clone)]
pub struct ContinScorer {
    table: Arc<CompressedTable>,
    error: ErrorFunction,
    occam: OccamPenalty,
}

impl ContinScorer {
    pub fn new(table: Arc<CompressedTable>, error: ErrorFunction) -> Result<Self, ScorerError> {
        require_contin("contin", &table)?;
        Ok(Self {
            table,
            error,
            occam: OccamPenalty::none(),
        })
    }
}

impl<C> BehavioralScorer<C> for ContinScorer
where
    C: Program + ?Sized,
{
    fn score(&self, candidate: &C) -> PenalizedScore {
        let behavior = self
            .table
            .rows()
            .iter()
            .map(|row| {
                let Some(output) = candidate.evaluate(row.inputs()).as_f64() else {
                    return WORST_SCORE;
                };
                -row.outputs()
                    .iter()
                    .map(|(target, count)| {
                        let target = target.as_f64().unwrap_or(f64::NAN);
                        f64::from(count) * self.error.error(output, target)
                    })
                    .sum::<f64>()
            })
            .collect();
        let score = PenalizedScore::new(behavior, complexity_penalty(&self.occam, candidate));
        log_candidate(candidate, &score);
        score
    }

    fn best_possible_score(&self) -> BehavioralScore {
        vec![0.0; self.table.rows().len()]
    }

    fn min_improvement(&self) -> f64 {
        // relative: ignore changes past the fourth decimal
        -1.0e-4
    }
}

impl ConfigureOccam for ContinScorer {
    /// `noise` is the standard deviation of the output noise.
    fn set_complexity_coef(&mut self, alphabet_size: u32, noise: f64) {
        self.occam = OccamPenalty::contin(alphabet_size, noise);
        log_occam("contin", Some(noise), &self.occam);
    }

    fn set_complexity_ratio(&mut self, ratio: f64) {
        self.occam = OccamPenalty::from_ratio(ratio);
        log_occam("contin", None, &self.occam);
    }

    fn occam(&self) -> OccamPenalty {
        self.occam
    }
}

/// Scores a numeric candidate by the class its output falls in.
///
/// Outputs are mapped to classes by [`ClassThresholds`]. Each row scores
/// minus the number of observations whose class differs from the class of the
/// candidate output. With weighting enabled, a mismatch on an observation of
/// class `c` costs the inverse-frequency weight of `c` instead of `1`.
#[derive(Debug, Clone)]
pub struct DiscretizedContinScorer {
    table: Arc<CompressedTable>,
    thresholds: ClassThresholds,
    /// `(class, occurrences)` of the observed outputs, per row.
    row_classes: Vec<Vec<(usize, u32)>>,
    weights: Vec<f64>,
    occam: OccamPenalty,
}

impl DiscretizedContinScorer {
    pub fn new(
        table: Arc<CompressedTable>,
        thresholds: ClassThresholds,
        weighted: bool,
    ) -> Result<Self, ScorerError> {
        require_contin("discretized contin", &table)?;
        let row_classes = table
            .rows()
            .iter()
            .map(|row| {
                row.outputs()
                    .iter()
                    .map(|(value, count)| (class_of(&thresholds, *value), count))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        let weights = if weighted {
            class_weights(
                thresholds.num_classes(),
                row_classes.iter().flatten().copied(),
            )
        } else {
            vec![1.0; thresholds.num_classes()]
        };
        tracing::info!(?weights, "discretized contin scorer");
        Ok(Self {
            table,
            thresholds,
            row_classes,
            weights,
            occam: OccamPenalty::none(),
        })
    }

    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
}

fn class_of(thresholds: &ClassThresholds, value: Value) -> usize {
    thresholds.class_idx(value.as_f64().unwrap_or(f64::NAN))
}

impl<C> BehavioralScorer<C> for DiscretizedContinScorer
where
    C: Program + ?Sized,
{
    fn score(&self, candidate: &C) -> PenalizedScore {
        let behavior = self
            .table
            .rows()
            .iter()
            .zip(&self.row_classes)
            .map(|(row, classes)| {
                let predicted = class_of(&self.thresholds, candidate.evaluate(row.inputs()));
                -classes
                    .iter()
                    .filter(|(class, _)| *class != predicted)
                    .map(|&(class, count)| f64::from(count) * self.weights[class])
                    .sum::<f64>()
            })
            .collect();
        let score = PenalizedScore::new(behavior, complexity_penalty(&self.occam, candidate));
        log_candidate(candidate, &score);
        score
    }

    fn best_possible_score(&self) -> BehavioralScore {
        vec![0.0; self.table.rows().len()]
    }

    fn min_improvement(&self) -> f64 {
        0.0
    }
}

impl ConfigureOccam for DiscretizedContinScorer {
    fn set_complexity_coef(&mut self, alphabet_size: u32, noise: f64) {
        self.occam = OccamPenalty::discrete(alphabet_size, noise);
        log_occam("discretized contin", Some(noise), &self.occam);
    }

    fn set_complexity_ratio(&mut self, ratio: f64) {
        self.occam = OccamPenalty::from_ratio(ratio);
        log_occam("discretized contin", None, &self.occam);
    }

    fn occam(&self) -> OccamPenalty {
        self.occam
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::Literal;

    fn contin_table() -> Arc<CompressedTable> {
        let samples = vec![
            (vec![Value::Contin(0.0)], Value::Contin(1.0)),
            (vec![Value::Contin(0.0)], Value::Contin(3.0)),
            (vec![Value::Contin(1.0)], Value::Contin(6.0)),
        ];
        Arc::new(CompressedTable::from_samples(OutputType::Contin, 1, samples).unwrap())
    }

    #[test]
    fn test_squared_error() {
        let scorer = ContinScorer::new(contin_table(), ErrorFunction::Squared).unwrap();
        let score = scorer.score(&Value::Contin(2.0));
        // row 0: (2-1)² + (2-3)², row 1: (2-6)²
        assert_eq!(score.behavior, vec![-2.0, -16.0]);
        assert_eq!(score.total(), -18.0);
    }

    #[test]
    fn test_absolute_error() {
        let scorer = ContinScorer::new(contin_table(), ErrorFunction::Absolute).unwrap();
        let score = scorer.score(&Value::Contin(2.0));
        assert_eq!(score.behavior, vec![-2.0, -4.0]);
    }

    #[test]
    fn test_non_numeric_output_is_worst() {
        let scorer = ContinScorer::new(contin_table(), ErrorFunction::Squared).unwrap();
        let score = scorer.score(&Value::Enum(0));
        assert_eq!(score.behavior, vec![WORST_SCORE; 2]);
    }

    #[test]
    fn test_boolean_table_is_rejected() {
        let samples = vec![(vec![Value::TRUE], Value::TRUE)];
        let table = Arc::new(CompressedTable::from_samples(OutputType::Boolean, 1, samples).unwrap());
        assert!(ContinScorer::new(table, ErrorFunction::Squared).is_err());
    }

    #[test]
    fn test_contin_occam_uses_stdev() {
        let mut scorer = ContinScorer::new(contin_table(), ErrorFunction::Squared).unwrap();
        scorer.set_complexity_coef(4, 0.0);
        assert!(!scorer.occam().is_enabled());
        scorer.set_complexity_coef(4, 1.0);
        assert!((scorer.occam().coef() - 2.0 * 4.0_f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_discretized_mismatches() {
        let thresholds = ClassThresholds::new(vec![2.0, 5.0]).unwrap();
        let scorer = DiscretizedContinScorer::new(contin_table(), thresholds, false).unwrap();
        // classes: row 0 {1.0 -> 0, 3.0 -> 1}, row 1 {6.0 -> 2}
        let score = scorer.score(&Value::Contin(2.5));
        assert_eq!(score.behavior, vec![-1.0, -1.0]);
        assert_eq!(
            BehavioralScorer::<dyn Program>::best_possible_score(&scorer),
            vec![0.0, 0.0]
        );

        // boolean outputs read as 0.0 here, i.e. class 0 on both rows
        let score = scorer.score(&Literal::new(0, Value::Contin(9.0)));
        assert_eq!(score.behavior, vec![-1.0, -1.0]);
    }

    #[test]
    fn test_discretized_weights() {
        let thresholds = ClassThresholds::new(vec![2.0, 5.0]).unwrap();
        let scorer = DiscretizedContinScorer::new(contin_table(), thresholds, true).unwrap();
        // one observation per class: every weight is 3 / (3 * 1)
        assert_eq!(scorer.weights(), &[1.0, 1.0, 1.0]);
    }
}
