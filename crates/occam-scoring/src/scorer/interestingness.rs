use std::sync::Arc;

use occam_stats::WeightedSample;
use occam_table::{CompressedTable, OutputType};
use serde::{Deserialize, Serialize};

use super::{BehavioralScorer, ConfigureOccam, complexity_penalty, log_candidate, log_occam};
use crate::{
    error::ScorerError,
    penalty::{OccamPenalty, ThresholdBand},
    program::Program,
    score::{BEST_SCORE, BehavioralScore, PenalizedScore, WORST_SCORE},
    stats::{DistributionStats, EmpiricalStats},
};

/// Weights of the interestingness components; a zero weight disables one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterestingnessWeights {
    /// Divergence of the whole output distribution from the selected one.
    pub kld: f64,
    /// Skewness difference between the selected and the whole distribution.
    pub skewness: f64,
    /// Magnitude of the standardized Mann–Whitney U shift.
    pub std_u: f64,
    /// Product of the U shift and the skewness difference.
    pub skew_u: f64,
}

impl Default for InterestingnessWeights {
    fn default() -> Self {
        Self {
            kld: 1.0,
            skewness: 0.0,
            std_u: 0.0,
            skew_u: 0.0,
        }
    }
}

fn default_positive() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterestingnessConfig {
    #[serde(default)]
    pub weights: InterestingnessWeights,
    /// Band of the fraction of observations selected by the predicate.
    pub activation: ThresholdBand,
    /// Selects the observations where the predicate is true (or false).
    #[serde(default = "default_positive")]
    pub positive: bool,
    #[serde(default)]
    pub abs_skewness: bool,
    /// Reports one divergence term per reference value instead of the sum.
    #[serde(default)]
    pub decompose_kld: bool,
}

/// Scores a predicate by how much the outputs it selects differ from the
/// outputs of the whole table.
///
/// The behavior holds, in order and only for the enabled components: the
/// divergence (a single value or one term per reference value), the skewness
/// difference, the absolute U shift, their product, and finally the
/// activation penalty. A predicate selecting fewer than two distinct outputs
/// scores the single unit `[WORST_SCORE]`.
#[derive(Debug, Clone)]
pub struct InterestingnessScorer<S = EmpiricalStats> {
    table: Arc<CompressedTable>,
    config: InterestingnessConfig,
    stats: S,
    occam: OccamPenalty,
}

impl InterestingnessScorer {
    /// Scorer against the output distribution of `table`.
    pub fn new(
        table: Arc<CompressedTable>,
        config: InterestingnessConfig,
    ) -> Result<Self, ScorerError> {
        let reference = output_sample(&table);
        Self::with_stats(table, config, EmpiricalStats::new(reference))
    }
}

impl<S> InterestingnessScorer<S>
where
    S: DistributionStats,
{
    /// Scorer using `stats` against the table's output distribution.
    pub fn with_stats(
        table: Arc<CompressedTable>,
        config: InterestingnessConfig,
        stats: S,
    ) -> Result<Self, ScorerError> {
        if table.output_type() != OutputType::Contin {
            return Err(ScorerError::UnsupportedOutputType {
                scorer: "interestingness",
                found: table.output_type(),
            });
        }
        tracing::info!(
            weights = ?config.weights,
            min_activation = config.activation.min(),
            max_activation = config.activation.max(),
            penalty = config.activation.weight(),
            positive = config.positive,
            reference_skewness = stats.reference_skewness(),
            "interestingness scorer"
        );
        Ok(Self {
            table,
            config,
            stats,
            occam: OccamPenalty::none(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &InterestingnessConfig {
        &self.config
    }

    fn push_statistics(&self, sample: &WeightedSample, behavior: &mut BehavioralScore) {
        let weights = &self.config.weights;
        if weights.kld > 0.0 {
            if self.config.decompose_kld {
                let terms = self.stats.divergence_terms(sample).unwrap_or_default();
                behavior.extend(terms.into_iter().map(|term| weights.kld * term));
            } else {
                let divergence = self.stats.divergence(sample).unwrap_or(0.0);
                tracing::trace!(divergence);
                behavior.push(weights.kld * divergence);
            }
        }

        let mut skewness_diff = 0.0;
        if weights.skewness > 0.0 || weights.skew_u > 0.0 {
            if let (Some(skewness), Some(reference)) =
                (self.stats.skewness(sample), self.stats.reference_skewness())
            {
                tracing::trace!(skewness, reference, "skewness");
                skewness_diff = skewness - reference;
            }
            if weights.skewness > 0.0 {
                let value = if self.config.abs_skewness {
                    skewness_diff.abs()
                } else {
                    skewness_diff
                };
                behavior.push(weights.skewness * value);
            }
        }

        let mut shift = 0.0;
        if weights.std_u > 0.0 || weights.skew_u > 0.0 {
            shift = self.stats.rank_shift(sample);
            tracing::trace!(shift, "standardized U");
            if weights.std_u > 0.0 {
                behavior.push(weights.std_u * shift.abs());
            }
        }

        // positive when shift and skewness move the same way
        if weights.skew_u > 0.0 {
            behavior.push(weights.skew_u * shift * skewness_diff);
        }
    }
}

/// Numeric outputs of the table, weighted by occurrence.
fn output_sample(table: &CompressedTable) -> WeightedSample {
    WeightedSample::new(
        table
            .rows()
            .iter()
            .flat_map(|row| row.outputs().iter())
            .filter_map(|(value, count)| Some((value.as_f64()?, f64::from(count)))),
    )
}

impl<S, C> BehavioralScorer<C> for InterestingnessScorer<S>
where
    S: DistributionStats,
    C: Program + ?Sized,
{
    fn score(&self, candidate: &C) -> PenalizedScore {
        let mut active = 0;
        let mut selected = vec![];
        for row in self.table.rows() {
            if candidate.evaluate(row.inputs()).is_true() != self.config.positive {
                continue;
            }
            active += row.total_count();
            selected.extend(
                row.outputs()
                    .iter()
                    .filter_map(|(value, count)| Some((value.as_f64()?, f64::from(count)))),
            );
        }
        let sample = WeightedSample::new(selected);
        tracing::trace!(active, distinct_outputs = sample.len());

        // statistics of fewer than two distinct values are degenerate
        if sample.len() <= 1 {
            let score = PenalizedScore::new(vec![WORST_SCORE], 0.0);
            log_candidate(candidate, &score);
            return score;
        }

        let mut behavior = vec![];
        self.push_statistics(&sample, &mut behavior);

        let activation = f64::from(active) / f64::from(self.table.uncompressed_size());
        let activation_penalty = self.config.activation.penalty(activation);
        tracing::trace!(activation, activation_penalty);
        behavior.push(activation_penalty);

        let score = PenalizedScore::new(behavior, complexity_penalty(&self.occam, candidate));
        log_candidate(candidate, &score);
        score
    }

    fn best_possible_score(&self) -> BehavioralScore {
        vec![BEST_SCORE]
    }

    fn min_improvement(&self) -> f64 {
        0.0
    }
}

impl<S> ConfigureOccam for InterestingnessScorer<S> {
    /// `noise` is the standard deviation of the output noise.
    fn set_complexity_coef(&mut self, alphabet_size: u32, noise: f64) {
        self.occam = OccamPenalty::contin(alphabet_size, noise);
        log_occam("interestingness", Some(noise), &self.occam);
    }

    fn set_complexity_ratio(&mut self, ratio: f64) {
        self.occam = OccamPenalty::from_ratio(ratio);
        log_occam("interestingness", None, &self.occam);
    }

    fn occam(&self) -> OccamPenalty {
        self.occam
    }
}
