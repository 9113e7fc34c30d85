//! Scorers trading precision against recall or activation.
//!
//! All of them report a two-unit behavior: the maximized metric, then the
//! threshold penalty of the constrained metric. Their units are fractions of
//! the table, so the complexity coefficient is divided by a table-size
//! normalization (see [`ComplexityNormalization`]).

use std::sync::Arc;

use occam_table::{CompressedTable, OutputType};
use serde::{Deserialize, Serialize};

use super::{BehavioralScorer, ConfigureOccam, complexity_penalty, log_candidate, log_occam};
use crate::{
    bound::{BoundEntry, GreedyBound, greedy_bound},
    discriminator::{Discriminator, OutputMass},
    error::ScorerError,
    penalty::{ComplexityNormalization, OccamPenalty, ThresholdBand},
    program::{Disjunction, Program},
    score::{BehavioralScore, PenalizedScore},
};

/// Metric maximized by a [`DiscriminatingScorer`]; the other one is kept in
/// the threshold band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscriminatingMetric {
    /// Maximize recall, constrain precision.
    Recall,
    /// Maximize precision, constrain recall.
    Prerec,
}

/// Range of the observed outputs, `(min, max)`.
fn output_range(table: &CompressedTable) -> (f64, f64) {
    match table.output_type() {
        OutputType::Boolean => (0.0, 1.0),
        _ => table
            .rows()
            .iter()
            .flat_map(|row| row.outputs().iter())
            .filter_map(|(value, _)| value.as_f64())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            }),
    }
}

#[expect(clippy::cast_precision_loss)]
fn fraction_of_table(table: &CompressedTable, rows: &[usize]) -> f64 {
    let active = rows
        .iter()
        .map(|&i| u64::from(table.rows()[i].total_count()))
        .sum::<u64>();
    active as f64 / f64::from(table.uncompressed_size())
}

/// Recall/precision trade-off scorer.
///
/// Scores `[metric, band penalty of the other metric]` where precision and
/// recall are computed from the [`Discriminator`] partition of the table. A
/// candidate that never fires has a precision of `1`.
///
/// For the best-bound estimate each row contributes a precision of
/// `positive / (count · positive_total)` and a recall of `1 / table_size`.
/// The per-row recall is a known approximation: it ignores the row's own
/// positive mass. As a consequence `best_possible_score` is an estimate and
/// not an upper bound (on a table with many positive rows, the constant true
/// candidate outscores it), so it must not be used to stop a search early.
#[derive(Debug, Clone)]
pub struct DiscriminatingScorer {
    discriminator: Discriminator,
    metric: DiscriminatingMetric,
    band: ThresholdBand,
    min_output: f64,
    max_output: f64,
    normalization: ComplexityNormalization,
    occam: OccamPenalty,
}

impl DiscriminatingScorer {
    pub fn new(
        table: Arc<CompressedTable>,
        metric: DiscriminatingMetric,
        band: ThresholdBand,
    ) -> Result<Self, ScorerError> {
        let (min_output, max_output) = output_range(&table);
        let discriminator = Discriminator::new(table)?;
        tracing::info!(
            ?metric,
            min_threshold = band.min(),
            max_threshold = band.max(),
            hardness = band.weight(),
            min_output,
            max_output,
            "discriminating scorer"
        );
        Ok(Self {
            discriminator,
            metric,
            band,
            min_output,
            max_output,
            normalization: ComplexityNormalization::default(),
            occam: OccamPenalty::none(),
        })
    }

    /// Maximizes recall while keeping precision in `precision_band`.
    pub fn recall(
        table: Arc<CompressedTable>,
        precision_band: ThresholdBand,
    ) -> Result<Self, ScorerError> {
        Self::new(table, DiscriminatingMetric::Recall, precision_band)
    }

    /// Maximizes precision while keeping recall in `recall_band`.
    pub fn prerec(
        table: Arc<CompressedTable>,
        recall_band: ThresholdBand,
    ) -> Result<Self, ScorerError> {
        Self::new(table, DiscriminatingMetric::Prerec, recall_band)
    }

    /// Must be set before the complexity penalty is configured.
    #[must_use]
    pub fn with_normalization(mut self, normalization: ComplexityNormalization) -> Self {
        self.normalization = normalization;
        self
    }

    #[must_use]
    pub fn metric(&self) -> DiscriminatingMetric {
        self.metric
    }

    #[must_use]
    pub fn min_output(&self) -> f64 {
        self.min_output
    }

    #[must_use]
    pub fn max_output(&self) -> f64 {
        self.max_output
    }

    /// Threshold penalty of the constrained metric.
    #[must_use]
    pub fn threshold_penalty(&self, value: f64) -> f64 {
        self.band.penalty(value)
    }

    fn table(&self) -> &CompressedTable {
        self.discriminator.table()
    }

    /// Per-row precision and recall, `(variable, fixed)` for the bound.
    pub fn bound_entries(&self) -> impl Iterator<Item = BoundEntry> + '_ {
        let table_size = f64::from(self.table().uncompressed_size());
        let positive_total = self.discriminator.positive_total();
        let mass = self.discriminator.mass();
        self.table().rows().iter().enumerate().map(move |(row, r)| {
            let (pos, _) = mass.split(r.outputs());
            let precision = pos / (f64::from(r.total_count()) * positive_total);
            let recall = 1.0 / table_size;
            let (variable, fixed) = match self.metric {
                DiscriminatingMetric::Recall => (recall, precision),
                DiscriminatingMetric::Prerec => (precision, recall),
            };
            BoundEntry {
                row,
                key: variable,
                variable,
                fixed,
            }
        })
    }

    #[must_use]
    pub fn best_bound(&self) -> GreedyBound {
        greedy_bound(self.bound_entries(), self.band.min())
    }

    /// Candidate firing on exactly the rows of the best bound.
    #[must_use]
    pub fn canonical_best_candidate(&self) -> Disjunction {
        self.best_bound().witness(self.table())
    }

    fn complexity_divisor(&self) -> f64 {
        let table_size = self.table().uncompressed_size();
        match self.normalization {
            ComplexityNormalization::TableSize => self.normalization.divisor(table_size, 1.0),
            ComplexityNormalization::BestActivation => {
                let activation = fraction_of_table(self.table(), &self.best_bound().rows);
                self.normalization.divisor(table_size, activation)
            }
        }
    }
}

impl<C> BehavioralScorer<C> for DiscriminatingScorer
where
    C: Program + ?Sized,
{
    fn score(&self, candidate: &C) -> PenalizedScore {
        let counts = self.discriminator.count(candidate);
        let precision = if counts.positive_count > 0.0 {
            counts.precision()
        } else {
            1.0
        };
        let recall = counts.recall();
        let (value, constrained) = match self.metric {
            DiscriminatingMetric::Recall => (recall, precision),
            DiscriminatingMetric::Prerec => (precision, recall),
        };
        let threshold_penalty = self.band.penalty(constrained);
        tracing::trace!(precision, recall, threshold_penalty);

        let score = PenalizedScore::new(
            vec![value, threshold_penalty],
            complexity_penalty(&self.occam, candidate),
        );
        log_candidate(candidate, &score);
        score
    }

    fn best_possible_score(&self) -> BehavioralScore {
        let bound = self.best_bound();
        let penalty = self.band.penalty(bound.fixed_sum);
        tracing::info!(
            score = bound.variable_sum,
            fixed = bound.fixed_sum,
            penalty,
            "discriminating scorer at threshold"
        );
        vec![bound.variable_sum, penalty]
    }

    fn min_improvement(&self) -> f64 {
        1.0 / f64::from(self.table().uncompressed_size())
    }
}

impl ConfigureOccam for DiscriminatingScorer {
    fn set_complexity_coef(&mut self, alphabet_size: u32, noise: f64) {
        self.occam = OccamPenalty::discrete(alphabet_size, noise).normalized(self.complexity_divisor());
        log_occam("discriminating", Some(noise), &self.occam);
    }

    fn set_complexity_ratio(&mut self, ratio: f64) {
        self.occam = OccamPenalty::from_ratio(ratio).normalized(self.complexity_divisor());
        log_occam("discriminating", None, &self.occam);
    }

    fn occam(&self) -> OccamPenalty {
        self.occam
    }
}

/// Precision scorer constrained by activation.
///
/// Scores `[precision, activation penalty]`. Precision is the positive mass
/// of the rows the candidate fires on divided by their observation count,
/// relative to the largest output of the table; it is `1` when the candidate
/// never fires. Activation is the fraction of observations the candidate
/// fires on.
///
/// With `worst_norm`, precision is further divided by the magnitude of the
/// average positive mass of the worst rows (about a tenth of the activation)
/// when that average is negative.
#[derive(Debug, Clone)]
pub struct PrecisionScorer {
    table: Arc<CompressedTable>,
    mass: OutputMass,
    band: ThresholdBand,
    worst_norm: bool,
    max_output: f64,
    normalization: ComplexityNormalization,
    occam: OccamPenalty,
}

impl PrecisionScorer {
    /// `positive` selects the targeted class: the true value of boolean
    /// tables, or large rather than small values of contin tables.
    pub fn new(
        table: Arc<CompressedTable>,
        activation_band: ThresholdBand,
        positive: bool,
        worst_norm: bool,
    ) -> Result<Self, ScorerError> {
        let mass = OutputMass::for_output("precision", table.output_type(), positive)?;
        let max_output = match mass {
            OutputMass::Boolean { .. } => 1.0,
            OutputMass::Contin { sign } => table
                .rows()
                .iter()
                .flat_map(|row| row.outputs().iter())
                .filter_map(|(value, _)| value.as_f64())
                .map(|v| sign * v)
                .fold(f64::NEG_INFINITY, f64::max),
        };
        tracing::info!(
            penalty = activation_band.weight(),
            min_activation = activation_band.min(),
            max_activation = activation_band.max(),
            positive,
            worst_norm,
            max_output,
            "precision scorer"
        );
        Ok(Self {
            table,
            mass,
            band: activation_band,
            worst_norm,
            max_output,
            normalization: ComplexityNormalization::default(),
            occam: OccamPenalty::none(),
        })
    }

    /// Must be set before the complexity penalty is configured.
    #[must_use]
    pub fn with_normalization(mut self, normalization: ComplexityNormalization) -> Self {
        self.normalization = normalization;
        self
    }

    #[must_use]
    pub fn max_output(&self) -> f64 {
        self.max_output
    }

    /// Threshold penalty of an activation.
    #[must_use]
    pub fn activation_penalty(&self, activation: f64) -> f64 {
        self.band.penalty(activation)
    }

    /// Rows keyed by their own precision, `(positive mass, count)` for the bound.
    pub fn bound_entries(&self) -> impl Iterator<Item = BoundEntry> + '_ {
        self.table.rows().iter().enumerate().map(|(row, r)| {
            let positive = self.mass.positive(r.outputs());
            let total = f64::from(r.total_count());
            BoundEntry {
                row,
                key: positive / total,
                variable: positive,
                fixed: total,
            }
        })
    }

    /// Best rows taken until the minimum activation is reached.
    #[must_use]
    pub fn best_bound(&self) -> GreedyBound {
        let min_active = f64::from(self.table.uncompressed_size()) * self.band.min();
        greedy_bound(self.bound_entries(), min_active)
    }

    /// Candidate firing on exactly the rows of the best bound.
    #[must_use]
    pub fn canonical_best_candidate(&self) -> Disjunction {
        self.best_bound().witness(&self.table)
    }

    fn complexity_divisor(&self) -> f64 {
        let table_size = self.table.uncompressed_size();
        match self.normalization {
            ComplexityNormalization::TableSize => self.normalization.divisor(table_size, 1.0),
            ComplexityNormalization::BestActivation => {
                let activation = fraction_of_table(&self.table, &self.best_bound().rows);
                self.normalization.divisor(table_size, activation)
            }
        }
    }

    /// Average positive mass of the worst rows, over the smallest set of
    /// negative rows holding more than a tenth of `active` observations.
    fn worst_average(mut worst: Vec<(f64, u32)>, active: u32) -> f64 {
        worst.sort_by(|a, b| a.0.total_cmp(&b.0));
        let n_deciles = active / 10;
        let mut count = 0;
        let mut sum = 0.0;
        for (positive, total) in worst {
            count += total;
            sum += positive;
            if count > n_deciles {
                break;
            }
        }
        if count == 0 { 0.0 } else { sum / f64::from(count) }
    }
}

impl<C> BehavioralScorer<C> for PrecisionScorer
where
    C: Program + ?Sized,
{
    fn score(&self, candidate: &C) -> PenalizedScore {
        let mut active = 0_u32;
        let mut active_mass = 0.0;
        let mut worst = vec![];
        for row in self.table.rows() {
            if !candidate.evaluate(row.inputs()).is_true() {
                continue;
            }
            let positive = self.mass.positive(row.outputs());
            let total = row.total_count();
            active_mass += positive;
            active += total;
            if self.worst_norm && positive < 0.0 {
                worst.push((positive, total));
            }
        }

        let mut precision = 1.0;
        if active > 0 {
            precision = active_mass / f64::from(active) / self.max_output;
        }
        if self.worst_norm && active_mass > 0.0 {
            let worst_average = Self::worst_average(worst, active);
            if worst_average < 0.0 {
                tracing::trace!(precision, worst_average, "normalizing by worst rows");
                precision /= -worst_average;
            }
        }

        let activation = f64::from(active) / f64::from(self.table.uncompressed_size());
        let activation_penalty = self.band.penalty(activation);
        tracing::trace!(precision, activation, activation_penalty);

        let score = PenalizedScore::new(
            vec![precision, activation_penalty],
            complexity_penalty(&self.occam, candidate),
        );
        log_candidate(candidate, &score);
        score
    }

    fn best_possible_score(&self) -> BehavioralScore {
        let bound = self.best_bound();
        let precision = bound.variable_sum / bound.fixed_sum / self.max_output;
        let activation = bound.fixed_sum / f64::from(self.table.uncompressed_size());
        let activation_penalty = self.band.penalty(activation);
        tracing::info!(
            precision,
            activation,
            activation_penalty,
            "precision scorer at min activation"
        );
        vec![precision, activation_penalty]
    }

    fn min_improvement(&self) -> f64 {
        1.0 / f64::from(self.table.uncompressed_size())
    }
}

impl ConfigureOccam for PrecisionScorer {
    fn set_complexity_coef(&mut self, alphabet_size: u32, noise: f64) {
        self.occam = OccamPenalty::discrete(alphabet_size, noise).normalized(self.complexity_divisor());
        log_occam("precision", Some(noise), &self.occam);
    }

    fn set_complexity_ratio(&mut self, ratio: f64) {
        self.occam = OccamPenalty::from_ratio(ratio).normalized(self.complexity_divisor());
        log_occam("precision", None, &self.occam);
    }

    fn occam(&self) -> OccamPenalty {
        self.occam
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use occam_table::Value;

    use super::*;
    use crate::{
        program::{Conjunction, Literal},
        scorer::testing::{random_boolean_table, random_dnf},
    };

    /// Every combination of 4 boolean inputs twice, output `$0`.
    fn separable_table() -> Arc<CompressedTable> {
        let samples = (0..32_u32).map(|i| {
            let inputs = (0..4).map(|bit| Value::from((i >> bit) & 1 == 1)).collect::<Vec<_>>();
            let output = inputs[0];
            (inputs, output)
        });
        Arc::new(CompressedTable::from_samples(OutputType::Boolean, 4, samples).unwrap())
    }

    fn contin_table() -> Arc<CompressedTable> {
        let samples = [
            (false, false, 4.0),
            (false, true, -2.0),
            (true, false, 5.0),
            (true, true, 1.0),
        ]
        .into_iter()
        .map(|(a, b, out)| (vec![Value::from(a), Value::from(b)], Value::Contin(out)));
        Arc::new(CompressedTable::from_samples(OutputType::Contin, 2, samples).unwrap())
    }

    fn band(min: f64, max: f64) -> ThresholdBand {
        ThresholdBand::new(min, max, 1.0).unwrap()
    }

    #[test]
    fn test_precision_of_literal() {
        let scorer = PrecisionScorer::new(separable_table(), band(0.2, 0.8), true, false).unwrap();
        let score = scorer.score(&Literal::new(0, Value::TRUE));
        assert_eq!(score.behavior, vec![1.0, 0.0]);

        let score = scorer.score(&Literal::new(1, Value::TRUE));
        assert_eq!(score.behavior, vec![0.5, 0.0]);
    }

    #[test]
    fn test_silent_candidate_has_full_precision() {
        let scorer = PrecisionScorer::new(separable_table(), band(0.2, 0.8), true, false).unwrap();
        let score = scorer.score(&Value::FALSE);
        assert_eq!(score.behavior[0], 1.0);
        assert!(score.behavior[1] < -20.0);
    }

    #[test]
    fn test_negative_class() {
        let scorer = PrecisionScorer::new(separable_table(), band(0.2, 0.8), false, false).unwrap();
        let score = scorer.score(&Literal::new(0, Value::FALSE));
        assert_eq!(score.behavior, vec![1.0, 0.0]);
    }

    #[test]
    fn test_contin_precision_and_worst_norm() {
        let plain = PrecisionScorer::new(contin_table(), band(0.1, 1.0), true, false).unwrap();
        assert_eq!(plain.max_output(), 5.0);
        assert_eq!(plain.score(&Value::TRUE).behavior, vec![0.4, 0.0]);

        // the single negative row averages -2
        let normalized = PrecisionScorer::new(contin_table(), band(0.1, 1.0), true, true).unwrap();
        assert_eq!(normalized.score(&Value::TRUE).behavior, vec![0.2, 0.0]);
    }

    #[test]
    fn test_contin_negative_class_flips_range() {
        let scorer = PrecisionScorer::new(contin_table(), band(0.1, 1.0), false, false).unwrap();
        assert_eq!(scorer.max_output(), 2.0);
    }

    #[test]
    fn test_enum_table_is_rejected() {
        let samples = vec![(vec![Value::TRUE], Value::Enum(0))];
        let table = Arc::new(CompressedTable::from_samples(OutputType::Enum, 1, samples).unwrap());
        assert!(PrecisionScorer::new(Arc::clone(&table), band(0.1, 0.5), true, false).is_err());
        assert!(DiscriminatingScorer::recall(table, band(0.1, 0.5)).is_err());
    }

    #[test]
    fn test_precision_best_score() {
        let scorer = PrecisionScorer::new(separable_table(), band(0.2, 0.8), true, false).unwrap();
        // 4 positive rows of 2 observations reach the minimum activation of 6.4
        assert_eq!(scorer.best_bound().rows.len(), 4);
        assert_eq!(
            BehavioralScorer::<dyn Program>::best_possible_score(&scorer),
            vec![1.0, 0.0]
        );
    }

    #[test]
    fn test_precision_best_score_bounds_random_candidates() {
        let mut rng = Pcg32::seed_from_u64(5);
        let scorer = PrecisionScorer::new(separable_table(), band(0.2, 0.8), true, false).unwrap();
        let best_total = BehavioralScorer::<dyn Program>::best_possible_score(&scorer)
            .iter()
            .sum::<f64>();
        for _ in 0..200 {
            let candidate = random_dnf(&mut rng, 4);
            let total = scorer.score(&candidate).total();
            assert!(total <= best_total, "{candidate} scored {total} above {best_total}");
        }
    }

    #[test]
    fn test_canonical_candidate_reaches_bound() {
        let scorer = PrecisionScorer::new(separable_table(), band(0.2, 0.8), true, false).unwrap();
        let witness = scorer.canonical_best_candidate();
        assert_eq!(witness.clauses().len(), 4);
        assert_eq!(
            scorer.score(&witness).behavior,
            BehavioralScorer::<dyn Program>::best_possible_score(&scorer)
        );

        let mut rng = Pcg32::seed_from_u64(8);
        let table = Arc::new(random_boolean_table(&mut rng, 4, 80));
        let scorer = PrecisionScorer::new(table, band(0.25, 0.9), true, false).unwrap();
        let witness = scorer.canonical_best_candidate();
        let best = BehavioralScorer::<dyn Program>::best_possible_score(&scorer);
        let score = scorer.score(&witness);
        for (unit, bound) in score.behavior.iter().zip(&best) {
            assert!((unit - bound).abs() < 1e-12);
        }
    }

    #[test]
    fn test_precision_occam_is_normalized() {
        let mut scorer = PrecisionScorer::new(separable_table(), band(0.2, 0.8), true, false).unwrap();
        scorer.set_complexity_ratio(2.0);
        assert_eq!(scorer.occam().coef(), 1.0 / 64.0);

        let mut scorer = PrecisionScorer::new(separable_table(), band(0.2, 0.8), true, false)
            .unwrap()
            .with_normalization(ComplexityNormalization::BestActivation);
        scorer.set_complexity_ratio(2.0);
        // best activation is 8 / 32
        assert_eq!(scorer.occam().coef(), 1.0 / 16.0);
    }

    #[test]
    fn test_recall_and_prerec_mirror() {
        let mut rng = Pcg32::seed_from_u64(21);
        let table = Arc::new(random_boolean_table(&mut rng, 3, 50));
        let recall = DiscriminatingScorer::recall(Arc::clone(&table), band(0.3, 0.9)).unwrap();
        let prerec = DiscriminatingScorer::prerec(Arc::clone(&table), band(0.3, 0.9)).unwrap();

        for _ in 0..50 {
            let candidate = random_dnf(&mut rng, 3);
            let by_recall = recall.score(&candidate).behavior;
            let by_prerec = prerec.score(&candidate).behavior;
            // each scorer penalizes the metric the other maximizes
            assert_eq!(by_recall[1].to_bits(), recall.threshold_penalty(by_prerec[0]).to_bits());
            assert_eq!(by_prerec[1].to_bits(), prerec.threshold_penalty(by_recall[0]).to_bits());
        }

        for (r, p) in recall.bound_entries().zip(prerec.bound_entries()) {
            assert_eq!(r.variable, p.fixed);
            assert_eq!(r.fixed, p.variable);
        }
    }

    #[test]
    fn test_recall_scores() {
        let recall = DiscriminatingScorer::recall(separable_table(), band(0.5, 1.0)).unwrap();
        // $0 or $1: every positive, 24 of 32 rows active
        let candidate = Disjunction::new(vec![
            Conjunction::new(vec![Literal::new(0, Value::TRUE)]),
            Conjunction::new(vec![Literal::new(1, Value::TRUE)]),
        ]);
        let score = recall.score(&candidate);
        assert_eq!(score.behavior[0], 1.0);
        assert!((score.behavior[1] - 0.0).abs() < 1e-12);
        assert_eq!(recall.min_output(), 0.0);
        assert_eq!(recall.max_output(), 1.0);
        assert_eq!(BehavioralScorer::<dyn Program>::min_improvement(&recall), 1.0 / 32.0);
    }

    #[test]
    fn test_silent_candidate_in_discriminating_scorers() {
        let recall = DiscriminatingScorer::recall(separable_table(), band(0.5, 1.0)).unwrap();
        assert_eq!(recall.score(&Value::FALSE).behavior, vec![0.0, 0.0]);

        let prerec = DiscriminatingScorer::prerec(separable_table(), band(0.5, 1.0)).unwrap();
        let score = prerec.score(&Value::FALSE);
        assert_eq!(score.behavior[0], 1.0);
        assert_eq!(score.behavior[1], prerec.threshold_penalty(0.0));
        assert!(score.behavior[1] < 0.0);
        assert!(score.total().is_finite());
    }

    #[test]
    fn test_best_score_is_not_an_upper_bound() {
        // one row per input, three of four positive
        let samples = [(false, false), (false, true), (true, false), (true, true)]
            .into_iter()
            .map(|(a, b)| (vec![Value::from(a), Value::from(b)], Value::from(!(a && b))));
        let table = Arc::new(CompressedTable::from_samples(OutputType::Boolean, 2, samples).unwrap());
        let recall = DiscriminatingScorer::recall(table, band(0.5, 1.0)).unwrap();
        let best = BehavioralScorer::<dyn Program>::best_possible_score(&recall);
        let constant = recall.score(&Value::TRUE).behavior;
        assert_eq!(constant, vec![1.0, 0.0]);
        assert!(constant[0] > best[0]);
    }

    #[test]
    fn test_uniform_row_recall_is_a_known_approximation() {
        // The per-row recall used by the bound is 1 / table size whatever
        // the row holds, so the bound counts rows rather than recall.
        let recall = DiscriminatingScorer::recall(separable_table(), band(0.01, 1.0)).unwrap();
        let entries = recall.bound_entries().collect::<Vec<_>>();
        assert!(entries.iter().all(|e| e.variable == 1.0 / 32.0));

        // positive rows carry precision 2 / (2 * 16), negative rows none
        let positive = entries.iter().filter(|e| e.fixed > 0.0).count();
        assert_eq!(positive, 8);
        assert!(entries.iter().filter(|e| e.fixed > 0.0).all(|e| e.fixed == 1.0 / 16.0));
    }
}
