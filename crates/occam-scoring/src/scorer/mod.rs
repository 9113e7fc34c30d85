//! Behavioral scorers.
//!
//! A scorer turns a candidate into a [`PenalizedScore`]: one contribution per
//! scoring unit plus a complexity penalty. Besides scoring, every scorer
//! reports the best score any candidate could reach (an upper bound, possibly
//! loose) and the smallest difference the search should treat as an
//! improvement.
//!
//! | Scorer | Table output | Units |
//! |--------|--------------|-------|
//! | [`LogicalScorer`] | complete truth table | one per input combination |
//! | [`ContinScorer`] | contin | one per row |
//! | [`DiscretizedContinScorer`] | contin | one per row |
//! | [`TruthTableScorer`] | boolean | one per row |
//! | [`EnumTableScorer`], [`EnumFilterScorer`], [`EnumGradedScorer`], [`EnumEffectiveScorer`] | enum | one per row |
//! | [`DiscriminatingScorer`] | boolean or contin | `[metric, threshold penalty]` |
//! | [`PrecisionScorer`] | boolean or contin | `[precision, activation penalty]` |
//! | [`InterestingnessScorer`] | contin | statistics, then activation penalty |
//!
//! Scorers are immutable once configured and can be shared between threads
//! scoring different candidates.

use std::fmt;

use crate::{
    penalty::OccamPenalty,
    program::Program,
    score::{BehavioralScore, PenalizedScore},
};

pub use self::{
    contin::{ContinScorer, DiscretizedContinScorer, ErrorFunction},
    discriminating::{DiscriminatingMetric, DiscriminatingScorer, PrecisionScorer},
    enum_table::{EnumEffectiveScorer, EnumFilterScorer, EnumGradedScorer, EnumTableScorer},
    interestingness::{InterestingnessConfig, InterestingnessScorer, InterestingnessWeights},
    logical::LogicalScorer,
    truth_table::TruthTableScorer,
};

mod contin;
mod discriminating;
mod enum_table;
mod interestingness;
mod logical;
mod truth_table;

/// Scores candidates of type `C`.
pub trait BehavioralScorer<C: ?Sized = dyn Program>: fmt::Debug + Send + Sync {
    /// Scores one candidate.
    #[must_use]
    fn score(&self, candidate: &C) -> PenalizedScore;

    /// Upper bound of the behavioral score of any candidate.
    #[must_use]
    fn best_possible_score(&self) -> BehavioralScore;

    /// Smallest total-score difference counted as an improvement.
    ///
    /// Positive values are absolute; negative values are relative (`-0.05`
    /// means 5%).
    #[must_use]
    fn min_improvement(&self) -> f64;
}

pub type BoxedScorer<C = dyn Program> = Box<dyn BehavioralScorer<C>>;

/// Complexity penalty configuration shared by all scorers.
pub trait ConfigureOccam {
    /// Derives the coefficient from the alphabet size and the noise of the
    /// data: the noise probability for discrete outputs, the noise standard
    /// deviation for continuous ones.
    fn set_complexity_coef(&mut self, alphabet_size: u32, noise: f64);

    /// Uses `1 / ratio` as coefficient; disabled unless `ratio > 0`.
    fn set_complexity_ratio(&mut self, ratio: f64);

    #[must_use]
    fn occam(&self) -> OccamPenalty;
}

fn log_occam(scorer: &str, noise: Option<f64>, occam: &OccamPenalty) {
    tracing::info!(
        scorer,
        noise,
        enabled = occam.is_enabled(),
        complexity_ratio = occam.ratio(),
        "complexity penalty configured"
    );
}

fn log_candidate<C>(candidate: &C, score: &PenalizedScore)
where
    C: fmt::Debug + ?Sized,
{
    tracing::trace!(?candidate, %score, "scored candidate");
}

fn complexity_penalty<C>(occam: &OccamPenalty, candidate: &C) -> f64
where
    C: Program + ?Sized,
{
    occam.penalty(f64::from(candidate.complexity()))
}

#[cfg(test)]
pub(crate) mod testing {
    //! Tables and random candidates shared by the scorer tests.

    use occam_table::{CompressedTable, OutputType, Value};
    use rand::Rng;

    use crate::program::{Conjunction, Disjunction, Literal};

    /// Inputs `{00, 01, 10, 11}` with targets `{T, T, T, F}`.
    pub fn nand_table() -> CompressedTable {
        let samples = [(false, false), (false, true), (true, false), (true, true)]
            .into_iter()
            .map(|(a, b)| (vec![Value::from(a), Value::from(b)], Value::from(!(a && b))));
        CompressedTable::from_samples(OutputType::Boolean, 2, samples).unwrap()
    }

    /// Random DNF over `arity` boolean inputs.
    pub fn random_dnf<R>(rng: &mut R, arity: usize) -> Disjunction
    where
        R: Rng + ?Sized,
    {
        let clauses = (0..rng.random_range(0..4))
            .map(|_| {
                let literals = (0..rng.random_range(1..=arity))
                    .map(|_| Literal::new(rng.random_range(0..arity), Value::from(rng.random_bool(0.5))))
                    .collect();
                Conjunction::new(literals)
            })
            .collect();
        Disjunction::new(clauses)
    }

    /// Random boolean table with conflicting duplicate rows.
    pub fn random_boolean_table<R>(rng: &mut R, arity: usize, samples: usize) -> CompressedTable
    where
        R: Rng + ?Sized,
    {
        let samples = (0..samples)
            .map(|_| {
                let inputs = (0..arity).map(|_| Value::from(rng.random_bool(0.5))).collect();
                (inputs, Value::from(rng.random_bool(0.4)))
            })
            .collect::<Vec<_>>();
        CompressedTable::from_samples(OutputType::Boolean, arity, samples).unwrap()
    }
}
