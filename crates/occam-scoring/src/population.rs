//! Scoring a whole population of candidates.

use std::{borrow::Borrow, num::NonZeroUsize, thread};

use occam_stats::DescriptiveStats;

use crate::{score::PenalizedScore, scorer::BehavioralScorer};

/// Scores every candidate, in parallel.
///
/// Candidates are split into one contiguous chunk per available core; the
/// returned scores are in candidate order.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use occam_scoring::{
///     population::score_population,
///     program::{BoxedProgram, Literal, Program},
///     scorer::TruthTableScorer,
/// };
/// use occam_table::{CompressedTable, OutputType, Value};
///
/// let samples = [(vec![Value::TRUE], Value::TRUE), (vec![Value::FALSE], Value::FALSE)];
/// let table = CompressedTable::from_samples(OutputType::Boolean, 1, samples).unwrap();
/// let scorer = TruthTableScorer::new(Arc::new(table)).unwrap();
///
/// let population: Vec<BoxedProgram> = vec![
///     Box::new(Literal::new(0, Value::TRUE)),
///     Box::new(Value::FALSE),
/// ];
/// let scores = score_population::<dyn Program, _, _>(&scorer, &population);
/// assert_eq!(scores[0].total(), 0.0);
/// assert_eq!(scores[1].total(), -1.0);
/// ```
pub fn score_population<C, S, P>(scorer: &S, candidates: &[P]) -> Vec<PenalizedScore>
where
    C: ?Sized,
    S: BehavioralScorer<C> + ?Sized,
    P: Borrow<C> + Sync,
{
    let threads = thread::available_parallelism().map_or(1, NonZeroUsize::get);
    let chunk_size = candidates.len().div_ceil(threads).max(1);
    let mut scores = vec![PenalizedScore::default(); candidates.len()];
    thread::scope(|s| {
        for (candidates, scores) in candidates.chunks(chunk_size).zip(scores.chunks_mut(chunk_size)) {
            s.spawn(move || {
                for (candidate, score) in candidates.iter().zip(scores) {
                    *score = scorer.score(Borrow::<C>::borrow(candidate));
                }
            });
        }
    });
    scores
}

/// Descriptive statistics of the total scores; `None` for an empty population.
#[must_use]
pub fn fitness_summary(scores: &[PenalizedScore]) -> Option<DescriptiveStats> {
    let stats = DescriptiveStats::new(scores.iter().map(PenalizedScore::total))?;
    tracing::info!(
        count = stats.count,
        mean = stats.mean,
        median = stats.median,
        min = stats.min,
        max = stats.max,
        std_dev = stats.std_dev,
        "population fitness"
    );
    Some(stats)
}
