//! Scorers for enumerated outputs and decision-list candidates.
//!
//! [`EnumTableScorer`] scores any candidate by its flat classification. The
//! other scorers look inside [`EnumProgram`] decision lists:
//!
//! - [`EnumFilterScorer`] punishes rows where the head clause fires with a
//!   wrong consequent
//! - [`EnumGradedScorer`] shrinks the contribution of rows decided by later
//!   clauses by `grading` per position
//! - [`EnumEffectiveScorer`] advances the grading only past clauses that got
//!   at least one observation right
//!
//! Constant candidates are scored the same way by all of them.

use std::sync::Arc;

use occam_table::{CompressedTable, OutputType, TableRow, Value};

use super::{BehavioralScorer, ConfigureOccam, complexity_penalty, log_candidate, log_occam};
use crate::{
    error::ScorerError,
    penalty::OccamPenalty,
    program::{DecisionList, EnumProgram, Program},
    score::{BehavioralScore, PenalizedScore},
};

/// Number of correct observations minus the row total (`0` at best).
fn row_score(row: &TableRow, output: Value) -> f64 {
    f64::from(row.outputs().get(&output)) - f64::from(row.total_count())
}

/// Complexity of the clause predicates, the weight growing by `1 / grading`
/// per position so that later predicates cost more.
fn graded_complexity<P>(list: &DecisionList<P>, grading: f64) -> f64
where
    P: Program,
{
    let mut weight = 1.0;
    let mut complexity = 0.0;
    for clause in list.clauses() {
        complexity += weight * f64::from(clause.predicate.complexity());
        weight /= grading;
    }
    complexity
}

fn check_grading(grading: f64) -> Result<(), ScorerError> {
    if grading > 0.0 && grading <= 1.0 {
        Ok(())
    } else {
        Err(ScorerError::InvalidGrading { grading })
    }
}

/// Scores a candidate by the number of observations its output matches.
///
/// Each row scores the count of the candidate output minus the row total.
/// The best score of a row is the count of its majority output minus its total.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use occam_scoring::{program::Program, scorer::{BehavioralScorer, EnumTableScorer}};
/// use occam_table::{CompressedTable, OutputType, Value};
///
/// let samples = vec![
///     (vec![Value::TRUE], Value::Enum(0)),
///     (vec![Value::TRUE], Value::Enum(0)),
///     (vec![Value::TRUE], Value::Enum(1)),
/// ];
/// let table = CompressedTable::from_samples(OutputType::Enum, 1, samples).unwrap();
/// let scorer = EnumTableScorer::new(Arc::new(table)).unwrap();
///
/// assert_eq!(scorer.score(&Value::Enum(1)).behavior, vec![-2.0]);
/// assert_eq!(BehavioralScorer::<dyn Program>::best_possible_score(&scorer), vec![-1.0]);
/// ```
#[derive(Debug, Clone)]
pub struct EnumTableScorer {
    table: Arc<CompressedTable>,
    occam: OccamPenalty,
}

impl EnumTableScorer {
    pub fn new(table: Arc<CompressedTable>) -> Result<Self, ScorerError> {
        if table.output_type() != OutputType::Enum {
            return Err(ScorerError::UnsupportedOutputType {
                scorer: "enum table",
                found: table.output_type(),
            });
        }
        Ok(Self {
            table,
            occam: OccamPenalty::none(),
        })
    }

    #[must_use]
    pub fn table(&self) -> &Arc<CompressedTable> {
        &self.table
    }

    fn flat_behavior<C>(&self, candidate: &C) -> BehavioralScore
    where
        C: Program + ?Sized,
    {
        self.table
            .rows()
            .iter()
            .map(|row| row_score(row, candidate.evaluate(row.inputs())))
            .collect()
    }

    fn best_behavior(&self) -> BehavioralScore {
        self.table
            .rows()
            .iter()
            .map(|row| f64::from(row.outputs().majority_count()) - f64::from(row.total_count()))
            .collect()
    }
}

impl<C> BehavioralScorer<C> for EnumTableScorer
where
    C: Program + ?Sized,
{
    fn score(&self, candidate: &C) -> PenalizedScore {
        let score = PenalizedScore::new(
            self.flat_behavior(candidate),
            complexity_penalty(&self.occam, candidate),
        );
        log_candidate(candidate, &score);
        score
    }

    fn best_possible_score(&self) -> BehavioralScore {
        self.best_behavior()
    }

    fn min_improvement(&self) -> f64 {
        0.5
    }
}

impl ConfigureOccam for EnumTableScorer {
    fn set_complexity_coef(&mut self, alphabet_size: u32, noise: f64) {
        self.occam = OccamPenalty::discrete(alphabet_size, noise);
        log_occam("enum table", Some(noise), &self.occam);
    }

    fn set_complexity_ratio(&mut self, ratio: f64) {
        self.occam = OccamPenalty::from_ratio(ratio);
        log_occam("enum table", None, &self.occam);
    }

    fn occam(&self) -> OccamPenalty {
        self.occam
    }
}

macro_rules! delegate_occam {
    ($scorer:ty) => {
        impl ConfigureOccam for $scorer {
            fn set_complexity_coef(&mut self, alphabet_size: u32, noise: f64) {
                self.base.set_complexity_coef(alphabet_size, noise);
            }

            fn set_complexity_ratio(&mut self, ratio: f64) {
                self.base.set_complexity_ratio(ratio);
            }

            fn occam(&self) -> OccamPenalty {
                self.base.occam
            }
        }
    };
}

/// [`EnumTableScorer`] with an extra punishment for a wrong head clause.
///
/// On every row where the first predicate holds but not every observation
/// equals its consequent, the row loses `punish` times its total.
#[derive(Debug, Clone)]
pub struct EnumFilterScorer {
    base: EnumTableScorer,
    punish: f64,
}

impl EnumFilterScorer {
    pub fn new(table: Arc<CompressedTable>, punish: f64) -> Result<Self, ScorerError> {
        Ok(Self {
            base: EnumTableScorer::new(table)?,
            punish,
        })
    }
}

impl<P> BehavioralScorer<EnumProgram<P>> for EnumFilterScorer
where
    P: Program + Clone + 'static,
{
    fn score(&self, candidate: &EnumProgram<P>) -> PenalizedScore {
        let EnumProgram::Cond(list) = candidate else {
            return self.base.score(candidate);
        };
        let Some(head) = list.clauses().first() else {
            return self.base.score(candidate);
        };
        let behavior = self
            .base
            .table
            .rows()
            .iter()
            .map(|row| {
                let total = row.total_count();
                let mut score = row_score(row, list.evaluate(row.inputs()));
                if head.predicate.evaluate(row.inputs()).is_true()
                    && row.outputs().get(&head.consequent) != total
                {
                    score -= self.punish * f64::from(total);
                }
                score
            })
            .collect();
        let score = PenalizedScore::new(behavior, complexity_penalty(&self.base.occam, candidate));
        log_candidate(candidate, &score);
        score
    }

    fn best_possible_score(&self) -> BehavioralScore {
        self.base.best_behavior()
    }

    fn min_improvement(&self) -> f64 {
        0.5
    }
}

delegate_occam!(EnumFilterScorer);

/// Decision-list scorer discounting rows decided by later clauses.
///
/// A row decided by the clause at position `i` (the default being last)
/// scores `grading^i` times its match count minus its total. The complexity
/// penalty is graded the other way round: predicate `i` weighs
/// `grading^-i`.
#[derive(Debug, Clone)]
pub struct EnumGradedScorer {
    base: EnumTableScorer,
    grading: f64,
}

impl EnumGradedScorer {
    /// `grading` must be in `(0, 1]`.
    pub fn new(table: Arc<CompressedTable>, grading: f64) -> Result<Self, ScorerError> {
        check_grading(grading)?;
        Ok(Self {
            base: EnumTableScorer::new(table)?,
            grading,
        })
    }
}

impl<P> BehavioralScorer<EnumProgram<P>> for EnumGradedScorer
where
    P: Program + Clone + 'static,
{
    fn score(&self, candidate: &EnumProgram<P>) -> PenalizedScore {
        let EnumProgram::Cond(list) = candidate else {
            return self.base.score(candidate);
        };
        let behavior = self
            .base
            .table
            .rows()
            .iter()
            .map(|row| {
                let (position, consequent) = list.decide(row.inputs());
                let weight = (0..position).fold(1.0, |weight, _| weight * self.grading);
                weight * row_score(row, consequent)
            })
            .collect();
        let penalty = self.base.occam.penalty(graded_complexity(list, self.grading));
        let score = PenalizedScore::new(behavior, penalty);
        log_candidate(candidate, &score);
        score
    }

    fn best_possible_score(&self) -> BehavioralScore {
        self.base.best_behavior()
    }

    fn min_improvement(&self) -> f64 {
        // relative: grading leaves no meaningful absolute scale
        -0.05
    }
}

delegate_occam!(EnumGradedScorer);

/// Decision-list scorer grading only past effective clauses.
///
/// Clauses are applied in order, each to the rows no earlier clause has
/// decided. A clause is effective when at least one observation of the rows
/// it decides equals its consequent; the grading weight shrinks only after
/// an effective clause. The default consequent decides the remaining rows.
#[derive(Debug, Clone)]
pub struct EnumEffectiveScorer {
    base: EnumTableScorer,
    grading: f64,
}

impl EnumEffectiveScorer {
    /// `grading` must be in `(0, 1]`.
    pub fn new(table: Arc<CompressedTable>, grading: f64) -> Result<Self, ScorerError> {
        check_grading(grading)?;
        Ok(Self {
            base: EnumTableScorer::new(table)?,
            grading,
        })
    }
}

impl<P> BehavioralScorer<EnumProgram<P>> for EnumEffectiveScorer
where
    P: Program + Clone + 'static,
{
    fn score(&self, candidate: &EnumProgram<P>) -> PenalizedScore {
        let EnumProgram::Cond(list) = candidate else {
            return self.base.score(candidate);
        };
        let rows = self.base.table.rows();
        let mut behavior = vec![0.0; rows.len()];
        let mut decided = vec![false; rows.len()];
        let mut weight = 1.0;

        for clause in list.clauses() {
            let mut effective = false;
            for ((row, unit), done) in rows.iter().zip(&mut behavior).zip(&mut decided) {
                if *done || !clause.predicate.evaluate(row.inputs()).is_true() {
                    continue;
                }
                if row.outputs().get(&clause.consequent) != 0 {
                    effective = true;
                }
                *unit += weight * row_score(row, clause.consequent);
                *done = true;
            }
            if effective {
                weight *= self.grading;
            }
        }
        for ((row, unit), done) in rows.iter().zip(&mut behavior).zip(&decided) {
            if !*done {
                *unit += weight * row_score(row, list.default_consequent());
            }
        }

        let penalty = self.base.occam.penalty(graded_complexity(list, self.grading));
        let score = PenalizedScore::new(behavior, penalty);
        log_candidate(candidate, &score);
        score
    }

    fn best_possible_score(&self) -> BehavioralScore {
        self.base.best_behavior()
    }

    fn min_improvement(&self) -> f64 {
        -0.05
    }
}

delegate_occam!(EnumEffectiveScorer);
