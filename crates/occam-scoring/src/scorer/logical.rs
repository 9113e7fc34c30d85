use occam_table::Value;

use super::{BehavioralScorer, ConfigureOccam, complexity_penalty, log_candidate, log_occam};
use crate::{
    error::ScorerError,
    penalty::OccamPenalty,
    program::Program,
    score::{BehavioralScore, PenalizedScore},
};

/// Scores a boolean candidate against a complete truth table.
///
/// Row `i` of the table assigns input `j` the bit `arity - 1 - j` of `i`, so
/// the first input is the most significant one. Each row scores `-1` on a
/// mismatch and `0` otherwise.
///
/// # Examples
///
/// ```
/// use occam_scoring::{program::Literal, scorer::{BehavioralScorer, LogicalScorer}};
/// use occam_table::Value;
///
/// // target: $0 and $1
/// let scorer = LogicalScorer::new(2, vec![false, false, false, true]).unwrap();
/// let candidate = Literal::new(0, Value::TRUE);
/// assert_eq!(scorer.score(&candidate).behavior, vec![0.0, 0.0, -1.0, 0.0]);
/// ```
#[derive(Debug, Clone)]
pub struct LogicalScorer {
    arity: usize,
    target: Vec<bool>,
    occam: OccamPenalty,
}

impl LogicalScorer {
    /// `target` must hold one output per input combination (`2^arity`).
    pub fn new(arity: usize, target: Vec<bool>) -> Result<Self, ScorerError> {
        let expected = u32::try_from(arity)
            .ok()
            .and_then(|shift| 1_usize.checked_shl(shift))
            .unwrap_or(0);
        if target.len() != expected {
            return Err(ScorerError::TargetSizeMismatch {
                arity,
                expected,
                found: target.len(),
            });
        }
        Ok(Self {
            arity,
            target,
            occam: OccamPenalty::none(),
        })
    }

    /// Truth table of `program` used as the target.
    pub fn from_program<P>(arity: usize, program: &P) -> Result<Self, ScorerError>
    where
        P: Program + ?Sized,
    {
        let rows = u32::try_from(arity)
            .ok()
            .and_then(|shift| 1_usize.checked_shl(shift))
            .ok_or(ScorerError::TargetSizeMismatch {
                arity,
                expected: 0,
                found: 0,
            })?;
        let target = (0..rows)
            .map(|row| program.evaluate(&truth_table_row(arity, row)).is_true())
            .collect();
        Self::new(arity, target)
    }

    #[must_use]
    pub fn arity(&self) -> usize {
        self.arity
    }

    #[must_use]
    pub fn target(&self) -> &[bool] {
        &self.target
    }
}

fn truth_table_row(arity: usize, row: usize) -> Vec<Value> {
    (0..arity)
        .map(|j| Value::from((row >> (arity - 1 - j)) & 1 == 1))
        .collect()
}

impl<C> BehavioralScorer<C> for LogicalScorer
where
    C: Program + ?Sized,
{
    fn score(&self, candidate: &C) -> PenalizedScore {
        let behavior = self
            .target
            .iter()
            .enumerate()
            .map(|(row, &expected)| {
                let output = candidate.evaluate(&truth_table_row(self.arity, row));
                -f64::from(u8::from(output.is_true() != expected))
            })
            .collect();
        let score = PenalizedScore::new(behavior, complexity_penalty(&self.occam, candidate));
        log_candidate(candidate, &score);
        score
    }

    fn best_possible_score(&self) -> BehavioralScore {
        vec![0.0; self.target.len()]
    }

    fn min_improvement(&self) -> f64 {
        0.5
    }
}

impl ConfigureOccam for LogicalScorer {
    fn set_complexity_coef(&mut self, alphabet_size: u32, noise: f64) {
        self.occam = OccamPenalty::discrete(alphabet_size, noise);
        log_occam("logical", Some(noise), &self.occam);
    }

    fn set_complexity_ratio(&mut self, ratio: f64) {
        self.occam = OccamPenalty::from_ratio(ratio);
        log_occam("logical", None, &self.occam);
    }

    fn occam(&self) -> OccamPenalty {
        self.occam
    }
}
