use std::sync::Arc;

use occam_table::{CompressedTable, OutputType, Value};

use super::{BehavioralScorer, ConfigureOccam, complexity_penalty, log_candidate, log_occam};
use crate::{
    error::ScorerError,
    penalty::OccamPenalty,
    program::Program,
    score::{BehavioralScore, PenalizedScore},
};

/// Scores a boolean candidate against a compressed boolean table.
///
/// Each row scores minus the number of observations contradicting the
/// candidate output. Since a row may hold both outputs, its best score is
/// minus the count of the minority output.
#[derive(Debug, Clone)]
pub struct TruthTableScorer {
    table: Arc<CompressedTable>,
    occam: OccamPenalty,
}

impl TruthTableScorer {
    pub fn new(table: Arc<CompressedTable>) -> Result<Self, ScorerError> {
        if table.output_type() != OutputType::Boolean {
            return Err(ScorerError::UnsupportedOutputType {
                scorer: "truth table",
                found: table.output_type(),
            });
        }
        Ok(Self {
            table,
            occam: OccamPenalty::none(),
        })
    }
}

impl<C> BehavioralScorer<C> for TruthTableScorer
where
    C: Program + ?Sized,
{
    fn score(&self, candidate: &C) -> PenalizedScore {
        // observations not matching the output; all of them for a non-boolean output
        let behavior = self
            .table
            .rows()
            .iter()
            .map(|row| {
                let output = candidate.evaluate(row.inputs());
                f64::from(row.outputs().get(&output)) - f64::from(row.total_count())
            })
            .collect();
        let score = PenalizedScore::new(behavior, complexity_penalty(&self.occam, candidate));
        log_candidate(candidate, &score);
        score
    }

    fn best_possible_score(&self) -> BehavioralScore {
        self.table
            .rows()
            .iter()
            .map(|row| {
                let outputs = row.outputs();
                -f64::from(outputs.get(&Value::TRUE).min(outputs.get(&Value::FALSE)))
            })
            .collect()
    }

    fn min_improvement(&self) -> f64 {
        0.5
    }
}

impl ConfigureOccam for TruthTableScorer {
    fn set_complexity_coef(&mut self, alphabet_size: u32, noise: f64) {
        self.occam = OccamPenalty::discrete(alphabet_size, noise);
        log_occam("truth table", Some(noise), &self.occam);
    }

    fn set_complexity_ratio(&mut self, ratio: f64) {
        self.occam = OccamPenalty::from_ratio(ratio);
        log_occam("truth table", None, &self.occam);
    }

    fn occam(&self) -> OccamPenalty {
        self.occam
    }
}
