use occam_table::OutputType;

/// Configuration errors raised while building a scorer.
///
/// Scoring itself never fails; every error surfaces when a scorer is set up.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ScorerError {
    #[display("{scorer} scorer does not support {found} outputs")]
    UnsupportedOutputType {
        scorer: &'static str,
        found: OutputType,
    },
    #[display(
        "invalid threshold band [{min}, {max}] with weight {weight}: \
         the weight must be positive and 0 < min <= max must hold"
    )]
    InvalidBand { min: f64, max: f64, weight: f64 },
    #[display("target has {found} entries, expected {expected} for arity {arity}")]
    TargetSizeMismatch {
        arity: usize,
        expected: usize,
        found: usize,
    },
    #[display("at least one class threshold is required")]
    EmptyThresholds,
    #[display("class threshold {value} is not finite")]
    NonFiniteThreshold { value: f64 },
    #[display("grading must be in (0, 1], got {grading}")]
    InvalidGrading { grading: f64 },
}
