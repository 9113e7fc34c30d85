use std::fmt;

use serde::{Deserialize, Serialize};

/// Per-unit fitness contributions of one candidate.
///
/// Units are usually table rows. Higher is better; a perfect unit scores `0`.
/// The layout is fixed by the scorer, so two scores from the same scorer can
/// be compared position by position.
pub type BehavioralScore = Vec<f64>;

/// Score used as the degenerate-input sentinel.
pub const WORST_SCORE: f64 = f64::MIN;

/// Best-possible score of scorers without a finite ceiling.
pub const BEST_SCORE: f64 = f64::MAX;

/// A behavioral score together with its complexity penalty.
///
/// The penalty is never positive, so [`total`](Self::total) never exceeds the
/// plain sum of the behavior.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PenalizedScore {
    pub behavior: BehavioralScore,
    pub penalty: f64,
}

impl PenalizedScore {
    #[must_use]
    pub fn new(behavior: BehavioralScore, penalty: f64) -> Self {
        Self { behavior, penalty }
    }

    /// Scalar fitness: sum of the behavior plus the penalty.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.behavior.iter().sum::<f64>() + self.penalty
    }
}

impl From<BehavioralScore> for PenalizedScore {
    fn from(behavior: BehavioralScore) -> Self {
        Self {
            behavior,
            penalty: 0.0,
        }
    }
}

impl fmt::Display for PenalizedScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, unit) in self.behavior.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{unit}")?;
        }
        write!(f, "] penalty={} total={}", self.penalty, self.total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_adds_penalty() {
        let score = PenalizedScore::new(vec![0.0, -1.0, -2.0], -0.5);
        assert_eq!(score.total(), -3.5);
    }

    #[test]
    fn test_display() {
        let score = PenalizedScore::new(vec![0.0, -1.0], -0.25);
        assert_eq!(score.to_string(), "[0 -1] penalty=-0.25 total=-1.25");
    }

    #[test]
    fn test_from_behavior_has_no_penalty() {
        let score = PenalizedScore::from(vec![-1.0]);
        assert_eq!(score.penalty, 0.0);
    }
}
