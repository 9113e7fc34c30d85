use std::fmt;

use occam_stats::{
    WeightedSample, divergence::KldEstimator, moments::weighted_skewness,
    rank::standardized_mann_whitney_u,
};

/// Distribution statistics of a sample against a fixed reference distribution.
///
/// The reference is the unconditional output distribution of a table; samples
/// are conditional distributions selected by a candidate.
pub trait DistributionStats: fmt::Debug + Send + Sync {
    /// Divergence of the reference from `sample`.
    #[must_use]
    fn divergence(&self, sample: &WeightedSample) -> Option<f64>;

    /// Divergence decomposed into one term per reference value.
    #[must_use]
    fn divergence_terms(&self, sample: &WeightedSample) -> Option<Vec<f64>>;

    #[must_use]
    fn skewness(&self, sample: &WeightedSample) -> Option<f64>;

    #[must_use]
    fn reference_skewness(&self) -> Option<f64>;

    /// Standardized rank-sum shift of `sample` relative to the reference.
    #[must_use]
    fn rank_shift(&self, sample: &WeightedSample) -> f64;
}

/// [`DistributionStats`] backed by the estimators of `occam_stats`.
#[derive(Debug, Clone)]
pub struct EmpiricalStats {
    reference: WeightedSample,
    estimator: Option<KldEstimator>,
    reference_skewness: Option<f64>,
}

impl EmpiricalStats {
    #[must_use]
    pub fn new(reference: WeightedSample) -> Self {
        let estimator = KldEstimator::new(reference.clone());
        let reference_skewness = weighted_skewness(&reference);
        Self {
            reference,
            estimator,
            reference_skewness,
        }
    }

    #[must_use]
    pub fn reference(&self) -> &WeightedSample {
        &self.reference
    }
}

impl DistributionStats for EmpiricalStats {
    fn divergence(&self, sample: &WeightedSample) -> Option<f64> {
        self.estimator.as_ref()?.divergence(sample)
    }

    fn divergence_terms(&self, sample: &WeightedSample) -> Option<Vec<f64>> {
        self.estimator.as_ref()?.divergence_terms(sample)
    }

    fn skewness(&self, sample: &WeightedSample) -> Option<f64> {
        weighted_skewness(sample)
    }

    fn reference_skewness(&self) -> Option<f64> {
        self.reference_skewness
    }

    fn rank_shift(&self, sample: &WeightedSample) -> f64 {
        standardized_mann_whitney_u(&self.reference, sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_against_itself() {
        let reference = WeightedSample::new([(1.0, 2.0), (2.0, 1.0), (4.0, 1.0)]);
        let stats = EmpiricalStats::new(reference.clone());
        assert_eq!(stats.divergence(&reference), Some(0.0));
        assert!(stats.rank_shift(&reference).abs() < 1e-12);
        assert_eq!(stats.skewness(&reference), stats.reference_skewness());
    }

    #[test]
    fn test_empty_reference_has_no_divergence() {
        let stats = EmpiricalStats::new(WeightedSample::default());
        let sample = WeightedSample::new([(1.0, 1.0)]);
        assert_eq!(stats.divergence(&sample), None);
        assert_eq!(stats.reference_skewness(), None);
    }
}
