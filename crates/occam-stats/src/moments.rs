//! Shape statistics of weighted samples.

use crate::WeightedSample;

/// Weighted skewness (third standardized moment).
///
/// ```text
/// skewness = m3 / m2^(3/2)
/// m_k = Σ w·(x - mean)^k / Σ w
/// ```
///
/// Returns `None` if the sample is empty or has zero variance (a single
/// distinct value), where skewness is undefined.
///
/// # Examples
///
/// ```
/// use occam_stats::{WeightedSample, moments::weighted_skewness};
///
/// let symmetric = WeightedSample::new([(1.0, 1.0), (2.0, 2.0), (3.0, 1.0)]);
/// assert_eq!(weighted_skewness(&symmetric), Some(0.0));
///
/// let degenerate = WeightedSample::new([(4.0, 10.0)]);
/// assert_eq!(weighted_skewness(&degenerate), None);
/// ```
#[must_use]
pub fn weighted_skewness(sample: &WeightedSample) -> Option<f64> {
    let m2 = sample.central_moment(2)?;
    if m2 <= 0.0 {
        return None;
    }
    let m3 = sample.central_moment(3)?;
    Some(m3 / m2.powf(1.5))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_distr::{Distribution, Exp, Normal};
    use rand_pcg::Pcg32;

    use super::*;

    fn sample_of(values: impl IntoIterator<Item = f64>) -> WeightedSample {
        WeightedSample::new(values.into_iter().map(|v| (v, 1.0)))
    }

    #[test]
    fn test_right_tail_is_positive() {
        let sample = sample_of([1.0, 1.0, 1.0, 1.0, 10.0]);
        assert!(weighted_skewness(&sample).unwrap() > 0.0);
    }

    #[test]
    fn test_left_tail_is_negative() {
        let sample = sample_of([-10.0, 1.0, 1.0, 1.0, 1.0]);
        assert!(weighted_skewness(&sample).unwrap() < 0.0);
    }

    #[test]
    fn test_weights_match_repeated_values() {
        let repeated = sample_of([0.0, 0.0, 0.0, 2.0, 7.0]);
        let weighted = WeightedSample::new([(0.0, 3.0), (2.0, 1.0), (7.0, 1.0)]);
        let a = weighted_skewness(&repeated).unwrap();
        let b = weighted_skewness(&weighted).unwrap();
        assert!((a - b).abs() < 1e-12);
    }

    #[test]
    fn test_sampled_distributions() {
        let mut rng = Pcg32::seed_from_u64(7);
        let normal = Normal::new(0.0, 1.0).unwrap();
        let normal_sample = sample_of((0..20_000).map(|_| normal.sample(&mut rng)));
        assert!(weighted_skewness(&normal_sample).unwrap().abs() < 0.1);

        // exponential distribution has skewness 2
        let exp = Exp::new(1.0).unwrap();
        let exp_sample = sample_of((0..20_000).map(|_| exp.sample(&mut rng)));
        let skew = weighted_skewness(&exp_sample).unwrap();
        assert!((skew - 2.0).abs() < 0.3, "skewness = {skew}");
    }
}
