//! Rank-sum comparison of two weighted samples.

use crate::WeightedSample;

/// Standardized Mann–Whitney U statistic of `sample` against `reference`.
///
/// Both samples are pooled and ranked with mid-ranks for ties; weights act as
/// occurrence counts. `U` is computed for `sample`:
///
/// ```text
/// U = R_sample - n_sample·(n_sample + 1) / 2
/// z = (U - n_ref·n_sample / 2) / σ_U
/// σ_U² = n_ref·n_sample / 12 · ((n + 1) - Σ(t³ - t) / (n·(n - 1)))
/// ```
///
/// where `t` ranges over tie-group sizes. A positive result means the values of
/// `sample` tend to be larger than those of `reference`. Returns `0.0` when
/// either sample is empty or the variance vanishes (all values tied).
///
/// # Examples
///
/// ```
/// use occam_stats::{WeightedSample, rank::standardized_mann_whitney_u};
///
/// let low = WeightedSample::new([(1.0, 1.0), (2.0, 1.0), (3.0, 1.0)]);
/// let high = WeightedSample::new([(7.0, 1.0), (8.0, 1.0), (9.0, 1.0)]);
/// assert!(standardized_mann_whitney_u(&low, &high) > 0.0);
/// assert!(standardized_mann_whitney_u(&high, &low) < 0.0);
/// ```
#[must_use]
pub fn standardized_mann_whitney_u(reference: &WeightedSample, sample: &WeightedSample) -> f64 {
    let n_ref = reference.total_weight();
    let n_sample = sample.total_weight();
    if n_ref <= 0.0 || n_sample <= 0.0 {
        return 0.0;
    }
    let n = n_ref + n_sample;

    let mut rank_sum = 0.0;
    let mut ties = 0.0;
    let mut ranked = 0.0;
    for (ref_weight, sample_weight) in merge_weights(reference.points(), sample.points()) {
        let t = ref_weight + sample_weight;
        let mid_rank = ranked + (t + 1.0) / 2.0;
        rank_sum += sample_weight * mid_rank;
        ties += t.powi(3) - t;
        ranked += t;
    }

    let u = rank_sum - n_sample * (n_sample + 1.0) / 2.0;
    let mean = n_ref * n_sample / 2.0;
    let variance = n_ref * n_sample / 12.0 * ((n + 1.0) - ties / (n * (n - 1.0)));
    if variance <= 0.0 {
        return 0.0;
    }
    (u - mean) / variance.sqrt()
}

/// Walks both supports in ascending order, yielding the weight each sample
/// has at every distinct pooled value.
fn merge_weights<'a>(
    a: &'a [(f64, f64)],
    b: &'a [(f64, f64)],
) -> impl Iterator<Item = (f64, f64)> + 'a {
    let mut i = 0;
    let mut j = 0;
    std::iter::from_fn(move || match (a.get(i), b.get(j)) {
        (Some(&(va, wa)), Some(&(vb, wb))) => {
            if va < vb {
                i += 1;
                Some((wa, 0.0))
            } else if vb < va {
                j += 1;
                Some((0.0, wb))
            } else {
                i += 1;
                j += 1;
                Some((wa, wb))
            }
        }
        (Some(&(_, wa)), None) => {
            i += 1;
            Some((wa, 0.0))
        }
        (None, Some(&(_, wb))) => {
            j += 1;
            Some((0.0, wb))
        }
        (None, None) => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_of(values: &[f64]) -> WeightedSample {
        WeightedSample::new(values.iter().map(|&v| (v, 1.0)))
    }

    #[test]
    fn test_identical_samples_have_no_shift() {
        let a = sample_of(&[1.0, 2.0, 3.0, 4.0]);
        let z = standardized_mann_whitney_u(&a, &a);
        assert!(z.abs() < 1e-12);
    }

    #[test]
    fn test_known_value_without_ties() {
        // reference {1, 2, 3}, sample {4, 5}: ranks of sample are 4 and 5
        // R = 9, U = 9 - 3 = 6, mean = 3, var = 3 * 2 * 6 / 12 = 3
        let reference = sample_of(&[1.0, 2.0, 3.0]);
        let sample = sample_of(&[4.0, 5.0]);
        let z = standardized_mann_whitney_u(&reference, &sample);
        assert!((z - 3.0 / 3.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_weights_act_as_counts() {
        let weighted = WeightedSample::new([(1.0, 2.0), (3.0, 1.0)]);
        let repeated = sample_of(&[1.0, 1.0, 3.0]);
        let reference = sample_of(&[0.0, 2.0, 4.0]);
        let a = standardized_mann_whitney_u(&reference, &weighted);
        let b = standardized_mann_whitney_u(&reference, &repeated);
        assert!((a - b).abs() < 1e-12);
    }

    #[test]
    fn test_all_tied_is_zero() {
        let a = sample_of(&[2.0]);
        let b = WeightedSample::new([(2.0, 5.0)]);
        assert_eq!(standardized_mann_whitney_u(&a, &b), 0.0);
    }

    #[test]
    fn test_empty_is_zero() {
        let a = sample_of(&[1.0, 2.0]);
        assert_eq!(standardized_mann_whitney_u(&a, &WeightedSample::default()), 0.0);
    }
}
