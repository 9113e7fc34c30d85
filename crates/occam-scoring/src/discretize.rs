//! Mapping of continuous values to classes delimited by thresholds.

use crate::error::ScorerError;

/// Sorted class boundaries.
///
/// `k` thresholds delimit `k + 1` classes: class `0` below the first
/// threshold, class `k` at or above the last one, and class `i` for
/// `thresholds[i - 1] <= value < thresholds[i]` in between.
///
/// # Examples
///
/// ```
/// use occam_scoring::discretize::ClassThresholds;
///
/// let thresholds = ClassThresholds::new(vec![5.0, 2.0]).unwrap();
/// assert_eq!(thresholds.class_idx(1.0), 0);
/// assert_eq!(thresholds.class_idx(3.0), 1);
/// assert_eq!(thresholds.class_idx(5.0), 2);
/// assert_eq!(thresholds.class_idx(100.0), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClassThresholds {
    thresholds: Vec<f64>,
}

impl ClassThresholds {
    /// Sorts `thresholds`; they must be finite and non-empty.
    pub fn new(mut thresholds: Vec<f64>) -> Result<Self, ScorerError> {
        if thresholds.is_empty() {
            return Err(ScorerError::EmptyThresholds);
        }
        if let Some(&value) = thresholds.iter().find(|t| !t.is_finite()) {
            return Err(ScorerError::NonFiniteThreshold { value });
        }
        thresholds.sort_by(f64::total_cmp);
        Ok(Self { thresholds })
    }

    #[must_use]
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    #[must_use]
    pub fn num_classes(&self) -> usize {
        self.thresholds.len() + 1
    }

    /// Class of `value`, in `0..=thresholds().len()`.
    #[must_use]
    pub fn class_idx(&self, value: f64) -> usize {
        let t = &self.thresholds;
        let k = t.len();
        if value < t[0] {
            return 0;
        }
        if value >= t[k - 1] {
            return k;
        }
        // invariant: t[lower - 1] <= value < t[upper - 1]
        let (mut lower, mut upper) = (1, k);
        while upper - lower > 1 {
            let mid = lower + (upper - lower) / 2;
            if value < t[mid - 1] {
                upper = mid;
            } else {
                lower = mid;
            }
        }
        lower
    }
}

/// Inverse-frequency class weights: `total / (num_classes · population)`.
///
/// `classes` yields `(class index, occurrences)`. Classes without any
/// occurrence get weight `1`.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn class_weights<I>(num_classes: usize, classes: I) -> Vec<f64>
where
    I: IntoIterator<Item = (usize, u32)>,
{
    let mut population = vec![0_u32; num_classes];
    for (class, count) in classes {
        population[class] += count;
    }
    let total = f64::from(population.iter().sum::<u32>());
    population
        .iter()
        .map(|&n| {
            if n == 0 {
                1.0
            } else {
                total / (num_classes as f64 * f64::from(n))
            }
        })
        .collect()
}
