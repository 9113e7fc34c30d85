/// An empirical distribution given as distinct values with positive weights.
///
/// Weights are usually occurrence counts. Points are kept sorted in ascending
/// order of value and duplicate values are merged, so iteration order is
/// deterministic and matches the order of the support.
///
/// # Examples
///
/// ```
/// use occam_stats::WeightedSample;
///
/// let sample = WeightedSample::new([(3.0, 1.0), (1.0, 2.0), (3.0, 1.0)]);
/// assert_eq!(sample.len(), 2);
/// assert_eq!(sample.total_weight(), 4.0);
/// assert_eq!(sample.points(), &[(1.0, 2.0), (3.0, 2.0)]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightedSample {
    points: Vec<(f64, f64)>,
}

impl WeightedSample {
    /// Builds a sample from `(value, weight)` pairs.
    ///
    /// Pairs with a non-positive weight or a NaN value are dropped.
    #[must_use]
    pub fn new<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut points = pairs
            .into_iter()
            .filter(|(value, weight)| !value.is_nan() && *weight > 0.0)
            .collect::<Vec<_>>();
        points.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut merged: Vec<(f64, f64)> = Vec::with_capacity(points.len());
        for (value, weight) in points {
            match merged.last_mut() {
                Some(last) if last.0 == value => last.1 += weight,
                _ => merged.push((value, weight)),
            }
        }
        Self { points: merged }
    }

    /// Number of distinct values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Distinct `(value, weight)` pairs in ascending order of value.
    #[must_use]
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.points.iter().map(|(_, w)| w).sum()
    }

    #[must_use]
    pub fn min(&self) -> Option<f64> {
        self.points.first().map(|(v, _)| *v)
    }

    #[must_use]
    pub fn max(&self) -> Option<f64> {
        self.points.last().map(|(v, _)| *v)
    }

    /// Weighted arithmetic mean.
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        let total = self.total_weight();
        if self.is_empty() || total <= 0.0 {
            return None;
        }
        Some(self.points.iter().map(|(v, w)| v * w).sum::<f64>() / total)
    }

    /// Weighted central moment of order `k` (population normalization).
    #[must_use]
    pub fn central_moment(&self, k: i32) -> Option<f64> {
        let mean = self.mean()?;
        let total = self.total_weight();
        Some(
            self.points
                .iter()
                .map(|(v, w)| w * (v - mean).powi(k))
                .sum::<f64>()
                / total,
        )
    }
}

impl FromIterator<(f64, f64)> for WeightedSample {
    fn from_iter<I: IntoIterator<Item = (f64, f64)>>(iter: I) -> Self {
        Self::new(iter)
    }
}
