//! Penalty terms shared by the scorers.
//!
//! # Threshold penalty
//!
//! Discriminating scorers keep an aggregate metric (precision, recall,
//! activation) inside an operating band `[min, max]`. Outside the band the
//! metric is mapped to a distance `dst` in `[0, 1)`:
//!
//! ```text
//! value < min:  dst = 1 - value / min
//! value > max:  dst = (value - max) / (1 - max)
//! penalty = weight · ln(1 - dst)
//! ```
//!
//! The penalty is `0` inside the band and falls towards `-∞` as the metric
//! approaches `0` or `1`.
//!
//! # Complexity penalty
//!
//! Occam's razor penalizes structural complexity with a coefficient derived
//! from the size of the program alphabet and the noise of the data:
//!
//! ```text
//! discrete outputs (noise p):      coef = -ln(alphabet) / ln(p / (1 - p))
//! continuous outputs (stdev σ):    coef = ln(alphabet) · 2σ²
//! explicit complexity ratio r:     coef = 1 / r
//! ```
//!
//! The discrete formula is singular at `p = 0` and `p = 0.5`; such noise
//! values disable the penalty instead of producing `0` or `∞`.

use serde::{Deserialize, Serialize};

use crate::error::ScorerError;

/// Largest distance fed to the logarithm, keeping penalties finite.
const MAX_DISTANCE: f64 = 1.0 - 1e-9;

/// Threshold penalty of `value` for the band `[min, max]`.
///
/// Always `<= 0`. Metrics of `0`, `1` or beyond are clamped to a very large
/// but finite penalty. A NaN metric is treated as inside the band.
///
/// # Examples
///
/// ```
/// use occam_scoring::penalty::threshold_penalty;
///
/// assert_eq!(threshold_penalty(0.5, 0.2, 0.8, 1.0), 0.0);
/// let below = threshold_penalty(0.1, 0.2, 0.8, 1.0);
/// assert!((below - 0.5_f64.ln()).abs() < 1e-12);
/// ```
#[must_use]
pub fn threshold_penalty(value: f64, min: f64, max: f64, weight: f64) -> f64 {
    let mut dst = 0.0;
    if value < min {
        dst = 1.0 - value / min;
    }
    if value > max {
        dst = (value - max) / (1.0 - max);
    }
    weight * (1.0 - dst.min(MAX_DISTANCE)).ln()
}

/// A validated `[min, max]` operating band with its penalty weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BandData", into = "BandData")]
pub struct ThresholdBand {
    min: f64,
    max: f64,
    weight: f64,
}

impl ThresholdBand {
    /// Requires `weight > 0` and `0 < min <= max`.
    pub fn new(min: f64, max: f64, weight: f64) -> Result<Self, ScorerError> {
        if !(weight > 0.0 && min > 0.0 && min <= max) {
            return Err(ScorerError::InvalidBand { min, max, weight });
        }
        Ok(Self { min, max, weight })
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    #[must_use]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// See [`threshold_penalty`].
    #[must_use]
    pub fn penalty(&self, value: f64) -> f64 {
        threshold_penalty(value, self.min, self.max, self.weight)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct BandData {
    min: f64,
    max: f64,
    weight: f64,
}

impl TryFrom<BandData> for ThresholdBand {
    type Error = ScorerError;

    fn try_from(data: BandData) -> Result<Self, Self::Error> {
        Self::new(data.min, data.max, data.weight)
    }
}

impl From<ThresholdBand> for BandData {
    fn from(band: ThresholdBand) -> Self {
        Self {
            min: band.min,
            max: band.max,
            weight: band.weight,
        }
    }
}

/// Complexity coefficient for discrete outputs with noise `p`.
///
/// Positive for `0 < p < 0.5`; callers must keep `p` inside that range.
#[must_use]
pub fn discrete_complexity_coef(alphabet_size: u32, p: f64) -> f64 {
    -f64::from(alphabet_size).ln() / (p / (1.0 - p)).ln()
}

/// Complexity coefficient for continuous outputs with noise deviation `stdev`.
#[must_use]
pub fn contin_complexity_coef(alphabet_size: u32, stdev: f64) -> f64 {
    f64::from(alphabet_size).ln() * 2.0 * stdev * stdev
}

/// Occam's razor penalty: a coefficient and whether it applies at all.
///
/// The default is disabled.
///
/// # Examples
///
/// ```
/// use occam_scoring::penalty::OccamPenalty;
///
/// let occam = OccamPenalty::discrete(4, 0.1);
/// assert!(occam.is_enabled());
/// assert!(occam.penalty(10.0) < 0.0);
///
/// // singular noise values disable the penalty
/// assert!(!OccamPenalty::discrete(4, 0.0).is_enabled());
/// assert!(!OccamPenalty::discrete(4, 0.5).is_enabled());
/// assert_eq!(OccamPenalty::discrete(4, 0.5).penalty(10.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OccamPenalty {
    coef: f64,
    enabled: bool,
}

impl OccamPenalty {
    /// Disabled penalty.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Penalty for discrete outputs; enabled only for `0 < p < 0.5`.
    #[must_use]
    pub fn discrete(alphabet_size: u32, p: f64) -> Self {
        if p > 0.0 && p < 0.5 {
            Self::enabled(discrete_complexity_coef(alphabet_size, p))
        } else {
            Self::none()
        }
    }

    /// Penalty for continuous outputs; enabled only for `stdev > 0`.
    #[must_use]
    pub fn contin(alphabet_size: u32, stdev: f64) -> Self {
        if stdev > 0.0 {
            Self::enabled(contin_complexity_coef(alphabet_size, stdev))
        } else {
            Self::none()
        }
    }

    /// Penalty from an explicit complexity ratio; enabled only for `ratio > 0`.
    #[must_use]
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio > 0.0 {
            Self::enabled(1.0 / ratio)
        } else {
            Self::none()
        }
    }

    fn enabled(coef: f64) -> Self {
        Self {
            coef,
            enabled: true,
        }
    }

    /// Scales the coefficient down for scorers whose units are normalized.
    #[must_use]
    pub fn normalized(self, divisor: f64) -> Self {
        if self.enabled {
            Self::enabled(self.coef / divisor)
        } else {
            self
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The coefficient, `0` when disabled.
    #[must_use]
    pub fn coef(&self) -> f64 {
        if self.enabled { self.coef } else { 0.0 }
    }

    /// Complexity ratio reported in logs (`1 / coef`).
    #[must_use]
    pub fn ratio(&self) -> f64 {
        1.0 / self.coef()
    }

    /// Penalty for a program of the given complexity; never positive.
    #[must_use]
    pub fn penalty(&self, complexity: f64) -> f64 {
        if self.enabled {
            -(complexity * self.coef)
        } else {
            0.0
        }
    }
}

/// Divisor applied to the complexity coefficient of scorers whose behavioral
/// units are fractions of the table (precision, recall).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityNormalization {
    /// Uncompressed table size.
    #[default]
    TableSize,
    /// Uncompressed table size times the activation of the best-bound
    /// candidate.
    BestActivation,
}

impl ComplexityNormalization {
    /// Divisor for a table of `table_size` observations.
    ///
    /// Falls back to the table size when the best activation is not positive.
    #[must_use]
    pub fn divisor(self, table_size: u32, best_activation: f64) -> f64 {
        match self {
            Self::BestActivation if best_activation > 0.0 => {
                f64::from(table_size) * best_activation
            }
            Self::TableSize | Self::BestActivation => f64::from(table_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_inside_band() {
        for value in [0.2, 0.3, 0.5, 0.79, 0.8] {
            assert_eq!(threshold_penalty(value, 0.2, 0.8, 2.0), 0.0);
        }
    }

    #[test]
    fn test_decreasing_outside_band() {
        let below = [0.19, 0.15, 0.1, 0.05, 0.01]
            .map(|v| threshold_penalty(v, 0.2, 0.8, 2.0));
        assert!(below.iter().all(|p| *p < 0.0));
        assert!(below.is_sorted_by(|a, b| a > b));

        let above = [0.81, 0.85, 0.9, 0.95, 0.99]
            .map(|v| threshold_penalty(v, 0.2, 0.8, 2.0));
        assert!(above.iter().all(|p| *p < 0.0));
        assert!(above.is_sorted_by(|a, b| a > b));
    }

    #[test]
    fn test_band_limits_stay_finite() {
        let at_zero = threshold_penalty(0.0, 0.2, 0.8, 1.0);
        let at_one = threshold_penalty(1.0, 0.2, 0.8, 1.0);
        let max_one = threshold_penalty(1.5, 0.2, 1.0, 1.0);
        for p in [at_zero, at_one, max_one] {
            assert!(p.is_finite());
            assert!(p < -20.0);
        }
    }

    #[test]
    fn test_nan_metric_is_not_penalized() {
        assert_eq!(threshold_penalty(f64::NAN, 0.2, 0.8, 1.0), 0.0);
    }

    #[test]
    fn test_band_validation() {
        assert!(ThresholdBand::new(0.1, 0.9, 1.0).is_ok());
        assert!(ThresholdBand::new(0.5, 0.5, 1.0).is_ok());
        for (min, max, weight) in [(0.6, 0.5, 1.0), (0.0, 0.5, 1.0), (0.1, 0.5, 0.0), (0.1, 0.5, -1.0)] {
            assert_eq!(
                ThresholdBand::new(min, max, weight),
                Err(ScorerError::InvalidBand { min, max, weight })
            );
        }
    }

    #[test]
    fn test_band_json_is_validated() {
        let band: ThresholdBand =
            serde_json::from_str(r#"{ "min": 0.1, "max": 0.4, "weight": 2.0 }"#).unwrap();
        assert_eq!(band.max(), 0.4);
        assert!(
            serde_json::from_str::<ThresholdBand>(r#"{ "min": 0.5, "max": 0.4, "weight": 2.0 }"#)
                .is_err()
        );
    }

    #[test]
    fn test_discrete_coef_is_positive_below_half() {
        for i in 1..500 {
            let p = f64::from(i) / 1000.0;
            let coef = discrete_complexity_coef(5, p);
            assert!(coef.is_finite() && coef > 0.0, "p = {p}, coef = {coef}");
            let occam = OccamPenalty::discrete(5, p);
            assert!(occam.is_enabled());
            assert_eq!(occam.coef(), coef);
        }
    }

    #[test]
    fn test_discrete_singularities_disable_penalty() {
        for p in [0.0, 0.5, -0.1, 0.7] {
            let occam = OccamPenalty::discrete(5, p);
            assert!(!occam.is_enabled());
            assert_eq!(occam.coef(), 0.0);
            assert_eq!(occam.penalty(12.0), 0.0);
        }
    }

    #[test]
    fn test_contin_coef() {
        let occam = OccamPenalty::contin(3, 0.5);
        assert!((occam.coef() - 3.0_f64.ln() * 0.5).abs() < 1e-12);
        assert!(!OccamPenalty::contin(3, 0.0).is_enabled());
    }

    #[test]
    fn test_ratio_and_normalization() {
        let occam = OccamPenalty::from_ratio(4.0).normalized(10.0);
        assert_eq!(occam.coef(), 0.025);
        assert_eq!(occam.penalty(8.0), -0.2);
        assert!(!OccamPenalty::from_ratio(0.0).normalized(10.0).is_enabled());
    }

    #[test]
    fn test_normalization_divisor() {
        assert_eq!(ComplexityNormalization::TableSize.divisor(200, 0.25), 200.0);
        assert_eq!(ComplexityNormalization::BestActivation.divisor(200, 0.25), 50.0);
        assert_eq!(ComplexityNormalization::BestActivation.divisor(200, 0.0), 200.0);
    }
}
