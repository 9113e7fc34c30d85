//! Distribution statistics over weighted empirical samples.
//!
//! Scorers compare the distribution of outputs selected by a candidate with the
//! distribution of the whole table. Both are available only as samples with
//! occurrence counts, so every statistic here works on a [`WeightedSample`]:
//!
//! - **Divergence** ([`divergence`]): Kullback–Leibler divergence estimated from
//!   piecewise-linear empirical CDFs, as a scalar or decomposed per value
//! - **Shape** ([`moments`]): weighted skewness
//! - **Shift** ([`rank`]): standardized Mann–Whitney U between two samples
//! - **Summary** ([`descriptive`]): min/max/mean/median/deviation of plain values
//!
//! # Examples
//!
//! ```
//! use occam_stats::{WeightedSample, divergence::KldEstimator, rank::standardized_mann_whitney_u};
//!
//! let all = WeightedSample::new((0..10).map(|v| (f64::from(v), 1.0)));
//! let top = WeightedSample::new((7..10).map(|v| (f64::from(v), 1.0)));
//!
//! let kld = KldEstimator::new(all.clone()).unwrap();
//! assert!(kld.divergence(&top).unwrap() > 0.0);
//! assert!(standardized_mann_whitney_u(&all, &top) > 0.0);
//! ```

pub use self::{descriptive::DescriptiveStats, sample::WeightedSample};

pub mod descriptive;
pub mod divergence;
pub mod moments;
pub mod rank;
mod sample;
