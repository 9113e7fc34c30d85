//! Behavioral scoring of candidate programs against compressed example tables.
//!
//! A search over programs needs more than one number per candidate: it keeps
//! the per-example (or per-statistic) contributions to compare candidates on
//! individual units, plus an Occam's razor penalty for program size. This
//! crate computes that [`PenalizedScore`](score::PenalizedScore).
//!
//! # Modules
//!
//! - [`program`]: the [`Program`](program::Program) oracle scorers evaluate,
//!   with constants, DNF formulas and decision lists
//! - [`scorer`]: the [`BehavioralScorer`](scorer::BehavioralScorer) trait and
//!   the scorer family
//! - [`penalty`]: threshold-band and complexity penalties
//! - [`discriminator`]: positive/negative partition of a table by a candidate
//! - [`bound`]: greedy upper bound of aggregate scores and its witness
//! - [`discretize`]: class thresholds for discretized numeric outputs
//! - [`stats`]: distribution statistics used by the interestingness scorer
//! - [`config`]: serializable scorer configuration
//! - [`population`]: parallel scoring of a population
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use occam_scoring::{
//!     penalty::ThresholdBand,
//!     program::Literal,
//!     scorer::{BehavioralScorer, ConfigureOccam, PrecisionScorer},
//! };
//! use occam_table::{CompressedTable, OutputType, Value};
//!
//! // output is the first input, every combination of two inputs once
//! let samples = [(false, false), (false, true), (true, false), (true, true)]
//!     .into_iter()
//!     .map(|(a, b)| (vec![Value::from(a), Value::from(b)], Value::from(a)));
//! let table = Arc::new(CompressedTable::from_samples(OutputType::Boolean, 2, samples).unwrap());
//!
//! let band = ThresholdBand::new(0.25, 0.75, 1.0).unwrap();
//! let mut scorer = PrecisionScorer::new(table, band, true, false).unwrap();
//! scorer.set_complexity_ratio(1.0);
//!
//! let score = scorer.score(&Literal::new(0, Value::TRUE));
//! assert_eq!(score.behavior, vec![1.0, 0.0]);
//! assert_eq!(score.penalty, -0.25);
//! ```

pub use self::error::ScorerError;

pub mod bound;
pub mod config;
pub mod discretize;
pub mod discriminator;
pub mod error;
pub mod penalty;
pub mod population;
pub mod program;
pub mod score;
pub mod scorer;
pub mod stats;
