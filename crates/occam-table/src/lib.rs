//! Compressed example tables for behavioral scoring.
//!
//! A scoring run starts from a set of labeled examples: input vectors and the
//! output observed for each of them. This crate stores them the way scorers
//! consume them:
//!
//! - [`Value`] - a boolean, continuous or enumerated value (inputs and outputs)
//! - [`OutputCounter`] - occurrence counts of the outputs seen for one input vector
//! - [`CompressedTable`] - deduplicated rows plus the uncompressed observation count
//!
//! Identical input vectors are merged into one row, so a row may carry
//! conflicting outputs. No candidate can satisfy all of them; the best it can
//! do is predict the majority output ([`OutputCounter::majority_count`]).
//!
//! Tables are read-only once built and are meant to be shared (e.g. behind an
//! `Arc`) by every scorer and every thread of a search.
//!
//! # Example
//!
//! ```
//! use occam_table::{CompressedTable, OutputType, Value};
//!
//! let xor = [(false, false), (false, true), (true, false), (true, true)]
//!     .into_iter()
//!     .map(|(a, b)| (vec![Value::from(a), Value::from(b)], Value::from(a ^ b)));
//! let table = CompressedTable::from_samples(OutputType::Boolean, 2, xor).unwrap();
//!
//! assert_eq!(table.rows().len(), 4);
//! assert_eq!(table.output_distribution().get(&Value::TRUE), 2);
//! ```

pub use self::{
    counter::OutputCounter,
    table::{CompressedTable, TableError, TableRow},
    value::{OutputType, Value},
};

mod counter;
mod table;
mod value;
