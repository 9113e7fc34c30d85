//! Greedy upper bound of the score reachable on a table.
//!
//! Every row is summarized by the contribution it would make to the maximized
//! ("variable") metric and to the constrained ("fixed") metric if a candidate
//! got it right. Rows are taken in descending order of their variable
//! contribution until the fixed sum first reaches its minimum:
//!
//! ```text
//! sort rows by variable, ascending (ties keep table order)
//! for row in reversed order:
//!     variable_sum += row.variable
//!     fixed_sum    += row.fixed
//!     stop as soon as fixed_sum >= min_fixed
//! ```
//!
//! The first crossing is taken, not the best one. The bound is exact when the
//! constraint is tight and may be pessimistic for very loose constraints; the
//! search never benefits from operating below the minimum anyway.

use occam_table::CompressedTable;

use crate::program::{Conjunction, Disjunction};

/// Summary of one table row for the bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundEntry {
    /// Row index in the table.
    pub row: usize,
    /// Sort key.
    pub key: f64,
    /// Contribution to the maximized aggregate.
    pub variable: f64,
    /// Contribution to the constrained aggregate.
    pub fixed: f64,
}

/// Outcome of [`greedy_bound`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GreedyBound {
    pub variable_sum: f64,
    pub fixed_sum: f64,
    /// Rows taken, in the order they were taken.
    pub rows: Vec<usize>,
}

impl GreedyBound {
    /// Candidate firing on exactly the rows of the bound: one conjunction
    /// matching the inputs of each taken row.
    ///
    /// # Examples
    ///
    /// ```
    /// use occam_scoring::{bound::{BoundEntry, greedy_bound}, program::Program};
    /// use occam_table::{CompressedTable, OutputType, Value};
    ///
    /// let samples = vec![
    ///     (vec![Value::FALSE], Value::FALSE),
    ///     (vec![Value::TRUE], Value::TRUE),
    /// ];
    /// let table = CompressedTable::from_samples(OutputType::Boolean, 1, samples).unwrap();
    /// let entries = table.rows().iter().enumerate().map(|(row, r)| {
    ///     let hit = f64::from(r.outputs().get(&Value::TRUE));
    ///     BoundEntry { row, key: hit, variable: hit, fixed: 1.0 }
    /// });
    ///
    /// let bound = greedy_bound(entries, 1.0);
    /// let witness = bound.witness(&table);
    /// assert_eq!(witness.evaluate(&[Value::TRUE]), Value::TRUE);
    /// assert_eq!(witness.evaluate(&[Value::FALSE]), Value::FALSE);
    /// ```
    #[must_use]
    pub fn witness(&self, table: &CompressedTable) -> Disjunction {
        let rows = table.rows();
        Disjunction::new(
            self.rows
                .iter()
                .map(|&i| Conjunction::matching(rows[i].inputs()))
                .collect(),
        )
    }
}

/// Accumulates entries in descending key order until the fixed sum first
/// reaches `min_fixed`, or every entry is taken.
#[must_use]
pub fn greedy_bound<I>(entries: I, min_fixed: f64) -> GreedyBound
where
    I: IntoIterator<Item = BoundEntry>,
{
    let mut entries = entries.into_iter().collect::<Vec<_>>();
    entries.sort_by(|a, b| a.key.total_cmp(&b.key));

    let mut bound = GreedyBound::default();
    for entry in entries.iter().rev() {
        bound.variable_sum += entry.variable;
        bound.fixed_sum += entry.fixed;
        bound.rows.push(entry.row);
        if min_fixed <= bound.fixed_sum {
            break;
        }
    }
    bound
}
