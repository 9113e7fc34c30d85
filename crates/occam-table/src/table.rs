use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{OutputCounter, OutputType, Value};

/// Errors raised while building a [`CompressedTable`].
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum TableError {
    #[display("table has no observations")]
    Empty,
    #[display("row {row} has {found} inputs, expected {expected}")]
    ArityMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[display("row {row} has a {found} output in a {expected} table")]
    OutputTypeMismatch {
        row: usize,
        expected: OutputType,
        found: OutputType,
    },
    #[display("table holds {total} observations, more than a u32 can count")]
    TooManyObservations { total: u64 },
}

/// One compressed row: a distinct input vector and the outputs observed for it.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    inputs: Vec<Value>,
    outputs: OutputCounter,
}

impl TableRow {
    #[must_use]
    pub fn inputs(&self) -> &[Value] {
        &self.inputs
    }

    #[must_use]
    pub fn outputs(&self) -> &OutputCounter {
        &self.outputs
    }

    /// Number of uncompressed observations merged into this row.
    #[must_use]
    pub fn total_count(&self) -> u32 {
        self.outputs.total_count()
    }
}

/// Deduplicated example table.
///
/// Observations with identical inputs are merged into a single [`TableRow`]
/// whose [`OutputCounter`] records how often each output was seen. Rows are
/// ordered by input vector and never change after construction, so row
/// indices are stable for the lifetime of the table.
///
/// # Examples
///
/// ```
/// use occam_table::{CompressedTable, OutputType, Value};
///
/// let samples = vec![
///     (vec![Value::TRUE], Value::TRUE),
///     (vec![Value::TRUE], Value::FALSE),
///     (vec![Value::FALSE], Value::FALSE),
/// ];
/// let table = CompressedTable::from_samples(OutputType::Boolean, 1, samples).unwrap();
/// assert_eq!(table.rows().len(), 2);
/// assert_eq!(table.uncompressed_size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TableData", into = "TableData")]
pub struct CompressedTable {
    output_type: OutputType,
    arity: usize,
    rows: Vec<TableRow>,
    uncompressed_size: u32,
}

impl CompressedTable {
    /// Compresses raw `(inputs, output)` observations.
    pub fn from_samples<I>(output_type: OutputType, arity: usize, samples: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (Vec<Value>, Value)>,
    {
        let mut merged: BTreeMap<Vec<Value>, OutputCounter> = BTreeMap::new();
        let mut total = 0;
        for (row, (inputs, output)) in samples.into_iter().enumerate() {
            check_row(row, arity, output_type, &inputs, [&output])?;
            tally(&mut total, 1)?;
            merged.entry(inputs).or_default().add(output, 1);
        }
        Self::build(output_type, arity, merged)
    }

    /// Builds a table from rows that already carry output counts.
    ///
    /// Rows sharing the same inputs are merged. The counts of the whole table
    /// must add up to at most `u32::MAX`.
    pub fn from_rows<I>(output_type: OutputType, arity: usize, rows: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (Vec<Value>, OutputCounter)>,
    {
        let mut merged: BTreeMap<Vec<Value>, OutputCounter> = BTreeMap::new();
        let mut total = 0;
        for (row, (inputs, outputs)) in rows.into_iter().enumerate() {
            check_row(row, arity, output_type, &inputs, outputs.iter().map(|(v, _)| v))?;
            let entry = merged.entry(inputs).or_default();
            for (value, count) in outputs.iter() {
                tally(&mut total, count)?;
                entry.add(*value, count);
            }
        }
        Self::build(output_type, arity, merged)
    }

    fn build(
        output_type: OutputType,
        arity: usize,
        merged: BTreeMap<Vec<Value>, OutputCounter>,
    ) -> Result<Self, TableError> {
        let rows = merged
            .into_iter()
            .filter(|(_, outputs)| !outputs.is_empty())
            .map(|(inputs, outputs)| TableRow { inputs, outputs })
            .collect::<Vec<_>>();
        let uncompressed_size = rows.iter().map(TableRow::total_count).sum::<u32>();
        if uncompressed_size == 0 {
            return Err(TableError::Empty);
        }
        Ok(Self {
            output_type,
            arity,
            rows,
            uncompressed_size,
        })
    }

    #[must_use]
    pub fn output_type(&self) -> OutputType {
        self.output_type
    }

    #[must_use]
    pub fn arity(&self) -> usize {
        self.arity
    }

    #[must_use]
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Total number of observations before compression.
    #[must_use]
    pub fn uncompressed_size(&self) -> u32 {
        self.uncompressed_size
    }

    /// All distinct output values of the table with their total occurrence counts.
    #[must_use]
    pub fn output_distribution(&self) -> OutputCounter {
        self.rows
            .iter()
            .flat_map(|row| row.outputs.iter().map(|(v, c)| (*v, c)))
            .collect()
    }
}

/// Adds `count` to the running observation total, which must fit a `u32` so
/// that no merged count or row total can overflow.
fn tally(total: &mut u64, count: u32) -> Result<(), TableError> {
    *total += u64::from(count);
    if *total > u64::from(u32::MAX) {
        return Err(TableError::TooManyObservations { total: *total });
    }
    Ok(())
}

fn check_row<'a, O>(
    row: usize,
    arity: usize,
    output_type: OutputType,
    inputs: &[Value],
    outputs: O,
) -> Result<(), TableError>
where
    O: IntoIterator<Item = &'a Value>,
{
    if inputs.len() != arity {
        return Err(TableError::ArityMismatch {
            row,
            expected: arity,
            found: inputs.len(),
        });
    }
    for output in outputs {
        if output.output_type() != output_type {
            return Err(TableError::OutputTypeMismatch {
                row,
                expected: output_type,
                found: output.output_type(),
            });
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TableData {
    output_type: OutputType,
    arity: usize,
    rows: Vec<RowData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RowData {
    inputs: Vec<Value>,
    outputs: Vec<(Value, u32)>,
}

impl TryFrom<TableData> for CompressedTable {
    type Error = TableError;

    fn try_from(data: TableData) -> Result<Self, Self::Error> {
        let rows = data
            .rows
            .into_iter()
            .map(|row| (row.inputs, row.outputs.into_iter().collect()));
        Self::from_rows(data.output_type, data.arity, rows)
    }
}

impl From<CompressedTable> for TableData {
    fn from(table: CompressedTable) -> Self {
        let rows = table
            .rows
            .into_iter()
            .map(|row| RowData {
                outputs: row.outputs.iter().map(|(v, c)| (*v, c)).collect(),
                inputs: row.inputs,
            })
            .collect();
        Self {
            output_type: table.output_type,
            arity: table.arity,
            rows,
        }
    }
}
