use std::sync::Arc;

use occam_table::{CompressedTable, OutputCounter, OutputType, Value};

use crate::{error::ScorerError, program::Program};

/// How the outputs of a row translate into positive/negative mass.
///
/// Resolved once from the table's output type and stored with the scorer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMass {
    /// Positive mass is the number of occurrences of `target`; negative mass
    /// is the rest of the row.
    Boolean { target: bool },
    /// Positive mass is the occurrence-weighted sum of the outputs times
    /// `sign`; negative mass is its negation.
    Contin { sign: f64 },
}

impl OutputMass {
    /// Mass for a table with the given output type.
    ///
    /// `positive` selects the true value (boolean) or the sign of the sum
    /// (contin) as the positive class.
    pub fn for_output(
        scorer: &'static str,
        output_type: OutputType,
        positive: bool,
    ) -> Result<Self, ScorerError> {
        match output_type {
            OutputType::Boolean => Ok(Self::Boolean { target: positive }),
            OutputType::Contin => Ok(Self::Contin {
                sign: if positive { 1.0 } else { -1.0 },
            }),
            found @ OutputType::Enum => Err(ScorerError::UnsupportedOutputType { scorer, found }),
        }
    }

    #[must_use]
    pub fn positive(&self, outputs: &OutputCounter) -> f64 {
        match *self {
            Self::Boolean { target } => f64::from(outputs.get(&Value::from(target))),
            Self::Contin { sign } => {
                sign * outputs
                    .iter()
                    .map(|(v, c)| v.as_f64().unwrap_or(0.0) * f64::from(c))
                    .sum::<f64>()
            }
        }
    }

    /// `(positive, negative)` mass of a row.
    #[must_use]
    pub fn split(&self, outputs: &OutputCounter) -> (f64, f64) {
        let pos = self.positive(outputs);
        let neg = match self {
            Self::Boolean { .. } => f64::from(outputs.total_count()) - pos,
            Self::Contin { .. } => -pos,
        };
        (pos, neg)
    }
}

/// Aggregates of one candidate's partition of the table.
///
/// Rows where the candidate is true land in the positive bucket, the others
/// in the negative bucket. `positive_count + negative_count` equals the
/// uncompressed table size.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DiscriminatorCounts {
    pub true_positive_sum: f64,
    pub false_positive_sum: f64,
    pub positive_count: f64,
    pub true_negative_sum: f64,
    pub false_negative_sum: f64,
    pub negative_count: f64,
}

impl DiscriminatorCounts {
    /// `tp / (tp + fp)`; NaN when the candidate is never true.
    #[must_use]
    pub fn precision(&self) -> f64 {
        self.true_positive_sum / (self.true_positive_sum + self.false_positive_sum)
    }

    /// `tp / (tp + fn)`; NaN when the table has no positive mass.
    #[must_use]
    pub fn recall(&self) -> f64 {
        self.true_positive_sum / (self.true_positive_sum + self.false_negative_sum)
    }
}

/// Partitions table rows by a candidate's boolean output.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use occam_scoring::{discriminator::Discriminator, program::Literal};
/// use occam_table::{CompressedTable, OutputType, Value};
///
/// let samples = vec![
///     (vec![Value::TRUE], Value::TRUE),
///     (vec![Value::TRUE], Value::FALSE),
///     (vec![Value::FALSE], Value::FALSE),
/// ];
/// let table = CompressedTable::from_samples(OutputType::Boolean, 1, samples).unwrap();
/// let discriminator = Discriminator::new(Arc::new(table)).unwrap();
///
/// let counts = discriminator.count(&Literal::new(0, Value::TRUE));
/// assert_eq!(counts.true_positive_sum, 1.0);
/// assert_eq!(counts.false_positive_sum, 1.0);
/// assert_eq!(counts.positive_count, 2.0);
/// assert_eq!(counts.true_negative_sum, 1.0);
/// assert_eq!(counts.precision(), 0.5);
/// assert_eq!(counts.recall(), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct Discriminator {
    table: Arc<CompressedTable>,
    mass: OutputMass,
    positive_total: f64,
    negative_total: f64,
}

impl Discriminator {
    pub fn new(table: Arc<CompressedTable>) -> Result<Self, ScorerError> {
        let mass = OutputMass::for_output("discriminator", table.output_type(), true)?;
        let (positive_total, negative_total) = table
            .rows()
            .iter()
            .map(|row| mass.split(row.outputs()))
            .fold((0.0, 0.0), |(p, n), (pos, neg)| (p + pos, n + neg));
        tracing::info!(positive_total, negative_total, "discriminator");
        Ok(Self {
            table,
            mass,
            positive_total,
            negative_total,
        })
    }

    #[must_use]
    pub fn table(&self) -> &Arc<CompressedTable> {
        &self.table
    }

    #[must_use]
    pub fn mass(&self) -> OutputMass {
        self.mass
    }

    #[must_use]
    pub fn positive_total(&self) -> f64 {
        self.positive_total
    }

    #[must_use]
    pub fn negative_total(&self) -> f64 {
        self.negative_total
    }

    /// Partition of the table by `candidate`.
    #[must_use]
    pub fn count<P>(&self, candidate: &P) -> DiscriminatorCounts
    where
        P: Program + ?Sized,
    {
        let mut counts = DiscriminatorCounts::default();
        for row in self.table.rows() {
            let (pos, neg) = self.mass.split(row.outputs());
            let total = f64::from(row.total_count());
            if candidate.evaluate(row.inputs()).is_true() {
                counts.true_positive_sum += pos;
                counts.false_positive_sum += neg;
                counts.positive_count += total;
            } else {
                counts.true_negative_sum += neg;
                counts.false_negative_sum += pos;
                counts.negative_count += total;
            }
        }
        counts
    }
}
