//! Decision lists over enumerated outputs.

use occam_table::Value;

use super::{BoxedProgram, Program};

/// One `(predicate, consequent)` pair of a decision list.
#[derive(Debug, Clone)]
pub struct Clause<P = BoxedProgram> {
    pub predicate: P,
    pub consequent: Value,
}

impl<P> Clause<P> {
    pub fn new(predicate: P, consequent: Value) -> Self {
        Self {
            predicate,
            consequent,
        }
    }
}

/// Ordered clauses followed by a default consequent.
///
/// The first clause whose predicate evaluates to true decides the output;
/// when none does, the output is the default.
///
/// # Examples
///
/// ```
/// use occam_scoring::program::{Clause, DecisionList, Literal, Program};
/// use occam_table::Value;
///
/// let list = DecisionList::new(
///     vec![
///         Clause::new(Literal::new(0, Value::TRUE), Value::Enum(1)),
///         Clause::new(Literal::new(1, Value::TRUE), Value::Enum(2)),
///     ],
///     Value::Enum(0),
/// );
/// assert_eq!(list.evaluate(&[Value::TRUE, Value::TRUE]), Value::Enum(1));
/// assert_eq!(list.evaluate(&[Value::FALSE, Value::TRUE]), Value::Enum(2));
/// assert_eq!(list.evaluate(&[Value::FALSE, Value::FALSE]), Value::Enum(0));
/// ```
#[derive(Debug, Clone)]
pub struct DecisionList<P = BoxedProgram> {
    clauses: Vec<Clause<P>>,
    default: Value,
}

impl<P> DecisionList<P> {
    pub fn new(clauses: Vec<Clause<P>>, default: Value) -> Self {
        Self { clauses, default }
    }

    #[must_use]
    pub fn clauses(&self) -> &[Clause<P>] {
        &self.clauses
    }

    #[must_use]
    pub fn default_consequent(&self) -> Value {
        self.default
    }
}

impl<P> DecisionList<P>
where
    P: Program,
{
    /// Index of the first clause whose predicate holds, `None` for the default.
    #[must_use]
    pub fn matching_clause(&self, inputs: &[Value]) -> Option<usize> {
        self.clauses
            .iter()
            .position(|clause| clause.predicate.evaluate(inputs).is_true())
    }

    /// Consequent selected for `inputs` together with its position in the
    /// list (`clauses().len()` for the default).
    #[must_use]
    pub fn decide(&self, inputs: &[Value]) -> (usize, Value) {
        match self.matching_clause(inputs) {
            Some(i) => (i, self.clauses[i].consequent),
            None => (self.clauses.len(), self.default),
        }
    }
}

impl<P> Program for DecisionList<P>
where
    P: Program + Clone + 'static,
{
    fn evaluate(&self, inputs: &[Value]) -> Value {
        self.decide(inputs).1
    }

    fn complexity(&self) -> u32 {
        self.clauses
            .iter()
            .map(|clause| clause.predicate.complexity())
            .sum()
    }

    fn clone_boxed(&self) -> BoxedProgram {
        Box::new(self.clone())
    }
}

/// Candidate of the decision-list scorers: a plain class label or a list.
#[derive(Debug, Clone)]
pub enum EnumProgram<P = BoxedProgram> {
    Constant(Value),
    Cond(DecisionList<P>),
}

impl<P> From<DecisionList<P>> for EnumProgram<P> {
    fn from(list: DecisionList<P>) -> Self {
        Self::Cond(list)
    }
}

impl<P> Program for EnumProgram<P>
where
    P: Program + Clone + 'static,
{
    fn evaluate(&self, inputs: &[Value]) -> Value {
        match self {
            Self::Constant(value) => *value,
            Self::Cond(list) => list.evaluate(inputs),
        }
    }

    fn complexity(&self) -> u32 {
        match self {
            Self::Constant(_) => 0,
            Self::Cond(list) => list.complexity(),
        }
    }

    fn clone_boxed(&self) -> BoxedProgram {
        Box::new(self.clone())
    }
}
