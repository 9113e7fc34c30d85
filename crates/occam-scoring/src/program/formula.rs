//! Boolean formulas in disjunctive normal form.

use std::fmt;

use occam_table::Value;

use super::{BoxedProgram, Program};

/// Tests one input against a value.
///
/// Over boolean inputs, `Literal::new(i, Value::TRUE)` is the variable `$i`
/// and `Literal::new(i, Value::FALSE)` its negation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Literal {
    input: usize,
    value: Value,
}

impl Literal {
    #[must_use]
    pub fn new(input: usize, value: Value) -> Self {
        Self { input, value }
    }

    #[must_use]
    pub fn input(&self) -> usize {
        self.input
    }

    #[must_use]
    pub fn value(&self) -> Value {
        self.value
    }

    fn holds(&self, inputs: &[Value]) -> bool {
        inputs.get(self.input) == Some(&self.value)
    }
}

impl Program for Literal {
    fn evaluate(&self, inputs: &[Value]) -> Value {
        Value::from(self.holds(inputs))
    }

    fn complexity(&self) -> u32 {
        1
    }

    fn clone_boxed(&self) -> BoxedProgram {
        Box::new(*self)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Value::Boolean(true) => write!(f, "${}", self.input),
            Value::Boolean(false) => write!(f, "!${}", self.input),
            value => write!(f, "${}={value}", self.input),
        }
    }
}

/// Conjunction of literals; the empty conjunction is true.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conjunction {
    literals: Vec<Literal>,
}

impl Conjunction {
    #[must_use]
    pub fn new(literals: Vec<Literal>) -> Self {
        Self { literals }
    }

    /// Conjunction matching exactly one input vector.
    #[must_use]
    pub fn matching(inputs: &[Value]) -> Self {
        let literals = inputs
            .iter()
            .enumerate()
            .map(|(i, value)| Literal::new(i, *value))
            .collect();
        Self { literals }
    }

    #[must_use]
    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    fn holds(&self, inputs: &[Value]) -> bool {
        self.literals.iter().all(|lit| lit.holds(inputs))
    }
}

impl Program for Conjunction {
    fn evaluate(&self, inputs: &[Value]) -> Value {
        Value::from(self.holds(inputs))
    }

    fn complexity(&self) -> u32 {
        self.literals.iter().map(Program::complexity).sum()
    }

    fn clone_boxed(&self) -> BoxedProgram {
        Box::new(self.clone())
    }
}

impl fmt::Display for Conjunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "and(")?;
        for (i, lit) in self.literals.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{lit}")?;
        }
        write!(f, ")")
    }
}

/// Disjunction of conjunctions; the empty disjunction is false.
///
/// # Examples
///
/// ```
/// use occam_scoring::program::{Conjunction, Disjunction, Literal, Program};
/// use occam_table::Value;
///
/// // $0 or (!$0 and $1)
/// let formula = Disjunction::new(vec![
///     Conjunction::new(vec![Literal::new(0, Value::TRUE)]),
///     Conjunction::new(vec![Literal::new(0, Value::FALSE), Literal::new(1, Value::TRUE)]),
/// ]);
/// assert_eq!(formula.evaluate(&[Value::FALSE, Value::TRUE]), Value::TRUE);
/// assert_eq!(formula.evaluate(&[Value::FALSE, Value::FALSE]), Value::FALSE);
/// assert_eq!(formula.complexity(), 3);
/// assert_eq!(formula.to_string(), "or(and($0) and(!$0 $1))");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Disjunction {
    clauses: Vec<Conjunction>,
}

impl Disjunction {
    #[must_use]
    pub fn new(clauses: Vec<Conjunction>) -> Self {
        Self { clauses }
    }

    #[must_use]
    pub fn clauses(&self) -> &[Conjunction] {
        &self.clauses
    }

    pub fn push(&mut self, clause: Conjunction) {
        self.clauses.push(clause);
    }
}

impl Program for Disjunction {
    fn evaluate(&self, inputs: &[Value]) -> Value {
        Value::from(self.clauses.iter().any(|clause| clause.holds(inputs)))
    }

    fn complexity(&self) -> u32 {
        self.clauses.iter().map(Program::complexity).sum()
    }

    fn clone_boxed(&self) -> BoxedProgram {
        Box::new(self.clone())
    }
}

impl fmt::Display for Disjunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "or(")?;
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{clause}")?;
        }
        write!(f, ")")
    }
}
