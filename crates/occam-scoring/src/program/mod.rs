//! Candidate programs as seen by the scorers.
//!
//! Scorers never look inside a candidate except through [`Program`]: a
//! deterministic evaluation oracle plus a structural complexity measure. The
//! concrete programs in this module cover what the scorers themselves need to
//! build or inspect:
//!
//! - constant [`Value`]s
//! - disjunctive normal forms ([`formula`]), the shape of best-bound witnesses
//! - decision lists ([`decision_list`]), inspected clause by clause by the
//!   graded decision-list scorers

use std::fmt;

use occam_table::Value;

pub use self::{
    decision_list::{Clause, DecisionList, EnumProgram},
    formula::{Conjunction, Disjunction, Literal},
};

pub mod decision_list;
pub mod formula;

/// A candidate program.
///
/// `evaluate` must be deterministic and free of side effects for a given
/// program and input vector.
pub trait Program: fmt::Debug + Send + Sync {
    /// Output of the program on one input vector.
    #[must_use]
    fn evaluate(&self, inputs: &[Value]) -> Value;

    /// Structural size used by the complexity penalty.
    #[must_use]
    fn complexity(&self) -> u32;

    #[must_use]
    fn clone_boxed(&self) -> BoxedProgram;
}

pub type BoxedProgram = Box<dyn Program>;

impl Clone for BoxedProgram {
    fn clone(&self) -> Self {
        self.clone_boxed()
    }
}

impl Program for BoxedProgram {
    fn evaluate(&self, inputs: &[Value]) -> Value {
        self.as_ref().evaluate(inputs)
    }

    fn complexity(&self) -> u32 {
        self.as_ref().complexity()
    }

    fn clone_boxed(&self) -> BoxedProgram {
        self.as_ref().clone_boxed()
    }
}

/// A constant program; it ignores its inputs and has no structure.
impl Program for Value {
    fn evaluate(&self, _inputs: &[Value]) -> Value {
        *self
    }

    fn complexity(&self) -> u32 {
        0
    }

    fn clone_boxed(&self) -> BoxedProgram {
        Box::new(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_ignores_inputs() {
        let program: BoxedProgram = Box::new(Value::Enum(3));
        assert_eq!(program.evaluate(&[Value::TRUE, Value::FALSE]), Value::Enum(3));
        assert_eq!(program.evaluate(&[]), Value::Enum(3));
        assert_eq!(program.complexity(), 0);
    }

    #[test]
    fn test_boxed_clone() {
        let program: BoxedProgram = Box::new(Literal::new(1, Value::TRUE));
        let cloned = program.clone();
        let inputs = [Value::FALSE, Value::TRUE];
        assert_eq!(cloned.evaluate(&inputs), program.evaluate(&inputs));
        assert_eq!(cloned.complexity(), 1);
    }
}
