use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Kind of value a table column holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputType {
    #[display("boolean")]
    Boolean,
    #[display("contin")]
    Contin,
    #[display("enum")]
    Enum,
}

/// A single input or output value of a table.
///
/// `Contin` values are totally ordered with [`f64::total_cmp`], so values can be
/// used as keys of ordered maps (output counters, compressed input vectors).
#[derive(Debug, Clone, Copy, derive_more::Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    #[display("{_0}")]
    Boolean(bool),
    #[display("{_0}")]
    Contin(f64),
    #[display("#{_0}")]
    Enum(u32),
}

impl Value {
    pub const TRUE: Self = Self::Boolean(true);
    pub const FALSE: Self = Self::Boolean(false);

    #[must_use]
    pub const fn output_type(&self) -> OutputType {
        match self {
            Self::Boolean(_) => OutputType::Boolean,
            Self::Contin(_) => OutputType::Contin,
            Self::Enum(_) => OutputType::Enum,
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_true(&self) -> bool {
        matches!(self, Self::Boolean(true))
    }

    /// Numeric view of the value. Booleans map to `0.0`/`1.0`, enums have none.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Boolean(b) => Some(f64::from(u8::from(*b))),
            Self::Contin(x) => Some(*x),
            Self::Enum(_) => None,
        }
    }

    /// Logical negation; non-boolean values are returned unchanged.
    #[must_use]
    pub const fn negate(self) -> Self {
        match self {
            Self::Boolean(b) => Self::Boolean(!b),
            other => other,
        }
    }

    const fn rank(&self) -> u8 {
        match self {
            Self::Boolean(_) => 0,
            Self::Contin(_) => 1,
            Self::Enum(_) => 2,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Contin(x)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Boolean(a), Self::Boolean(b)) => a.cmp(b),
            (Self::Contin(a), Self::Contin(b)) => a.total_cmp(b),
            (Self::Enum(a), Self::Enum(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}
