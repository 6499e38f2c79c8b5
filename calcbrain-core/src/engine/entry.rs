//! Entries of the operation stack

use std::fmt;

use super::error::EvalError;

pub type UnaryFn = fn(f64) -> f64;

/// Binary operator body. The first argument is the operand nearer the top
/// of the stack (pushed later), the second is the one beneath it.
pub type BinaryFn = fn(f64, f64) -> Result<f64, EvalError>;

/// A leaf of the expression
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Unnamed number typed by the user: 3.0
    Literal(f64),
    /// Constant or variable: π, M. `value` is `None` while the variable is unbound.
    Named { name: String, value: Option<f64> },
}

impl Operand {
    pub fn value(&self) -> Option<f64> {
        match self {
            Operand::Literal(v) => Some(*v),
            Operand::Named { value, .. } => *value,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Operand::Literal(_) => None,
            Operand::Named { name, .. } => Some(name),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct UnaryOperator {
    pub symbol: &'static str,
    pub apply: UnaryFn,
}

#[derive(Debug, Clone, Copy)]
pub struct BinaryOperator {
    pub symbol: &'static str,
    pub apply: BinaryFn,
}

/// One element of the postfix operation stack
#[derive(Debug, Clone)]
pub enum Entry {
    Operand(Operand),
    Unary(UnaryOperator),
    Binary(BinaryOperator),
}

impl Entry {
    pub fn literal(value: f64) -> Self {
        Entry::Operand(Operand::Literal(value))
    }

    pub fn named(value: Option<f64>, name: impl Into<String>) -> Self {
        Entry::Operand(Operand::Named {
            name: name.into(),
            value,
        })
    }

    /// Name of the operand, if this entry is a named operand
    pub fn operand_name(&self) -> Option<&str> {
        match self {
            Entry::Operand(operand) => operand.name(),
            _ => None,
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Operand(Operand::Literal(v)) => write!(f, "{:?}", v),
            Entry::Operand(Operand::Named { name, .. }) => write!(f, "{}", name),
            Entry::Unary(op) => write!(f, "{}", op.symbol),
            Entry::Binary(op) => write!(f, "{}", op.symbol),
        }
    }
}
