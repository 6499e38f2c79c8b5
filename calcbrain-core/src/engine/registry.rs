//! Operator and constant registries
//!
//! Both are built once when an engine is constructed and never change
//! afterwards.

use std::collections::HashMap;

use super::entry::{BinaryOperator, Entry, UnaryOperator};
use super::error::EvalError;

fn multiply(a: f64, b: f64) -> Result<f64, EvalError> {
    Ok(b * a)
}

/// `a` is the divisor: pushing 6, 2 and then ÷ gives 3.
fn divide(a: f64, b: f64) -> Result<f64, EvalError> {
    if a == 0.0 {
        return Err(EvalError::DivisionByZero);
    }
    Ok(b / a)
}

fn add(a: f64, b: f64) -> Result<f64, EvalError> {
    Ok(b + a)
}

fn subtract(a: f64, b: f64) -> Result<f64, EvalError> {
    Ok(b - a)
}

/// Symbol-to-operator table
#[derive(Debug, Clone)]
pub struct OperatorRegistry {
    ops: HashMap<&'static str, Entry>,
}

impl OperatorRegistry {
    /// The calculator's operator keys: `× ÷ + - √ sin cos`
    pub fn standard() -> Self {
        let mut registry = Self {
            ops: HashMap::new(),
        };
        registry.binary("×", multiply);
        registry.binary("÷", divide);
        registry.binary("+", add);
        registry.binary("-", subtract);
        registry.unary("√", f64::sqrt);
        registry.unary("sin", f64::sin);
        registry.unary("cos", f64::cos);
        registry
    }

    fn unary(&mut self, symbol: &'static str, apply: fn(f64) -> f64) {
        self.ops
            .insert(symbol, Entry::Unary(UnaryOperator { symbol, apply }));
    }

    fn binary(&mut self, symbol: &'static str, apply: fn(f64, f64) -> Result<f64, EvalError>) {
        self.ops
            .insert(symbol, Entry::Binary(BinaryOperator { symbol, apply }));
    }

    /// Stack entry for `symbol`, ready to be pushed
    pub fn get(&self, symbol: &str) -> Option<&Entry> {
        self.ops.get(symbol)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.ops.contains_key(symbol)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.ops.keys().copied()
    }
}

/// Named constants with fixed values
#[derive(Debug, Clone)]
pub struct ConstantRegistry {
    values: HashMap<String, f64>,
}

impl ConstantRegistry {
    /// Built-in constants: π
    pub fn standard() -> Self {
        let mut values = HashMap::new();
        values.insert("π".to_string(), std::f64::consts::PI);
        Self { values }
    }

    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.values.get(symbol).copied()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.values.contains_key(symbol)
    }
}
