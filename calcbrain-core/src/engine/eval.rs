//! Stack reduction
//!
//! Both traversals read the stack as one postfix expression from the top
//! down. Each call consumes the entries belonging to the sub-expression on
//! top of `entries` and hands back the unconsumed prefix, so the live stack
//! is only ever borrowed.

use super::entry::{Entry, Operand};
use super::error::EvalError;
use super::registry::ConstantRegistry;

/// A value together with the part of the stack it did not use
pub(crate) type Reduced<'e, T> = Result<(T, &'e [Entry]), EvalError>;

/// Numeric reduction, optionally with one variable overridden
pub(crate) struct Reducer<'a> {
    constants: &'a ConstantRegistry,
    substitution: Option<(&'a str, f64)>,
}

impl<'a> Reducer<'a> {
    pub(crate) fn new(constants: &'a ConstantRegistry) -> Self {
        Self {
            constants,
            substitution: None,
        }
    }

    /// Treat every operand named `symbol` as holding `value`.
    /// Constants keep their fixed value.
    pub(crate) fn with_substitution(mut self, symbol: &'a str, value: f64) -> Self {
        if !self.constants.contains(symbol) {
            self.substitution = Some((symbol, value));
        }
        self
    }

    pub(crate) fn evaluate<'e>(&self, entries: &'e [Entry]) -> Reduced<'e, f64> {
        let Some((top, rest)) = entries.split_last() else {
            return Err(EvalError::IncompleteExpression);
        };

        match top {
            Entry::Operand(operand) => Ok((self.operand_value(operand)?, rest)),
            Entry::Unary(op) => {
                let (operand, rest) = self.evaluate(rest)?;
                Ok(((op.apply)(operand), rest))
            }
            Entry::Binary(op) => {
                let (a, rest) = self.evaluate(rest)?;
                let (b, rest) = self.evaluate(rest)?;
                Ok(((op.apply)(a, b)?, rest))
            }
        }
    }

    fn operand_value(&self, operand: &Operand) -> Result<f64, EvalError> {
        match operand {
            Operand::Literal(v) => Ok(*v),
            Operand::Named { name, value } => {
                if let Some((symbol, x)) = self.substitution {
                    if symbol == name.as_str() {
                        return Ok(x);
                    }
                }
                value.ok_or_else(|| EvalError::unbound(name))
            }
        }
    }
}

/// Infix rendering of the sub-expression on top of `entries`.
///
/// Named operands print their name, literals print with one decimal place,
/// and binary operators keep the order the operands were entered in.
pub(crate) fn reconstruct(entries: &[Entry]) -> Reduced<'_, String> {
    let Some((top, rest)) = entries.split_last() else {
        return Err(EvalError::IncompleteExpression);
    };

    match top {
        Entry::Operand(Operand::Named { name, .. }) => Ok((name.clone(), rest)),
        Entry::Operand(Operand::Literal(v)) => Ok((format!("{:.1}", v), rest)),
        Entry::Unary(op) => {
            let (operand, rest) = reconstruct(rest)?;
            Ok((format!("{}({})", op.symbol, operand), rest))
        }
        Entry::Binary(op) => {
            let (right, rest) = reconstruct(rest)?;
            let (left, rest) = reconstruct(rest)?;
            Ok((format!("({}{}{})", left, op.symbol, right), rest))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::registry::OperatorRegistry;

    fn op(symbol: &str) -> Entry {
        OperatorRegistry::standard()
            .get(symbol)
            .cloned()
            .expect("known operator")
    }

    #[test]
    fn test_remainder_is_unconsumed_prefix() {
        let constants = ConstantRegistry::standard();
        let stack = vec![Entry::literal(1.0), Entry::literal(2.0), Entry::literal(3.0), op("+")];

        let (value, rest) = Reducer::new(&constants).evaluate(&stack).unwrap();
        assert_eq!(value, 5.0);
        assert_eq!(rest.len(), 1);

        let (text, rest) = reconstruct(&stack).unwrap();
        assert_eq!(text, "(2.0+3.0)");
        assert_eq!(rest.len(), 1);
    }

    #[test]
    fn test_missing_operand() {
        let constants = ConstantRegistry::standard();
        let stack = vec![Entry::literal(1.0), op("×")];

        assert_eq!(
            Reducer::new(&constants).evaluate(&stack).map(|(v, _)| v),
            Err(EvalError::IncompleteExpression)
        );
        assert_eq!(
            reconstruct(&stack).map(|(text, _)| text),
            Err(EvalError::IncompleteExpression)
        );
    }

    #[test]
    fn test_unbound_variable_poisons_operator() {
        let constants = ConstantRegistry::standard();
        let stack = vec![Entry::literal(1.0), Entry::named(None, "M"), op("+")];

        assert_eq!(
            Reducer::new(&constants).evaluate(&stack).map(|(v, _)| v),
            Err(EvalError::unbound("M"))
        );
        // reconstruction only needs the name
        assert_eq!(reconstruct(&stack).unwrap().0, "(1.0+M)");
    }

    #[test]
    fn test_substitution() {
        let constants = ConstantRegistry::standard();
        let stack = vec![Entry::named(None, "M"), Entry::named(Some(2.0), "M"), op("×")];

        let reducer = Reducer::new(&constants).with_substitution("M", 5.0);
        assert_eq!(reducer.evaluate(&stack).unwrap().0, 25.0);
    }

    #[test]
    fn test_substitution_leaves_constants_alone() {
        let constants = ConstantRegistry::standard();
        let stack = vec![Entry::named(Some(std::f64::consts::PI), "π")];

        let reducer = Reducer::new(&constants).with_substitution("π", 1.0);
        assert_eq!(reducer.evaluate(&stack).unwrap().0, std::f64::consts::PI);
    }
}
