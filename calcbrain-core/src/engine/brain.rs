//! The expression engine behind the calculator keys

use std::collections::HashMap;

use log::{debug, log_enabled, trace, warn, Level};

use super::entry::{Entry, Operand};
use super::error::EvalError;
use super::eval::{reconstruct, Reducer};
use super::registry::{ConstantRegistry, OperatorRegistry};

/// Current variable values, keyed by name
pub type VariableBindings = HashMap<String, f64>;

/// Owns the operation stack and the variable bindings of one calculator.
///
/// Every push re-evaluates the whole stack and returns the result, so the
/// caller can refresh its display after each key press.
pub struct ExpressionEngine {
    stack: Vec<Entry>,
    operators: OperatorRegistry,
    constants: ConstantRegistry,
    variables: VariableBindings,
}

impl ExpressionEngine {
    pub fn new() -> Self {
        Self {
            stack: Vec::new(),
            operators: OperatorRegistry::standard(),
            constants: ConstantRegistry::standard(),
            variables: HashMap::new(),
        }
    }

    /// Push a number typed by the user
    pub fn push_literal(&mut self, value: f64) -> Result<f64, EvalError> {
        trace!("push literal {}", value);
        self.stack.push(Entry::literal(value));
        self.evaluate()
    }

    /// Push a named operand. `None` pushes a placeholder for a variable
    /// that has no value yet.
    pub fn push_named(&mut self, value: Option<f64>, symbol: &str) -> Result<f64, EvalError> {
        trace!("push {} = {:?}", symbol, value);
        self.stack.push(Entry::named(value, symbol));
        self.evaluate()
    }

    /// Push a constant or variable by name.
    ///
    /// Constants win over variables of the same name; names that are
    /// neither are pushed unbound.
    pub fn push_symbol(&mut self, symbol: &str) -> Result<f64, EvalError> {
        let value = self
            .constants
            .get(symbol)
            .or_else(|| self.variables.get(symbol).copied());
        self.push_named(value, symbol)
    }

    /// Push the operator registered under `symbol`. Unknown symbols leave the
    /// stack as it is; the stack is evaluated either way.
    pub fn apply_operator(&mut self, symbol: &str) -> Result<f64, EvalError> {
        match self.operators.get(symbol) {
            Some(op) => {
                trace!("push operator {}", symbol);
                self.stack.push(op.clone());
            }
            None => warn!("Ignoring unknown operator '{}'", symbol),
        }
        self.evaluate()
    }

    /// Reduce the stack to a number. Entries below the expression on top of
    /// the stack are left over and do not affect the result.
    pub fn evaluate(&self) -> Result<f64, EvalError> {
        self.reduce(Reducer::new(&self.constants))
    }

    /// `evaluate`, discarding the reason when there is no value
    pub fn value(&self) -> Option<f64> {
        self.evaluate().ok()
    }

    /// Evaluate as if the variable `symbol` held `x`, without binding it.
    /// Used to sample the expression as a function of one variable.
    pub fn evaluate_at(&self, symbol: &str, x: f64) -> Result<f64, EvalError> {
        self.reduce(Reducer::new(&self.constants).with_substitution(symbol, x))
    }

    fn reduce(&self, reducer: Reducer<'_>) -> Result<f64, EvalError> {
        if self.stack.is_empty() {
            return Err(EvalError::EmptyStack);
        }

        let result = reducer.evaluate(&self.stack);
        if log_enabled!(Level::Debug) {
            match &result {
                Ok((value, remainder)) => debug!(
                    "{} = {} with {}",
                    render(&self.stack),
                    value,
                    render(remainder)
                ),
                Err(e) => debug!("{}: {}", render(&self.stack), e),
            }
        }
        result.map(|(value, _)| value)
    }

    /// Infix form of the expression on top of the stack, e.g. `cos((M+3.0))`
    pub fn reconstruct(&self) -> Result<String, EvalError> {
        if self.stack.is_empty() {
            return Err(EvalError::EmptyStack);
        }
        reconstruct(&self.stack).map(|(text, _)| text)
    }

    /// Bind `symbol` to `value` and update every operand on the stack that
    /// refers to it. Operands named after a constant keep the constant.
    pub fn rebind_variable(&mut self, symbol: &str, value: f64) {
        self.set_variable(symbol, value);
        if self.constants.contains(symbol) {
            return;
        }

        let mut updated = 0;
        for entry in &mut self.stack {
            if entry.operand_name() == Some(symbol) {
                *entry = Entry::named(Some(value), symbol);
                updated += 1;
            }
        }
        debug!("{} = {} ({} stack entries updated)", symbol, value, updated);
    }

    /// Record a binding without touching the stack
    pub fn set_variable(&mut self, symbol: &str, value: f64) {
        self.variables.insert(symbol.to_string(), value);
    }

    pub fn variable(&self, symbol: &str) -> Option<f64> {
        self.variables.get(symbol).copied()
    }

    pub fn variables(&self) -> &VariableBindings {
        &self.variables
    }

    pub fn clear_stack(&mut self) {
        self.stack.clear();
    }

    /// Forget all bindings. Variable operands already on the stack become
    /// unbound again; constants are kept.
    pub fn clear_variables(&mut self) {
        self.variables.clear();
        for entry in &mut self.stack {
            if let Entry::Operand(Operand::Named { name, value }) = entry {
                if !self.constants.contains(name) {
                    *value = None;
                }
            }
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.stack
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn is_operator(&self, symbol: &str) -> bool {
        self.operators.contains(symbol)
    }

    pub fn is_constant(&self, symbol: &str) -> bool {
        self.constants.contains(symbol)
    }
}

impl Default for ExpressionEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn render(entries: &[Entry]) -> String {
    let items: Vec<String> = entries.iter().map(|e| e.to_string()).collect();
    format!("[{}]", items.join(", "))
}
