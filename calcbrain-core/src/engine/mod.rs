//! Expression engine
//!
//! Keeps a calculator's input as a postfix operation stack and reduces it
//! either to a number or to a readable infix string.

mod brain;
pub mod entry;
pub mod error;
mod eval;
pub mod registry;

pub use brain::{ExpressionEngine, VariableBindings};
pub use entry::{BinaryOperator, Entry, Operand, UnaryOperator};
pub use error::EvalError;
pub use registry::{ConstantRegistry, OperatorRegistry};
