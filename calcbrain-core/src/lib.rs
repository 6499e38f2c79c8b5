//! Calcbrain Core Library
//!
//! Core functionality for an RPN stack calculator:
//! - Expression engine (operation stack, evaluation, infix reconstruction)
//! - Function sampling for plotting the current expression
//! - JSON-RPC protocol shared with calcbrain-server

pub mod engine;
pub mod graph;
pub mod protocol;

pub use engine::{Entry, EvalError, ExpressionEngine};
pub use graph::{sample, PlotPoint, Viewport};
pub use protocol::{Request, Response};
