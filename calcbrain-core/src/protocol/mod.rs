//! JSON-RPC Protocol definitions
//!
//! Defines the communication protocol between a calculator front end and
//! calcbrain-server. Every request maps onto one key press or one refresh
//! of the display.

use crate::graph::{PlotPoint, Viewport};
use serde::{Deserialize, Serialize};

/// Per-session settings sent with `initialize`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionOptions {
    /// Variable written by `store` and swept by `plot`
    pub memory_symbol: String,
    /// Decimal places shown for a value
    pub precision: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            memory_symbol: "M".to_string(),
            precision: 6,
        }
    }
}

/// Request from the front end to calcbrain-server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", content = "params")]
pub enum Request {
    /// Start a session with the given options
    #[serde(rename = "initialize")]
    Initialize {
        #[serde(default)]
        options: SessionOptions,
    },

    /// Push a number typed on the keypad, as text
    #[serde(rename = "enter")]
    Enter { text: String },

    /// Push an already parsed number
    #[serde(rename = "push")]
    Push { value: f64 },

    /// Push a constant or variable key
    #[serde(rename = "symbol")]
    Symbol { symbol: String },

    /// Push an operator key
    #[serde(rename = "operate")]
    Operate { symbol: String },

    /// Assign the memory variable (0 when no value is given)
    #[serde(rename = "store")]
    Store {
        #[serde(default)]
        value: Option<f64>,
    },

    /// Assign an arbitrary variable
    #[serde(rename = "define")]
    Define { symbol: String, value: f64 },

    #[serde(rename = "evaluate")]
    Evaluate,

    /// Infix form of the current expression
    #[serde(rename = "describe")]
    Describe,

    /// Clear the stack and all variables
    #[serde(rename = "clear")]
    Clear,

    #[serde(rename = "clear_stack")]
    ClearStack,

    #[serde(rename = "clear_variables")]
    ClearVariables,

    /// Sample the expression as a function of the memory variable
    #[serde(rename = "plot")]
    Plot {
        #[serde(default)]
        viewport: Viewport,
        min_x: f64,
        max_x: f64,
        #[serde(default = "default_plot_step")]
        step: f64,
    },

    /// Shutdown the server
    #[serde(rename = "shutdown")]
    Shutdown,
}

fn default_plot_step() -> f64 {
    1.0
}

/// Response from calcbrain-server to the front end
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Evaluation {
        value: Option<f64>,
        display: String,
        error: Option<String>,
    },
    Description { expression: String },
    Plot { points: Vec<PlotPoint> },
    Success { ok: bool },
    Error { error: String },
}

impl Response {
    pub fn success() -> Self {
        Response::Success { ok: true }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Response::Error { error: msg.into() }
    }

    pub fn evaluation(value: Option<f64>, display: impl Into<String>, error: Option<String>) -> Self {
        Response::Evaluation {
            value,
            display: display.into(),
            error,
        }
    }

    pub fn description(expression: impl Into<String>) -> Self {
        Response::Description {
            expression: expression.into(),
        }
    }

    pub fn plot(points: Vec<PlotPoint>) -> Self {
        Response::Plot { points }
    }
}

/// JSON-RPC message wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcMessage<T> {
    pub jsonrpc: String,
    pub id: Option<u64>,
    #[serde(flatten)]
    pub content: T,
}

impl<T> RpcMessage<T> {
    pub fn new(id: u64, content: T) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: Some(id),
            content,
        }
    }
}
