//! Request handler for calcbrain-server

use calcbrain_core::graph::sample;
use calcbrain_core::protocol::SessionOptions;
use calcbrain_core::{EvalError, ExpressionEngine, Request, Response, Viewport};
use tracing::{debug, info, warn};

use crate::literal::parse_literal;

/// Shown by `describe` when the stack does not form an expression
pub const NO_EXPRESSION: &str = "(no expression)";

pub struct Handler {
    engine: ExpressionEngine,
    options: SessionOptions,
}

impl Handler {
    pub fn new() -> Self {
        Self {
            engine: ExpressionEngine::new(),
            options: SessionOptions::default(),
        }
    }

    pub fn handle(&mut self, request: &Request) -> Response {
        match request {
            Request::Initialize { options } => self.handle_initialize(options),
            Request::Enter { text } => self.handle_enter(text),
            Request::Push { value } => {
                let result = self.engine.push_literal(*value);
                self.render(result)
            }
            Request::Symbol { symbol } => {
                let result = self.engine.push_symbol(symbol);
                self.render(result)
            }
            Request::Operate { symbol } => self.handle_operate(symbol),
            Request::Store { value } => {
                let symbol = self.options.memory_symbol.clone();
                self.handle_define(&symbol, value.unwrap_or(0.0))
            }
            Request::Define { symbol, value } => self.handle_define(symbol, *value),
            Request::Evaluate => self.render(self.engine.evaluate()),
            Request::Describe => self.handle_describe(),
            Request::Clear => {
                self.engine.clear_stack();
                self.engine.clear_variables();
                Response::success()
            }
            Request::ClearStack => {
                self.engine.clear_stack();
                Response::success()
            }
            Request::ClearVariables => {
                self.engine.clear_variables();
                Response::success()
            }
            Request::Plot {
                viewport,
                min_x,
                max_x,
                step,
            } => self.handle_plot(viewport, *min_x, *max_x, *step),
            Request::Shutdown => {
                info!("Shutdown requested");
                Response::success()
            }
        }
    }

    fn handle_initialize(&mut self, options: &SessionOptions) -> Response {
        info!(
            "Initializing session: memory={}, precision={}",
            options.memory_symbol, options.precision
        );
        self.engine = ExpressionEngine::new();
        self.options = options.clone();
        Response::success()
    }

    fn handle_enter(&mut self, text: &str) -> Response {
        debug!("Enter request: text={}", text);

        match parse_literal(text) {
            Ok(value) => {
                let result = self.engine.push_literal(value);
                self.render(result)
            }
            Err(e) => {
                warn!("Rejected literal '{}': {}", text, e);
                Response::error(e.to_string())
            }
        }
    }

    fn handle_operate(&mut self, symbol: &str) -> Response {
        if !self.engine.is_operator(symbol) {
            debug!("Unknown operator key: {}", symbol);
        }
        let result = self.engine.apply_operator(symbol);
        self.render(result)
    }

    fn handle_define(&mut self, symbol: &str, value: f64) -> Response {
        debug!("Define request: {}={}", symbol, value);
        self.engine.rebind_variable(symbol, value);
        self.render(self.engine.evaluate())
    }

    fn handle_describe(&self) -> Response {
        match self.engine.reconstruct() {
            Ok(expression) => Response::description(expression),
            Err(e) => {
                debug!("Nothing to describe: {}", e);
                Response::description(NO_EXPRESSION)
            }
        }
    }

    fn handle_plot(&self, viewport: &Viewport, min_x: f64, max_x: f64, step: f64) -> Response {
        let symbol = &self.options.memory_symbol;
        let points = sample(&self.engine, symbol, viewport, min_x, max_x, step);
        debug!(
            "Plotted {} points for {} over [{}, {}]",
            points.len(),
            symbol,
            min_x,
            max_x
        );
        Response::plot(points)
    }

    /// Turn an evaluation into what the display shows
    fn render(&self, result: Result<f64, EvalError>) -> Response {
        match result {
            Ok(value) => Response::evaluation(
                Some(value),
                format!("{:.*}", self.options.precision, value),
                None,
            ),
            Err(e) => {
                let display = match e {
                    EvalError::DivisionByZero => "undefined",
                    EvalError::UnboundVariable { .. } => "N/A",
                    EvalError::EmptyStack | EvalError::IncompleteExpression => "0",
                };
                Response::evaluation(None, display, Some(e.to_string()))
            }
        }
    }
}

impl Default for Handler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn display(response: &Response) -> &str {
        match response {
            Response::Evaluation { display, .. } => display,
            other => panic!("not an evaluation: {:?}", other),
        }
    }

    fn operate(handler: &mut Handler, symbol: &str) -> Response {
        handler.handle(&Request::Operate {
            symbol: symbol.to_string(),
        })
    }

    #[test]
    fn test_keypad_session() {
        let mut handler = Handler::new();
        handler.handle(&Request::Enter {
            text: "3".to_string(),
        });
        handler.handle(&Request::Enter {
            text: "4".to_string(),
        });
        let resp = operate(&mut handler, "+");
        assert_eq!(display(&resp), "7.000000");

        match handler.handle(&Request::Describe) {
            Response::Description { expression } => assert_eq!(expression, "(3.0+4.0)"),
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_literal_is_rejected() {
        let mut handler = Handler::new();
        let resp = handler.handle(&Request::Enter {
            text: "1.2.3".to_string(),
        });
        assert!(matches!(resp, Response::Error { .. }));
        assert!(handler.engine.is_empty());
    }

    #[test]
    fn test_division_by_zero_displays_undefined() {
        let mut handler = Handler::new();
        handler.handle(&Request::Push { value: 5.0 });
        handler.handle(&Request::Push { value: 0.0 });
        let resp = operate(&mut handler, "÷");
        assert_eq!(display(&resp), "undefined");
        assert!(matches!(resp, Response::Evaluation { value: None, .. }));
    }

    #[test]
    fn test_store_memory_variable() {
        let mut handler = Handler::new();
        let resp = handler.handle(&Request::Symbol {
            symbol: "M".to_string(),
        });
        assert_eq!(display(&resp), "N/A");
        operate(&mut handler, "√");

        let resp = handler.handle(&Request::Store { value: Some(9.0) });
        assert_eq!(display(&resp), "3.000000");

        let resp = handler.handle(&Request::Store { value: None });
        assert_eq!(display(&resp), "0.000000");
    }

    #[test]
    fn test_describe_empty_stack() {
        let mut handler = Handler::new();
        match handler.handle(&Request::Describe) {
            Response::Description { expression } => assert_eq!(expression, NO_EXPRESSION),
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[test]
    fn test_clear_all() {
        let mut handler = Handler::new();
        handler.handle(&Request::Define {
            symbol: "x".to_string(),
            value: 2.0,
        });
        handler.handle(&Request::Symbol {
            symbol: "x".to_string(),
        });
        handler.handle(&Request::Clear);
        assert!(handler.engine.is_empty());
        assert!(handler.engine.variables().is_empty());
        assert_eq!(display(&handler.handle(&Request::Evaluate)), "0");
    }

    #[test]
    fn test_initialize_options() {
        let mut handler = Handler::new();
        handler.handle(&Request::Initialize {
            options: SessionOptions {
                memory_symbol: "x".to_string(),
                precision: 2,
            },
        });
        handler.handle(&Request::Symbol {
            symbol: "x".to_string(),
        });
        let resp = handler.handle(&Request::Store { value: Some(1.5) });
        assert_eq!(display(&resp), "1.50");

        let resp = handler.handle(&Request::Plot {
            viewport: Viewport::centered(100.0, 100.0),
            min_x: 0.0,
            max_x: 100.0,
            step: 50.0,
        });
        match resp {
            // y = x
            Response::Plot { points } => {
                let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
                assert_eq!(ys, vec![100.0, 50.0, 0.0]);
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }
}
