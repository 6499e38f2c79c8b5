//! Calcbrain Server
//!
//! JSON-RPC server that drives the expression engine for a calculator front end.
//! Communicates via stdin/stdout for easy subprocess management.

use std::io::{self, BufRead, Write};
use anyhow::Result;
use tracing::{info, error, debug};
use tracing_subscriber::EnvFilter;
use calcbrain_core::protocol::RpcMessage;
use calcbrain_core::{Request, Response};

mod handler;
mod literal;

fn main() -> Result<()> {
    // Logging goes to stderr (stdout is for JSON-RPC), filtered by RUST_LOG
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("calcbrain-server starting...");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    let mut handler = handler::Handler::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                error!("Failed to read line: {}", e);
                continue;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        debug!("Received: {}", line);

        let mut shutdown = false;
        let response = match serde_json::from_str::<RpcMessage<Request>>(&line) {
            Ok(msg) => {
                shutdown = matches!(msg.content, Request::Shutdown);
                let result = handler.handle(&msg.content);
                RpcMessage::new(msg.id.unwrap_or(0), result)
            }
            Err(e) => RpcMessage::new(0, Response::error(format!("Parse error: {}", e))),
        };

        let response_json = serde_json::to_string(&response)?;
        debug!("Sending: {}", response_json);
        writeln!(stdout, "{}", response_json)?;
        stdout.flush()?;

        if shutdown {
            break;
        }
    }

    info!("calcbrain-server shutting down");
    Ok(())
}
