//! `FlowSpace` backend service -- per-user row storage over HTTP.
//!
//! Stores task, event, and note rows in memory, scoped to the bearer
//! token presented on each request.
//!
//! # Usage
//!
//! ```bash
//! # Run on default address 0.0.0.0:8787
//! cargo run --bin flowspace-backend
//!
//! # Run on custom address
//! cargo run --bin flowspace-backend -- --bind 127.0.0.1:8080
//!
//! # Or via environment variable
//! FLOWSPACE_BACKEND_ADDR=127.0.0.1:8080 cargo run --bin flowspace-backend
//! ```

use std::sync::Arc;

use clap::Parser;
use flowspace_backend::auth::TokenAuth;
use flowspace_backend::config::{BackendCliArgs, BackendConfig};
use flowspace_backend::server::{self, AppState};

#[tokio::main]
async fn main() {
    let cli = BackendCliArgs::parse();

    // Load config from CLI args + config file + env vars + defaults.
    let config = match BackendConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    // Initialize tracing with the resolved log level.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(addr = %config.bind_addr, "starting flowspace backend");

    let auth = TokenAuth::new(config.tokens, config.allow_user_tokens);
    let state = Arc::new(AppState::new(auth));

    match server::start_server_with_state(&config.bind_addr, state).await {
        Ok((bound_addr, handle)) => {
            tracing::info!(addr = %bound_addr, "backend listening");
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "backend server task failed");
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to start backend server");
            std::process::exit(1);
        }
    }
}
