//! `FlowSpace` — personal productivity client.
//!
//! Signs in with the configured token, syncs the domain store against
//! the backend, and runs one subcommand. Configuration via CLI flags,
//! environment variables, or config file
//! (`~/.config/flowspace/config.toml`).
//!
//! ```bash
//! # List tasks
//! flowspace --token user:alice tasks list
//!
//! # Add a task with defaults (due today, medium priority)
//! flowspace --token user:alice tasks add --title "Review strategy"
//!
//! # Or via environment variables
//! FLOWSPACE_URL=http://127.0.0.1:8787 FLOWSPACE_TOKEN=user:alice flowspace notes list
//! ```

use clap::Parser;

use flowspace::cli::{self, Command, TaskAction};
use flowspace::config::{CliArgs, ClientConfig};

#[tokio::main]
async fn main() {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > config file > defaults).
    let config = match ClientConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config file: {e}");
            ClientConfig::default()
        }
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    // Bare invocation defaults to listing tasks.
    let command = cli.command.unwrap_or(Command::Tasks {
        action: TaskAction::List,
    });

    if let Err(e) = cli::run(&config, command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
