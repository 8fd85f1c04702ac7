//! Configuration system for the `FlowSpace` client.
//!
//! Supports layered configuration with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`~/.config/flowspace/config.toml`)
//! 4. Compiled defaults
//!
//! Missing config file is not an error (defaults are used). An explicit
//! `--config` path that doesn't exist is an error.

use std::path::PathBuf;
use std::time::Duration;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),
}

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

/// Top-level TOML config file structure.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    service: ServiceFileConfig,
}

/// `[service]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ServiceFileConfig {
    url: Option<String>,
    access_token: Option<String>,
    user_id: Option<String>,
    request_timeout_secs: Option<u64>,
}

// ---------------------------------------------------------------------------
// Resolved configuration (concrete types, all fields populated)
// ---------------------------------------------------------------------------

/// Fully resolved client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend service.
    pub service_url: String,
    /// Bearer token for the backend. `None` means run signed out.
    pub access_token: Option<String>,
    /// User id override; normally derived from the token.
    pub user_id: Option<String>,
    /// End-to-end timeout for each backend request.
    pub request_timeout: Duration,
    /// Log level filter string.
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            service_url: "http://127.0.0.1:8787".to_string(),
            access_token: None,
            user_id: None,
            request_timeout: Duration::from_secs(10),
            log_level: "info".to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration by merging CLI args, env vars, and a TOML file.
    ///
    /// If `--config` is given and the file does not exist, returns an
    /// error. If no `--config` is given, the default path
    /// (`~/.config/flowspace/config.toml`) is tried and silently ignored
    /// if missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the explicit config file cannot be read
    /// or parsed.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Ok(Self::resolve(cli, &file))
    }

    /// Resolve a `ClientConfig` from CLI args and a parsed config file.
    ///
    /// Priority: CLI > file > default. This is separated from `load()` to
    /// enable unit testing without CLI parsing.
    #[must_use]
    fn resolve(cli: &CliArgs, file: &ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            service_url: cli
                .url
                .clone()
                .or_else(|| file.service.url.clone())
                .unwrap_or(defaults.service_url),
            access_token: cli
                .token
                .clone()
                .or_else(|| file.service.access_token.clone()),
            user_id: cli.user.clone().or_else(|| file.service.user_id.clone()),
            request_timeout: file
                .service
                .request_timeout_secs
                .map_or(defaults.request_timeout, Duration::from_secs),
            log_level: cli.log_level.clone(),
        }
    }

    /// Returns the user id to stamp on writes, if one can be determined.
    ///
    /// An explicit `user_id` wins; otherwise a `user:<id>` token
    /// self-identifies. Any other token shape needs an explicit user id.
    #[must_use]
    pub fn resolved_user_id(&self) -> Option<String> {
        if let Some(id) = &self.user_id {
            return Some(id.clone());
        }
        self.access_token
            .as_deref()
            .and_then(|t| t.strip_prefix("user:"))
            .filter(|id| !id.is_empty())
            .map(str::to_string)
    }
}

/// CLI arguments parsed by clap.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "FlowSpace productivity client")]
pub struct CliArgs {
    /// Base URL of the backend service.
    #[arg(long, env = "FLOWSPACE_URL")]
    pub url: Option<String>,

    /// Bearer token for the backend.
    #[arg(long, env = "FLOWSPACE_TOKEN")]
    pub token: Option<String>,

    /// User id to stamp on writes (default: derived from the token).
    #[arg(long, env = "FLOWSPACE_USER")]
    pub user: Option<String>,

    /// Path to config file (default: `~/.config/flowspace/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "warn", env = "FLOWSPACE_LOG")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<crate::cli::Command>,
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Load and parse a TOML config file.
///
/// If `explicit_path` is `Some`, the file must exist (error if not).
/// If `explicit_path` is `None`, the default path is tried and missing file
/// is treated as empty config.
fn load_config_file(explicit_path: Option<&std::path::Path>) -> Result<ConfigFile, ConfigError> {
    let path = if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    } else {
        let Some(config_dir) = dirs::config_dir() else {
            return Ok(ConfigFile::default());
        };
        config_dir.join("flowspace").join("config.toml")
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
