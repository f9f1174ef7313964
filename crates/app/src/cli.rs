//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use latch_application::TransportFailurePolicy;
use latch_infrastructure::{ClientConfig, ConfigError, DEFAULT_BACKEND_URL};

#[derive(Parser, Debug)]
#[command(name = "latch", version, about = "Session client for the identity backend")]
pub struct Cli {
    /// Backend base URL.
    #[arg(long, global = true, env = "LATCH_BACKEND_URL", default_value = DEFAULT_BACKEND_URL)]
    pub backend_url: String,

    /// Session file (defaults to the platform data directory).
    #[arg(long, global = true, env = "LATCH_TOKEN_FILE")]
    pub token_file: Option<PathBuf>,

    /// Keep the stored token when the backend cannot be reached.
    #[arg(long, global = true)]
    pub keep_token_offline: bool,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Show the current session.
    Status,
    /// Log in and store the session token.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "LATCH_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account. Does not log in.
    Register {
        #[arg(long)]
        username: String,
        #[arg(long, env = "LATCH_PASSWORD", hide_env_values = true)]
        password: String,
        /// Extra account attribute, repeatable.
        #[arg(long = "attr", value_name = "KEY=VALUE", value_parser = parse_attr)]
        attrs: Vec<(String, String)>,
    },
    /// Forget the stored session.
    Logout,
}

impl Cli {
    /// Builds the client configuration from the global flags.
    pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        match &self.token_file {
            Some(path) => ClientConfig::with_token_file(&self.backend_url, path.clone()),
            None => ClientConfig::new(&self.backend_url),
        }
    }

    pub const fn policy(&self) -> TransportFailurePolicy {
        if self.keep_token_offline {
            TransportFailurePolicy::RetainToken
        } else {
            TransportFailurePolicy::FailClosed
        }
    }
}

/// Keys set by `--username` and `--password`.
const RESERVED_ATTRS: [&str; 2] = ["username", "password"];

fn parse_attr(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("attribute key is empty in '{raw}'"));
    }
    if RESERVED_ATTRS.contains(&key) {
        return Err(format!("use --{key} instead of --attr {key}=..."));
    }
    Ok((key.to_string(), value.to_string()))
}
