//! Latch - command-line session client.
//!
//! Every invocation behaves like a fresh page load: the session is restored
//! from the token file before the requested command runs.

mod cli;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use latch_application::{AuthController, AuthFailure, IdentityError};
use latch_domain::{DomainError, RegistrationAttributes, SessionState};
use latch_infrastructure::{ConfigError, FileTokenStore, ReqwestIdentityApi, TracingNavigator};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Command};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("cannot create HTTP client: {0}")]
    Client(#[from] IdentityError),
    #[error("{0}")]
    Invalid(#[from] DomainError),
    #[error("{0}")]
    Auth(#[from] AuthFailure),
    #[error("cannot print profile: {0}")]
    Output(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = cli.client_config()?;
    tracing::debug!(backend = %config.backend_url, file = %config.token_file.display(), "starting");

    let navigator = Arc::new(TracingNavigator::new());
    let controller = AuthController::new(
        Arc::new(FileTokenStore::new(config.token_file.clone())),
        Arc::new(ReqwestIdentityApi::new(&config)?),
        navigator.clone(),
    )
    .with_policy(cli.policy());

    controller.restore().await;

    match cli.command {
        Command::Status => {}
        Command::Login { username, password } => controller.login(&username, &password).await?,
        Command::Register {
            username,
            password,
            attrs,
        } => {
            let mut attributes = RegistrationAttributes::new(username, password)?;
            for (key, value) in attrs {
                attributes.insert(key, value);
            }
            controller.register(&attributes).await?;
        }
        Command::Logout => controller.logout(),
    }

    println!("{}", describe(&controller.state())?);
    if let Some(target) = navigator.last() {
        println!("-> {target}");
    }
    Ok(())
}

fn describe(state: &SessionState) -> Result<String, serde_json::Error> {
    Ok(match state.user() {
        Some(profile) => format!(
            "{} as {}\n{}",
            state.label(),
            profile.username,
            serde_json::to_string_pretty(profile)?
        ),
        None => state.label().to_string(),
    })
}
