//! Runs the `taskgate` HTTP server.
//!
//! Settings come from flags, the environment, `.env`, and
//! `configs/<APP_ENV>.env`; see [`taskgate::config::ServerConfig`].

use clap::Parser;
use std::process::ExitCode;
use taskgate::config::{ServerConfig, load_env_files};
use taskgate::{server, telemetry};
use tracing::{debug, error};

#[tokio::main]
async fn main() -> ExitCode {
    let loaded = load_env_files();
    let config = ServerConfig::parse();

    if let Err(err) = telemetry::init(&config.log_level) {
        // No subscriber is available to report this.
        clap::Error::raw(clap::error::ErrorKind::InvalidValue, format!("{err}\n")).exit();
    }
    for path in &loaded {
        debug!(path = %path.display(), "loaded environment file");
    }

    match server::run(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "taskgate exited with an error");
            ExitCode::FAILURE
        }
    }
}
