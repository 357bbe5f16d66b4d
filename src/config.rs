//! Server configuration from command-line flags and environment variables.
//!
//! Every flag has an environment variable counterpart. Values are read in
//! this order, first hit wins: command line, process environment, `.env`,
//! then `configs/<APP_ENV>.env` (`APP_ENV` defaults to `development`).

use crate::auth::services::DEFAULT_TOKEN_TTL_SECS;
use crate::task::services::DEFAULT_MAX_CREATE_ATTEMPTS;
use chrono::{FixedOffset, Offset, Utc};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Environment variable naming the configuration profile.
pub const APP_ENV_VAR: &str = "APP_ENV";

/// Profile used when [`APP_ENV_VAR`] is unset.
pub const DEFAULT_APP_ENV: &str = "development";

/// Longest accepted session lifetime: one year.
pub const MAX_TOKEN_TTL_SECS: i64 = 366 * 24 * 3600;

/// Runtime settings for the `taskgate` server.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "taskgate",
    version,
    about = "Task management HTTP backend with role-based access control"
)]
pub struct ServerConfig {
    /// Address the HTTP server listens on.
    #[arg(long, env = "TASKGATE_BIND", default_value = "0.0.0.0:3001")]
    pub bind: SocketAddr,

    /// `PostgreSQL` connection URL. Storage is in-memory when unset.
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Maximum number of pooled database connections.
    #[arg(long, env = "DATABASE_POOL_SIZE", default_value_t = 8)]
    pub database_pool_size: u32,

    /// Secret used to sign session tokens.
    #[arg(
        long,
        env = "JWT_SECRET",
        hide_env_values = true,
        value_parser = parse_secret
    )]
    pub jwt_secret: String,

    /// Session token lifetime in seconds.
    #[arg(
        long,
        env = "TOKEN_TTL_SECS",
        default_value_t = DEFAULT_TOKEN_TTL_SECS,
        value_parser = clap::value_parser!(i64).range(1..=MAX_TOKEN_TTL_SECS)
    )]
    pub token_ttl_secs: i64,

    /// UTC offset whose calendar day prefixes task identifiers.
    #[arg(
        long,
        env = "TASK_ID_UTC_OFFSET",
        default_value = "+00:00",
        value_parser = parse_utc_offset
    )]
    pub task_id_utc_offset: FixedOffset,

    /// Identifier allocations tried per create before giving up.
    #[arg(
        long,
        env = "TASK_CREATE_ATTEMPTS",
        default_value_t = DEFAULT_MAX_CREATE_ATTEMPTS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub task_create_attempts: u32,

    /// Comma-separated emails that register with the admin role.
    #[arg(long, env = "ADMIN_EMAILS", value_delimiter = ',')]
    pub admin_emails: Vec<String>,

    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl ServerConfig {
    /// Admin email entries with surrounding whitespace and blanks removed.
    pub fn admin_email_entries(&self) -> impl Iterator<Item = &str> {
        self.admin_emails
            .iter()
            .map(|entry| entry.trim())
            .filter(|entry| !entry.is_empty())
    }
}

/// Loads `.env` and the active profile file into the process environment.
///
/// Variables that are already set are left untouched. Returns the files that
/// were read.
#[must_use]
pub fn load_env_files() -> Vec<PathBuf> {
    let mut loaded = Vec::new();
    if let Ok(path) = dotenvy::dotenv() {
        loaded.push(path);
    }
    let app_env = std::env::var(APP_ENV_VAR).unwrap_or_else(|_| DEFAULT_APP_ENV.to_owned());
    let profile = profile_path(&app_env);
    if dotenvy::from_path(&profile).is_ok() {
        loaded.push(profile);
    }
    loaded
}

/// Location of the environment file for `app_env`.
#[must_use]
pub fn profile_path(app_env: &str) -> PathBuf {
    PathBuf::from("configs").join(format!("{app_env}.env"))
}

/// Parses `Z`, `UTC`, or a signed `HH:MM` / `HHMM` offset.
///
/// # Errors
///
/// Returns a message when the value is not one of the accepted forms or lies
/// outside a day.
pub fn parse_utc_offset(raw: &str) -> Result<FixedOffset, String> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc") {
        return Ok(Utc.fix());
    }
    let expected = "expected +HH:MM or -HH:MM";
    // The parser stops after the minutes and ignores anything that follows.
    if !matches!(trimmed.len(), 5 | 6) {
        return Err(format!("invalid UTC offset '{raw}'; {expected}"));
    }
    trimmed
        .parse::<FixedOffset>()
        .map_err(|err| format!("invalid UTC offset '{raw}': {err}; {expected}"))
}

fn parse_secret(raw: &str) -> Result<String, String> {
    if raw.trim().is_empty() {
        Err("the session signing secret must not be empty".to_owned())
    } else {
        Ok(raw.to_owned())
    }
}
