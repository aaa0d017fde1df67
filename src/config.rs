use crate::error::{ExporterError, Result};

pub const USERNAME_VAR: &str = "AAISP_CONTROL_USERNAME";
pub const PASSWORD_VAR: &str = "AAISP_CONTROL_PASSWORD";
pub const PORT_VAR: &str = "AAISP_EXPORTER_PORT";

pub const DEFAULT_PORT: u16 = 9902;
pub const POLL_INTERVAL_SECS: u64 = 60;

/// Control-plane login for the CHAOS API, resolved fresh on every poll cycle
/// so externally rotated secrets are picked up without a restart.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Reads both credential variables from the environment. Missing or blank
/// values are a configuration error; the caller decides whether that is fatal.
pub fn resolve_credentials() -> Result<Credentials> {
    let username = require_env(USERNAME_VAR)?;
    let password = require_env(PASSWORD_VAR)?;
    Ok(Credentials { username, password })
}

/// Reads the exposition listen port, defaulting when the variable is unset.
pub fn listen_port() -> Result<u16> {
    match std::env::var(PORT_VAR) {
        Ok(raw) => parse_port(&raw),
        Err(_) => Ok(DEFAULT_PORT),
    }
}

fn require_env(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) => validate_credential(name, &value),
        Err(_) => Err(ExporterError::Config(format!("{name} is not set"))),
    }
}

fn validate_credential(name: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ExporterError::Config(format!("{name} is set but empty")));
    }
    Ok(trimmed.to_string())
}

fn parse_port(raw: &str) -> Result<u16> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|port| (1..65536).contains(port))
        .map(|port| port as u16)
        .ok_or_else(|| ExporterError::Config(format!("{PORT_VAR} is set but invalid: {raw:?}")))
}
