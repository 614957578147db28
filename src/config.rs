//! Process configuration resolved from the environment
//!
//! Environment variables:
//! - COWIN_CENTER_CODES: comma-separated location codes to monitor
//! - COWIN_DISTRICT_CODE_URL: availability query base URL template
//! - COWIN_REQUEST_USER_AGENT: User-Agent sent with every availability query
//! - PAGER_DUTY_ROUTING_KEY: routing key for trigger events
//! - PAGER_DUTY_ALERT_URL: paging endpoint URL

use std::env;

/// Resolved configuration, read once at startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Location codes, polled in this order every cycle
    pub center_codes: Vec<String>,
    /// Base URL template; location code and date are appended per request
    pub availability_url: String,
    /// Client identifier sent with every availability query
    pub user_agent: String,
    /// Routing key for the paging service
    pub routing_key: String,
    /// Paging endpoint URL
    pub pager_url: String,
}

impl Config {
    /// Resolve configuration from the environment.
    ///
    /// Every variable is required; an unset or empty one is a startup
    /// error. The `.env` file, if any, must already have been loaded.
    pub fn from_env() -> Result<Self, ConfigError> {
        let center_codes = parse_center_codes(&required("COWIN_CENTER_CODES")?);
        if center_codes.is_empty() {
            return Err(ConfigError::NoCenterCodes);
        }

        Ok(Self {
            center_codes,
            availability_url: required("COWIN_DISTRICT_CODE_URL")?,
            user_agent: required("COWIN_REQUEST_USER_AGENT")?,
            routing_key: required("PAGER_DUTY_ROUTING_KEY")?,
            pager_url: required("PAGER_DUTY_ALERT_URL")?,
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(name)),
    }
}

/// Split a comma-separated code list, dropping whitespace and empty entries
fn parse_center_codes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(String::from)
        .collect()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Required environment variable {0} is unset or empty")]
    MissingVar(&'static str),

    #[error("COWIN_CENTER_CODES contains no location codes")]
    NoCenterCodes,
}
