//! Server configuration and logging setup.
//!
//! Both binaries take their options from command-line flags. Logging goes
//! to stderr through `tracing-subscriber` so stdout carries nothing but
//! protocol lines.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::room::RoomSettings;

/// Environment variable consulted for the log filter before `RUST_LOG`.
pub const LOG_ENV: &str = "CHECKERS_LOG";

/// Filter used when neither a flag nor the environment sets one.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Errors from command-line parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing value for {0}")]
    MissingValue(String),

    #[error("invalid value '{value}' for {flag}")]
    InvalidValue { flag: String, value: String },

    #[error("unknown argument: {0}")]
    UnknownArgument(String),
}

/// Room server options.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServerConfig {
    /// Explicit log filter; overrides the environment when set.
    pub log_filter: Option<String>,
    /// Seed for room ids and color draws. Entropy when unset.
    pub seed: Option<u64>,
    /// Settings applied to rooms created without any.
    pub default_settings: RoomSettings,
}

/// What the server binary was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Run(ServerConfig),
    Help,
}

impl ServerConfig {
    /// Parses server flags. `args` excludes the program name.
    pub fn from_args<I>(args: I) -> Result<Invocation, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = ServerConfig::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--seed" => {
                    config.seed = Some(parse_value(&arg, args.next())?);
                }
                "--mandatory-captures" => {
                    config.default_settings.mandatory_captures = true;
                }
                "--log" => {
                    config.log_filter = Some(parse_value(&arg, args.next())?);
                }
                "--help" | "-h" => return Ok(Invocation::Help),
                other => return Err(ConfigError::UnknownArgument(other.to_string())),
            }
        }

        Ok(Invocation::Run(config))
    }
}

/// Parses the value following `flag`.
pub fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<String>) -> Result<T, ConfigError> {
    let value = value.ok_or_else(|| ConfigError::MissingValue(flag.to_string()))?;
    value.parse().map_err(|_| ConfigError::InvalidValue {
        flag: flag.to_string(),
        value,
    })
}

/// Builds the log filter: an explicit directive wins, then `CHECKERS_LOG`,
/// then `RUST_LOG`, then `info`.
pub fn log_filter(explicit: Option<&str>) -> EnvFilter {
    if let Some(directive) = explicit {
        if let Ok(filter) = EnvFilter::try_new(directive) {
            return filter;
        }
    }
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Installs the global stderr subscriber. Later calls are ignored.
pub fn init_tracing(explicit: Option<&str>) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(log_filter(explicit))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
