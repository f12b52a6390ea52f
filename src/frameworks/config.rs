use config::{File, FileFormat, Source};
use serde::Deserialize;
use std::env::{self, VarError};
use std::fmt;

// Runtime/server settings (no domain configuration lives here).

pub const ADDRESS_ENV: &str = "USER_SERVICE_ADDR";
pub const HEALTH_ENV: &str = "USER_SERVICE_HEALTH";
pub const CONFIG_PATH_ENV: &str = "USER_SERVICE_CONFIG";

pub const DEFAULT_ADDRESS: &str = "0.0.0.0:50051";

/// Everything `ServiceHost::start` needs to bring the listener up.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HostConfig {
    /// Bind target; validated when the listener is bound.
    pub address: String,
    /// Register the grpc.health.v1.Health service before other handlers.
    pub health: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            health: true,
        }
    }
}

/// Resolved process settings: defaults, then the optional TOML file, then env.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(rename = "server")]
    pub host: HostConfig,
}

#[derive(Debug)]
pub enum ConfigError {
    Load(config::ConfigError),
    InvalidValue { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Load(err) => write!(f, "failed to load settings: {err}"),
            ConfigError::InvalidValue { key, value } => {
                write!(f, "invalid value for {key}: {value:?}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Load(err) => Some(err),
            ConfigError::InvalidValue { .. } => None,
        }
    }
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::Load(err)
    }
}

impl Settings {
    /// Loads settings from the process environment and the file it names.
    pub fn load() -> Result<Self, ConfigError> {
        let file = config_path(env::var(CONFIG_PATH_ENV))?
            .map(|path| File::new(&path, FileFormat::Toml));

        Self::build(file, |key| env::var(key).ok())
    }

    /// Layers TOML `contents` and an env lookup over the defaults.
    pub fn from_sources<E>(contents: Option<&str>, lookup: E) -> Result<Self, ConfigError>
    where
        E: Fn(&str) -> Option<String>,
    {
        let file = contents.map(|contents| File::from_str(contents, FileFormat::Toml));
        Self::build(file, lookup)
    }

    fn build<S, E>(file: Option<S>, lookup: E) -> Result<Self, ConfigError>
    where
        S: Source + Send + Sync + 'static,
        E: Fn(&str) -> Option<String>,
    {
        let defaults = HostConfig::default();
        let mut builder = config::Config::builder()
            .set_default("server.address", defaults.address)?
            .set_default("server.health", defaults.health)?;

        if let Some(file) = file {
            builder = builder.add_source(file);
        }

        let address = lookup(ADDRESS_ENV)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        let settings = builder
            .set_override_option("server.address", address)?
            .set_override_option("server.health", lookup(HEALTH_ENV))?
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }
}

// An unset path means "no file"; a non-unicode one is an error, not a silent skip.
fn config_path(value: Result<String, VarError>) -> Result<Option<String>, ConfigError> {
    match value {
        Ok(path) => Ok(Some(path)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(raw)) => Err(ConfigError::InvalidValue {
            key: CONFIG_PATH_ENV,
            value: raw.to_string_lossy().into_owned(),
        }),
    }
}
