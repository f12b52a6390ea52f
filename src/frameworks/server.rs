// Framework bootstrap for the user service process.

use crate::domain::{HostError, RegistryError};
use crate::frameworks::config::{ConfigError, Settings};
use crate::frameworks::host::ServiceHost;
use std::fmt;

fn init_runtime() {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

// Anything that stops the process before or while serving.
#[derive(Debug)]
pub enum StartupError {
    Config(ConfigError),
    Registry(RegistryError),
    Host(HostError),
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartupError::Config(err) => write!(f, "configuration error: {err}"),
            StartupError::Registry(err) => write!(f, "registration error: {err}"),
            StartupError::Host(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for StartupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StartupError::Config(err) => Some(err),
            StartupError::Registry(err) => Some(err),
            StartupError::Host(err) => Some(err),
        }
    }
}

impl From<ConfigError> for StartupError {
    fn from(err: ConfigError) -> Self {
        StartupError::Config(err)
    }
}

impl From<RegistryError> for StartupError {
    fn from(err: RegistryError) -> Self {
        StartupError::Registry(err)
    }
}

impl From<HostError> for StartupError {
    fn from(err: HostError) -> Self {
        StartupError::Host(err)
    }
}

/// Announces the bound address and serves until the transport fails.
pub async fn run(host: ServiceHost) -> Result<(), HostError> {
    let address = host.local_addr();
    tracing::info!(%address, "user service listening");

    host.serve().await.inspect_err(|e| {
        tracing::error!(operation = e.operation(), error = %e, "server error");
    })
}

/// Process entry point: settings, bind, registration, serve.
pub async fn run_with_config() -> Result<(), StartupError> {
    init_runtime();

    let settings = Settings::load().inspect_err(|e| {
        tracing::error!(error = %e, "failed to load settings");
    })?;

    // Bind TCP listener with error handling
    let mut host = ServiceHost::start(&settings.host).await.inspect_err(|e| {
        tracing::error!(
            address = %settings.host.address,
            operation = e.operation(),
            error = %e,
            "failed to bind"
        );
    })?;

    if settings.host.health {
        host.enable_health().inspect_err(|e| {
            tracing::error!(error = %e, "failed to register health service");
        })?;
    }
    // Domain handlers (user service, persistence-backed services) register here
    // once they exist.

    run(host).await?;
    Ok(())
}
