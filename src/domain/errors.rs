use std::error::Error;
use std::fmt;
use std::io;

pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

// Fatal host lifecycle failures; both end the process.
#[derive(Debug)]
pub enum HostError {
    Bind { address: String, source: io::Error },
    Serve { source: BoxError },
}

impl HostError {
    // Lifecycle operation that failed, used as a log field.
    pub fn operation(&self) -> &'static str {
        match self {
            HostError::Bind { .. } => "bind",
            HostError::Serve { .. } => "serve",
        }
    }
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::Bind { address, source } => {
                write!(f, "failed to bind {address}: {source}")
            }
            HostError::Serve { source } => write!(f, "failed to serve: {source}"),
        }
    }
}

impl Error for HostError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            HostError::Bind { source, .. } => Some(source),
            HostError::Serve { source } => Some(source.as_ref()),
        }
    }
}

// Errors raised while building the handler registry.
#[derive(Debug, PartialEq, Eq)]
pub enum RegistryError {
    DuplicateService { name: &'static str },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::DuplicateService { name } => {
                write!(f, "service {name} is already registered")
            }
        }
    }
}

impl Error for RegistryError {}
