// Domain layer: host lifecycle errors and service identity.

pub mod errors;
pub mod service;

pub use errors::{HostError, RegistryError};
pub use service::ServiceDescriptor;
