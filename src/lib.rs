pub mod domain;
pub mod frameworks;
pub mod interface_adapters;

pub use domain::{HostError, RegistryError, ServiceDescriptor};
pub use frameworks::config::{HostConfig, Settings};
pub use frameworks::host::ServiceHost;
pub use frameworks::server::{run, run_with_config};
pub use interface_adapters::registry::ServiceRegistry;
