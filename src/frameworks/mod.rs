// Frameworks layer: process bootstrap, settings and the tonic host.

pub mod config;
pub mod host;
pub mod server;
