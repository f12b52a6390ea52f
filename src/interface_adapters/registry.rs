// Handler registry backing the dispatch server's routing table.

use crate::domain::{RegistryError, ServiceDescriptor};
use std::convert::Infallible;
use tonic::body::BoxBody;
use tonic::codegen::http::{Request, Response};
use tonic::codegen::Service;
use tonic::server::NamedService;
use tonic::service::{Routes, RoutesBuilder};

/// Ordered set of named gRPC handlers.
///
/// Any tonic service (generated `*Server` wrappers, `tonic-health`, or a
/// hand-written tower service with a `NamedService` impl) can be added, so the
/// host never depends on concrete business types. Names are unique: the
/// router matches on `/{name}/*`, and two handlers under one prefix would be
/// ambiguous.
#[derive(Default)]
pub struct ServiceRegistry {
    routes: RoutesBuilder,
    services: Vec<ServiceDescriptor>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a handler under its `NamedService::NAME`.
    pub fn add<S>(&mut self, handler: S) -> Result<ServiceDescriptor, RegistryError>
    where
        S: Service<Request<BoxBody>, Response = Response<BoxBody>, Error = Infallible>
            + NamedService
            + Clone
            + Send
            + 'static,
        S::Future: Send + 'static,
    {
        let descriptor = ServiceDescriptor::new(S::NAME);
        if self.contains(descriptor.name) {
            return Err(RegistryError::DuplicateService {
                name: descriptor.name,
            });
        }

        self.routes.add_service(handler);
        self.services.push(descriptor);
        tracing::debug!(
            service = %descriptor,
            route = %descriptor.route_prefix(),
            "registered service"
        );

        Ok(descriptor)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.services.iter().any(|service| service.name == name)
    }

    /// Registered services in registration order.
    pub fn services(&self) -> &[ServiceDescriptor] {
        &self.services
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.services.iter().map(|service| service.name).collect()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    // An empty registry still yields a router; unknown paths answer UNIMPLEMENTED.
    pub fn into_routes(self) -> Routes {
        self.routes.routes()
    }
}
