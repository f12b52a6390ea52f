// Service host: owns the listener and the tonic dispatch server.

use crate::domain::{HostError, RegistryError, ServiceDescriptor};
use crate::frameworks::config::HostConfig;
use crate::interface_adapters::health::{HealthHandle, register_health};
use crate::interface_adapters::registry::ServiceRegistry;
use crate::interface_adapters::trace::request_span;
use std::convert::Infallible;
use std::future::{Future, pending};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::body::BoxBody;
use tonic::codegen::Service;
use tonic::codegen::http::{Request, Response};
use tonic::server::NamedService;
use tonic::transport::Server;

/// A bound listener plus the handlers that will be served on it.
///
/// `start` is the only constructor, so a host always holds a bound listener.
/// `serve` and `serve_with_shutdown` take the host by value: once serving
/// begins there is no handle left to register more handlers on. The listener
/// is dropped (and the socket closed) on every path out of `serve*`.
pub struct ServiceHost {
    listener: TcpListener,
    local_addr: SocketAddr,
    registry: ServiceRegistry,
    health: Option<HealthHandle>,
}

impl ServiceHost {
    /// Binds the configured address.
    pub async fn start(config: &HostConfig) -> Result<Self, HostError> {
        let address = config.address.as_str();
        let bind_error = |source| HostError::Bind {
            address: address.to_string(),
            source,
        };

        let listener = TcpListener::bind(address).await.map_err(bind_error)?;
        let local_addr = listener.local_addr().map_err(bind_error)?;
        tracing::debug!(%local_addr, requested = %address, "listener bound");

        Ok(Self {
            listener,
            local_addr,
            registry: ServiceRegistry::new(),
            health: None,
        })
    }

    /// Address the listener actually bound (resolves port `0`).
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Registers grpc.health.v1.Health; every handler registered by the time
    /// serving starts is reported SERVING.
    pub fn enable_health(&mut self) -> Result<&mut Self, RegistryError> {
        if self.health.is_none() {
            self.health = Some(register_health(&mut self.registry)?);
        }
        Ok(self)
    }

    /// Registers a named handler with the dispatch server.
    pub fn register_handler<S>(&mut self, handler: S) -> Result<&mut Self, RegistryError>
    where
        S: Service<Request<BoxBody>, Response = Response<BoxBody>, Error = Infallible>
            + NamedService
            + Clone
            + Send
            + 'static,
        S::Future: Send + 'static,
    {
        self.registry.add(handler)?;
        Ok(self)
    }

    pub fn registered_services(&self) -> &[ServiceDescriptor] {
        self.registry.services()
    }

    /// Serves until the transport fails.
    pub async fn serve(self) -> Result<(), HostError> {
        self.serve_with_shutdown(pending()).await
    }

    /// Serves until the transport fails or `signal` resolves; on shutdown the
    /// health status flips to NOT_SERVING and open connections drain.
    pub async fn serve_with_shutdown<F>(self, signal: F) -> Result<(), HostError>
    where
        F: Future<Output = ()> + Send,
    {
        let Self {
            listener,
            local_addr,
            registry,
            mut health,
        } = self;

        let services = registry.services().to_vec();
        if registry.is_empty() {
            tracing::warn!(%local_addr, "serving with no registered services");
        }
        if let Some(health) = health.as_mut() {
            health.mark_serving(&services).await;
        }
        tracing::info!(
            %local_addr,
            services = ?registry.names(),
            "serving"
        );

        let shutdown = async move {
            signal.await;
            tracing::info!("shutdown requested");
            if let Some(mut health) = health {
                health.mark_not_serving(&services).await;
            }
        };

        let mut server = Server::builder().trace_fn(request_span);
        server
            .add_routes(registry.into_routes())
            .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown)
            .await
            .map_err(|source| HostError::Serve {
                source: Box::new(source),
            })
    }
}
