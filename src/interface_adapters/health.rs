// gRPC health checking (grpc.health.v1.Health) backed by tonic-health.

use crate::domain::{RegistryError, ServiceDescriptor};
use crate::interface_adapters::registry::ServiceRegistry;
use tonic_health::ServingStatus;
use tonic_health::server::{HealthReporter, health_reporter};

// Service name health clients use for the server as a whole.
pub const OVERALL_SERVICE: &str = "";

// Handle used to publish serving status once registration is complete.
#[derive(Clone)]
pub struct HealthHandle {
    reporter: HealthReporter,
}

// Registers the health service and returns its status reporter.
pub fn register_health(registry: &mut ServiceRegistry) -> Result<HealthHandle, RegistryError> {
    let (reporter, service) = health_reporter();
    registry.add(service)?;
    Ok(HealthHandle { reporter })
}

impl HealthHandle {
    // Report every registered service as SERVING.
    pub async fn mark_serving(&mut self, services: &[ServiceDescriptor]) {
        for service in services {
            self.reporter
                .set_service_status(service.name, ServingStatus::Serving)
                .await;
        }
    }

    // Report the whole server and every registered service as NOT_SERVING.
    pub async fn mark_not_serving(&mut self, services: &[ServiceDescriptor]) {
        self.reporter
            .set_service_status(OVERALL_SERVICE, ServingStatus::NotServing)
            .await;
        for service in services {
            self.reporter
                .set_service_status(service.name, ServingStatus::NotServing)
                .await;
        }
    }
}
