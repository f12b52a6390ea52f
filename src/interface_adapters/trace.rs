// Per-request tracing spans for inbound RPCs.

use tonic::codegen::http::Request;
use tracing::Span;

// W3C trace-context header forwarded by upstream callers.
pub const TRACEPARENT_HEADER: &str = "traceparent";

// Builds the span every inbound RPC runs inside.
pub fn request_span(request: &Request<()>) -> Span {
    let traceparent = request
        .headers()
        .get(TRACEPARENT_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let path = request.uri().path();

    tracing::info_span!(
        "grpc",
        service = service_of(path).unwrap_or_default(),
        method = %path,
        traceparent = %traceparent,
    )
}

// Extracts the `package.Service` part of a `/package.Service/Method` path.
pub fn service_of(path: &str) -> Option<&str> {
    let mut parts = path.strip_prefix('/')?.splitn(2, '/');
    let service = parts.next().filter(|service| !service.is_empty())?;
    parts.next().filter(|method| !method.is_empty())?;
    Some(service)
}
