use std::convert::Infallible;
use std::future::{Ready, ready};
use std::task::{Context, Poll};
use tonic::codegen::http::{Request, Response, header};
use tonic::body::{BoxBody, empty_body};
use tonic::codegen::Service;
use tonic::server::NamedService;

// Minimal named handler that answers every call with UNIMPLEMENTED.
#[derive(Clone, Copy, Debug)]
pub(crate) struct StubService;

impl NamedService for StubService {
    const NAME: &'static str = "monorepo.test.v1.StubService";
}

impl Service<Request<BoxBody>> for StubService {
    type Response = Response<BoxBody>;
    type Error = Infallible;
    type Future = Ready<Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, _req: Request<BoxBody>) -> Self::Future {
        let mut response = Response::new(empty_body());
        let headers = response.headers_mut();
        headers.insert("grpc-status", (tonic::Code::Unimplemented as i32).into());
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/grpc"),
        );
        ready(Ok(response))
    }
}
