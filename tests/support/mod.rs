// Shared helpers for bringing a host up on an ephemeral port.
#![allow(dead_code)]

use std::{net::SocketAddr, time::Duration};
use tokio::{sync::oneshot, task::JoinHandle};
use user_server::{HostConfig, HostError, ServiceHost};

// A host serving in a background task until `stop` is called.
pub struct RunningHost {
    pub address: SocketAddr,
    stop_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<Result<(), HostError>>,
}

impl RunningHost {
    pub fn url(&self) -> String {
        format!("http://{}", self.address)
    }

    // Fire the shutdown signal without waiting for connections to drain.
    pub fn request_stop(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
    }

    // Trigger shutdown and wait for the serve loop to return.
    pub async fn stop(mut self) -> Result<(), HostError> {
        self.request_stop();
        self.task.await.expect("serve task should join")
    }
}

pub fn loopback_config(health: bool) -> HostConfig {
    HostConfig {
        address: "127.0.0.1:0".to_string(),
        health,
    }
}

// Bind on an ephemeral loopback port; callers register handlers before `serve`.
pub async fn bind_host(health: bool) -> ServiceHost {
    let mut host = ServiceHost::start(&loopback_config(health))
        .await
        .expect("bind ephemeral test port");
    if health {
        host.enable_health().expect("health should register");
    }
    host
}

// Spawn the serve loop and block until the port accepts TCP connections.
pub async fn serve(host: ServiceHost) -> RunningHost {
    let address = host.local_addr();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let task = tokio::spawn(host.serve_with_shutdown(async move {
        let _ = stop_rx.await;
    }));

    wait_for_readiness(address).await;

    RunningHost {
        address,
        stop_tx: Some(stop_tx),
        task,
    }
}

// Retry for a short period to avoid racing server accept.
pub async fn wait_for_readiness(address: SocketAddr) {
    for _ in 0..100 {
        if tokio::net::TcpStream::connect(address).await.is_ok() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    panic!("server did not become ready in time");
}
