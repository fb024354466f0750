//! Shared utilities for integration tests.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    Router,
};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use rpc_pool::config::PoolConfig;
use rpc_pool::http::HttpServer;
use rpc_pool::lifecycle::Shutdown;

/// A request as seen by a mock upstream.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct Recorded {
    pub headers: HeaderMap,
    pub body: Bytes,
}

#[derive(Clone)]
struct Behaviour {
    status: StatusCode,
    body: &'static str,
    delay: Duration,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

/// Handle on a running mock upstream.
#[allow(dead_code)]
pub struct MockUpstream {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

#[allow(dead_code)]
impl MockUpstream {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn hits(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

async fn record(
    State(behaviour): State<Behaviour>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, &'static str) {
    behaviour.requests.lock().unwrap().push(Recorded { headers, body });
    if !behaviour.delay.is_zero() {
        tokio::time::sleep(behaviour.delay).await;
    }
    (behaviour.status, behaviour.body)
}

/// Start a mock upstream on an ephemeral port that answers every request
/// with `status` and `body` after `delay`.
pub async fn start_upstream_with(status: u16, body: &'static str, delay: Duration) -> MockUpstream {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));

    let behaviour = Behaviour {
        status: StatusCode::from_u16(status).unwrap(),
        body,
        delay,
        requests: requests.clone(),
    };
    let app = Router::new().fallback(record).with_state(behaviour);

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockUpstream { addr, requests }
}

/// Start a mock upstream that answers 200 with `body`.
#[allow(dead_code)]
pub async fn start_upstream(body: &'static str) -> MockUpstream {
    start_upstream_with(200, body, Duration::ZERO).await
}

/// Start a raw TCP upstream that announces a 100 byte body, sends only a
/// few bytes of it and then closes the connection.
#[allow(dead_code)]
pub async fn start_truncated_upstream() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let mut buf = [0u8; 4096];
                        let _ = socket.read(&mut buf).await;
                        let response = "HTTP/1.1 200 OK\r\ncontent-length: 100\r\n\r\n{\"res";
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// An http URL on which nothing is listening.
#[allow(dead_code)]
pub async fn dead_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Handle on a running proxy.
pub struct Proxy {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

#[allow(dead_code)]
impl Proxy {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for Proxy {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the proxy in front of `endpoints`, letting the caller adjust the
/// configuration first.
pub async fn start_proxy_with<F>(endpoints: Vec<String>, configure: F) -> Proxy
where
    F: FnOnce(&mut PoolConfig),
{
    let mut config = PoolConfig::default();
    config.endpoints = endpoints;
    config.upstream.system_proxy = false;
    configure(&mut config);

    let server = HttpServer::new(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    Proxy { addr, shutdown }
}

#[allow(dead_code)]
pub async fn start_proxy(endpoints: Vec<String>) -> Proxy {
    start_proxy_with(endpoints, |_| {}).await
}

/// Client that never goes through a system proxy and never reuses connections.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
