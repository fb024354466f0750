//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the RPC handler on every path
//! - Wire up middleware (request ID, tracing)
//! - Build the shared upstream client and endpoint selector
//! - Serve on a listener until the shutdown signal fires

use axum::{body::Body, http::HeaderName, routing::any, Router};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::PoolConfig;
use crate::http::handler::rpc_handler;
use crate::http::request::{make_request_span, MakeRequestUuidV4, X_REQUEST_ID};
use crate::load_balancer::{EmptyPoolError, Endpoint, EndpointError, LoadBalancer, RoundRobin};

/// Errors raised while assembling the server from configuration.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Endpoint(#[from] EndpointError),

    #[error(transparent)]
    EmptyPool(#[from] EmptyPoolError),

    #[error("invalid forward header name '{0}'")]
    InvalidHeader(String),

    #[error("failed to build upstream HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub balancer: Arc<dyn LoadBalancer>,
    pub client: reqwest::Client,
    /// Inbound headers copied to upstream requests.
    pub forward_headers: Arc<[HeaderName]>,
    pub max_body_bytes: usize,
}

impl AppState {
    /// Build state from validated configuration.
    pub fn from_config(config: &PoolConfig) -> Result<Self, ServerError> {
        let endpoints = config
            .endpoints
            .iter()
            .map(|address| Endpoint::parse(address))
            .collect::<Result<Vec<_>, _>>()?;
        let balancer = Arc::new(RoundRobin::new(endpoints)?);

        let forward_headers = config
            .upstream
            .forward_headers
            .iter()
            .map(|name| {
                HeaderName::from_bytes(name.as_bytes())
                    .map_err(|_| ServerError::InvalidHeader(name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut builder = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.upstream.connect_timeout_secs))
            .timeout(Duration::from_secs(config.upstream.request_timeout_secs));
        if !config.upstream.system_proxy {
            builder = builder.no_proxy();
        }

        Ok(Self {
            balancer,
            client: builder.build()?,
            forward_headers: forward_headers.into(),
            max_body_bytes: config.listener.max_body_bytes.unwrap_or(usize::MAX),
        })
    }
}

/// HTTP server for the RPC pool.
pub struct HttpServer {
    router: Router,
    config: PoolConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: PoolConfig) -> Result<Self, ServerError> {
        let state = AppState::from_config(&config)?;
        let router = Self::build_router(state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", any(rpc_handler))
            .route("/{*path}", any(rpc_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuidV4))
                    .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<Body>))
                    .layer(PropagateRequestIdLayer::new(X_REQUEST_ID)),
            )
    }

    /// A clone of the fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            endpoints = self.config.endpoints.len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
