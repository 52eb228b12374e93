//! Hollowlet - virtual-node workload provider service
//!
//! This is the main entry point for the provider service. It exposes
//! the pod lifecycle and node status operations over a thin HTTP
//! surface; every handler is a pass-through to the [`Provider`] trait.
//!
//! # HTTP Endpoints
//!
//! ## Health & Readiness
//! - `GET /health` - Health check
//! - `GET /ready` - Readiness check
//!
//! ## Pod Lifecycle
//! - `POST /v1/namespaces/:namespace/pods` - Create a pod
//! - `PUT /v1/namespaces/:namespace/pods/:name` - Update a pod (accepted, not applied)
//! - `DELETE /v1/namespaces/:namespace/pods/:name` - Delete a pod
//! - `GET /v1/namespaces/:namespace/pods/:name` - Get a pod
//! - `GET /v1/namespaces/:namespace/pods/:name/status` - Get a pod's status
//! - `GET /v1/namespaces/:namespace/pods/:name/logs` - Get container logs (always empty)
//! - `GET /v1/pods` - List all pods
//!
//! ## Node Status
//! - `GET /v1/node/capacity` - Advertised resource capacity
//! - `GET /v1/node/conditions` - Node conditions
//! - `GET /v1/node/addresses` - Node addresses (none)
//! - `GET /v1/node/daemon-endpoints` - Daemon endpoints (zero-valued)
//! - `GET /v1/node/operating-system` - Operating system family

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use k8s_openapi::api::core::v1::Pod;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncReadExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hollowlet_core::PodKey;
use hollowlet_provider::{LogOptions, NodeConfig, NodeProvider, Provider, ProviderError};

/// Application state shared across handlers.
struct AppState {
    provider: Arc<NodeProvider>,
}

impl Clone for AppState {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
        }
    }
}

// ============================================================================
// Health Endpoints
// ============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
}

async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        service: "hollowlet",
    })
}

async fn ready_handler(State(_state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, "ready")
}

// ============================================================================
// Pod Lifecycle Endpoints
// ============================================================================

/// Error response format.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    code: u16,
}

impl ErrorResponse {
    fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }
}

fn provider_error(e: &ProviderError) -> Response {
    let code = e.http_status_code();
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(ErrorResponse::new(e.to_string(), code)),
    )
        .into_response()
}

/// Create a pod.
///
/// POST /v1/namespaces/:namespace/pods
async fn create_pod_handler(
    State(state): State<AppState>,
    Path(namespace): Path<String>,
    Json(pod): Json<Pod>,
) -> Response {
    match state.provider.create_pod(pod).await {
        Ok(()) => {
            tracing::info!(namespace, "Created pod via HTTP API");
            StatusCode::CREATED.into_response()
        }
        Err(e) => {
            tracing::warn!(namespace, error = %e, "Failed to create pod");
            provider_error(&e)
        }
    }
}

/// Update a pod. Accepted but never applied.
///
/// PUT /v1/namespaces/:namespace/pods/:name
async fn update_pod_handler(
    State(state): State<AppState>,
    Path((namespace, name)): Path<(String, String)>,
    Json(pod): Json<Pod>,
) -> Response {
    match state.provider.update_pod(pod).await {
        Ok(()) => {
            tracing::info!(namespace, name, "Accepted pod update via HTTP API");
            StatusCode::OK.into_response()
        }
        Err(e) => provider_error(&e),
    }
}

/// Delete a pod. Idempotent.
///
/// DELETE /v1/namespaces/:namespace/pods/:name
async fn delete_pod_handler(
    State(state): State<AppState>,
    Path((namespace, name)): Path<(String, String)>,
) -> Response {
    let key = PodKey::new(namespace, name);
    match state.provider.delete_pod(&key).await {
        Ok(()) => {
            tracing::info!(pod = %key, "Deleted pod via HTTP API");
            StatusCode::OK.into_response()
        }
        Err(e) => provider_error(&e),
    }
}

/// Get a pod.
///
/// GET /v1/namespaces/:namespace/pods/:name
async fn get_pod_handler(
    State(state): State<AppState>,
    Path((namespace, name)): Path<(String, String)>,
) -> Response {
    let key = PodKey::new(namespace, name);
    match state.provider.get_pod(&key).await {
        Ok(pod) => Json(pod).into_response(),
        Err(e) => provider_error(&e),
    }
}

/// List all pods on this node.
///
/// GET /v1/pods
async fn list_pods_handler(State(state): State<AppState>) -> Response {
    match state.provider.get_pods().await {
        Ok(pods) => Json(pods).into_response(),
        Err(e) => provider_error(&e),
    }
}

/// Get a pod's status.
///
/// GET /v1/namespaces/:namespace/pods/:name/status
async fn pod_status_handler(
    State(state): State<AppState>,
    Path((namespace, name)): Path<(String, String)>,
) -> Response {
    let key = PodKey::new(namespace, name);
    match state.provider.get_pod_status(&key).await {
        Ok(status) => Json(status).into_response(),
        Err(e) => provider_error(&e),
    }
}

/// Query parameters for a log request.
#[derive(Debug, Deserialize)]
struct LogsQuery {
    container: Option<String>,
    tail_lines: Option<i64>,
    timestamps: Option<bool>,
    previous: Option<bool>,
}

/// Get container logs. The stub backend always returns an empty body.
///
/// GET /v1/namespaces/:namespace/pods/:name/logs
async fn pod_logs_handler(
    State(state): State<AppState>,
    Path((namespace, name)): Path<(String, String)>,
    Query(query): Query<LogsQuery>,
) -> Response {
    let key = PodKey::new(namespace, name);
    let opts = LogOptions {
        tail_lines: query.tail_lines,
        timestamps: query.timestamps.unwrap_or_default(),
        previous: query.previous.unwrap_or_default(),
    };

    match state
        .provider
        .get_container_logs(&key, query.container.as_deref().unwrap_or_default(), opts)
        .await
    {
        Ok(mut stream) => {
            let mut body = Vec::new();
            if let Err(e) = stream.read_to_end(&mut body).await {
                tracing::error!(pod = %key, error = %e, "Failed to read log stream");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new(e.to_string(), 500)),
                )
                    .into_response();
            }
            (StatusCode::OK, body).into_response()
        }
        Err(e) => provider_error(&e),
    }
}

// ============================================================================
// Node Status Endpoints
// ============================================================================

async fn capacity_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.provider.capacity())
}

async fn conditions_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.provider.node_conditions())
}

async fn addresses_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.provider.node_addresses())
}

async fn daemon_endpoints_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.provider.node_daemon_endpoints())
}

async fn operating_system_handler(State(state): State<AppState>) -> impl IntoResponse {
    state.provider.operating_system()
}

// ============================================================================
// Router
// ============================================================================

fn create_router(state: AppState) -> Router {
    Router::new()
        // Health & readiness
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
        // Pod lifecycle
        .route("/v1/namespaces/:namespace/pods", post(create_pod_handler))
        .route("/v1/pods", get(list_pods_handler))
        .route(
            "/v1/namespaces/:namespace/pods/:name",
            get(get_pod_handler)
                .put(update_pod_handler)
                .delete(delete_pod_handler),
        )
        .route(
            "/v1/namespaces/:namespace/pods/:name/status",
            get(pod_status_handler),
        )
        .route(
            "/v1/namespaces/:namespace/pods/:name/logs",
            get(pod_logs_handler),
        )
        // Node status
        .route("/v1/node/capacity", get(capacity_handler))
        .route("/v1/node/conditions", get(conditions_handler))
        .route("/v1/node/addresses", get(addresses_handler))
        .route("/v1/node/daemon-endpoints", get(daemon_endpoints_handler))
        .route("/v1/node/operating-system", get(operating_system_handler))
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,hollowlet=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting hollowlet provider");

    // Load configuration from environment
    let listen_addr = std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:10250".to_string());
    let config = NodeConfig::from_env();

    tracing::info!(
        node_name = %config.node_name,
        operating_system = %config.operating_system,
        cpu = %config.cpu,
        memory = %config.memory,
        max_pods = %config.max_pods,
        "Loaded node configuration"
    );

    // The provider is constructed once and handed to every handler;
    // the registry it owns is the node's single source of truth.
    let provider = Arc::new(NodeProvider::new(config));
    let state = AppState { provider };

    // Create router
    let app = create_router(state);

    // Start server
    tracing::info!(listen_addr = %listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
