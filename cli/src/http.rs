//! JSON façade over [`DiscoveryService`] for browser front ends.
//!
//! | Route          | Response                                              |
//! |----------------|-------------------------------------------------------|
//! | `GET /scan`    | `{success, cameras, network}` or `{success, error}`   |
//! | `GET /networks`| `{networks}`                                          |
//! | `GET /health`  | `{status: "ok"}`                                      |
//! | `OPTIONS *`    | empty 200 with CORS headers                           |
//! | anything else  | 404 `{error: "Not found"}`                            |

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::{Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use camscout_common::error::ScanError;
use camscout_core::discovery::DiscoveryService;
use serde_json::json;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

pub fn create_app(service: Arc<DiscoveryService>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/scan", get(scan_handler))
        .route("/networks", get(networks_handler))
        .route("/health", get(health_handler))
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(service)
}

async fn scan_handler(State(service): State<Arc<DiscoveryService>>) -> Response {
    match service.perform_discovery().await {
        Ok(report) => {
            info!(
                "Scan via {:?} found {} devices",
                report.method,
                report.devices.len()
            );
            Json(json!({
                "success": true,
                "cameras": report.devices,
                "network": report.network.address.to_string(),
            }))
            .into_response()
        }
        Err(e) => {
            let status = match e {
                ScanError::ScanInProgress => StatusCode::CONFLICT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            warn!("Scan failed: {e}");
            (
                status,
                Json(json!({ "success": false, "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

async fn networks_handler(State(service): State<Arc<DiscoveryService>>) -> Json<serde_json::Value> {
    Json(json!({ "networks": service.networks() }))
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
