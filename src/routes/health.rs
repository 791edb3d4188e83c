use crate::models::health::HealthResponse;
use crate::store::DocumentStore;
use actix_web::{HttpResponse, Responder, get, web};

/// # Health Check Endpoint
///
/// Confirms the service can reach its document store.
///
/// ## Response
///
/// - **200 OK**: store answered the ping, body `{"status": "UP", ...}`
/// - **503 Service Unavailable**: store unreachable, body `{"status": "DOWN", ...}`
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Document store unreachable", body = HealthResponse)
    ),
    tag = "Health Check"
)]
#[get("/health")]
pub async fn health(store: web::Data<dyn DocumentStore>) -> impl Responder {
    match store.ping().await {
        Ok(()) => HttpResponse::Ok().json(HealthResponse::up()),
        Err(e) => {
            tracing::warn!(error = %e, "health check failed: document store unreachable");
            HttpResponse::ServiceUnavailable().json(HealthResponse::down())
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health);
}
