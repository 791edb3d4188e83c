use crate::error::ApiError;
use crate::validation::ValidationErrors;
use actix_web::web;

/// # API Root
///
/// `GET /api/` returns the service banner.
pub mod root;

/// # Health Check Endpoint
///
/// Pings the document store and reports `UP` (200) or `DOWN` (503) with an
/// RFC 3339 timestamp.
pub mod health;

/// # Status Check Endpoints
///
/// - `POST /api/status`: record a heartbeat for a named client
/// - `GET /api/status`: list up to 1000 recorded heartbeats
pub mod status;

/// # Contact Form Endpoints
///
/// - `POST /api/contact`: store a submission and notify staff by email
/// - `GET /api/contact`: list up to 1000 submissions
pub mod contact;

/// Rejects bodies that are not parseable JSON with the same 422 shape the
/// validators use.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::Validation(ValidationErrors::single(
            "body",
            "json_invalid",
            err.to_string(),
        ))
        .into()
    })
}

/// # API Route Configuration
///
/// Mounts every endpoint under the `/api` prefix.
///
/// ```text
/// GET  /api/         - Service banner
/// GET  /api/health   - Store-backed liveness probe
/// POST /api/status   - Create a status check
/// GET  /api/status   - List status checks
/// POST /api/contact  - Submit the contact form
/// GET  /api/contact  - List contact submissions
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(json_config())
            .configure(root::configure_routes)
            .configure(health::configure_routes)
            .configure(status::configure_routes)
            .configure(contact::configure_routes),
    );
}
