use utoipa::OpenApi;

/// OpenAPI Specification Documentation
///
/// Generated at compile time from the `#[utoipa::path]` annotations on the
/// handlers and served at `/api-docs/openapi.json`, with Swagger UI at
/// `/swagger-ui/`.
///
/// # Endpoints
/// - Root: `GET /api/`
/// - Health Check: `GET /api/health`
/// - Status Checks: `POST /api/status`, `GET /api/status`
/// - Contact: `POST /api/contact`, `GET /api/contact`
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::root::root,
        crate::routes::health::health,
        crate::routes::status::create_status_check,
        crate::routes::status::list_status_checks,
        crate::routes::contact::submit_contact_form,
        crate::routes::contact::list_contact_submissions,
    ),
    components(
        schemas(
            crate::routes::root::RootResponse,
            crate::models::health::HealthResponse,
            crate::models::status::StatusCheck,
            crate::models::contact::ContactSubmissionResponse,
            crate::validation::NewStatusCheck,
            crate::validation::NewContactSubmission,
            crate::validation::FieldError,
            crate::validation::ValidationErrors
        )
    ),
    tags(
        (name = "Root", description = "Service banner"),
        (name = "Health Check", description = "Service health monitoring endpoints"),
        (name = "Status Checks", description = "Client heartbeat records"),
        (name = "Contact", description = "Contact form submissions")
    ),
    info(
        description = "Status checks and contact-form submissions with email notification",
        title = "ARETION Informatics Solutions API",
        version = "0.1.0",
    )
)]
pub struct ApiDoc;
