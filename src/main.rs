use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware::Logger};
use anyhow::Context;
use contact_api::config::{AppConfig, CorsOrigins};
use contact_api::notification::ResendNotifier;
use contact_api::openapi::ApiDoc;
use contact_api::state::AppState;
use contact_api::store::MongoStore;
use contact_api::telemetry::init_tracing;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Contact API Entry Point
///
/// Loads configuration from the environment (and `.env` if present), opens the
/// single MongoDB client, and serves the `/api` routes together with Swagger UI.
///
/// # Endpoints
/// - REST API: `/api/*` (configured in routes)
/// - Swagger UI: `/swagger-ui/`
/// - OpenAPI spec: `/api-docs/openapi.json`
///
/// The store connection is closed after the server has drained on SIGINT/SIGTERM.
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;
    init_tracing(&config.log_level);

    let store = Arc::new(
        MongoStore::connect(&config.mongo_url, &config.db_name)
            .await
            .context("failed to create document store client")?,
    );

    let notifier = ResendNotifier::new(
        config.email.api_url.clone(),
        config.email.api_key.clone(),
        config.email.timeout,
    )
    .context("failed to build email client")?;
    if !notifier.is_configured() {
        tracing::warn!("RESEND_API_KEY not set; contact notifications are disabled");
    }

    let state = AppState::new(store.clone(), Arc::new(notifier), config.email.routing());
    let cors_origins = config.cors_origins.clone();
    let openapi = ApiDoc::openapi();

    tracing::info!(host = %config.host, port = config.port, "starting HTTP server");

    HttpServer::new(move || {
        App::new()
            .wrap(cors(&cors_origins))
            .wrap(Logger::default())
            .configure(|cfg| state.register(cfg))
            .configure(contact_api::routes::configure)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    store.shutdown().await;
    Ok(())
}

fn cors(origins: &CorsOrigins) -> Cors {
    let cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600);

    match origins {
        CorsOrigins::Any => cors.allow_any_origin(),
        CorsOrigins::List(list) => list
            .iter()
            .fold(cors.supports_credentials(), |cors, origin| {
                cors.allowed_origin(origin)
            }),
    }
}
