use crate::error::ApiError;
use crate::models::status::StatusCheck;
use crate::store::{Collection, DocumentStore, FIND_ALL_LIMIT};
use crate::validation::{self, NewStatusCheck};
use actix_web::{HttpResponse, get, post, web};
use serde_json::Value;

const CREATE_FAILED: &str = "Failed to create status check";
const LIST_FAILED: &str = "Failed to retrieve status checks";

/// # Create Status Check
///
/// Records a heartbeat for `client_name` with a generated id and UTC timestamp.
///
/// ## Responses
/// - **200 OK**: the stored [`StatusCheck`]
/// - **422 Unprocessable Entity**: `client_name` missing or not a string
/// - **500 Internal Server Error**: the store rejected the write
#[utoipa::path(
    post,
    path = "/api/status",
    request_body = NewStatusCheck,
    responses(
        (status = 200, description = "Status check recorded", body = StatusCheck),
        (status = 422, description = "Invalid request body", body = crate::validation::ValidationErrors),
        (status = 500, description = "Store failure")
    ),
    tag = "Status Checks"
)]
#[post("/status")]
#[tracing::instrument(name = "create_status_check", skip_all)]
pub async fn create_status_check(
    body: web::Json<Value>,
    store: web::Data<dyn DocumentStore>,
) -> Result<HttpResponse, ApiError> {
    let input = validation::validate_status_check(&body)?;
    let check = StatusCheck::new(input);

    store
        .insert(Collection::StatusChecks, check.to_document())
        .await
        .map_err(ApiError::store(CREATE_FAILED))?;

    tracing::info!(id = %check.id, client_name = %check.client_name, "status check recorded");
    Ok(HttpResponse::Ok().json(check))
}

/// # List Status Checks
///
/// Returns at most 1000 status checks in insertion order. Stored timestamps
/// are parsed back into datetimes; records that cannot be read are skipped.
#[utoipa::path(
    get,
    path = "/api/status",
    responses(
        (status = 200, description = "Recorded status checks", body = [StatusCheck]),
        (status = 500, description = "Store failure")
    ),
    tag = "Status Checks"
)]
#[get("/status")]
#[tracing::instrument(name = "list_status_checks", skip_all)]
pub async fn list_status_checks(
    store: web::Data<dyn DocumentStore>,
) -> Result<HttpResponse, ApiError> {
    let documents = store
        .find_all(Collection::StatusChecks, FIND_ALL_LIMIT)
        .await
        .map_err(ApiError::store(LIST_FAILED))?;

    let checks: Vec<StatusCheck> = documents
        .into_iter()
        .take(FIND_ALL_LIMIT as usize)
        .filter_map(|document| match StatusCheck::from_document(document) {
            Ok(check) => Some(check),
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable status check");
                None
            }
        })
        .collect();

    tracing::debug!(count = checks.len(), "status checks listed");
    Ok(HttpResponse::Ok().json(checks))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create_status_check).service(list_status_checks);
}
