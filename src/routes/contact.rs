use crate::error::ApiError;
use crate::models::contact::{ContactSubmission, ContactSubmissionResponse};
use crate::notification::{MailRouting, Notifier, NotifyError, template};
use crate::store::{Collection, DocumentStore, FIND_ALL_LIMIT};
use crate::validation::{self, NewContactSubmission};
use actix_web::{HttpResponse, get, post, web};
use serde_json::Value;

const SUBMIT_FAILED: &str = "Failed to submit contact form";
const LIST_FAILED: &str = "Failed to retrieve contact submissions";

/// # Submit Contact Form
///
/// Validates the form, stores the submission, then emails staff about it.
/// The email is best effort: a delivery failure is logged and the caller
/// still receives the acknowledgement.
///
/// ## Responses
/// - **200 OK**: [`ContactSubmissionResponse`] with `success: true`
/// - **422 Unprocessable Entity**: missing `name`/`email`/`message` or invalid email
/// - **500 Internal Server Error**: `{"detail": "Failed to submit contact form"}`
///
/// ## Example Request
/// ```json
/// {
///   "name": "Test User",
///   "email": "test@example.com",
///   "organization": "Test Hospital",
///   "interest": "sales",
///   "message": "Hello"
/// }
/// ```
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = NewContactSubmission,
    responses(
        (status = 200, description = "Submission stored", body = ContactSubmissionResponse),
        (status = 422, description = "Invalid request body", body = crate::validation::ValidationErrors),
        (status = 500, description = "Store failure")
    ),
    tag = "Contact"
)]
#[post("/contact")]
#[tracing::instrument(
    name = "submit_contact_form",
    skip_all,
    fields(submission_id = tracing::field::Empty)
)]
pub async fn submit_contact_form(
    body: web::Json<Value>,
    store: web::Data<dyn DocumentStore>,
    notifier: web::Data<dyn Notifier>,
    routing: web::Data<MailRouting>,
) -> Result<HttpResponse, ApiError> {
    let input = validation::validate_contact_submission(&body)?;
    let submission = ContactSubmission::new(input);
    tracing::Span::current().record("submission_id", submission.id.as_str());

    store
        .insert(Collection::ContactSubmissions, submission.to_document())
        .await
        .map_err(ApiError::store(SUBMIT_FAILED))?;

    tracing::info!(
        id = %submission.id,
        interest = submission.interest.as_deref().unwrap_or("-"),
        "contact submission stored"
    );

    notify_staff(&submission, notifier.get_ref(), &routing).await;

    Ok(HttpResponse::Ok().json(ContactSubmissionResponse::acknowledged(submission)))
}

/// Sends the staff notification and logs the outcome; never fails.
async fn notify_staff(submission: &ContactSubmission, notifier: &dyn Notifier, routing: &MailRouting) {
    let result = match template::compose(submission, routing) {
        Ok(message) => notifier.send(&message).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(receipt) => {
            tracing::info!(id = %submission.id, email_id = %receipt.id, "notification email sent");
        }
        Err(NotifyError::NotConfigured) => {
            tracing::warn!(id = %submission.id, "notification email skipped: provider not configured");
        }
        Err(e) => {
            tracing::warn!(id = %submission.id, error = %e, "failed to send notification email");
        }
    }
}

/// # List Contact Submissions
///
/// Returns at most 1000 submissions in insertion order, each projected into a
/// [`ContactSubmissionResponse`] with `created_at` as an ISO 8601 string.
#[utoipa::path(
    get,
    path = "/api/contact",
    responses(
        (status = 200, description = "Stored submissions", body = [ContactSubmissionResponse]),
        (status = 500, description = "Store failure")
    ),
    tag = "Contact"
)]
#[get("/contact")]
#[tracing::instrument(name = "list_contact_submissions", skip_all)]
pub async fn list_contact_submissions(
    store: web::Data<dyn DocumentStore>,
) -> Result<HttpResponse, ApiError> {
    let documents = store
        .find_all(Collection::ContactSubmissions, FIND_ALL_LIMIT)
        .await
        .map_err(ApiError::store(LIST_FAILED))?;

    let submissions: Vec<ContactSubmissionResponse> = documents
        .into_iter()
        .take(FIND_ALL_LIMIT as usize)
        .filter_map(|document| match ContactSubmissionResponse::retrieved(document) {
            Ok(submission) => Some(submission),
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable contact submission");
                None
            }
        })
        .collect();

    tracing::debug!(count = submissions.len(), "contact submissions listed");
    Ok(HttpResponse::Ok().json(submissions))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(submit_contact_form)
        .service(list_contact_submissions);
}

#[cfg(test)]
mod tests {
    use crate::models::contact::{
        ContactSubmissionResponse, RETRIEVAL_ACKNOWLEDGEMENT, SUBMISSION_ACKNOWLEDGEMENT,
    };
    use crate::notification::{DeliveryReceipt, MockNotifier, NotifyError};
    use crate::routes::test_support::test_app;
    use crate::store::memory::MemoryStore;
    use crate::store::{Collection, DocumentStore, MockDocumentStore, connection_refused};
    use actix_web::{http::StatusCode, test};
    use mongodb::bson::doc;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tracing_test::traced_test;

    fn valid_payload() -> Value {
        json!({
            "name": "Test User",
            "email": "test@example.com",
            "organization": "Test Hospital",
            "interest": "sales",
            "message": "Hello"
        })
    }

    fn delivering_notifier() -> MockNotifier {
        let mut notifier = MockNotifier::new();
        notifier.expect_send().returning(|_| {
            Ok(DeliveryReceipt {
                id: "email-1".to_string(),
            })
        });
        notifier
    }

    #[actix_web::test]
    async fn test_submit_stores_and_notifies() {
        let store = Arc::new(MemoryStore::new());
        let mut notifier = MockNotifier::new();
        notifier
            .expect_send()
            .withf(|message| {
                message.subject == "New Contact Form Submission - Sales Inquiry"
                    && message.to == "team@example.com"
                    && message.from == "onboarding@resend.dev"
                    && message.reply_to.as_deref() == Some("test@example.com")
            })
            .times(1)
            .returning(|_| {
                Ok(DeliveryReceipt {
                    id: "email-1".to_string(),
                })
            });
        let app = test_app(store.clone(), Arc::new(notifier)).await;

        let req = test::TestRequest::post()
            .uri("/api/contact")
            .set_json(valid_payload())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let created: ContactSubmissionResponse = test::read_body_json(resp).await;
        assert!(created.success);
        assert_eq!(created.message_response, SUBMISSION_ACKNOWLEDGEMENT);
        assert_eq!(created.name, "Test User");
        assert_eq!(created.organization.as_deref(), Some("Test Hospital"));

        let req = test::TestRequest::get().uri("/api/contact").to_request();
        let listed: Vec<ContactSubmissionResponse> =
            test::call_and_read_body_json(&app, req).await;

        assert_eq!(listed.len(), 1);
        let stored = &listed[0];
        assert_eq!(stored.id, created.id);
        assert_eq!(stored.email, "test@example.com");
        assert_eq!(stored.interest.as_deref(), Some("sales"));
        assert_eq!(stored.message, "Hello");
        assert_eq!(stored.created_at, created.created_at);
        assert_eq!(stored.message_response, RETRIEVAL_ACKNOWLEDGEMENT);
    }

    #[actix_web::test]
    async fn test_missing_required_fields_are_rejected_without_side_effects() {
        for missing in ["name", "email", "message"] {
            let store = Arc::new(MemoryStore::new());
            let mut notifier = MockNotifier::new();
            notifier.expect_send().never();
            let app = test_app(store.clone(), Arc::new(notifier)).await;

            let mut payload = valid_payload();
            payload.as_object_mut().unwrap().remove(missing);

            let req = test::TestRequest::post()
                .uri("/api/contact")
                .set_json(payload)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["detail"][0]["field"], missing);

            let req = test::TestRequest::get().uri("/api/contact").to_request();
            let listed: Vec<ContactSubmissionResponse> =
                test::call_and_read_body_json(&app, req).await;
            assert!(listed.is_empty(), "no record after rejecting missing {}", missing);
        }
    }

    #[actix_web::test]
    async fn test_invalid_email_is_rejected() {
        let store = Arc::new(MemoryStore::new());
        let mut notifier = MockNotifier::new();
        notifier.expect_send().never();
        let app = test_app(store.clone(), Arc::new(notifier)).await;

        let mut payload = valid_payload();
        payload["email"] = json!("invalid-email");

        let req = test::TestRequest::post()
            .uri("/api/contact")
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["detail"][0]["code"], "invalid_email");
        assert_eq!(store.len(Collection::ContactSubmissions), 0);
    }

    #[actix_web::test]
    async fn test_email_failure_does_not_change_response() {
        let store = Arc::new(MemoryStore::new());
        let mut notifier = MockNotifier::new();
        notifier.expect_send().times(1).returning(|_| {
            Err(NotifyError::Rejected {
                status: 500,
                message: "provider down".to_string(),
            })
        });
        let app = test_app(store.clone(), Arc::new(notifier)).await;

        let req = test::TestRequest::post()
            .uri("/api/contact")
            .set_json(valid_payload())
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let created: ContactSubmissionResponse = test::read_body_json(resp).await;
        assert!(created.success);
        assert_eq!(created.message_response, SUBMISSION_ACKNOWLEDGEMENT);
        assert_eq!(store.len(Collection::ContactSubmissions), 1);
    }

    #[actix_web::test]
    async fn test_unconfigured_provider_still_acknowledges() {
        let store = Arc::new(MemoryStore::new());
        let mut notifier = MockNotifier::new();
        notifier
            .expect_send()
            .returning(|_| Err(NotifyError::NotConfigured));
        let app = test_app(store, Arc::new(notifier)).await;

        let req = test::TestRequest::post()
            .uri("/api/contact")
            .set_json(valid_payload())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_store_failure_is_500_and_skips_email() {
        let mut store = MockDocumentStore::new();
        store
            .expect_insert()
            .returning(|_, _| Err(connection_refused("no primary")));
        let mut notifier = MockNotifier::new();
        notifier.expect_send().never();
        let app = test_app(Arc::new(store), Arc::new(notifier)).await;

        let req = test::TestRequest::post()
            .uri("/api/contact")
            .set_json(valid_payload())
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "detail": "Failed to submit contact form" }));
    }

    #[actix_web::test]
    async fn test_extra_fields_are_ignored() {
        let store = Arc::new(MemoryStore::new());
        let app = test_app(store, Arc::new(delivering_notifier())).await;

        let mut payload = valid_payload();
        payload["phone"] = json!("+44 20 0000 0000");
        payload["id"] = json!("client-chosen");

        let req = test::TestRequest::post()
            .uri("/api/contact")
            .set_json(payload)
            .to_request();
        let created: ContactSubmissionResponse = test::call_and_read_body_json(&app, req).await;
        assert_ne!(created.id, "client-chosen");
    }

    #[actix_web::test]
    async fn test_list_projects_legacy_documents() {
        let store = Arc::new(MemoryStore::new());
        store
            .insert(
                Collection::ContactSubmissions,
                doc! {
                    "id": "legacy",
                    "name": "Old User",
                    "email": "old@example.com",
                    "message": "From before",
                    "created_at": mongodb::bson::DateTime::from_millis(1_710_084_645_000),
                },
            )
            .await
            .unwrap();
        let app = test_app(store, Arc::new(MockNotifier::new())).await;

        let req = test::TestRequest::get().uri("/api/contact").to_request();
        let listed: Vec<ContactSubmissionResponse> =
            test::call_and_read_body_json(&app, req).await;

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].created_at, "2024-03-10T15:30:45+00:00");
        assert!(listed[0].organization.is_none());
        assert!(listed[0].success);
    }

    #[actix_web::test]
    async fn test_list_is_capped_at_limit() {
        let mut store = MockDocumentStore::new();
        store
            .expect_find_all()
            .withf(|collection, limit| {
                *collection == Collection::ContactSubmissions && *limit == 1000
            })
            .returning(|_, _| {
                Ok((0..1200)
                    .map(|i| {
                        doc! {
                            "id": format!("contact-{}", i),
                            "name": "Bulk",
                            "email": "bulk@example.com",
                            "message": "Hi",
                            "created_at": "2024-03-10T15:30:45+00:00",
                        }
                    })
                    .collect())
            });
        let app = test_app(Arc::new(store), Arc::new(MockNotifier::new())).await;

        let req = test::TestRequest::get().uri("/api/contact").to_request();
        let listed: Vec<ContactSubmissionResponse> =
            test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed.len(), 1000);
    }

    #[actix_web::test]
    #[traced_test]
    async fn test_handlers_run_inside_spans_without_logging_bodies() {
        let store = Arc::new(MemoryStore::new());
        let app = test_app(store, Arc::new(delivering_notifier())).await;

        let mut payload = valid_payload();
        payload["message"] = json!("confidential-message-body");

        let req = test::TestRequest::post()
            .uri("/api/contact")
            .set_json(payload)
            .to_request();
        let created: ContactSubmissionResponse = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::get().uri("/api/contact").to_request();
        let _: Vec<ContactSubmissionResponse> = test::call_and_read_body_json(&app, req).await;

        assert!(logs_contain("submit_contact_form"));
        assert!(logs_contain(&created.id));
        assert!(logs_contain("list_contact_submissions"));
        assert!(!logs_contain("confidential-message-body"));
        assert!(!logs_contain("test@example.com"));
    }

    #[actix_web::test]
    async fn test_list_keeps_offset_less_timestamps() {
        let store = Arc::new(MemoryStore::new());
        store
            .insert(
                Collection::ContactSubmissions,
                doc! {
                    "id": "naive",
                    "name": "Old User",
                    "email": "old@example.com",
                    "organization": null,
                    "interest": "demo",
                    "message": "Written by another tool",
                    "created_at": "2024-03-10T15:30:45",
                },
            )
            .await
            .unwrap();
        let app = test_app(store, Arc::new(MockNotifier::new())).await;

        let req = test::TestRequest::get().uri("/api/contact").to_request();
        let listed: Vec<ContactSubmissionResponse> =
            test::call_and_read_body_json(&app, req).await;

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, "naive");
        assert_eq!(listed[0].created_at, "2024-03-10T15:30:45");
    }
}
