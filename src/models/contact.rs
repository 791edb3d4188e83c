use super::{DocumentError, parse_timestamp, to_iso};
use crate::validation::NewContactSubmission;
use chrono::{DateTime, Utc};
use mongodb::bson::{self, Bson, Document, doc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Returned to the submitter after a contact form is stored.
pub const SUBMISSION_ACKNOWLEDGEMENT: &str = "Thank you for contacting ARETION Informatics Solutions. We will get back to you within 24-48 hours.";

/// Attached to every record returned by the listing endpoint.
pub const RETRIEVAL_ACKNOWLEDGEMENT: &str = "Retrieved successfully";

/// An inquiry sent through the public contact form.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactSubmission {
    pub id: String,
    pub name: String,
    pub email: String,
    pub organization: Option<String>,
    /// Category tag chosen in the form, e.g. `sales` or `demo`
    pub interest: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct StoredContactSubmission {
    id: String,
    name: String,
    email: String,
    #[serde(default)]
    organization: Option<String>,
    #[serde(default)]
    interest: Option<String>,
    message: String,
    created_at: Bson,
}

impl ContactSubmission {
    pub fn new(input: NewContactSubmission) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            email: input.email,
            organization: input.organization,
            interest: input.interest,
            message: input.message,
            created_at: Utc::now(),
        }
    }

    pub fn to_document(&self) -> Document {
        doc! {
            "id": self.id.as_str(),
            "name": self.name.as_str(),
            "email": self.email.as_str(),
            "organization": self.organization.as_deref(),
            "interest": self.interest.as_deref(),
            "message": self.message.as_str(),
            "created_at": to_iso(&self.created_at),
        }
    }
}

/// Contact submission as seen by API callers.
///
/// ## Example JSON
/// ```json
/// {
///   "id": "3f1c8d2e-8f7a-4b7e-9a53-0c5d1e2f4a6b",
///   "name": "Test User",
///   "email": "test@example.com",
///   "organization": "Test Hospital",
///   "interest": "sales",
///   "message": "Hello",
///   "created_at": "2024-03-10T15:30:45.123456+00:00",
///   "success": true,
///   "message_response": "Retrieved successfully"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ContactSubmissionResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub organization: Option<String>,
    pub interest: Option<String>,
    pub message: String,
    pub created_at: String,
    pub success: bool,
    pub message_response: String,
}

impl ContactSubmissionResponse {
    /// Response for a freshly stored submission.
    pub fn acknowledged(submission: ContactSubmission) -> Self {
        Self {
            created_at: to_iso(&submission.created_at),
            id: submission.id,
            name: submission.name,
            email: submission.email,
            organization: submission.organization,
            interest: submission.interest,
            message: submission.message,
            success: true,
            message_response: SUBMISSION_ACKNOWLEDGEMENT.to_string(),
        }
    }

    /// Response entry for a submission read back from the store.
    ///
    /// A string `created_at` is returned exactly as stored; native BSON
    /// datetimes are rendered as RFC 3339.
    pub fn retrieved(document: Document) -> Result<Self, DocumentError> {
        let stored: StoredContactSubmission = bson::from_document(document)?;
        let created_at = match &stored.created_at {
            Bson::String(text) => text.clone(),
            other => to_iso(&parse_timestamp("created_at", other)?),
        };

        Ok(Self {
            id: stored.id,
            name: stored.name,
            email: stored.email,
            organization: stored.organization,
            interest: stored.interest,
            message: stored.message,
            created_at,
            success: true,
            message_response: RETRIEVAL_ACKNOWLEDGEMENT.to_string(),
        })
    }
}
