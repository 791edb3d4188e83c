//! Explicit validators for incoming request bodies.
//!
//! Each validator walks a raw JSON value, records every field that violates
//! the expected shape and only returns a typed input when the whole body is
//! acceptable. Handlers call them before touching the store, so a rejected
//! body never produces a write or an email.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use utoipa::ToSchema;

/// Validates an email address according to RFC 5322 and RFC 6531, restricted
/// to dotted host names.
///
/// # Examples
/// ```
/// use contact_api::validation::syntax::is_valid_email;
///
/// assert!(is_valid_email("test@example.com"));
/// assert!(!is_valid_email("invalid-email"));
/// ```
pub mod syntax;

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    /// Name of the offending field, or `body` when the payload itself is unusable
    pub field: String,
    /// Machine-readable reason: `missing`, `string_type`, `invalid_email`, `object_type` or `json_invalid`
    pub code: String,
    pub message: String,
}

/// Every violation found in one request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn single(field: &str, code: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.push(field, code, message);
        errors
    }

    fn push(&mut self, field: &str, code: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.to_string(),
            code: code.to_string(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|error| error.field.as_str())
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.fields().collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Validated body of `POST /status`.
#[derive(Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct NewStatusCheck {
    pub client_name: String,
}

/// Validated body of `POST /contact`.
#[derive(Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct NewContactSubmission {
    pub name: String,
    /// Trimmed, syntactically valid address
    pub email: String,
    pub organization: Option<String>,
    /// Category tag: `sales`, `demo`, `implementation`, `partnership`, `research`, `careers` or `other`
    pub interest: Option<String>,
    pub message: String,
}

/// Reads fields out of a JSON object while accumulating violations.
struct FieldReader<'a> {
    object: &'a Map<String, Value>,
    errors: ValidationErrors,
}

impl<'a> FieldReader<'a> {
    fn new(body: &'a Value) -> Result<Self, ValidationErrors> {
        match body {
            Value::Object(object) => Ok(Self {
                object,
                errors: ValidationErrors::default(),
            }),
            _ => Err(ValidationErrors::single(
                "body",
                "object_type",
                "Request body must be a JSON object",
            )),
        }
    }

    fn required_str(&mut self, field: &str) -> Option<&'a str> {
        match self.object.get(field) {
            Some(Value::String(value)) => Some(value.as_str()),
            None | Some(Value::Null) => {
                self.errors.push(field, "missing", "Field required");
                None
            }
            Some(_) => {
                self.errors
                    .push(field, "string_type", "Input should be a valid string");
                None
            }
        }
    }

    fn optional_str(&mut self, field: &str) -> Option<&'a str> {
        match self.object.get(field) {
            Some(Value::String(value)) => Some(value.as_str()),
            None | Some(Value::Null) => None,
            Some(_) => {
                self.errors
                    .push(field, "string_type", "Input should be a valid string");
                None
            }
        }
    }

    fn email(&mut self, field: &str) -> Option<String> {
        let value = self.required_str(field)?.trim();
        if syntax::is_valid_email(value) {
            Some(value.to_string())
        } else {
            self.errors.push(
                field,
                "invalid_email",
                "value is not a valid email address",
            );
            None
        }
    }

    fn finish<T>(self, value: Option<T>) -> Result<T, ValidationErrors> {
        match value {
            Some(value) if self.errors.is_empty() => Ok(value),
            _ => Err(self.errors),
        }
    }
}

/// Validates the body of a status-check creation request.
pub fn validate_status_check(body: &Value) -> Result<NewStatusCheck, ValidationErrors> {
    let mut reader = FieldReader::new(body)?;
    let client_name = reader.required_str("client_name");

    let value = client_name.map(|client_name| NewStatusCheck {
        client_name: client_name.to_string(),
    });
    reader.finish(value)
}

/// Validates the body of a contact-form submission.
///
/// All fields are inspected before returning, so the error lists every
/// missing or malformed field at once.
pub fn validate_contact_submission(body: &Value) -> Result<NewContactSubmission, ValidationErrors> {
    let mut reader = FieldReader::new(body)?;
    let name = reader.required_str("name");
    let email = reader.email("email");
    let organization = reader.optional_str("organization");
    let interest = reader.optional_str("interest");
    let message = reader.required_str("message");

    let value = match (name, email, message) {
        (Some(name), Some(email), Some(message)) => Some(NewContactSubmission {
            name: name.to_string(),
            email,
            organization: organization.map(str::to_string),
            interest: interest.map(str::to_string),
            message: message.to_string(),
        }),
        _ => None,
    };
    reader.finish(value)
}
