use super::{DocumentError, parse_timestamp, to_iso};
use crate::validation::NewStatusCheck;
use chrono::{DateTime, Utc};
use mongodb::bson::{self, Bson, Document, doc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A heartbeat record submitted by a named client.
///
/// Created once by `POST /status` and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StatusCheck {
    pub id: String,
    pub client_name: String,
    pub timestamp: DateTime<Utc>,
}

/// Persisted shape; `timestamp` is kept raw so both string and native
/// datetimes can be normalised.
#[derive(Deserialize)]
struct StoredStatusCheck {
    id: String,
    client_name: String,
    timestamp: Bson,
}

impl StatusCheck {
    pub fn new(input: NewStatusCheck) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            client_name: input.client_name,
            timestamp: Utc::now(),
        }
    }

    pub fn to_document(&self) -> Document {
        doc! {
            "id": self.id.as_str(),
            "client_name": self.client_name.as_str(),
            "timestamp": to_iso(&self.timestamp),
        }
    }

    pub fn from_document(document: Document) -> Result<Self, DocumentError> {
        let stored: StoredStatusCheck = bson::from_document(document)?;
        Ok(Self {
            timestamp: parse_timestamp("timestamp", &stored.timestamp)?,
            id: stored.id,
            client_name: stored.client_name,
        })
    }
}
