use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Debug, PartialEq, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

impl HealthResponse {
    pub fn up() -> Self {
        Self::with_status("UP")
    }

    /// The document store did not answer its ping.
    pub fn down() -> Self {
        Self::with_status("DOWN")
    }

    fn with_status(status: &str) -> Self {
        Self {
            status: status.to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    pub fn is_up(&self) -> bool {
        self.status == "UP"
    }
}
