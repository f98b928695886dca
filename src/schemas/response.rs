use serde::{Deserialize, Serialize};

/// Outcome of a dispatched action. Every field is always populated
/// before the result is handed back to the serving layer.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ActionResult {
    pub succeeded: bool,
    pub message: String,
}

impl ActionResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            succeeded: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            message: message.into(),
        }
    }

    /// Result for an unrecognized trigger: nothing happened, nothing failed.
    pub fn unchanged() -> Self {
        Self {
            succeeded: true,
            message: "No action taken.".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StatusResponse {
    pub online: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct HealthResponse {
    pub server_status: String,
}
