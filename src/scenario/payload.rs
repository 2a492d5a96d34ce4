use serde::{Deserialize, Serialize};

use crate::error::AppResult;

/// Body sent with every request. Field order is the wire order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestPayload {
    pub key1: String,
    pub key2: String,
}

impl Default for RequestPayload {
    fn default() -> Self {
        Self {
            key1: "value1".to_owned(),
            key2: "value2".to_owned(),
        }
    }
}

impl RequestPayload {
    /// Compact JSON encoding of the payload.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
