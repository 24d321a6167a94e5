use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::CustomerId;

/// Contents of a server-side session record.
///
/// Sessions are written by the storefront's login flow as a JSON object.
/// Only `customerID` is read here; every other key (the cookie settings,
/// cart state, flash messages) is kept in `extra` untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    /// Customer the session belongs to. `None` for anonymous sessions.
    #[serde(rename = "customerID", default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<CustomerId>,
    /// Remaining session keys.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SessionData {
    /// Parses a raw session blob as returned by a session store.
    ///
    /// # Errors
    ///
    /// Returns an error if the blob is not a JSON object or if `customerID`
    /// is present but not an integer.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}
