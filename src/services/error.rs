//! Service Error Taxonomy
//!
//! Store and auth failures decoded from the bridge's rejection payload.

use serde::Deserialize;
use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// Auth service rejected the credentials
    #[error("invalid credentials")]
    InvalidCredentials,
    /// Store denied access (security rules)
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    /// Store query needs an index
    #[error("failed precondition: {0}")]
    FailedPrecondition(String),
    /// Point read found no document
    #[error("document not found")]
    NotFound,
    #[error("{0}")]
    Other(String),
}

#[derive(Deserialize)]
struct RejectionPayload {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

impl ServiceError {
    pub(crate) fn from_parts(code: &str, message: String) -> Self {
        match code {
            "permission-denied" => ServiceError::PermissionDenied(message),
            "failed-precondition" => ServiceError::FailedPrecondition(message),
            "not-found" => ServiceError::NotFound,
            c if c.starts_with("auth/") => ServiceError::InvalidCredentials,
            _ => ServiceError::Other(message),
        }
    }

    /// Decode a rejected-promise payload (`{ code, message }`).
    pub(crate) fn from_js(value: JsValue) -> Self {
        match serde_wasm_bindgen::from_value::<RejectionPayload>(value) {
            Ok(payload) => Self::from_parts(&payload.code, payload.message),
            Err(e) => ServiceError::Other(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_map_to_the_right_variants() {
        assert_eq!(
            ServiceError::from_parts("permission-denied", "rules".into()),
            ServiceError::PermissionDenied("rules".into())
        );
        assert_eq!(
            ServiceError::from_parts("failed-precondition", "index".into()),
            ServiceError::FailedPrecondition("index".into())
        );
        assert_eq!(
            ServiceError::from_parts("not-found", String::new()),
            ServiceError::NotFound
        );
        assert_eq!(
            ServiceError::from_parts("auth/wrong-password", "nope".into()),
            ServiceError::InvalidCredentials
        );
        assert_eq!(
            ServiceError::from_parts("unavailable", "offline".into()),
            ServiceError::Other("offline".into())
        );
    }
}
