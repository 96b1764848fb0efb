//! Admin Roster Bindings
//!
//! Reads and mutations against the `admins` collection. Timestamps come
//! back from the bridge normalized to ISO-8601 strings.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use super::ServiceError;
use crate::models::AdminRecord;

#[derive(Serialize)]
struct AddAdminArgs<'a> {
    email: &'a str,
    #[serde(rename = "addedBy")]
    added_by: &'a str,
}

#[derive(Serialize)]
struct IdArgs<'a> {
    id: &'a str,
}

/// Full roster scan, ordered by email.
pub async fn list_admins() -> Result<Vec<AdminRecord>, ServiceError> {
    super::call("list_admins", JsValue::NULL).await
}

pub async fn add_admin(email: &str, added_by: &str) -> Result<AdminRecord, ServiceError> {
    let args = serde_wasm_bindgen::to_value(&AddAdminArgs { email, added_by })
        .map_err(|e| ServiceError::Other(e.to_string()))?;
    super::call("add_admin", args).await
}

pub async fn delete_admin(id: &str) -> Result<(), ServiceError> {
    let args = serde_wasm_bindgen::to_value(&IdArgs { id })
        .map_err(|e| ServiceError::Other(e.to_string()))?;
    super::call("delete_admin", args).await
}
