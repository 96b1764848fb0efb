//! Checklist Store Bindings
//!
//! Whole-document reads and writes against the `checklists` collection.

use serde::Serialize;

use super::ServiceError;
use crate::models::ChecklistInstance;

#[derive(Serialize)]
struct SaveChecklistArgs<'a> {
    id: &'a str,
    data: &'a ChecklistInstance,
}

#[derive(Serialize)]
struct ListChecklistsArgs<'a> {
    #[serde(rename = "createdBy", skip_serializing_if = "Option::is_none")]
    created_by: Option<&'a str>,
}

#[derive(Serialize)]
struct IdArgs<'a> {
    id: &'a str,
}

/// Write the full instance keyed by its id; a prior save of the same id is
/// overwritten (last write wins).
pub async fn save_checklist(checklist: &ChecklistInstance) -> Result<(), ServiceError> {
    let args = serde_wasm_bindgen::to_value(&SaveChecklistArgs {
        id: &checklist.id,
        data: checklist,
    })
    .map_err(|e| ServiceError::Other(e.to_string()))?;
    super::call("set_checklist", args).await
}

/// Fetch checklists ordered by date descending, optionally scoped to a
/// creator (the personal history view); `None` fetches unscoped (admin).
pub async fn list_checklists(
    created_by: Option<&str>,
) -> Result<Vec<ChecklistInstance>, ServiceError> {
    let args = serde_wasm_bindgen::to_value(&ListChecklistsArgs { created_by })
        .map_err(|e| ServiceError::Other(e.to_string()))?;
    super::call("list_checklists", args).await
}

/// Point read by document id; `Ok(None)` when the document is absent.
pub async fn get_checklist(id: &str) -> Result<Option<ChecklistInstance>, ServiceError> {
    let args = serde_wasm_bindgen::to_value(&IdArgs { id })
        .map_err(|e| ServiceError::Other(e.to_string()))?;
    match super::call("get_checklist", args).await {
        Ok(checklist) => Ok(checklist),
        Err(ServiceError::NotFound) => Ok(None),
        Err(err) => Err(err),
    }
}
