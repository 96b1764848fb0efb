//! Hosted Service Bindings
//!
//! Frontend bindings to the page-installed Firebase bridge, organized by
//! domain. The bridge exposes one `invoke(cmd, args)` entry point on
//! `window.__FIREBASE_BRIDGE__`; calls resolve with the command result and
//! reject with a `{ code, message }` payload.

mod admins;
mod auth;
mod checklists;
mod error;

use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["window", "__FIREBASE_BRIDGE__"])]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

/// Invoke a bridge command and decode its result.
pub(crate) async fn call<T: DeserializeOwned>(cmd: &str, args: JsValue) -> Result<T, ServiceError> {
    let value = invoke(cmd, args).await.map_err(ServiceError::from_js)?;
    serde_wasm_bindgen::from_value(value).map_err(|e| ServiceError::Other(e.to_string()))
}

pub use admins::*;
pub use auth::*;
pub use checklists::*;
pub use error::ServiceError;
