//! Auth Service Bindings
//!
//! Login/logout, the auth-state subscription and the cross-tab login
//! broadcast. Session persistence (durable vs cleared-on-close) is applied
//! by the bridge from the `rememberMe` flag before authenticating.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use super::ServiceError;
use crate::models::Identity;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "__FIREBASE_BRIDGE__"], js_name = onAuthStateChanged)]
    fn on_auth_state_changed(callback: &js_sys::Function);
}

/// localStorage key toggled on login completion; other tabs observe it and
/// reload.
const LOGIN_BROADCAST_KEY: &str = "tenken-login-broadcast";

#[derive(Serialize)]
struct LoginArgs<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(rename = "rememberMe")]
    remember_me: bool,
}

pub async fn login(
    email: &str,
    password: &str,
    remember_me: bool,
) -> Result<Identity, ServiceError> {
    let args = serde_wasm_bindgen::to_value(&LoginArgs {
        email,
        password,
        remember_me,
    })
    .map_err(|e| ServiceError::Other(e.to_string()))?;
    super::call("login", args).await
}

pub async fn logout() -> Result<(), ServiceError> {
    super::call("logout", JsValue::NULL).await
}

/// Register the live auth-state listener. The handler fires on every
/// session notification (login, logout, token refresh) with the current
/// identity or `None`.
pub fn subscribe_auth_state(handler: impl Fn(Option<Identity>) + 'static) {
    let closure = Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| {
        let identity = serde_wasm_bindgen::from_value::<Option<Identity>>(value).unwrap_or(None);
        handler(identity);
    });
    on_auth_state_changed(closure.as_ref().unchecked_ref());
    // Listener lives for the whole page lifetime.
    closure.forget();
}

/// Toggle the shared-storage key so other open tabs reload.
pub fn broadcast_login() {
    if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
        let _ = storage.set_item(LOGIN_BROADCAST_KEY, &crate::time::now_ms().to_string());
    }
}

/// Whether a storage event is the login broadcast from another tab.
pub fn is_login_broadcast(event: &web_sys::StorageEvent) -> bool {
    event.key().as_deref() == Some(LOGIN_BROADCAST_KEY)
}
