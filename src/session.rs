//! Session Store
//!
//! App-global identity state with field-level reactivity: the current user,
//! its resolved admin flag, and the initial-loading flag that keeps
//! dependent views from rendering with a default-false admin flag.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::admin::{self, AdminCache};
use crate::models::Identity;
use crate::services;

#[derive(Clone, Debug, Default, Store)]
pub struct SessionState {
    /// Signed-in identity, or none
    pub current_user: Option<Identity>,
    /// Resolved admin flag for the current identity
    pub is_admin: bool,
    /// True until the first auth notification has fully resolved
    pub loading: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            loading: true,
            ..Default::default()
        }
    }
}

// The `Store` derive generates the `SessionStateStoreFields` accessor
// trait; consumers import it alongside the alias.

/// Type alias for the store
pub type SessionStore = Store<SessionState>;

/// Get the session store from context
pub fn use_session() -> SessionStore {
    expect_context::<SessionStore>()
}

/// Wire the auth-state subscription into the store. Every notification
/// recomputes the identity, then resolves the admin flag through the shared
/// cache; the synchronous classification fills in first so render paths
/// that cannot await get a best-effort value.
pub fn init_auth_listener(store: SessionStore, cache: AdminCache) {
    services::subscribe_auth_state(move |identity| {
        // Token refreshes re-notify with the same identity; writing it
        // again would ripple into every dependent view.
        if store.current_user().get_untracked() != identity {
            store.current_user().set(identity.clone());
        }
        match identity {
            Some(user) => {
                store
                    .is_admin()
                    .set(admin::is_admin_sync(&cache, &user.email, crate::time::now_ms()));
                let cache = cache.clone();
                spawn_local(async move {
                    let flag = admin::is_admin(&cache, &user.email).await;
                    store.is_admin().set(flag);
                    store.loading().set(false);
                });
            }
            None => {
                store.is_admin().set(false);
                store.loading().set(false);
            }
        }
    });
}
