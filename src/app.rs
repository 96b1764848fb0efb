//! Checklist App
//!
//! View controller: owns the view state, drives it from the URL fragment,
//! and wires the auth subscription, the cross-tab login broadcast and the
//! detail fetch (with a generation token so a superseded fetch cannot
//! clobber a newer view).

use std::cell::Cell;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::admin::AdminCache;
use crate::components::{
    AdminHistory, AuthForm, ChecklistDetail, ChecklistForm, ChecklistHistory,
};
use crate::routing::{self, FragmentToken, Resolution, ViewState};
use crate::services;
use crate::session::{self, SessionState, SessionStateStoreFields, SessionStore};

/// Current URL fragment, including the leading `#` when present.
pub fn current_fragment() -> String {
    web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default()
}

/// Navigate by rewriting the fragment; the hashchange listener picks the
/// transition up, so it is replayable via bookmark and back button.
pub fn navigate_to(token: &FragmentToken) {
    if let Some(win) = web_sys::window() {
        let _ = win.location().set_hash(&token.as_fragment());
    }
}

#[component]
pub fn App() -> impl IntoView {
    let session: SessionStore = Store::new(SessionState::new());
    provide_context(session);
    let cache = AdminCache::new();
    provide_context(cache.clone());

    session::init_auth_listener(session, cache);

    let (view, set_view) = signal(ViewState::Loading);
    let (fragment, set_fragment) = signal(current_fragment());
    // Bumped on every navigation; an in-flight detail fetch only applies if
    // its captured generation is still current.
    let generation = Rc::new(Cell::new(0u32));

    let on_hashchange = Closure::<dyn FnMut(web_sys::HashChangeEvent)>::new(
        move |_: web_sys::HashChangeEvent| {
            set_fragment.set(current_fragment());
        },
    );
    let on_storage =
        Closure::<dyn FnMut(web_sys::StorageEvent)>::new(move |ev: web_sys::StorageEvent| {
            if services::is_login_broadcast(&ev) {
                // Another tab completed a login; a full reload picks it up.
                if let Some(win) = web_sys::window() {
                    let _ = win.location().reload();
                }
            }
        });
    if let Some(win) = web_sys::window() {
        let _ = win
            .add_event_listener_with_callback("hashchange", on_hashchange.as_ref().unchecked_ref());
        let _ =
            win.add_event_listener_with_callback("storage", on_storage.as_ref().unchecked_ref());
    }
    // Listeners live for the whole page lifetime.
    on_hashchange.forget();
    on_storage.forget();

    // Re-resolve the view whenever the fragment or the session changes.
    Effect::new({
        let generation = Rc::clone(&generation);
        move |_| {
            let raw = fragment.get();
            if session.loading().get() {
                set_view.set(ViewState::Loading);
                return;
            }
            let token = FragmentToken::parse(&raw);
            let email = session.current_user().get().map(|user| user.email);
            let is_admin = session.is_admin().get();

            generation.set(generation.get().wrapping_add(1));
            let current_gen = generation.get();

            match routing::resolve(&token, email.as_deref(), is_admin) {
                Resolution::Show(next) => set_view.set(next),
                Resolution::FetchDetail(id) => {
                    set_view.set(ViewState::Loading);
                    let viewer = email.unwrap_or_default();
                    let generation = Rc::clone(&generation);
                    spawn_local(async move {
                        let fetched = services::get_checklist(&id).await;
                        if generation.get() != current_gen {
                            web_sys::console::log_1(
                                &format!("[VIEW] discarding stale detail fetch for {id}").into(),
                            );
                            return;
                        }
                        match fetched {
                            Ok(Some(checklist)) => {
                                let from_admin = routing::detail_origin(
                                    &viewer,
                                    is_admin,
                                    checklist.created_by.as_deref(),
                                );
                                set_view.set(ViewState::Detail {
                                    checklist,
                                    from_admin,
                                });
                            }
                            Ok(None) => {
                                // Absent document: silent redirect, no error.
                                web_sys::console::warn_1(
                                    &format!("[VIEW] checklist {id} not found").into(),
                                );
                                navigate_to(&FragmentToken::History);
                            }
                            Err(err) => {
                                web_sys::console::error_1(
                                    &format!("[VIEW] detail fetch failed: {err}").into(),
                                );
                                navigate_to(&FragmentToken::History);
                            }
                        }
                    });
                }
            }
        }
    });

    view! {
        <div class="app">
            {move || match view.get() {
                ViewState::Loading => {
                    view! { <div class="loading">"読み込み中..."</div> }.into_any()
                }
                ViewState::New => {
                    if session.current_user().get().is_some() {
                        view! { <ChecklistForm /> }.into_any()
                    } else {
                        view! { <AuthForm wanted=FragmentToken::New require_notice=false /> }
                            .into_any()
                    }
                }
                ViewState::AuthForm => {
                    view! { <AuthForm wanted=FragmentToken::New require_notice=false /> }
                        .into_any()
                }
                ViewState::AuthRequired { wanted } => {
                    view! { <AuthForm wanted=wanted require_notice=true /> }.into_any()
                }
                ViewState::History => view! { <ChecklistHistory /> }.into_any(),
                ViewState::AdminHistory => view! { <AdminHistory /> }.into_any(),
                ViewState::Detail { checklist, from_admin } => {
                    view! { <ChecklistDetail checklist=checklist is_from_admin=from_admin /> }
                        .into_any()
                }
            }}
        </div>
    }
}
