//! Personal History Component
//!
//! Fetches the signed-in user's checklists (owner-scoped, date descending)
//! and filters them client-side.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use super::{report_store_error, ChecklistCard};
use crate::filter;
use crate::models::ChecklistInstance;
use crate::routing::FragmentToken;
use crate::services;
use crate::session::{use_session, SessionStateStoreFields};

#[component]
pub fn ChecklistHistory() -> impl IntoView {
    let session = use_session();

    let (checklists, set_checklists) = signal(Vec::<ChecklistInstance>::new());
    let (loading, set_loading) = signal(true);
    let (search_date, set_search_date) = signal(String::new());
    let (search_inspector, set_search_inspector) = signal(String::new());

    Effect::new(move |_| {
        let Some(user) = session.current_user().get() else {
            return;
        };
        set_loading.set(true);
        spawn_local(async move {
            web_sys::console::log_1(
                &format!("[HISTORY] fetching checklists for {}", user.email).into(),
            );
            match services::list_checklists(Some(&user.email)).await {
                Ok(fetched) => {
                    web_sys::console::log_1(
                        &format!("[HISTORY] fetched {} checklists", fetched.len()).into(),
                    );
                    set_checklists.set(fetched);
                }
                Err(err) => report_store_error("[HISTORY]", &err),
            }
            set_loading.set(false);
        });
    });

    let filtered = move || {
        let date_query = search_date.get();
        let inspector_query = search_inspector.get();
        checklists
            .get()
            .into_iter()
            .filter(|c| {
                filter::matches_date(c, &date_query)
                    && filter::matches_inspector(c, &inspector_query)
            })
            .collect::<Vec<_>>()
    };

    view! {
        <div class="history-container">
            <header class="history-header">
                <div class="header-top">
                    <h1>"点検履歴"</h1>
                    <button
                        class="new-checklist-button"
                        on:click=move |_| crate::app::navigate_to(&FragmentToken::New)
                    >
                        "新規点検作成"
                    </button>
                </div>

                <div class="search-filters">
                    <div class="filter-group">
                        <label>"日付で検索:"</label>
                        <input
                            type="date"
                            class="date-filter"
                            prop:value=move || search_date.get()
                            on:input=move |ev| {
                                let target = ev.target().unwrap();
                                let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                                set_search_date.set(input.value());
                            }
                        />
                    </div>
                    <div class="filter-group">
                        <label>"点検者で検索:"</label>
                        <input
                            type="text"
                            class="inspector-filter"
                            placeholder="点検者名を入力"
                            prop:value=move || search_inspector.get()
                            on:input=move |ev| {
                                let target = ev.target().unwrap();
                                let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                                set_search_inspector.set(input.value());
                            }
                        />
                    </div>
                    <button
                        class="clear-filters"
                        on:click=move |_| {
                            set_search_date.set(String::new());
                            set_search_inspector.set(String::new());
                        }
                    >
                        "クリア"
                    </button>
                </div>
            </header>

            <main class="history-main">
                {move || {
                    if loading.get() {
                        return view! {
                            <div class="loading">"チェックリスト履歴を読み込み中..."</div>
                        }
                        .into_any();
                    }
                    let visible = filtered();
                    if visible.is_empty() {
                        let message = if checklists.get().is_empty() {
                            "保存された点検結果がありません。"
                        } else {
                            "検索条件に一致する点検結果がありません。"
                        };
                        view! { <div class="no-results">{message}</div> }.into_any()
                    } else {
                        view! {
                            <div class="checklist-grid">
                                <For
                                    each=move || filtered()
                                    key=|checklist| checklist.id.clone()
                                    children=move |checklist| {
                                        view! {
                                            <ChecklistCard checklist=checklist show_creator=false />
                                        }
                                    }
                                />
                            </div>
                        }
                        .into_any()
                    }
                }}
            </main>
        </div>
    }
}
