//! Checklist Editing Surface
//!
//! Renders today's instance, tracks per-leaf checked/note state and
//! performs the save. The instance lives outside the reactive graph: leaf
//! edits mutate it in place without rebuilding the form, so the input
//! being typed into keeps focus. Only a fresh instance bumps `version`
//! and re-renders. Saving is disabled entirely while the inspector name
//! is empty.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use super::alert;
use crate::models::{ChecklistInstance, SectionItem};
use crate::routing::FragmentToken;
use crate::services;
use crate::session::{use_session, SessionStateStoreFields};
use crate::template::{self, SPECIAL_NOTES_SECTION};

/// Whether an auth notification requires a fresh instance. Same-identity
/// notifications (token refresh) must keep the in-progress checks.
fn needs_fresh_instance(prev: Option<&str>, email: &str) -> bool {
    prev != Some(email)
}

#[component]
pub fn ChecklistForm() -> impl IntoView {
    let session = use_session();

    let state = StoredValue::new(None::<ChecklistInstance>);
    let (version, set_version) = signal(0u32);
    let (inspector, set_inspector) = signal(String::new());
    let (weather, set_weather) = signal(String::new());
    let (saving, set_saving) = signal(false);

    // One fresh instance per editing session, re-created only if the
    // identity actually changes underneath us.
    Effect::new(move |prev: Option<String>| {
        let email = session
            .current_user()
            .get()
            .map(|user| user.email)
            .unwrap_or_default();
        if needs_fresh_instance(prev.as_deref(), &email) {
            state.set_value(Some(template::new_for_today(&email)));
            set_version.update(|v| *v += 1);
        }
        email
    });

    let save = move |_: web_sys::MouseEvent| {
        let Some(mut updated) = state.get_value() else {
            return;
        };
        if session.current_user().get().is_none() {
            return;
        }
        updated.inspector = inspector.get();
        updated.weather = weather.get();
        updated.completed_at = Some(crate::time::iso_now());
        set_saving.set(true);
        spawn_local(async move {
            match services::save_checklist(&updated).await {
                Ok(()) => {
                    state.set_value(Some(updated));
                    alert("チェックリストを保存しました");
                }
                Err(err) => {
                    // One generic message for every store failure.
                    web_sys::console::error_1(&format!("[CHECKLIST] save failed: {err}").into());
                    alert("保存に失敗しました");
                }
            }
            set_saving.set(false);
        });
    };

    let logout = move |_: web_sys::MouseEvent| {
        spawn_local(async {
            if let Err(err) = services::logout().await {
                web_sys::console::error_1(&format!("[CHECKLIST] logout failed: {err}").into());
            }
        });
    };

    view! {
        <div class="checklist-container">
            {move || {
                version.track();
                state.with_value(|checklist| match checklist {
                    None => view! { <div class="loading">"読み込み中..."</div> }.into_any(),
                    Some(current) => {
                        view! {
                            <div class="checklist-body">
                            <header class="checklist-header">
                                <div class="header-top">
                                    <h1>{current.title.clone()}</h1>
                                    <div class="header-buttons">
                                        <button
                                            class="history-button"
                                            on:click=move |_| {
                                                crate::app::navigate_to(&FragmentToken::History)
                                            }
                                        >
                                            "履歴を見る"
                                        </button>
                                        {move || session.is_admin().get().then(|| view! {
                                            <button
                                                class="admin-button"
                                                on:click=move |_| {
                                                    crate::app::navigate_to(&FragmentToken::Admin)
                                                }
                                            >
                                                "管理者画面"
                                            </button>
                                        })}
                                        <button class="logout-button" on:click=logout>
                                            "ログアウト"
                                        </button>
                                    </div>
                                </div>

                                <div class="header-info">
                                    <div class="info-row">
                                        <span>{format!("点検日: {}", current.date)}</span>
                                        <div class="input-group">
                                            <label>"天候:"</label>
                                            <input
                                                type="text"
                                                placeholder="晴れ/曇り/雨など"
                                                prop:value=move || weather.get()
                                                on:input=move |ev| {
                                                    let target = ev.target().unwrap();
                                                    let input = target
                                                        .dyn_ref::<web_sys::HtmlInputElement>()
                                                        .unwrap();
                                                    set_weather.set(input.value());
                                                }
                                            />
                                        </div>
                                        <div class="input-group">
                                            <label>"点検者:"</label>
                                            <input
                                                type="text"
                                                placeholder="お名前を入力"
                                                prop:value=move || inspector.get()
                                                on:input=move |ev| {
                                                    let target = ev.target().unwrap();
                                                    let input = target
                                                        .dyn_ref::<web_sys::HtmlInputElement>()
                                                        .unwrap();
                                                    set_inspector.set(input.value());
                                                }
                                            />
                                        </div>
                                    </div>
                                </div>
                            </header>

                            <main class="checklist-main">
                                {current
                                    .sections
                                    .iter()
                                    .enumerate()
                                    .map(|(section_index, section)| {
                                        let title = section.title.clone();
                                        let body = if title == SPECIAL_NOTES_SECTION {
                                            let notes = current.special_notes.clone();
                                            view! {
                                                <div class="special-notes">
                                                    <textarea
                                                        rows="5"
                                                        placeholder="特記事項や申し送り事項があれば記入してください"
                                                        prop:value=notes
                                                        on:input=move |ev| {
                                                            let target = ev.target().unwrap();
                                                            let input = target
                                                                .dyn_ref::<web_sys::HtmlTextAreaElement>()
                                                                .unwrap();
                                                            let text = input.value();
                                                            state.update_value(|c| {
                                                                if let Some(c) = c {
                                                                    c.set_special_notes(&text);
                                                                }
                                                            });
                                                        }
                                                    ></textarea>
                                                </div>
                                            }
                                            .into_any()
                                        } else {
                                            view! {
                                                <div class="items-list">
                                                    {section
                                                        .items
                                                        .iter()
                                                        .enumerate()
                                                        .map(|(item_index, item)| {
                                                            item_editor(
                                                                section_index,
                                                                item_index,
                                                                item,
                                                                state,
                                                            )
                                                        })
                                                        .collect_view()}
                                                </div>
                                            }
                                            .into_any()
                                        };
                                        view! {
                                            <section class="checklist-section">
                                                <h2>{title}</h2>
                                                {body}
                                            </section>
                                        }
                                    })
                                    .collect_view()}

                                <div class="save-section">
                                    <button
                                        class="save-button"
                                        disabled=move || {
                                            saving.get() || inspector.get().trim().is_empty()
                                        }
                                        on:click=save
                                    >
                                        {move || {
                                            if saving.get() { "保存中..." } else { "チェックリストを保存" }
                                        }}
                                    </button>
                                    {move || inspector.get().trim().is_empty().then(|| view! {
                                        <p class="save-hint">
                                            "点検者名を入力してから保存してください"
                                        </p>
                                    })}
                                </div>
                            </main>
                            </div>
                        }
                        .into_any()
                    }
                })
            }}
        </div>
    }
}

/// Editor row for one section item, simple or equipment. Handlers write
/// one field at a time so a note edit cannot clobber the checked flag.
fn item_editor(
    section_index: usize,
    item_index: usize,
    item: &SectionItem,
    state: StoredValue<Option<ChecklistInstance>>,
) -> AnyView {
    match item {
        SectionItem::Simple(entry) => {
            let text = entry.text.clone();
            let note_value = entry.note.clone();
            let checked = entry.checked;
            view! {
                <div class="item">
                    <div class="simple-item">
                        <label class="checkbox-label">
                            <input
                                type="checkbox"
                                prop:checked=checked
                                on:change=move |ev| {
                                    let target = ev.target().unwrap();
                                    let input = target
                                        .dyn_ref::<web_sys::HtmlInputElement>()
                                        .unwrap();
                                    let now_checked = input.checked();
                                    state.update_value(|c| {
                                        if let Some(c) = c {
                                            c.set_item_checked(
                                                section_index,
                                                item_index,
                                                now_checked,
                                            );
                                        }
                                    });
                                }
                            />
                            <span class="checkmark"></span>
                            {text}
                        </label>
                        <input
                            type="text"
                            class="note-input"
                            placeholder="備考があれば記入"
                            prop:value=note_value
                            on:input=move |ev| {
                                let target = ev.target().unwrap();
                                let input = target
                                    .dyn_ref::<web_sys::HtmlInputElement>()
                                    .unwrap();
                                let value = input.value();
                                state.update_value(|c| {
                                    if let Some(c) = c {
                                        c.set_item_note(section_index, item_index, &value);
                                    }
                                });
                            }
                        />
                    </div>
                </div>
            }
            .into_any()
        }
        SectionItem::Equipment { name, checks } => {
            let name = name.clone();
            view! {
                <div class="item">
                    <div class="equipment-item">
                        <h4>{name}</h4>
                        {checks
                            .iter()
                            .enumerate()
                            .map(|(check_index, check)| {
                                let text = check.text.clone();
                                let note_value = check.note.clone();
                                let checked = check.checked;
                                view! {
                                    <div class="check-item">
                                        <label class="checkbox-label">
                                            <input
                                                type="checkbox"
                                                prop:checked=checked
                                                on:change=move |ev| {
                                                    let target = ev.target().unwrap();
                                                    let input = target
                                                        .dyn_ref::<web_sys::HtmlInputElement>()
                                                        .unwrap();
                                                    let now_checked = input.checked();
                                                    state.update_value(|c| {
                                                        if let Some(c) = c {
                                                            c.set_equipment_checked(
                                                                section_index,
                                                                item_index,
                                                                check_index,
                                                                now_checked,
                                                            );
                                                        }
                                                    });
                                                }
                                            />
                                            <span class="checkmark"></span>
                                            {text}
                                        </label>
                                        <input
                                            type="text"
                                            class="note-input"
                                            placeholder="備考があれば記入"
                                            prop:value=note_value
                                            on:input=move |ev| {
                                                let target = ev.target().unwrap();
                                                let input = target
                                                    .dyn_ref::<web_sys::HtmlInputElement>()
                                                    .unwrap();
                                                let value = input.value();
                                                state.update_value(|c| {
                                                    if let Some(c) = c {
                                                        c.set_equipment_note(
                                                            section_index,
                                                            item_index,
                                                            check_index,
                                                            &value,
                                                        );
                                                    }
                                                });
                                            }
                                        />
                                    </div>
                                }
                            })
                            .collect_view()}
                    </div>
                </div>
            }
            .into_any()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::needs_fresh_instance;

    #[test]
    fn same_identity_notification_keeps_the_instance() {
        assert!(needs_fresh_instance(None, "a@x.com"));
        assert!(needs_fresh_instance(Some("a@x.com"), "b@x.com"));
        assert!(!needs_fresh_instance(Some("a@x.com"), "a@x.com"));
    }
}
