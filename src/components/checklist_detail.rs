//! Checklist Detail Component
//!
//! Read-only renderer of a fetched checklist. `is_from_admin` controls the
//! creator row and the back label; the back button restores the fragment of
//! the originating list.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::models::{completion_rate, ChecklistInstance, SectionItem};
use crate::routing::FragmentToken;
use crate::services;
use crate::template::SPECIAL_NOTES_SECTION;

#[component]
pub fn ChecklistDetail(checklist: ChecklistInstance, is_from_admin: bool) -> impl IntoView {
    let (completed, total) = checklist.completion_status();
    let rate = completion_rate(completed, total);
    let status_class = if rate == 100 {
        "completion-status complete"
    } else {
        "completion-status incomplete"
    };
    let back_label = if is_from_admin {
        "管理者画面に戻る"
    } else {
        "履歴に戻る"
    };
    let back_target = if is_from_admin {
        FragmentToken::Admin
    } else {
        FragmentToken::History
    };

    let inspector = if checklist.inspector.is_empty() {
        "-".to_string()
    } else {
        checklist.inspector.clone()
    };
    let weather = if checklist.weather.is_empty() {
        "-".to_string()
    } else {
        checklist.weather.clone()
    };
    let creator = checklist
        .created_by
        .clone()
        .unwrap_or_else(|| "-".to_string());
    let completed_at = checklist
        .completed_at
        .as_deref()
        .map(crate::time::format_datetime_ja);

    let logout = move |_: web_sys::MouseEvent| {
        spawn_local(async {
            if let Err(err) = services::logout().await {
                web_sys::console::error_1(&format!("[DETAIL] logout failed: {err}").into());
            }
        });
    };

    view! {
        <div class="detail-container">
            <header class="detail-header">
                <div class="header-top">
                    <h1>{checklist.title.clone()}</h1>
                    <div class="header-buttons">
                        <button
                            class="back-button"
                            on:click=move |_| crate::app::navigate_to(&back_target)
                        >
                            {back_label}
                        </button>
                        <button class="logout-button" on:click=logout>
                            "ログアウト"
                        </button>
                    </div>
                </div>

                <div class="detail-info">
                    <div class="info-row">
                        <span>
                            <strong>"点検日: "</strong>
                            {crate::time::format_date_ja(&checklist.date)}
                        </span>
                        <span><strong>"天候: "</strong>{weather}</span>
                        <span><strong>"点検者: "</strong>{inspector}</span>
                        {is_from_admin.then(|| view! {
                            <span><strong>"作成者: "</strong>{creator}</span>
                        })}
                        <div class=status_class>
                            <strong>"完了率: "</strong>
                            {rate}"% ("{completed}"/"{total}")"
                        </div>
                    </div>
                    {completed_at.map(|stamp| view! {
                        <div class="completion-time">
                            <strong>"作成日時: "</strong>
                            {stamp}
                        </div>
                    })}
                </div>
            </header>

            <main class="detail-main">
                {checklist
                    .sections
                    .iter()
                    .map(|section| {
                        let title = section.title.clone();
                        let body = if title == SPECIAL_NOTES_SECTION {
                            let notes = checklist.special_notes.clone();
                            if notes.is_empty() {
                                view! {
                                    <div class="special-notes-display">
                                        <p class="no-notes">"特記事項はありません"</p>
                                    </div>
                                }
                                .into_any()
                            } else {
                                view! {
                                    <div class="special-notes-display">
                                        <div class="notes-content"><p>{notes}</p></div>
                                    </div>
                                }
                                .into_any()
                            }
                        } else {
                            view! {
                                <div class="items-list">
                                    {section.items.iter().map(item_detail).collect_view()}
                                </div>
                            }
                            .into_any()
                        };
                        view! {
                            <section class="detail-section">
                                <h2>{title}</h2>
                                {body}
                            </section>
                        }
                    })
                    .collect_view()}
            </main>
        </div>
    }
}

fn check_status(checked: bool, text: &str, note: &str) -> impl IntoView {
    let indicator_class = if checked {
        "status-indicator checked"
    } else {
        "status-indicator unchecked"
    };
    let mark = if checked { "✓" } else { "✗" };
    let note = (!note.is_empty()).then(|| note.to_string());
    view! {
        <div>
            <div class="check-status">
                <span class=indicator_class>{mark}</span>
                <span class="check-text">{text.to_string()}</span>
            </div>
            {note.map(|note| view! {
                <div class="check-note">
                    <strong>"備考: "</strong>
                    {note}
                </div>
            })}
        </div>
    }
}

fn item_detail(item: &SectionItem) -> AnyView {
    match item {
        SectionItem::Simple(entry) => view! {
            <div class="detail-item">
                <div class="simple-detail">
                    {check_status(entry.checked, &entry.text, &entry.note)}
                </div>
            </div>
        }
        .into_any(),
        SectionItem::Equipment { name, checks } => view! {
            <div class="detail-item">
                <div class="equipment-detail">
                    <h4>{name.clone()}</h4>
                    {checks
                        .iter()
                        .map(|check| {
                            view! {
                                <div class="check-detail">
                                    {check_status(check.checked, &check.text, &check.note)}
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        }
        .into_any(),
    }
}
