//! Checklist Summary Card
//!
//! One history-grid card; clicking navigates to the detail fragment.

use leptos::prelude::*;

use crate::models::{completion_rate, ChecklistInstance};
use crate::routing::FragmentToken;

#[component]
pub fn ChecklistCard(
    checklist: ChecklistInstance,
    /// Admin list shows the creator line
    show_creator: bool,
) -> impl IntoView {
    let (completed, total) = checklist.completion_status();
    let rate = completion_rate(completed, total);
    let badge_class = if rate == 100 {
        "completion-badge complete"
    } else {
        "completion-badge incomplete"
    };
    let card_class = if show_creator {
        "checklist-card admin-card"
    } else {
        "checklist-card"
    };

    let id = checklist.id.clone();
    let notes_preview = (!checklist.special_notes.is_empty()).then(|| {
        let truncated: String = checklist.special_notes.chars().take(100).collect();
        let ellipsis = if checklist.special_notes.chars().count() > 100 { "..." } else { "" };
        format!("{truncated}{ellipsis}")
    });
    let completed_at = checklist
        .completed_at
        .as_deref()
        .map(crate::time::format_datetime_ja)
        .unwrap_or_else(|| "未完了".to_string());
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

    view! {
        <div
            class=card_class
            on:click=move |_| crate::app::navigate_to(&FragmentToken::Detail(id.clone()))
        >
            <div class="card-header">
                <h3>{crate::time::format_date_ja(&checklist.date)}</h3>
                <div class=badge_class>{rate}"%"</div>
            </div>

            <div class="card-content">
                <div class="card-info">
                    <p><strong>"点検者: "</strong>{inspector}</p>
                    <p><strong>"天候: "</strong>{weather}</p>
                    {show_creator.then(|| view! {
                        <p><strong>"作成者: "</strong>{creator}</p>
                    })}
                    <p><strong>"完了項目: "</strong>{completed}"/"{total}</p>
                </div>

                {notes_preview.map(|preview| view! {
                    <div class="card-notes">
                        <p><strong>"特記事項:"</strong></p>
                        <p class="notes-text">{preview}</p>
                    </div>
                })}
            </div>

            <div class="card-footer">
                <small>"作成: "{completed_at}</small>
            </div>
        </div>
    }
}
