//! Admin Management Component
//!
//! Roster panel inside the admin view: add-admin form with inline
//! error/success messages, the roster table with per-row delete, and the
//! access-denied panel for non-admins.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use super::confirm;
use crate::admin::{self, AdminCache, AdminError};
use crate::models::AdminRecord;
use crate::routing::FragmentToken;
use crate::services::{self, ServiceError};
use crate::session::{use_session, SessionStateStoreFields};

fn fetch_error_message(err: &ServiceError) -> String {
    match err {
        ServiceError::PermissionDenied(_) => {
            "管理者リストの取得に失敗しました：アクセス権限がありません。セキュリティルールを確認してください。".to_string()
        }
        ServiceError::FailedPrecondition(_) => {
            "管理者リストの取得に失敗しました：インデックスが必要です。コンソールでインデックスを作成してください。".to_string()
        }
        other => format!("管理者リストの取得に失敗しました：{other}"),
    }
}

#[component]
pub fn AdminManagement(
    /// Closes the panel, back to the admin history list
    set_managing: WriteSignal<bool>,
) -> impl IntoView {
    let session = use_session();
    let cache = expect_context::<AdminCache>();

    let (admins, set_admins) = signal(Vec::<AdminRecord>::new());
    let (new_admin_email, set_new_admin_email) = signal(String::new());
    let (loading, set_loading) = signal(true);
    let (submitting, set_submitting) = signal(false);
    let (error, set_error) = signal(String::new());
    let (success, set_success) = signal(String::new());
    let (reload_trigger, set_reload_trigger) = signal(0u32);

    Effect::new(move |_| {
        let _ = reload_trigger.get();
        if session.current_user().get().is_none() || !session.is_admin().get() {
            return;
        }
        set_loading.set(true);
        spawn_local(async move {
            match services::list_admins().await {
                Ok(roster) => {
                    web_sys::console::log_1(
                        &format!("[ADMIN] fetched {} roster entries", roster.len()).into(),
                    );
                    set_admins.set(roster);
                }
                Err(err) => {
                    web_sys::console::error_1(
                        &format!("[ADMIN] roster fetch failed: {err}").into(),
                    );
                    set_error.set(fetch_error_message(&err));
                }
            }
            set_loading.set(false);
        });
    });

    // Inline success messages dismiss themselves after three seconds.
    let flash_success = move |message: &str| {
        set_success.set(message.to_string());
        spawn_local(async move {
            TimeoutFuture::new(3_000).await;
            set_success.set(String::new());
        });
    };

    let add_admin = {
        let cache = cache.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            let email = new_admin_email.get();
            if email.trim().is_empty() {
                set_error.set("メールアドレスを入力してください。".to_string());
                return;
            }
            let Some(user) = session.current_user().get() else {
                return;
            };
            let cache = cache.clone();
            set_error.set(String::new());
            set_submitting.set(true);
            spawn_local(async move {
                match admin::add_admin_record(&cache, &email, &user.email).await {
                    Ok(record) => {
                        web_sys::console::log_1(
                            &format!("[ADMIN] added admin {}", record.email).into(),
                        );
                        set_new_admin_email.set(String::new());
                        set_reload_trigger.update(|v| *v += 1);
                        flash_success("管理者を追加しました。");
                    }
                    Err(err) => {
                        web_sys::console::error_1(&format!("[ADMIN] add failed: {err}").into());
                        set_error.set(match err {
                            AdminError::Service(ServiceError::PermissionDenied(_)) => {
                                "管理者の追加に失敗しました：アクセス権限がありません。".to_string()
                            }
                            AdminError::Service(inner) => {
                                format!("管理者の追加に失敗しました：{inner}")
                            }
                            inline => inline.to_string(),
                        });
                    }
                }
                set_submitting.set(false);
            });
        }
    };

    let delete_admin = {
        let cache = cache.clone();
        move |record: AdminRecord| {
            let Some(user) = session.current_user().get() else {
                return;
            };
            if !confirm(&format!("{} を管理者から削除しますか？", record.email)) {
                return;
            }
            let cache = cache.clone();
            set_error.set(String::new());
            spawn_local(async move {
                match admin::remove_admin_record(&cache, &record.id, &record.email, &user.email)
                    .await
                {
                    Ok(()) => {
                        set_reload_trigger.update(|v| *v += 1);
                        flash_success("管理者を削除しました。");
                    }
                    Err(err) => {
                        web_sys::console::error_1(&format!("[ADMIN] delete failed: {err}").into());
                        set_error.set(match err {
                            AdminError::SelfRemoval => err.to_string(),
                            _ => "管理者の削除に失敗しました。".to_string(),
                        });
                    }
                }
            });
        }
    };

    view! {
        <div class="admin-management-container">
            {move || {
                if session.current_user().get().is_none() || !session.is_admin().get() {
                    return view! {
                        <div class="access-denied">
                            <h2>"アクセス拒否"</h2>
                            <p>"この機能は管理者のみ利用できます。"</p>
                            <button
                                class="back-button"
                                on:click=move |_| crate::app::navigate_to(&FragmentToken::New)
                            >
                                "チェックリスト作成に戻る"
                            </button>
                        </div>
                    }
                    .into_any();
                }
                // A fresh handle per run; the roster closure below takes it
                // by move.
                let delete_admin = delete_admin.clone();
                view! {
                    <div class="admin-management">
                    <div class="admin-management-header">
                        <h1>"管理者管理"</h1>
                        <button class="back-button" on:click=move |_| set_managing.set(false)>
                            "管理者画面に戻る"
                        </button>
                    </div>

                    {move || {
                        let message = error.get();
                        (!message.is_empty())
                            .then(|| view! { <div class="error-message">{message}</div> })
                    }}
                    {move || {
                        let message = success.get();
                        (!message.is_empty())
                            .then(|| view! { <div class="success-message">{message}</div> })
                    }}

                    <div class="add-admin-section">
                        <h2>"管理者を追加"</h2>
                        <form class="add-admin-form" on:submit=add_admin.clone()>
                            <div class="form-group">
                                <label for="adminEmail">"メールアドレス"</label>
                                <input
                                    id="adminEmail"
                                    type="email"
                                    placeholder="新しい管理者のメールアドレス"
                                    prop:value=move || new_admin_email.get()
                                    on:input=move |ev| {
                                        let target = ev.target().unwrap();
                                        let input = target
                                            .dyn_ref::<web_sys::HtmlInputElement>()
                                            .unwrap();
                                        set_new_admin_email.set(input.value());
                                    }
                                />
                            </div>
                            <button
                                type="submit"
                                class="add-admin-button"
                                disabled=move || submitting.get()
                            >
                                {move || if submitting.get() { "追加中..." } else { "管理者を追加" }}
                            </button>
                        </form>
                    </div>

                    <div class="admin-list-section">
                        <h2>"現在の管理者"</h2>
                        {move || {
                            if loading.get() {
                                return view! {
                                    <div class="loading">"管理者リストを読み込み中..."</div>
                                }
                                .into_any();
                            }
                            let roster = admins.get();
                            if roster.is_empty() {
                                return view! {
                                    <div class="no-admins">"管理者が登録されていません。"</div>
                                }
                                .into_any();
                            }
                            let viewer = session
                                .current_user()
                                .get()
                                .map(|user| user.email)
                                .unwrap_or_default();
                            view! {
                                <table class="admin-table">
                                    <thead>
                                        <tr>
                                            <th>"メールアドレス"</th>
                                            <th>"追加日時"</th>
                                            <th>"追加者"</th>
                                            <th>"操作"</th>
                                        </tr>
                                    </thead>
                                    <tbody>
                                        {roster
                                            .into_iter()
                                            .map(|record| {
                                                let added_at = record
                                                    .added_at
                                                    .as_deref()
                                                    .map(crate::time::format_datetime_ja)
                                                    .unwrap_or_else(|| "不明".to_string());
                                                let added_by = record
                                                    .added_by
                                                    .clone()
                                                    .unwrap_or_else(|| "不明".to_string());
                                                let is_self = record.email == viewer;
                                                let email = record.email.clone();
                                                let delete_admin = delete_admin.clone();
                                                view! {
                                                    <tr>
                                                        <td>{email}</td>
                                                        <td>{added_at}</td>
                                                        <td>{added_by}</td>
                                                        <td>
                                                            {if is_self {
                                                                view! {
                                                                    <span class="current-user-badge">
                                                                        "現在のユーザー"
                                                                    </span>
                                                                }
                                                                .into_any()
                                                            } else {
                                                                view! {
                                                                    <button
                                                                        class="delete-admin-button"
                                                                        on:click=move |_| {
                                                                            delete_admin(record.clone())
                                                                        }
                                                                    >
                                                                        "削除"
                                                                    </button>
                                                                }
                                                                .into_any()
                                                            }}
                                                        </td>
                                                    </tr>
                                                }
                                            })
                                            .collect_view()}
                                    </tbody>
                                </table>
                            }
                            .into_any()
                        }}
                    </div>

                    <div class="admin-management-note">
                        <h3>"注意事項"</h3>
                        <ul>
                            <li>"管理者は全てのチェックリストの閲覧・管理が可能です"</li>
                            <li>"管理者の追加・削除は既存の管理者のみが実行できます"</li>
                            <li>"自分自身を管理者から削除することはできません"</li>
                            <li>"追加された管理者は即座に管理者権限が有効になります"</li>
                        </ul>
                    </div>
                    </div>
                }
                .into_any()
            }}
        </div>
    }
}
