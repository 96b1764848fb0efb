//! UI Components

mod admin_history;
mod admin_management;
mod auth_form;
mod checklist_card;
mod checklist_detail;
mod checklist_form;
mod checklist_history;

pub use admin_history::AdminHistory;
pub use admin_management::AdminManagement;
pub use auth_form::AuthForm;
pub use checklist_card::ChecklistCard;
pub use checklist_detail::ChecklistDetail;
pub use checklist_form::ChecklistForm;
pub use checklist_history::ChecklistHistory;

use crate::services::ServiceError;

pub(crate) fn alert(message: &str) {
    if let Some(win) = web_sys::window() {
        let _ = win.alert_with_message(message);
    }
}

pub(crate) fn confirm(message: &str) -> bool {
    web_sys::window()
        .map(|win| win.confirm_with_message(message).unwrap_or(false))
        .unwrap_or(false)
}

/// Surface a store read failure: access-rule and missing-index conditions
/// get their own actionable message, everything else the generic one with
/// the underlying detail.
pub(crate) fn report_store_error(prefix: &str, err: &ServiceError) {
    web_sys::console::error_1(&format!("{prefix} store error: {err}").into());
    let message = match err {
        ServiceError::PermissionDenied(_) => {
            "チェックリストの取得権限がありません。セキュリティルールを確認してください。"
                .to_string()
        }
        ServiceError::FailedPrecondition(_) => {
            "インデックスが不足しています。コンソールでインデックスを作成してください。"
                .to_string()
        }
        other => format!("チェックリストの取得に失敗しました: {other}"),
    };
    alert(&message);
}
