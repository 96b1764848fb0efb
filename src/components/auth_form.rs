//! Auth Form Component
//!
//! Email/password login. On success the cross-tab broadcast fires and the
//! app navigates to the remembered destination.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::routing::FragmentToken;
use crate::services;

#[component]
pub fn AuthForm(
    /// Fragment to restore once login succeeds
    wanted: FragmentToken,
    /// Show the "login required" notice (reached via a protected view)
    require_notice: bool,
) -> impl IntoView {
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (remember_me, set_remember_me) = signal(true);
    let (error, set_error) = signal(String::new());
    let (loading, set_loading) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let email_value = email.get();
        let password_value = password.get();
        let remember = remember_me.get();
        if password_value.chars().count() < 6 {
            set_error.set("パスワードは6文字以上である必要があります".to_string());
            return;
        }
        let destination = wanted.clone();
        set_error.set(String::new());
        set_loading.set(true);
        spawn_local(async move {
            match services::login(&email_value, &password_value, remember).await {
                Ok(identity) => {
                    web_sys::console::log_1(
                        &format!("[AUTH] logged in as {}", identity.email).into(),
                    );
                    services::broadcast_login();
                    crate::app::navigate_to(&destination);
                }
                Err(err) => {
                    // Generic retry prompt; the detail is for operators only.
                    web_sys::console::error_1(&format!("[AUTH] login failed: {err}").into());
                    set_error.set("ログインに失敗しました".to_string());
                }
            }
            set_loading.set(false);
        });
    };

    view! {
        <div class="auth-container">
            <div class="auth-form">
                <h2>"ログイン"</h2>
                {require_notice.then(|| view! {
                    <p class="auth-notice">"この画面を表示するにはログインが必要です"</p>
                })}
                {move || {
                    let message = error.get();
                    (!message.is_empty()).then(|| view! { <div class="error">{message}</div> })
                }}
                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="email">"メールアドレス"</label>
                        <input
                            id="email"
                            type="email"
                            required=true
                            prop:value=move || email.get()
                            on:input=move |ev| {
                                let target = ev.target().unwrap();
                                let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                                set_email.set(input.value());
                            }
                        />
                    </div>
                    <div class="form-group">
                        <label for="password">"パスワード"</label>
                        <input
                            id="password"
                            type="password"
                            required=true
                            prop:value=move || password.get()
                            on:input=move |ev| {
                                let target = ev.target().unwrap();
                                let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                                set_password.set(input.value());
                            }
                        />
                        <p class="password-hint">"パスワードは6文字以上で入力してください。"</p>
                    </div>
                    <div class="form-group">
                        <label class="checkbox-label">
                            <input
                                type="checkbox"
                                prop:checked=move || remember_me.get()
                                on:change=move |ev| {
                                    let target = ev.target().unwrap();
                                    let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                                    set_remember_me.set(input.checked());
                                }
                            />
                            "ログイン状態を保持する"
                        </label>
                    </div>
                    <button type="submit" class="auth-button" disabled=move || loading.get()>
                        {move || if loading.get() { "処理中..." } else { "ログイン" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
