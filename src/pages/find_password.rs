//! Password recovery: request an emailed code, then set a new password.

#[cfg(test)]
#[path = "find_password_test.rs"]
mod find_password_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::form_error::FormError;
use crate::coordinator::use_coordinator;
use crate::net::api;
use crate::net::types::{ResetPasswordPayload, SendResetCodePayload};
use crate::routes::LOGIN_PATH;
use crate::util::form::{FormStatus, FormSubmission};
use crate::util::validate::{required, validate_new_password};

fn reset_code_payload(email: &str) -> Result<SendResetCodePayload, &'static str> {
    let email = required(email, "Enter your email.")?;
    if !email.contains('@') {
        return Err("Enter a valid email.");
    }
    Ok(SendResetCodePayload { email: email.to_owned() })
}

fn reset_payload(email: &str, code: &str, password: &str, confirm: &str) -> Result<ResetPasswordPayload, &'static str> {
    let SendResetCodePayload { email } = reset_code_payload(email)?;
    let code = required(code, "Enter the verification code.")?.to_owned();
    let new_password = validate_new_password(password, confirm)?;
    Ok(ResetPasswordPayload { email, code, new_password })
}

#[component]
pub fn FindPasswordPage() -> impl IntoView {
    let coordinator = use_coordinator();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let code = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let code_sent = RwSignal::new(false);
    let send_status = RwSignal::new(FormStatus::default());
    let reset_status = RwSignal::new(FormStatus::default());

    let on_send_code = move |_| {
        if send_status.get_untracked().loading {
            return;
        }
        let payload = match reset_code_payload(&email.get_untracked()) {
            Ok(payload) => payload,
            Err(message) => {
                send_status.set(FormStatus::failed(message));
                return;
            }
        };
        let client = coordinator.with_value(|c| c.api.clone());
        leptos::task::spawn_local(async move {
            let form = FormSubmission::new(send_status, |payload: SendResetCodePayload| {
                let client = client.clone();
                async move { api::send_reset_code(&client, &payload).await }
            });
            if form.submit(payload).await.is_some() {
                code_sent.set(true);
            }
        });
    };

    let on_reset = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if reset_status.get_untracked().loading {
            return;
        }
        let checked = reset_payload(
            &email.get_untracked(),
            &code.get_untracked(),
            &password.get_untracked(),
            &confirm.get_untracked(),
        );
        let payload = match checked {
            Ok(payload) => payload,
            Err(message) => {
                reset_status.set(FormStatus::failed(message));
                return;
            }
        };
        let client = coordinator.with_value(|c| c.api.clone());
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let form = FormSubmission::new(reset_status, |payload: ResetPasswordPayload| {
                let client = client.clone();
                async move { api::reset_password(&client, &payload).await }
            });
            if form.submit(payload).await.is_some() {
                navigate(LOGIN_PATH, NavigateOptions::default());
            }
        });
    };

    view! {
        <div class="auth-page">
            <form class="auth-card" on:submit=on_reset>
                <h1>"Reset password"</h1>
                <div class="auth-card__row">
                    <input
                        class="auth-input"
                        type="email"
                        placeholder="Email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <button class="btn" type="button" on:click=on_send_code disabled=move || send_status.get().loading>
                        {move || if code_sent.get() { "Resend code" } else { "Send code" }}
                    </button>
                </div>
                <FormError status=send_status/>
                <Show when=move || code_sent.get()>
                    <p class="auth-card__info">"A verification code was sent to your email."</p>
                </Show>
                <input
                    class="auth-input"
                    type="text"
                    placeholder="Verification code"
                    prop:value=move || code.get()
                    on:input=move |ev| code.set(event_target_value(&ev))
                />
                <input
                    class="auth-input"
                    type="password"
                    placeholder="New password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <input
                    class="auth-input"
                    type="password"
                    placeholder="Confirm new password"
                    prop:value=move || confirm.get()
                    on:input=move |ev| confirm.set(event_target_value(&ev))
                />
                <FormError status=reset_status/>
                <button class="btn btn--primary" type="submit" disabled=move || reset_status.get().loading>
                    "Reset password"
                </button>
                <p class="auth-card__links">
                    <a href="/login">"Back to sign in"</a>
                </p>
            </form>
        </div>
    }
}
