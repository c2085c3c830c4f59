//! Login page: student id and password.
//!
//! On success the session is stored and the user continues to the page they
//! were bounced from (`?redirect=`), or to the dashboard.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::components::form_error::FormError;
use crate::coordinator::{Coordinator, use_coordinator};
use crate::net::api;
use crate::net::types::LoginPayload;
use crate::routes::{REDIRECT_QUERY_KEY, post_login_target};
use crate::util::form::{FormStatus, FormSubmission};
use crate::util::validate::{required, validate_sdu_id};

#[component]
pub fn LoginPage() -> impl IntoView {
    let coordinator = use_coordinator();
    let navigate = use_navigate();
    let query = use_query_map();

    let sdu_id = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let status = RwSignal::new(FormStatus::default());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if status.get_untracked().loading {
            return;
        }
        let payload = match login_payload(&sdu_id.get_untracked(), &password.get_untracked()) {
            Ok(payload) => payload,
            Err(message) => {
                status.set(FormStatus::failed(message));
                return;
            }
        };
        let redirect = query.with_untracked(|q| q.get(REDIRECT_QUERY_KEY));
        let Coordinator { store, api: client } = coordinator.get_value();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let form = FormSubmission::new(status, |payload: LoginPayload| {
                let client = client.clone();
                async move { api::login(&client, &payload).await }
            });
            if let Some(auth) = form.submit(payload).await {
                let (token, user) = auth.into_session_parts();
                store.set_user(token, user);
                navigate(&post_login_target(redirect.as_deref()), NavigateOptions::default());
            }
        });
    };

    view! {
        <div class="auth-page">
            <form class="auth-card" on:submit=on_submit>
                <h1>"Sign in"</h1>
                <input
                    class="auth-input"
                    type="text"
                    inputmode="numeric"
                    placeholder="Student id"
                    prop:value=move || sdu_id.get()
                    on:input=move |ev| sdu_id.set(event_target_value(&ev))
                />
                <input
                    class="auth-input"
                    type="password"
                    placeholder="Password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <FormError status=status/>
                <button class="btn btn--primary" type="submit" disabled=move || status.get().loading>
                    {move || if status.get().loading { "Signing in..." } else { "Sign in" }}
                </button>
                <p class="auth-card__links">
                    <a href="/register">"Create an account"</a>
                    <a href="/find-password">"Forgot password?"</a>
                </p>
            </form>
        </div>
    }
}

fn login_payload(sdu_id: &str, password: &str) -> Result<LoginPayload, &'static str> {
    let sdu_id = validate_sdu_id(sdu_id)?;
    required(password, "Enter your password.")?;
    Ok(LoginPayload { sdu_id, password: password.to_owned() })
}
