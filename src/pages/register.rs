//! Registration page. A successful sign-up signs the user in directly.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::form_error::FormError;
use crate::coordinator::{Coordinator, use_coordinator};
use crate::net::api;
use crate::net::types::RegisterPayload;
use crate::routes::HOME_PATH;
use crate::util::form::{FormStatus, FormSubmission};
use crate::util::validate::{required, validate_new_password, validate_sdu_id};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct RegisterDraft {
    sdu_id: String,
    username: String,
    real_name: String,
    password: String,
    confirm: String,
}

impl RegisterDraft {
    fn to_payload(&self) -> Result<RegisterPayload, &'static str> {
        let sdu_id = validate_sdu_id(&self.sdu_id)?;
        let username = required(&self.username, "Enter a username.")?.to_owned();
        let real_name = required(&self.real_name, "Enter your real name.")?.to_owned();
        let password = validate_new_password(&self.password, &self.confirm)?;
        Ok(RegisterPayload { sdu_id, password, real_name, username })
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let coordinator = use_coordinator();
    let navigate = use_navigate();
    let draft = RwSignal::new(RegisterDraft::default());
    let status = RwSignal::new(FormStatus::default());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if status.get_untracked().loading {
            return;
        }
        let payload = match draft.with_untracked(RegisterDraft::to_payload) {
            Ok(payload) => payload,
            Err(message) => {
                status.set(FormStatus::failed(message));
                return;
            }
        };
        let Coordinator { store, api: client } = coordinator.get_value();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let form = FormSubmission::new(status, |payload: RegisterPayload| {
                let client = client.clone();
                async move { api::register(&client, &payload).await }
            });
            if let Some(auth) = form.submit(payload).await {
                let (token, user) = auth.into_session_parts();
                store.set_user(token, user);
                navigate(HOME_PATH, NavigateOptions::default());
            }
        });
    };

    let field = move |placeholder: &'static str, kind: &'static str, get: fn(&RegisterDraft) -> &String, set: fn(&mut RegisterDraft, String)| {
        view! {
            <input
                class="auth-input"
                type=kind
                placeholder=placeholder
                prop:value=move || draft.with(|d| get(d).clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    draft.update(|d| set(d, value));
                }
            />
        }
    };

    view! {
        <div class="auth-page">
            <form class="auth-card" on:submit=on_submit>
                <h1>"Create an account"</h1>
                {field("Student id", "text", |d| &d.sdu_id, |d, v| d.sdu_id = v)}
                {field("Username", "text", |d| &d.username, |d, v| d.username = v)}
                {field("Real name", "text", |d| &d.real_name, |d, v| d.real_name = v)}
                {field("Password", "password", |d| &d.password, |d, v| d.password = v)}
                {field("Confirm password", "password", |d| &d.confirm, |d, v| d.confirm = v)}
                <FormError status=status/>
                <button class="btn btn--primary" type="submit" disabled=move || status.get().loading>
                    "Register"
                </button>
                <p class="auth-card__links">
                    <a href="/login">"Already have an account? Sign in"</a>
                </p>
            </form>
        </div>
    }
}
