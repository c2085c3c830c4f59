//! Change password for the signed-in user. Success ends the session.

#[cfg(test)]
#[path = "change_password_test.rs"]
mod change_password_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::form_error::FormError;
use crate::components::nav_bar::NavBar;
use crate::coordinator::{Coordinator, use_coordinator};
use crate::net::api;
use crate::net::types::ChangePasswordPayload;
use crate::routes::LOGIN_PATH;
use crate::util::form::{FormStatus, FormSubmission};
use crate::util::validate::validate_new_password;

fn change_password_payload(old: &str, new: &str, confirm: &str) -> Result<ChangePasswordPayload, &'static str> {
    if old.is_empty() {
        return Err("Enter your current password.");
    }
    let new_password = validate_new_password(new, confirm)?;
    if new_password == old {
        return Err("The new password must differ from the current one.");
    }
    Ok(ChangePasswordPayload { old_password: old.to_owned(), new_password })
}

#[component]
pub fn ChangePasswordPage() -> impl IntoView {
    let coordinator = use_coordinator();
    let navigate = use_navigate();

    let old_password = RwSignal::new(String::new());
    let new_password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let status = RwSignal::new(FormStatus::default());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if status.get_untracked().loading {
            return;
        }
        let checked = change_password_payload(
            &old_password.get_untracked(),
            &new_password.get_untracked(),
            &confirm.get_untracked(),
        );
        let payload = match checked {
            Ok(payload) => payload,
            Err(message) => {
                status.set(FormStatus::failed(message));
                return;
            }
        };
        let Coordinator { store, api: client } = coordinator.get_value();
        let user_id = store.with(|s| s.user_id().map(str::to_owned)).unwrap_or_default();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let form = FormSubmission::new(status, |payload: ChangePasswordPayload| {
                let client = client.clone();
                let user_id = user_id.clone();
                async move { api::change_password(&client, &user_id, &payload).await }
            });
            if form.submit(payload).await.is_some() {
                store.logout(&client).await;
                navigate(LOGIN_PATH, NavigateOptions::default());
            }
        });
    };

    view! {
        <NavBar/>
        <main class="page">
            <form class="card form" on:submit=on_submit>
                <h1>"Change password"</h1>
                <input
                    class="form__input"
                    type="password"
                    placeholder="Current password"
                    prop:value=move || old_password.get()
                    on:input=move |ev| old_password.set(event_target_value(&ev))
                />
                <input
                    class="form__input"
                    type="password"
                    placeholder="New password"
                    prop:value=move || new_password.get()
                    on:input=move |ev| new_password.set(event_target_value(&ev))
                />
                <input
                    class="form__input"
                    type="password"
                    placeholder="Confirm new password"
                    prop:value=move || confirm.get()
                    on:input=move |ev| confirm.set(event_target_value(&ev))
                />
                <FormError status=status/>
                <button class="btn btn--primary" type="submit" disabled=move || status.get().loading>
                    "Update password"
                </button>
            </form>
        </main>
    }
}
