//! Edit the signed-in user's personal information.
//!
//! The form starts from the session copy, refreshes it from the server on
//! mount, and sends only the fields that changed. A successful save is
//! applied to the session so the rest of the app sees it immediately.

#[cfg(test)]
#[path = "update_info_test.rs"]
mod update_info_test;

use leptos::prelude::*;

use crate::components::form_error::FormError;
use crate::components::nav_bar::NavBar;
use crate::coordinator::{Coordinator, use_coordinator};
use crate::net::api;
use crate::net::http::ApiError;
use crate::net::types::{Gender, UpdateUserInfoPayload, UserInfo};
use crate::state::session::Session;
use crate::util::form::{FormStatus, FormSubmission};
use crate::util::validate::is_all_digits;

fn changed(current: &str, draft: &str) -> Option<String> {
    let draft = draft.trim();
    (draft != current.trim()).then(|| draft.to_owned())
}

/// Diff `draft` against `current`, keeping only edited fields.
fn info_changes(current: &UserInfo, draft: &UserInfo) -> Result<UpdateUserInfoPayload, &'static str> {
    let phone = draft.phone.trim();
    if !phone.is_empty() && !is_all_digits(phone) {
        return Err("Phone number must contain digits only.");
    }
    let email = draft.email.trim();
    if !email.is_empty() && !email.contains('@') {
        return Err("Enter a valid email.");
    }
    let payload = UpdateUserInfoPayload {
        username: changed(&current.username, &draft.username),
        real_name: changed(&current.real_name, &draft.real_name),
        gender: (draft.gender != current.gender).then_some(draft.gender),
        birthday: changed(&current.birthday, &draft.birthday),
        phone: changed(&current.phone, &draft.phone),
        email: changed(&current.email, &draft.email),
        avatar_url: None,
        ethnicity: changed(&current.ethnicity, &draft.ethnicity),
        political_status: changed(&current.political_status, &draft.political_status),
        description: changed(&current.description, &draft.description),
    };
    if payload == UpdateUserInfoPayload::default() {
        return Err("Nothing to update.");
    }
    if payload.username.as_deref() == Some("") {
        return Err("Username cannot be empty.");
    }
    Ok(payload)
}

type Field = (&'static str, &'static str, fn(&UserInfo) -> &String, fn(&mut UserInfo, String));

const TEXT_FIELDS: &[Field] = &[
    ("Username", "text", |u| &u.username, |u, v| u.username = v),
    ("Real name", "text", |u| &u.real_name, |u, v| u.real_name = v),
    ("Birthday", "date", |u| &u.birthday, |u, v| u.birthday = v),
    ("Phone", "tel", |u| &u.phone, |u, v| u.phone = v),
    ("Email", "email", |u| &u.email, |u, v| u.email = v),
    ("Ethnicity", "text", |u| &u.ethnicity, |u, v| u.ethnicity = v),
    ("Political status", "text", |u| &u.political_status, |u, v| u.political_status = v),
    ("About me", "text", |u| &u.description, |u, v| u.description = v),
];

#[component]
pub fn UpdateInfoPage() -> impl IntoView {
    let coordinator = use_coordinator();
    let session = expect_context::<RwSignal<Session>>();
    let initial = session.with_untracked(|s| s.user.clone()).unwrap_or_default();
    let draft = RwSignal::new(initial);
    let status = RwSignal::new(FormStatus::default());

    // Refresh from the server once on mount.
    {
        let Coordinator { store, api: client } = coordinator.get_value();
        let user_id = store.with(|s| s.user_id().map(str::to_owned));
        if let Some(user_id) = user_id {
            leptos::task::spawn_local(async move {
                match api::fetch_user_info(&client, &user_id).await {
                    Ok(mut fresh) => {
                        if fresh.id.is_none() {
                            fresh.id = Some(user_id);
                        }
                        draft.set(fresh.clone());
                        store.update_user(|u| *u = fresh);
                    }
                    Err(e) => log::warn!("failed to refresh user info: {e}"),
                }
            });
        }
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if status.get_untracked().loading {
            return;
        }
        let current = session.with_untracked(|s| s.user.clone()).unwrap_or_default();
        let payload = match draft.with_untracked(|d| info_changes(&current, d)) {
            Ok(payload) => payload,
            Err(message) => {
                status.set(FormStatus::failed(message));
                return;
            }
        };
        let Coordinator { store, api: client } = coordinator.get_value();
        let user_id = current.id.clone().unwrap_or_default();
        leptos::task::spawn_local(async move {
            let form = FormSubmission::new(status, |payload: UpdateUserInfoPayload| {
                let client = client.clone();
                let user_id = user_id.clone();
                async move {
                    api::update_user_info(&client, &user_id, &payload).await?;
                    Ok::<_, ApiError>(payload)
                }
            });
            if let Some(saved) = form.submit(payload).await {
                store.update_user(|u| saved.apply_to(u));
            }
        });
    };

    let text_inputs = TEXT_FIELDS
        .iter()
        .map(|&(label, kind, get, set)| {
            view! {
                <label class="form__field">
                    <span>{label}</span>
                    <input
                        class="form__input"
                        type=kind
                        prop:value=move || draft.with(|d| get(d).clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            draft.update(|d| set(d, value));
                        }
                    />
                </label>
            }
        })
        .collect::<Vec<_>>();

    let gender_value = move || i64::from(draft.with(|d| d.gender)).to_string();

    view! {
        <NavBar/>
        <main class="page">
            <form class="card form" on:submit=on_submit>
                <h1>"Personal information"</h1>
                {text_inputs}
                <label class="form__field">
                    <span>"Gender"</span>
                    <select
                        class="form__input"
                        prop:value=gender_value
                        on:change=move |ev| {
                            let gender = event_target_value(&ev).parse::<i64>().map(Gender::from).unwrap_or_default();
                            draft.update(|d| d.gender = gender);
                        }
                    >
                        {[Gender::Male, Gender::Female, Gender::Unknown]
                            .into_iter()
                            .map(|g| view! { <option value=i64::from(g).to_string()>{g.label()}</option> })
                            .collect::<Vec<_>>()}
                    </select>
                </label>
                <FormError status=status/>
                <button class="btn btn--primary" type="submit" disabled=move || status.get().loading>
                    "Save"
                </button>
            </form>
        </main>
    }
}
