//! Edit the public profile. Saving a new avatar updates the session too.

#[cfg(test)]
#[path = "update_profile_test.rs"]
mod update_profile_test;

use leptos::prelude::*;

use crate::components::form_error::FormError;
use crate::components::nav_bar::NavBar;
use crate::coordinator::{Coordinator, use_coordinator};
use crate::net::api;
use crate::net::http::ApiError;
use crate::net::types::{UpdateProfilePayload, UserProfile};
use crate::util::form::{FormStatus, FormSubmission};
use crate::util::validate::optional;

fn profile_payload(draft: &UserProfile) -> Result<UpdateProfilePayload, &'static str> {
    let avatar_url = optional(&draft.avatar_url);
    if let Some(url) = &avatar_url {
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err("Avatar must be an http(s) URL.");
        }
    }
    Ok(UpdateProfilePayload {
        username: optional(&draft.username),
        email: optional(&draft.email),
        avatar_url,
        description: Some(draft.description.trim().to_owned()),
    })
}

#[component]
pub fn UpdateProfilePage() -> impl IntoView {
    let coordinator = use_coordinator();
    let draft = RwSignal::new(UserProfile::default());
    let status = RwSignal::new(FormStatus::default());

    let user_id = coordinator.with_value(|c| c.store.with(|s| s.user_id().map(str::to_owned)));
    if let Some(user_id) = user_id.clone() {
        let client = coordinator.with_value(|c| c.api.clone());
        leptos::task::spawn_local(async move {
            match api::fetch_user_profile(&client, &user_id).await {
                Ok(profile) => draft.set(profile),
                Err(e) => status.set(FormStatus::failed(e.to_string())),
            }
        });
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if status.get_untracked().loading {
            return;
        }
        let payload = match draft.with_untracked(profile_payload) {
            Ok(payload) => payload,
            Err(message) => {
                status.set(FormStatus::failed(message));
                return;
            }
        };
        let Coordinator { store, api: client } = coordinator.get_value();
        let user_id = user_id.clone().unwrap_or_default();
        leptos::task::spawn_local(async move {
            let form = FormSubmission::new(status, |payload: UpdateProfilePayload| {
                let client = client.clone();
                let user_id = user_id.clone();
                async move {
                    api::update_user_profile(&client, &user_id, &payload).await?;
                    Ok::<_, ApiError>(payload)
                }
            });
            if let Some(saved) = form.submit(payload).await {
                if let Some(url) = saved.avatar_url {
                    store.set_avatar(&url);
                }
            }
        });
    };

    view! {
        <NavBar/>
        <main class="page">
            <form class="card form" on:submit=on_submit>
                <h1>"Profile"</h1>
                <Show when=move || draft.with(|d| !d.avatar_url.trim().is_empty())>
                    <img class="form__avatar-preview" src=move || draft.with(|d| d.avatar_url.clone()) alt=""/>
                </Show>
                <label class="form__field">
                    <span>"Avatar URL"</span>
                    <input
                        class="form__input"
                        type="url"
                        prop:value=move || draft.with(|d| d.avatar_url.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            draft.update(|d| d.avatar_url = value);
                        }
                    />
                </label>
                <label class="form__field">
                    <span>"Display username"</span>
                    <input
                        class="form__input"
                        type="text"
                        prop:value=move || draft.with(|d| d.username.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            draft.update(|d| d.username = value);
                        }
                    />
                </label>
                <label class="form__field">
                    <span>"Public email"</span>
                    <input
                        class="form__input"
                        type="email"
                        prop:value=move || draft.with(|d| d.email.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            draft.update(|d| d.email = value);
                        }
                    />
                </label>
                <label class="form__field">
                    <span>"Bio"</span>
                    <textarea
                        class="form__input"
                        prop:value=move || draft.with(|d| d.description.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            draft.update(|d| d.description = value);
                        }
                    ></textarea>
                </label>
                <FormError status=status/>
                <button class="btn btn--primary" type="submit" disabled=move || status.get().loading>
                    "Save profile"
                </button>
            </form>
        </main>
    }
}
