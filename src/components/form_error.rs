//! Inline error line bound to a form's status.

use leptos::prelude::*;

use crate::util::form::FormStatus;

#[component]
pub fn FormError(status: RwSignal<FormStatus>) -> impl IntoView {
    let message = move || status.with(|s| s.error.clone());
    view! {
        <Show when=move || message().is_some()>
            <p class="form-error" role="alert">{move || message().unwrap_or_default()}</p>
        </Show>
    }
}
