//! Labelled text input bound to one `String` field of a form signal.

use leptos::prelude::*;

pub fn text_field<F: Send + Sync + 'static>(
    form: RwSignal<F>,
    label: &'static str,
    kind: &'static str,
    read: fn(&F) -> &String,
    write: fn(&mut F) -> &mut String,
) -> impl IntoView {
    view! {
        <label class="form-field">
            <span>{label}</span>
            <input
                class="auth-input"
                type=kind
                prop:value=move || form.with(|f| read(f).clone())
                on:input=move |ev| form.update(|f| *write(f) = event_target_value(&ev))
            />
        </label>
    }
}
