//! Dashboard settings: change password.

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

use leptos::prelude::*;
use session::PasswordChange;

use crate::state::session::use_session_handle;
use crate::util::validators::{validate_confirmation, validate_password};

pub const CURRENT_PASSWORD_REQUIRED: &str = "Please enter your current password.";
pub const PASSWORD_UNCHANGED: &str = "New password must differ from the current one.";
pub const PASSWORD_SAVED: &str = "Password updated successfully.";

/// The change to submit, or the first problem with the form.
fn password_change(current: &str, new: &str, confirmation: &str) -> Result<PasswordChange, &'static str> {
    if current.is_empty() {
        return Err(CURRENT_PASSWORD_REQUIRED);
    }
    if let Some(message) = validate_password(new).or_else(|| validate_confirmation(new, confirmation)) {
        return Err(message);
    }
    if current == new {
        return Err(PASSWORD_UNCHANGED);
    }
    Ok(PasswordChange { old_password: current.to_owned(), new_password: new.to_owned() })
}

/// Outcome banner under the form.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Notice {
    Saved,
    Failed(String),
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    let store = use_session_handle();

    let current = RwSignal::new(String::new());
    let new = RwSignal::new(String::new());
    let confirmation = RwSignal::new(String::new());
    let notice = RwSignal::new(None::<Notice>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let change = match password_change(&current.get(), &new.get(), &confirmation.get()) {
            Ok(change) => change,
            Err(message) => {
                notice.set(Some(Notice::Failed(message.to_owned())));
                return;
            }
        };
        notice.set(None);
        busy.set(true);

        #[cfg(feature = "csr")]
        {
            let store = store.get_value();
            leptos::task::spawn_local(async move {
                match store.change_password(&change).await {
                    Ok(()) => {
                        current.set(String::new());
                        new.set(String::new());
                        confirmation.set(String::new());
                        notice.set(Some(Notice::Saved));
                    }
                    Err(message) => notice.set(Some(Notice::Failed(message))),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = (change, store);
    };

    let password_input = move |signal: RwSignal<String>, placeholder: &'static str| {
        view! {
            <input
                class="auth-input"
                type="password"
                placeholder=placeholder
                prop:value=move || signal.get()
                on:input=move |ev| signal.set(event_target_value(&ev))
            />
        }
    };

    view! {
        <section class="settings">
            <h2>"Change password"</h2>
            <form class="settings-form" on:submit=on_submit>
                {password_input(current, "Current password")}
                {password_input(new, "New password")}
                {password_input(confirmation, "Confirm new password")}
                <button class="auth-button" type="submit" disabled=move || busy.get()>
                    "Save"
                </button>
            </form>
            {move || {
                notice
                    .get()
                    .map(|notice| match notice {
                        Notice::Saved => view! { <p class="settings-notice">{PASSWORD_SAVED}</p> }.into_any(),
                        Notice::Failed(message) => view! { <p class="auth-error">{message}</p> }.into_any(),
                    })
            }}
        </section>
    }
}
