//! Sign-in page.

#[cfg(test)]
#[path = "signin_test.rs"]
mod signin_test;

use leptos::prelude::*;
use leptos_router::components::A;
#[cfg(feature = "csr")]
use leptos_router::NavigateOptions;
#[cfg(feature = "csr")]
use leptos_router::hooks::use_navigate;
use session::{Credentials, Session};
use session::routes::SIGN_UP_PATH;

use crate::state::session::{use_session, use_session_handle};
use crate::util::validators::validate_email;

pub const FIELDS_REQUIRED: &str = "Enter your email and password.";

/// Credentials to submit, or the message explaining why the form is incomplete.
fn sign_in_credentials(email: &str, password: &str) -> Result<Credentials, &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(FIELDS_REQUIRED);
    }
    if let Some(message) = validate_email(email) {
        return Err(message);
    }
    Ok(Credentials::new(email, password))
}

#[component]
pub fn SignInPage() -> impl IntoView {
    let session = use_session();
    let store = use_session_handle();
    #[cfg(feature = "csr")]
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let form_error = RwSignal::new(None::<String>);
    let submitted = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if session.with(Session::loading) {
            return;
        }
        let credentials = match sign_in_credentials(&email.get(), &password.get()) {
            Ok(credentials) => credentials,
            Err(message) => {
                form_error.set(Some(message.to_owned()));
                return;
            }
        };
        form_error.set(None);
        submitted.set(true);

        #[cfg(feature = "csr")]
        {
            let store = store.get_value();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                if store.login(&credentials).await {
                    navigate("/", NavigateOptions::default());
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = (credentials, store);
    };

    let message = move || {
        form_error.get().or_else(|| {
            submitted
                .get()
                .then(|| session.with(|s| s.error().map(str::to_owned)))
                .flatten()
        })
    };

    view! {
        <div class="auth-page">
            <form class="auth-card" on:submit=on_submit>
                <h1>"Sign in"</h1>
                <input
                    class="auth-input"
                    type="email"
                    placeholder="you@example.com"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <input
                    class="auth-input"
                    type="password"
                    placeholder="Password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <button class="auth-button" type="submit" disabled=move || session.with(Session::loading)>
                    "Sign in"
                </button>
                <Show when=move || message().is_some()>
                    <p class="auth-error">{move || message().unwrap_or_default()}</p>
                </Show>
                <p class="auth-switch">
                    "No account yet? "
                    <A href=SIGN_UP_PATH>"Sign up"</A>
                </p>
            </form>
        </div>
    }
}
