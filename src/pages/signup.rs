//! Sign-up page.
//!
//! Registration does not return a token, so a successful sign-up is followed
//! by a login with the same credentials before moving on to profile creation.

#[cfg(test)]
#[path = "signup_test.rs"]
mod signup_test;

use leptos::prelude::*;
use leptos_router::components::A;
#[cfg(feature = "csr")]
use leptos_router::NavigateOptions;
#[cfg(feature = "csr")]
use leptos_router::hooks::use_navigate;
use session::routes::SIGN_IN_PATH;
#[cfg(feature = "csr")]
use session::routes::profile_creation_path;
use session::{Registration, Role};

use crate::state::session::use_session_handle;
use crate::util::validators::{validate_confirmation, validate_email, validate_password};

pub const NAME_REQUIRED: &str = "Please enter your name.";
pub const ROLE_REQUIRED: &str = "Please choose whether you are a student or an institution.";

/// Raw sign-up form input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirmation: String,
    pub role: Option<Role>,
}

impl SignUpForm {
    /// The registration to submit, or the first problem with the form.
    pub fn validate(&self) -> Result<Registration, &'static str> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(NAME_REQUIRED);
        }
        let email = self.email.trim();
        if let Some(message) = validate_email(email)
            .or_else(|| validate_password(&self.password))
            .or_else(|| validate_confirmation(&self.password, &self.confirmation))
        {
            return Err(message);
        }
        let role = self.role.ok_or(ROLE_REQUIRED)?;
        Ok(Registration {
            name: name.to_owned(),
            email: email.to_owned(),
            password: self.password.clone(),
            role,
        })
    }
}

#[component]
pub fn SignUpPage() -> impl IntoView {
    let store = use_session_handle();
    #[cfg(feature = "csr")]
    let navigate = use_navigate();

    let form = RwSignal::new(SignUpForm::default());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let registration = match form.with(SignUpForm::validate) {
            Ok(registration) => registration,
            Err(message) => {
                error.set(Some(message.to_owned()));
                return;
            }
        };
        error.set(None);
        busy.set(true);

        #[cfg(feature = "csr")]
        {
            let store = store.get_value();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match store.register(&registration).await {
                    Ok(()) => {
                        let credentials = session::Credentials::new(registration.email, registration.password);
                        let target = if store.login(&credentials).await {
                            profile_creation_path(registration.role)
                        } else {
                            SIGN_IN_PATH.to_owned()
                        };
                        navigate(&target, NavigateOptions::default());
                    }
                    Err(message) => error.set(Some(message)),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = (registration, store);
    };

    let role_options = Role::ALL
        .into_iter()
        .map(move |role| {
            view! {
                <label class="role-option">
                    <input
                        type="radio"
                        name="role"
                        value=role.as_str()
                        prop:checked=move || form.with(|f| f.role == Some(role))
                        on:change=move |_| form.update(|f| f.role = Some(role))
                    />
                    {role.as_str()}
                </label>
            }
        })
        .collect_view();

    view! {
        <div class="auth-page">
            <form class="auth-card" on:submit=on_submit>
                <h1>"Create an account"</h1>
                <input
                    class="auth-input"
                    type="text"
                    placeholder="Full name"
                    prop:value=move || form.with(|f| f.name.clone())
                    on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                />
                <input
                    class="auth-input"
                    type="email"
                    placeholder="you@example.com"
                    prop:value=move || form.with(|f| f.email.clone())
                    on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                />
                <input
                    class="auth-input"
                    type="password"
                    placeholder="Password"
                    prop:value=move || form.with(|f| f.password.clone())
                    on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                />
                <input
                    class="auth-input"
                    type="password"
                    placeholder="Confirm password"
                    prop:value=move || form.with(|f| f.confirmation.clone())
                    on:input=move |ev| form.update(|f| f.confirmation = event_target_value(&ev))
                />
                <fieldset class="role-choice">
                    <legend>"I am a"</legend>
                    {role_options}
                </fieldset>
                <button class="auth-button" type="submit" disabled=move || busy.get()>
                    "Sign up"
                </button>
                <Show when=move || error.get().is_some()>
                    <p class="auth-error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <p class="auth-switch">
                    "Already registered? "
                    <A href=SIGN_IN_PATH>"Sign in"</A>
                </p>
            </form>
        </div>
    }
}
