//! Profile creation (onboarding) and the dashboard profile editor.
//!
//! Students and institutions fill different forms; both are plain JSON
//! submissions. Creation ends on the role's dashboard, editing stays put and
//! shows a notice.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use leptos::prelude::*;
use leptos_router::components::A;
#[cfg(feature = "csr")]
use leptos_router::NavigateOptions;
#[cfg(feature = "csr")]
use leptos_router::hooks::use_navigate;
use session::Role;
use session::marketplace::{Address, Contact, InstituteProfile, InstituteProfileDraft, Location, StudentProfile};
use session::routes::dashboard_path;

use crate::components::field::text_field;
#[cfg(feature = "csr")]
use crate::state::session::current_token;
use crate::state::session::{use_marketplace, use_session};
use crate::util::validators::validate_email;

pub const FIELDS_REQUIRED: &str = "Please fill in every field.";
pub const PROFILE_SAVED: &str = "Profile saved.";
pub const CREATE_FAILED: &str = "An error occurred while creating your profile.";
pub const UPDATE_FAILED: &str = "An error occurred while saving your profile.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileMode {
    Create,
    Update,
}

fn require(values: &[&String]) -> Result<(), &'static str> {
    if values.iter().any(|v| v.trim().is_empty()) { Err(FIELDS_REQUIRED) } else { Ok(()) }
}

/// Raw student profile input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StudentProfileForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub dob: String,
    pub city: String,
    pub country: String,
}

impl StudentProfileForm {
    pub fn from_profile(profile: &StudentProfile) -> Self {
        Self {
            name: profile.student_name.clone(),
            email: profile.email.clone(),
            phone: profile.phone_number.clone(),
            dob: profile.dob.split('T').next().unwrap_or_default().to_owned(),
            city: profile.address.city.clone(),
            country: profile.address.country.clone(),
        }
    }

    /// The profile to submit, or the first problem with the form.
    pub fn validate(&self) -> Result<StudentProfile, &'static str> {
        require(&[&self.name, &self.email, &self.phone, &self.dob, &self.city, &self.country])?;
        let email = self.email.trim();
        if let Some(message) = validate_email(email) {
            return Err(message);
        }
        Ok(StudentProfile {
            student_name: self.name.trim().to_owned(),
            email: email.to_owned(),
            phone_number: self.phone.trim().to_owned(),
            dob: self.dob.trim().to_owned(),
            address: Address { city: self.city.trim().to_owned(), country: self.country.trim().to_owned() },
            ..StudentProfile::default()
        })
    }
}

/// Raw institute profile input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InstituteProfileForm {
    pub name: String,
    pub university: String,
    pub description: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub country: String,
}

impl InstituteProfileForm {
    pub fn from_profile(profile: &InstituteProfile) -> Self {
        let contact = profile.contact.clone().unwrap_or_default();
        let location = profile.location.clone().unwrap_or_default();
        Self {
            name: profile.name.clone().unwrap_or_default(),
            university: profile.university.clone().unwrap_or_default(),
            description: profile.description.clone().unwrap_or_default(),
            email: contact.official_email.unwrap_or_default(),
            phone: contact.phone_number.unwrap_or_default(),
            city: location.city.unwrap_or_default(),
            country: location.country.unwrap_or_default(),
        }
    }

    /// The profile to submit, or the first problem with the form.
    pub fn validate(&self) -> Result<InstituteProfileDraft, &'static str> {
        require(&[
            &self.name,
            &self.university,
            &self.description,
            &self.email,
            &self.phone,
            &self.city,
            &self.country,
        ])?;
        let email = self.email.trim();
        if let Some(message) = validate_email(email) {
            return Err(message);
        }
        Ok(InstituteProfileDraft {
            name: self.name.trim().to_owned(),
            university: self.university.trim().to_owned(),
            description: self.description.trim().to_owned(),
            contact: Contact {
                official_email: Some(email.to_owned()),
                phone_number: Some(self.phone.trim().to_owned()),
            },
            location: Location::new(self.city.trim(), self.country.trim()),
        })
    }
}

/// Outcome banner under the form.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Notice {
    Saved,
    Failed(String),
}

fn notice_view(notice: RwSignal<Option<Notice>>) -> impl IntoView {
    move || {
        notice.get().map(|notice| match notice {
            Notice::Saved => view! { <p class="settings-notice">{PROFILE_SAVED}</p> }.into_any(),
            Notice::Failed(message) => view! { <p class="auth-error">{message}</p> }.into_any(),
        })
    }
}

#[component]
fn StudentProfileEditor(mode: ProfileMode) -> impl IntoView {
    let session = use_session();
    let market = use_marketplace();
    #[cfg(feature = "csr")]
    let navigate = use_navigate();

    let form = RwSignal::new(StudentProfileForm::default());
    let notice = RwSignal::new(None::<Notice>);
    let busy = RwSignal::new(false);

    #[cfg(feature = "csr")]
    if mode == ProfileMode::Update {
        let market = market.get_value();
        let token = current_token(session);
        leptos::task::spawn_local(async move {
            match market.student_account(token.as_deref()).await {
                Ok(account) => {
                    if let Some(profile) = account.student_profile {
                        form.set(StudentProfileForm::from_profile(&profile));
                    }
                }
                Err(e) => notice.set(Some(Notice::Failed(e.request_message(UPDATE_FAILED)))),
            }
        });
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let profile = match form.with(StudentProfileForm::validate) {
            Ok(profile) => profile,
            Err(message) => {
                notice.set(Some(Notice::Failed(message.to_owned())));
                return;
            }
        };
        notice.set(None);
        busy.set(true);

        #[cfg(feature = "csr")]
        {
            let market = market.get_value();
            let token = current_token(session);
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let result = match mode {
                    ProfileMode::Create => market.create_student_profile(token.as_deref(), &profile).await,
                    ProfileMode::Update => market.update_student_profile(token.as_deref(), &profile).await,
                };
                match (result, mode) {
                    (Ok(()), ProfileMode::Create) => navigate(&dashboard_path(Role::Student), NavigateOptions::default()),
                    (Ok(()), ProfileMode::Update) => notice.set(Some(Notice::Saved)),
                    (Err(e), ProfileMode::Create) => notice.set(Some(Notice::Failed(e.request_message(CREATE_FAILED)))),
                    (Err(e), ProfileMode::Update) => notice.set(Some(Notice::Failed(e.request_message(UPDATE_FAILED)))),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = (profile, market, session);
    };

    view! {
        <form class="profile-form" on:submit=on_submit>
            {text_field(form, "Full name", "text", |f| &f.name, |f| &mut f.name)}
            {text_field(form, "Email", "email", |f| &f.email, |f| &mut f.email)}
            {text_field(form, "Phone number", "tel", |f| &f.phone, |f| &mut f.phone)}
            {text_field(form, "Date of birth", "date", |f| &f.dob, |f| &mut f.dob)}
            {text_field(form, "City", "text", |f| &f.city, |f| &mut f.city)}
            {text_field(form, "Country", "text", |f| &f.country, |f| &mut f.country)}
            <button class="auth-button" type="submit" disabled=move || busy.get()>
                {if mode == ProfileMode::Create { "Create profile" } else { "Save changes" }}
            </button>
            {notice_view(notice)}
        </form>
    }
}

#[component]
fn InstituteProfileEditor(mode: ProfileMode) -> impl IntoView {
    let session = use_session();
    let market = use_marketplace();
    #[cfg(feature = "csr")]
    let navigate = use_navigate();

    let form = RwSignal::new(InstituteProfileForm::default());
    let notice = RwSignal::new(None::<Notice>);
    let busy = RwSignal::new(false);

    #[cfg(feature = "csr")]
    if mode == ProfileMode::Update {
        let market = market.get_value();
        let token = current_token(session);
        leptos::task::spawn_local(async move {
            match market.own_institute_profile(token.as_deref()).await {
                Ok(profile) => form.set(InstituteProfileForm::from_profile(&profile)),
                Err(e) => notice.set(Some(Notice::Failed(e.request_message(UPDATE_FAILED)))),
            }
        });
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let draft = match form.with(InstituteProfileForm::validate) {
            Ok(draft) => draft,
            Err(message) => {
                notice.set(Some(Notice::Failed(message.to_owned())));
                return;
            }
        };
        notice.set(None);
        busy.set(true);

        #[cfg(feature = "csr")]
        {
            let market = market.get_value();
            let token = current_token(session);
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let result = match mode {
                    ProfileMode::Create => market.create_institute_profile(token.as_deref(), &draft).await,
                    ProfileMode::Update => market.update_institute_profile(token.as_deref(), &draft).await,
                };
                match (result, mode) {
                    (Ok(()), ProfileMode::Create) => {
                        navigate(&dashboard_path(Role::Institution), NavigateOptions::default());
                    }
                    (Ok(()), ProfileMode::Update) => notice.set(Some(Notice::Saved)),
                    (Err(e), ProfileMode::Create) => notice.set(Some(Notice::Failed(e.request_message(CREATE_FAILED)))),
                    (Err(e), ProfileMode::Update) => notice.set(Some(Notice::Failed(e.request_message(UPDATE_FAILED)))),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = (draft, market, session);
    };

    view! {
        <form class="profile-form" on:submit=on_submit>
            {text_field(form, "Institute name", "text", |f| &f.name, |f| &mut f.name)}
            {text_field(form, "University", "text", |f| &f.university, |f| &mut f.university)}
            {text_field(form, "Description", "text", |f| &f.description, |f| &mut f.description)}
            {text_field(form, "Official email", "email", |f| &f.email, |f| &mut f.email)}
            {text_field(form, "Phone number", "tel", |f| &f.phone, |f| &mut f.phone)}
            {text_field(form, "City", "text", |f| &f.city, |f| &mut f.city)}
            {text_field(form, "Country", "text", |f| &f.country, |f| &mut f.country)}
            <button class="auth-button" type="submit" disabled=move || busy.get()>
                {if mode == ProfileMode::Create { "Create profile" } else { "Save changes" }}
            </button>
            {notice_view(notice)}
        </form>
    }
}

fn editor(role: Role, mode: ProfileMode) -> AnyView {
    match role {
        Role::Student => view! { <StudentProfileEditor mode=mode/> }.into_any(),
        Role::Institution => view! { <InstituteProfileEditor mode=mode/> }.into_any(),
    }
}

/// Onboarding form shown right after sign-up.
#[component]
pub fn ProfileCreationPage(role: Role) -> impl IntoView {
    view! {
        <section class="profile-create">
            <h1>{format!("Set up your {role} profile")}</h1>
            {editor(role, ProfileMode::Create)}
            <A href=dashboard_path(role)>"Skip to dashboard"</A>
        </section>
    }
}

/// The signed-in user's own profile, editable.
#[component]
pub fn ProfilePage(role: Role) -> impl IntoView {
    view! {
        <section class="dashboard__section">
            <h2>"Profile"</h2>
            {editor(role, ProfileMode::Update)}
        </section>
    }
}
