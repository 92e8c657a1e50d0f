//! Institute search and public institute profile.
//!
//! SYSTEM CONTEXT
//! ==============
//! Both pages are public. Facets come from the full institute list, loaded
//! once; every filter change re-queries the search endpoint and only the
//! newest answer is rendered. Students see an "Apply" action per course on
//! the profile page; everyone else sees the courses read-only.

#[cfg(test)]
#[path = "search_test.rs"]
mod search_test;

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_query_map;
use session::marketplace::{ApplicationStatus, Course, InstituteProfile, Location};
#[cfg(feature = "csr")]
use session::marketplace::ApplicationDraft;
use session::routes::{SIGN_IN_PATH, institute_page_path};
use session::search::{SCHOLARSHIP_TYPES, SUMMARY_WORDS, summarize};
use session::{Facet, FilterOptions, InstituteFilter, Role, Session};

use crate::state::remote::Remote;
#[cfg(feature = "csr")]
use crate::state::session::current_token;
use crate::state::session::{use_marketplace, use_session};

pub const SEARCH_FAILED: &str = "Could not load institutes.";
pub const NO_RESULTS: &str = "No institutes found";
pub const PROFILE_FAILED: &str = "Could not load this institute.";
pub const MISSING_INSTITUTE: &str = "No institute selected.";
pub const APPLY_FAILED: &str = "Could not submit your application.";

/// Label and availability of a course's apply button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ApplyButton {
    label: &'static str,
    enabled: bool,
}

/// Only students may apply, and only once per course.
fn apply_button(role: Option<Role>, status: Option<ApplicationStatus>) -> ApplyButton {
    match (role, status) {
        (Some(Role::Student), None) => ApplyButton { label: "Apply Now", enabled: true },
        (Some(Role::Student), Some(_)) => ApplyButton { label: "Application Submitted", enabled: false },
        _ => ApplyButton { label: "Apply Now", enabled: false },
    }
}

fn institute_card(profile: InstituteProfile) -> impl IntoView {
    let href = profile.user_id.as_deref().map(institute_page_path);
    let location = profile.location.as_ref().map(Location::label).unwrap_or_default();
    let summary = summarize(profile.description.as_deref().unwrap_or_default(), SUMMARY_WORDS);

    view! {
        <li class="institute-card">
            <h3>{profile.name.unwrap_or_default()}</h3>
            <p class="institute-card__university">{profile.university.unwrap_or_default()}</p>
            <p class="institute-card__location">{location}</p>
            <p class="institute-card__summary">{summary}</p>
            {href.map(|href| view! { <A href=href>"View profile"</A> })}
        </li>
    }
}

fn facet_option(filter: RwSignal<InstituteFilter>, facet: Facet, value: String) -> impl IntoView {
    let checked = value.clone();
    let toggled = value.clone();
    view! {
        <label class="facet-option">
            <input
                type="checkbox"
                prop:checked=move || filter.with(|f| f.is_selected(facet, &checked))
                on:change=move |_| filter.update(|f| f.toggle(facet, &toggled))
            />
            {value}
        </label>
    }
}

#[component]
pub fn SearchPage() -> impl IntoView {
    let session = use_session();
    let market = use_marketplace();

    let options = RwSignal::new(FilterOptions::default());
    let filter = RwSignal::new(InstituteFilter::default());
    let results = RwSignal::new(Remote::<Vec<InstituteProfile>>::Loading);
    let latest = StoredValue::new(0_u64);

    #[cfg(feature = "csr")]
    {
        let market = market.get_value();
        let token = current_token(session);
        leptos::task::spawn_local(async move {
            match market.institute_profiles(token.as_deref()).await {
                Ok(profiles) => options.set(FilterOptions::from_profiles(&profiles)),
                Err(e) => log::warn!("search facets unavailable: {e}"),
            }
        });
    }

    Effect::new(move || {
        let current = filter.get();
        latest.update_value(|n| *n += 1);
        let ticket = latest.get_value();
        results.set(Remote::Loading);

        #[cfg(feature = "csr")]
        {
            let market = market.get_value();
            let token = current_token(session);
            leptos::task::spawn_local(async move {
                let found = market.search_institutes(token.as_deref(), &current).await;
                if latest.get_value() == ticket {
                    results.set(Remote::settle(found, SEARCH_FAILED));
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = (current, ticket, market, session);
    });

    let locations = move || {
        options
            .get()
            .locations
            .into_iter()
            .map(|(country, cities)| {
                let cities =
                    cities.into_iter().map(|city| facet_option(filter, Facet::City, city)).collect_view();
                view! {
                    <div class="facet-country">
                        {facet_option(filter, Facet::Country, country)}
                        <div class="facet-cities">{cities}</div>
                    </div>
                }
            })
            .collect_view()
    };
    let courses = move || {
        options.get().courses.into_iter().map(|course| facet_option(filter, Facet::Course, course)).collect_view()
    };
    let scholarship_types = SCHOLARSHIP_TYPES
        .into_iter()
        .map(|kind| facet_option(filter, Facet::ScholarshipType, kind.to_owned()))
        .collect_view();

    view! {
        <section class="institute-search">
            <h1>"Find an institute"</h1>
            <input
                class="search-input"
                type="search"
                placeholder="Search institutes"
                prop:value=move || filter.with(|f| f.search.clone())
                on:input=move |ev| filter.update(|f| f.search = event_target_value(&ev))
            />
            <div class="search-body">
                <aside class="search-facets">
                    <h3>"Location"</h3>
                    {locations}
                    <h3>"Courses"</h3>
                    {courses}
                    <h3>"Scholarship Type"</h3>
                    {scholarship_types}
                </aside>
                {move || match results.get() {
                    Remote::Loading => view! { <p class="search-status">"Loading..."</p> }.into_any(),
                    Remote::Failed(message) => view! { <p class="auth-error">{message}</p> }.into_any(),
                    Remote::Ready(found) if found.is_empty() => {
                        view! { <p class="search-status">{NO_RESULTS}</p> }.into_any()
                    }
                    Remote::Ready(found) => {
                        view! { <ul class="search-results">{found.into_iter().map(institute_card).collect_view()}</ul> }
                            .into_any()
                    }
                }}
            </div>
        </section>
    }
}

#[component]
fn CourseCard(course: Course) -> impl IntoView {
    let session = use_session();
    let market = use_marketplace();
    let status = RwSignal::new(None::<ApplicationStatus>);
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);
    let course_id = StoredValue::new(course.id.clone());
    let role = move || session.with(Session::role);

    #[cfg(feature = "csr")]
    if session.with_untracked(Session::role) == Some(Role::Student) {
        let market = market.get_value();
        let token = current_token(session);
        let id = course.id.clone();
        leptos::task::spawn_local(async move {
            match market.application_status_for_course(token.as_deref(), &id).await {
                Ok(found) => status.set(found),
                Err(e) => log::warn!("application check failed for {id}: {e}"),
            }
        });
    }

    let on_apply = move |_| {
        if busy.get() {
            return;
        }
        busy.set(true);
        error.set(None);

        #[cfg(feature = "csr")]
        {
            let market = market.get_value();
            let token = current_token(session);
            let id = course_id.get_value();
            leptos::task::spawn_local(async move {
                let draft = ApplicationDraft { submitted_date: crate::net::api::now_iso() };
                match market.apply(token.as_deref(), &id, &draft).await {
                    Ok(()) => status.set(Some(ApplicationStatus::Submitted)),
                    Err(e) => error.set(Some(e.request_message(APPLY_FAILED))),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = (market, course_id);
    };

    let button = move || apply_button(role(), status.get());
    let amount = course.amount_label();
    let detail = [course.scholarship_type.clone(), amount].into_iter().flatten().collect::<Vec<_>>().join(" · ");

    view! {
        <li class="course-card">
            <h3>{course.title().to_owned()}</h3>
            <p>{course.description.clone().unwrap_or_default()}</p>
            <p class="course-card__scholarship">{detail}</p>
            <p class="course-card__deadline">{course.deadline.clone().map(|d| format!("Deadline: {d}"))}</p>
            <button
                class="course-card__apply"
                disabled=move || !button().enabled || busy.get()
                on:click=on_apply
            >
                {move || button().label}
            </button>
            <Show when=move || role().is_none()>
                <A href=SIGN_IN_PATH>"Sign in to apply"</A>
            </Show>
            <Show when=move || error.get().is_some()>
                <p class="auth-error">{move || error.get().unwrap_or_default()}</p>
            </Show>
        </li>
    }
}

#[component]
pub fn InstituteProfilePage() -> impl IntoView {
    let session = use_session();
    let market = use_marketplace();
    let query = use_query_map();
    let profile = RwSignal::new(Remote::<InstituteProfile>::Loading);

    Effect::new(move || {
        let Some(user_id) = query.with(|q| q.get("id")) else {
            profile.set(Remote::Failed(MISSING_INSTITUTE.to_owned()));
            return;
        };
        profile.set(Remote::Loading);

        #[cfg(feature = "csr")]
        {
            let market = market.get_value();
            let token = current_token(session);
            leptos::task::spawn_local(async move {
                profile.set(Remote::settle(market.institute_profile(token.as_deref(), &user_id).await, PROFILE_FAILED));
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = (user_id, market, session);
    });

    view! {
        <section class="institute-profile">
            {move || match profile.get() {
                Remote::Loading => view! { <p>"Loading..."</p> }.into_any(),
                Remote::Failed(message) => view! { <p class="auth-error">{message}</p> }.into_any(),
                Remote::Ready(found) => {
                    let location = found.location.as_ref().map(Location::label).unwrap_or_default();
                    let contact = found.contact.clone().unwrap_or_default();
                    let courses = found
                        .courses()
                        .iter()
                        .cloned()
                        .map(|course| view! { <CourseCard course=course/> })
                        .collect_view();
                    view! {
                        <div class="institute-profile__body">
                        <header class="institute-profile__header">
                            <h1>{found.name.clone().unwrap_or_default()}</h1>
                            <p>{found.university.clone().unwrap_or_default()}</p>
                            <p>{location}</p>
                        </header>
                        <p class="institute-profile__description">{found.description.clone().unwrap_or_default()}</p>
                        <p class="institute-profile__contact">
                            {contact.official_email.unwrap_or_default()}
                            " "
                            {contact.phone_number.unwrap_or_default()}
                        </p>
                        <h2>"Courses"</h2>
                        <ul class="course-list">{courses}</ul>
                        </div>
                    }
                        .into_any()
                }
            }}
        </section>
    }
}
