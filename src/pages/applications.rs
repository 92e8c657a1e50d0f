//! Dashboard overview, application list and application detail.
//!
//! SYSTEM CONTEXT
//! ==============
//! Students see the applications they submitted; institutions see the ones
//! they received and decide open ones from the detail page. Every list is
//! fetched fresh when its page mounts.

#[cfg(test)]
#[path = "applications_test.rs"]
mod applications_test;

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_query_map;
use session::Role;
use session::marketplace::{Application, ApplicationDetail, ApplicationStatus, StatusCounts};
use session::routes::{application_page_path, applications_path};

use crate::state::remote::Remote;
#[cfg(feature = "csr")]
use crate::state::session::{ClientMarketplace, current_token};
use crate::state::session::{use_marketplace, use_session};

pub const LIST_FAILED: &str = "Could not load applications.";
pub const NO_APPLICATIONS: &str = "No applications yet.";
pub const DETAIL_FAILED: &str = "Could not load this application.";
pub const MISSING_APPLICATION: &str = "No application selected.";
pub const DECISION_FAILED: &str = "Could not update the application status.";

/// CSS modifier for a status badge.
fn status_class(status: ApplicationStatus) -> &'static str {
    match status {
        ApplicationStatus::Accepted => "status-badge status-badge--accepted",
        ApplicationStatus::Rejected => "status-badge status-badge--rejected",
        ApplicationStatus::Submitted | ApplicationStatus::Pending => "status-badge status-badge--pending",
    }
}

/// Whether `role` may accept or reject an application in `status`.
fn can_decide(role: Role, status: ApplicationStatus) -> bool {
    role == Role::Institution && status.is_open()
}

#[cfg(feature = "csr")]
async fn fetch_applications(
    market: &ClientMarketplace,
    role: Role,
    token: Option<&str>,
) -> Result<Vec<Application>, session::AuthError> {
    match role {
        Role::Student => market.student_applications(token).await,
        Role::Institution => market.institute_applications(token).await,
    }
}

/// Load `role`'s applications into a fresh signal.
fn load_applications(role: Role) -> RwSignal<Remote<Vec<Application>>> {
    let session = use_session();
    let market = use_marketplace();
    let applications = RwSignal::new(Remote::Loading);

    #[cfg(feature = "csr")]
    {
        let market = market.get_value();
        let token = current_token(session);
        leptos::task::spawn_local(async move {
            let result = fetch_applications(&market, role, token.as_deref()).await;
            applications.set(Remote::settle(result, LIST_FAILED));
        });
    }
    #[cfg(not(feature = "csr"))]
    let _ = (session, market, role);

    applications
}

fn status_badge(status: ApplicationStatus) -> impl IntoView {
    view! { <span class=status_class(status)>{status.label()}</span> }
}

#[component]
pub fn OverviewPage(role: Role) -> impl IntoView {
    let applications = load_applications(role);
    let counts = move || applications.with(|a| a.ready().map(|list| StatusCounts::tally(list)));

    view! {
        <section class="dashboard__section">
            <h2>"Overview"</h2>
            {move || match applications.get() {
                Remote::Failed(message) => Some(view! { <p class="auth-error">{message}</p> }),
                Remote::Loading | Remote::Ready(_) => None,
            }}
            {move || {
                counts()
                    .map(|c| {
                        view! {
                            <ul class="overview-stats">
                                <li>"Total: " {c.total}</li>
                                <li>"Submitted: " {c.submitted}</li>
                                <li>"Accepted: " {c.accepted}</li>
                                <li>"Rejected: " {c.rejected}</li>
                            </ul>
                        }
                    })
            }}
            <A href=applications_path(role)>"View applications"</A>
        </section>
    }
}

#[component]
pub fn ApplicationsPage(role: Role) -> impl IntoView {
    let applications = load_applications(role);

    let row = move |application: Application| {
        let href = application_page_path(role, &application.id);
        let title = application.course_title().to_owned();
        let submitted_on = application.submitted_on().map(str::to_owned);
        let status = application.status;
        view! {
            <li class="application-row">
                <A href=href>{title}</A>
                <span class="application-row__date">{submitted_on}</span>
                {status_badge(status)}
            </li>
        }
    };

    view! {
        <section class="dashboard__section">
            <h2>"Applications"</h2>
            {move || match applications.get() {
                Remote::Loading => view! { <p>"Loading..."</p> }.into_any(),
                Remote::Failed(message) => view! { <p class="auth-error">{message}</p> }.into_any(),
                Remote::Ready(list) if list.is_empty() => view! { <p>{NO_APPLICATIONS}</p> }.into_any(),
                Remote::Ready(list) => {
                    view! { <ul class="application-list">{list.into_iter().map(row).collect_view()}</ul> }.into_any()
                }
            }}
        </section>
    }
}

#[component]
pub fn ApplicationDetailPage(role: Role) -> impl IntoView {
    let session = use_session();
    let market = use_marketplace();
    let query = use_query_map();
    let detail = RwSignal::new(Remote::<ApplicationDetail>::Loading);
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    Effect::new(move || {
        let Some(id) = query.with(|q| q.get("id")) else {
            detail.set(Remote::Failed(MISSING_APPLICATION.to_owned()));
            return;
        };
        detail.set(Remote::Loading);

        #[cfg(feature = "csr")]
        {
            let market = market.get_value();
            let token = current_token(session);
            leptos::task::spawn_local(async move {
                detail.set(Remote::settle(market.application(token.as_deref(), &id).await, DETAIL_FAILED));
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = (id, market, session);
    });

    let decide = move |status: ApplicationStatus| {
        let Some(id) = detail.with_untracked(|d| d.ready().map(|d| d.application.id.clone())) else {
            return;
        };
        if busy.get_untracked() {
            return;
        }
        busy.set(true);
        error.set(None);

        #[cfg(feature = "csr")]
        {
            let market = market.get_value();
            let token = current_token(session);
            leptos::task::spawn_local(async move {
                match market.set_application_status(token.as_deref(), &id, status).await {
                    Ok(updated) => detail.update(|d| {
                        if let Remote::Ready(d) = d {
                            d.application.status = updated.status;
                        }
                    }),
                    Err(e) => error.set(Some(e.request_message(DECISION_FAILED))),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = (id, status);
    };

    view! {
        <section class="dashboard__section application-detail">
            <h2>"Application details"</h2>
            {move || match detail.get() {
                Remote::Loading => view! { <p>"Loading..."</p> }.into_any(),
                Remote::Failed(message) => view! { <p class="auth-error">{message}</p> }.into_any(),
                Remote::Ready(found) => {
                    let status = found.application.status;
                    let student = found.student_profile.unwrap_or_default();
                    let address = [student.address.city, student.address.country]
                        .into_iter()
                        .filter(|part| !part.is_empty())
                        .collect::<Vec<_>>()
                        .join(", ");
                    view! {
                        <div class="application-detail__body">
                            <h3>{found.application.course_title().to_owned()}</h3>
                            <p>"Submitted: " {found.application.submitted_on().map(str::to_owned)}</p>
                            {status_badge(status)}
                            <dl class="application-detail__student">
                                <dt>"Name"</dt>
                                <dd>{student.student_name}</dd>
                                <dt>"Email"</dt>
                                <dd>{student.email}</dd>
                                <dt>"Phone"</dt>
                                <dd>{student.phone_number}</dd>
                                <dt>"Address"</dt>
                                <dd>{address}</dd>
                            </dl>
                            <Show when=move || can_decide(role, status)>
                                <div class="application-detail__actions">
                                    <button
                                        class="button--reject"
                                        disabled=move || busy.get()
                                        on:click=move |_| decide(ApplicationStatus::Rejected)
                                    >
                                        "Reject"
                                    </button>
                                    <button
                                        class="button--accept"
                                        disabled=move || busy.get()
                                        on:click=move |_| decide(ApplicationStatus::Accepted)
                                    >
                                        "Accept"
                                    </button>
                                </div>
                            </Show>
                        </div>
                    }
                        .into_any()
                }
            }}
            <Show when=move || error.get().is_some()>
                <p class="auth-error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <A href=applications_path(role)>"Back to applications"</A>
        </section>
    }
}
