//! Role dashboard shell: section navigation, greeting and logout.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every page here mounts under a `PrivateRoute`, so a session with the
//! matching role is guaranteed while they render. Logging out clears the
//! session and the surrounding guard redirects to `/`.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use leptos_router::components::{A, Outlet};
use session::Role;
use session::nav::display_name;
use session::routes::{dashboard_path, settings_path};

use crate::state::session::{use_session, use_session_handle};

/// Section links shown in `role`'s dashboard navigation.
fn dashboard_sections(role: Role) -> Vec<(&'static str, String)> {
    let base = dashboard_path(role);
    let mut sections = vec![("Overview", format!("{base}/overview")), ("Profile", format!("{base}/profile"))];
    if role == Role::Institution {
        sections.push(("Create scholarship", format!("{base}/scholarships/create")));
    }
    sections.push(("Applications", format!("{base}/applications")));
    sections.push(("Settings", settings_path(role)));
    sections
}

#[component]
pub fn DashboardPage(role: Role) -> impl IntoView {
    let store = use_session_handle();
    let links = dashboard_sections(role)
        .into_iter()
        .map(|(label, href)| view! { <li><A href=href>{label}</A></li> })
        .collect_view();

    view! {
        <div class="dashboard">
            <aside class="dashboard__nav">
                <A href=dashboard_path(role)>{format!("{role} dashboard")}</A>
                <ul>{links}</ul>
                <button class="dashboard__logout" on:click=move |_| store.get_value().logout()>
                    "Logout"
                </button>
            </aside>
            <main class="dashboard__content">
                <Outlet/>
            </main>
        </div>
    }
}

#[component]
pub fn DashboardHome() -> impl IntoView {
    let session = use_session();
    let greeting = move || {
        session.with(|s| display_name(s).map_or_else(|| "Welcome back".to_owned(), |name| format!("Welcome back, {name}")))
    };
    view! { <h2 class="dashboard__greeting">{greeting}</h2> }
}
