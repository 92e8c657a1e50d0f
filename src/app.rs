//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{ParentRoute, Route, Router, Routes},
};
use session::Role;

use crate::components::private_route::PrivateRoute;
use crate::components::public_route::PublicRoute;
use crate::pages::applications::{ApplicationDetailPage, ApplicationsPage, OverviewPage};
use crate::pages::dashboard::{DashboardHome, DashboardPage};
use crate::pages::home::HomePage;
use crate::pages::profile::{ProfileCreationPage, ProfilePage};
use crate::pages::scholarship::ScholarshipPage;
use crate::pages::search::{InstituteProfilePage, SearchPage};
use crate::pages::settings::SettingsPage;
use crate::pages::signin::SignInPage;
use crate::pages::signup::SignUpPage;
use crate::pages::unauthorized::UnauthorizedPage;
use crate::state::session::provide_session;
use crate::state::ui::provide_layout;

const STUDENT_ONLY: &[Role] = &[Role::Student];
const INSTITUTION_ONLY: &[Role] = &[Role::Institution];

/// Root application component.
///
/// The session is rehydrated from `localStorage` inside `provide_session`,
/// before the router mounts, so no guard ever sees the pre-rehydration state.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_session();
    provide_layout();

    view! {
        <Title text="GrantHive"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <ParentRoute path=StaticSegment("") view=PublicRoute>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=StaticSegment("signin") view=SignInPage/>
                    <Route path=StaticSegment("signup") view=SignUpPage/>
                    <Route path=StaticSegment("institutesearch") view=SearchPage/>
                    <Route path=StaticSegment("instituteprofile") view=InstituteProfilePage/>
                </ParentRoute>

                <ParentRoute
                    path=StaticSegment("student")
                    view=|| view! { <PrivateRoute allowed_roles=STUDENT_ONLY/> }
                >
                    <Route
                        path=(StaticSegment("studentprofile"), StaticSegment("create"))
                        view=|| view! { <ProfileCreationPage role=Role::Student/> }
                    />
                    <ParentRoute
                        path=StaticSegment("dashboard")
                        view=|| view! { <DashboardPage role=Role::Student/> }
                    >
                        <Route path=StaticSegment("") view=DashboardHome/>
                        <Route path=StaticSegment("profile") view=|| view! { <ProfilePage role=Role::Student/> }/>
                        <Route path=StaticSegment("overview") view=|| view! { <OverviewPage role=Role::Student/> }/>
                        <Route
                            path=StaticSegment("applications")
                            view=|| view! { <ApplicationsPage role=Role::Student/> }
                        />
                        <Route
                            path=StaticSegment("applicationdetails")
                            view=|| view! { <ApplicationDetailPage role=Role::Student/> }
                        />
                        <Route path=StaticSegment("setting") view=SettingsPage/>
                    </ParentRoute>
                </ParentRoute>

                <ParentRoute
                    path=StaticSegment("institution")
                    view=|| view! { <PrivateRoute allowed_roles=INSTITUTION_ONLY/> }
                >
                    <Route
                        path=(StaticSegment("instituteprofile"), StaticSegment("create"))
                        view=|| view! { <ProfileCreationPage role=Role::Institution/> }
                    />
                    <ParentRoute
                        path=StaticSegment("dashboard")
                        view=|| view! { <DashboardPage role=Role::Institution/> }
                    >
                        <Route path=StaticSegment("") view=DashboardHome/>
                        <Route path=StaticSegment("profile") view=|| view! { <ProfilePage role=Role::Institution/> }/>
                        <Route
                            path=(StaticSegment("scholarships"), StaticSegment("create"))
                            view=ScholarshipPage
                        />
                        <Route path=StaticSegment("overview") view=|| view! { <OverviewPage role=Role::Institution/> }/>
                        <Route
                            path=StaticSegment("applications")
                            view=|| view! { <ApplicationsPage role=Role::Institution/> }
                        />
                        <Route
                            path=StaticSegment("applicationdetail")
                            view=|| view! { <ApplicationDetailPage role=Role::Institution/> }
                        />
                        <Route path=StaticSegment("setting") view=SettingsPage/>
                    </ParentRoute>
                </ParentRoute>

                <Route path=StaticSegment("unauthorized") view=UnauthorizedPage/>
            </Routes>
        </Router>
    }
}
