//! Guard for authenticated route subtrees.
//!
//! Re-evaluates on every session change: a placeholder while the session is
//! loading, a replacing redirect when there is no session or the role is not
//! admitted, the nested routes otherwise.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::{Outlet, Redirect};
use session::Role;
use session::guard::{GuardDecision, private_decision};

use crate::state::session::use_session;

#[component]
pub fn PrivateRoute(allowed_roles: &'static [Role]) -> impl IntoView {
    let session = use_session();
    let decision = Memo::new(move |_| session.with(|s| private_decision(s, allowed_roles)));

    move || match decision.get() {
        GuardDecision::ShowLoading => view! { <div class="route-loading">"Loading..."</div> }.into_any(),
        GuardDecision::Redirect(path) => {
            let options = NavigateOptions { replace: true, ..NavigateOptions::default() };
            view! { <Redirect path=path options=options/> }.into_any()
        }
        GuardDecision::Render => view! { <Outlet/> }.into_any(),
    }
}
