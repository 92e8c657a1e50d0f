//! Landing page.

use leptos::prelude::*;
use leptos_router::components::A;
use session::routes::{SEARCH_PATH, SIGN_UP_PATH};

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <section class="home-hero">
            <h1>"GrantHive"</h1>
            <p class="home-hero__tagline">"Scholarships from institutions, matched to the students who need them."</p>
            <div class="home-hero__actions">
                <A href=SEARCH_PATH>"Browse institutes"</A>
                <A href=SIGN_UP_PATH>"Create an account"</A>
            </div>
        </section>
    }
}
