use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn UnauthorizedPage() -> impl IntoView {
    view! {
        <section class="unauthorized">
            <h1>"Unauthorized"</h1>
            <p>"Your account does not have access to this page."</p>
            <A href="/">"Back to home"</A>
        </section>
    }
}
