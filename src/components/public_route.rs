//! Layout shell for public pages: sidebar plus content.

use leptos::prelude::*;
use leptos_router::components::Outlet;
use leptos_router::hooks::use_location;
use session::guard::PublicLayout;

use crate::components::sidebar::Sidebar;
use crate::state::ui::use_viewport;

/// Public pages never redirect. The sidebar is hidden on the wide institute
/// search layout, where the content column also drops its left offset.
#[component]
pub fn PublicRoute() -> impl IntoView {
    let location = use_location();
    let viewport = use_viewport();
    let layout = Memo::new(move |_| PublicLayout::for_path(&location.pathname.get(), viewport.get()));

    view! {
        <div class="public-layout">
            <Show when=move || layout.get().show_sidebar>
                <Sidebar/>
            </Show>
            <main class=move || {
                if layout.get().offset_content { "public-content public-content--offset" } else { "public-content" }
            }>
                <Outlet/>
            </main>
        </div>
    }
}
