//! Navigation sidebar for public pages.

use leptos::prelude::*;
use leptos_router::components::A;
use session::nav::{NavAction, NavLink, display_name, sidebar_links};

use crate::state::session::{SessionHandle, use_session, use_session_handle};
use crate::state::ui::use_sidebar;

fn render_link(link: NavLink, store: SessionHandle) -> AnyView {
    match link.action {
        NavAction::Navigate(path) => view! {
            <li class="sidebar__item">
                <A href=path>{link.label}</A>
            </li>
        }
        .into_any(),
        NavAction::Logout => view! {
            <li class="sidebar__item">
                <button class="sidebar__logout" on:click=move |_| store.get_value().logout()>
                    {link.label}
                </button>
            </li>
        }
        .into_any(),
    }
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let session = use_session();
    let store = use_session_handle();
    let sidebar = use_sidebar();
    let toggle = move |_: leptos::ev::MouseEvent| sidebar.update(|s| *s = s.toggled());

    let links = move || {
        session
            .with(sidebar_links)
            .into_iter()
            .map(|link| render_link(link, store))
            .collect_view()
    };
    let greeting = move || session.with(|s| display_name(s).map(|name| format!("Hi, {name}")));

    view! {
        <Show
            when=move || sidebar.get().open
            fallback=move || view! {
                <button class="sidebar-toggle" aria-label="Open menu" on:click=toggle>"☰"</button>
            }
        >
            <nav class="sidebar">
                <div class="sidebar__header">
                    <A href="/">"GrantHive"</A>
                    <button class="sidebar__close" aria-label="Close menu" on:click=toggle>"×"</button>
                </div>
                <ul class="sidebar__links">{links}</ul>
                <p class="sidebar__greeting">{greeting}</p>
            </nav>
        </Show>
    }
}
