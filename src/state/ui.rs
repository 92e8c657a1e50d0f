//! Layout state: viewport class and sidebar visibility.

use leptos::prelude::*;
use session::guard::Viewport;
use session::nav::SidebarState;

use crate::util::viewport;

/// Provide `RwSignal<Viewport>` and `RwSignal<SidebarState>`, seeded from the
/// current window width and refreshed once resizing settles.
pub fn provide_layout() {
    let width = viewport::current_width();
    let viewport_signal = RwSignal::new(width.map_or_else(Viewport::default, Viewport::from_width));
    let sidebar = RwSignal::new(width.map_or_else(SidebarState::default, SidebarState::for_width));

    viewport::on_resize(move |width| {
        viewport_signal.set(Viewport::from_width(width));
        sidebar.set(SidebarState::for_width(width));
    });

    provide_context(viewport_signal);
    provide_context(sidebar);
}

pub fn use_viewport() -> RwSignal<Viewport> {
    expect_context::<RwSignal<Viewport>>()
}

pub fn use_sidebar() -> RwSignal<SidebarState> {
    expect_context::<RwSignal<SidebarState>>()
}
