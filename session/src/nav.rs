//! Navigation shell contract: what the sidebar offers for a session.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use crate::routes::{SIGN_IN_PATH, SIGN_UP_PATH, dashboard_path};
use crate::state::Session;

/// Viewport width (px) below which the sidebar starts collapsed.
pub const SIDEBAR_AUTO_OPEN_MIN_PX: f64 = 768.0;

/// What activating a sidebar entry does.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavAction {
    Navigate(String),
    Logout,
}

/// A sidebar entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub action: NavAction,
}

impl NavLink {
    fn to(label: &'static str, path: impl Into<String>) -> Self {
        Self { label, action: NavAction::Navigate(path.into()) }
    }
}

/// Entries for the current session: sign-in/sign-up without a token,
/// dashboard/logout with one.
#[must_use]
pub fn sidebar_links(session: &Session) -> Vec<NavLink> {
    match session.role() {
        None => vec![NavLink::to("Sign In", SIGN_IN_PATH), NavLink::to("Sign Up", SIGN_UP_PATH)],
        Some(role) => vec![
            NavLink::to("Dashboard", dashboard_path(role)),
            NavLink { label: "Logout", action: NavAction::Logout },
        ],
    }
}

/// Name to greet the user with, if signed in and the claims carry one.
#[must_use]
pub fn display_name(session: &Session) -> Option<&str> {
    session.identity()?.name.as_deref().filter(|n| !n.trim().is_empty())
}

/// Open/closed state of the sidebar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SidebarState {
    pub open: bool,
}

impl Default for SidebarState {
    fn default() -> Self {
        Self { open: true }
    }
}

impl SidebarState {
    /// Open on tablet-and-up widths, collapsed on phones.
    #[must_use]
    pub fn for_width(width_px: f64) -> Self {
        Self { open: width_px >= SIDEBAR_AUTO_OPEN_MIN_PX }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        Self { open: !self.open }
    }
}
