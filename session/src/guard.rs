//! Route guard decisions.
//!
//! SYSTEM CONTEXT
//! ==============
//! The client's `PrivateRoute` and `PublicRoute` components are thin shells
//! around these functions; they hold no state of their own and re-evaluate on
//! every session change. Guards are UX only: the API enforces access.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::role::Role;
use crate::routes::SEARCH_PATH;
use crate::state::Session;

/// Public entry point; unauthenticated visitors to private routes land here.
pub const ROOT_PATH: &str = "/";
/// Where signed-in users without the required role are sent.
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

/// Viewport width (px) at which the layout is considered wide.
pub const WIDE_VIEWPORT_MIN_PX: f64 = 1024.0;

/// Position of a private route's guard for the current session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardState {
    Loading,
    Unauthenticated,
    AuthenticatedAllowed,
    AuthenticatedDenied,
}

/// What a private route renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session still resolving; show a placeholder, decide nothing yet.
    ShowLoading,
    /// Navigate away, replacing the current history entry.
    Redirect(&'static str),
    /// Render the guarded subtree.
    Render,
}

impl GuardState {
    /// Evaluate a private route that admits `allowed_roles`.
    ///
    /// Loading is checked before authentication, and authentication before
    /// role, so nothing redirects while the session is still rehydrating.
    #[must_use]
    pub fn evaluate(session: &Session, allowed_roles: &[Role]) -> Self {
        if session.loading() {
            return Self::Loading;
        }
        match session.role() {
            None => Self::Unauthenticated,
            Some(role) if allowed_roles.contains(&role) => Self::AuthenticatedAllowed,
            Some(_) => Self::AuthenticatedDenied,
        }
    }

    #[must_use]
    pub fn decision(self) -> GuardDecision {
        match self {
            Self::Loading => GuardDecision::ShowLoading,
            Self::Unauthenticated => GuardDecision::Redirect(ROOT_PATH),
            Self::AuthenticatedDenied => GuardDecision::Redirect(UNAUTHORIZED_PATH),
            Self::AuthenticatedAllowed => GuardDecision::Render,
        }
    }
}

/// Shorthand for `GuardState::evaluate(..).decision()`.
#[must_use]
pub fn private_decision(session: &Session, allowed_roles: &[Role]) -> GuardDecision {
    GuardState::evaluate(session, allowed_roles).decision()
}

/// Breakpoint class reported by the viewport observer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Viewport {
    #[default]
    Narrow,
    Wide,
}

impl Viewport {
    #[must_use]
    pub fn from_width(width_px: f64) -> Self {
        if width_px >= WIDE_VIEWPORT_MIN_PX { Self::Wide } else { Self::Narrow }
    }
}

/// Chrome around a public route. Never affects whether content renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublicLayout {
    /// Render the sidebar and its toggle button.
    pub show_sidebar: bool,
    /// Offset content to leave room for the sidebar column.
    pub offset_content: bool,
}

impl PublicLayout {
    /// Layout for `path`. The search page hides the sidebar on wide viewports
    /// and never offsets its content.
    #[must_use]
    pub fn for_path(path: &str, viewport: Viewport) -> Self {
        let is_search = is_search_path(path);
        Self { show_sidebar: !(is_search && viewport == Viewport::Wide), offset_content: !is_search }
    }
}

fn is_search_path(path: &str) -> bool {
    let trimmed = path.trim_end_matches('/');
    trimmed.eq_ignore_ascii_case(SEARCH_PATH)
}
