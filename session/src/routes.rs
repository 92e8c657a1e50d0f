//! Route access policy and well-known paths.
//!
//! The router owns the route tree; this table only records which subtrees
//! need a session and for which roles.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use crate::role::Role;

pub const SIGN_IN_PATH: &str = "/signin";
pub const SIGN_UP_PATH: &str = "/signup";
pub const SEARCH_PATH: &str = "/institutesearch";
pub const INSTITUTE_PROFILE_PATH: &str = "/instituteprofile";

/// Capability required to enter a route subtree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteAccess {
    /// No session needed.
    Public,
    /// Session needed, with a role in the set.
    Private { allowed_roles: &'static [Role] },
}

const STUDENT_ONLY: &[Role] = &[Role::Student];
const INSTITUTION_ONLY: &[Role] = &[Role::Institution];

/// First path segment → access for every private subtree. Anything else is public.
const PRIVATE_SUBTREES: &[(&str, &[Role])] = &[("student", STUDENT_ONLY), ("institution", INSTITUTION_ONLY)];

/// Access policy for `path`. Segment matching ignores case.
#[must_use]
pub fn access_for(path: &str) -> RouteAccess {
    let first = path.trim_start_matches('/').split(['/', '?', '#']).next().unwrap_or_default();
    PRIVATE_SUBTREES
        .iter()
        .find(|(segment, _)| segment.eq_ignore_ascii_case(first))
        .map_or(RouteAccess::Public, |&(_, allowed_roles)| RouteAccess::Private { allowed_roles })
}

/// Landing page of `role`'s dashboard.
#[must_use]
pub fn dashboard_path(role: Role) -> String {
    format!("/{}/dashboard", role.path_segment())
}

/// Settings page inside `role`'s dashboard.
#[must_use]
pub fn settings_path(role: Role) -> String {
    format!("/{}/dashboard/setting", role.path_segment())
}

/// Where a freshly registered account finishes onboarding.
#[must_use]
pub fn profile_creation_path(role: Role) -> String {
    match role {
        Role::Student => "/student/studentprofile/create".to_owned(),
        Role::Institution => "/institution/instituteprofile/create".to_owned(),
    }
}

/// Public profile page of the institute account `user_id`.
#[must_use]
pub fn institute_page_path(user_id: &str) -> String {
    format!("{INSTITUTE_PROFILE_PATH}?id={}", urlencoding::encode(user_id))
}

/// Application list inside `role`'s dashboard.
#[must_use]
pub fn applications_path(role: Role) -> String {
    format!("/{}/dashboard/applications", role.path_segment())
}

/// Detail page for one application inside `role`'s dashboard.
#[must_use]
pub fn application_page_path(role: Role, application_id: &str) -> String {
    let page = match role {
        Role::Student => "applicationdetails",
        Role::Institution => "applicationdetail",
    };
    format!("/{}/dashboard/{page}?id={}", role.path_segment(), urlencoding::encode(application_id))
}
