use serde_json::Map;

use super::*;
use crate::role::Role;
use crate::state::Identity;

fn signed_in(role: Role, name: Option<&str>) -> Session {
    Session::signed_in("abc".to_owned(), Identity { role, name: name.map(str::to_owned), extra: Map::new() })
}

#[test]
fn signed_out_offers_sign_in_and_sign_up() {
    let links = sidebar_links(&Session::signed_out());
    assert_eq!(
        links,
        vec![
            NavLink { label: "Sign In", action: NavAction::Navigate("/signin".to_owned()) },
            NavLink { label: "Sign Up", action: NavAction::Navigate("/signup".to_owned()) },
        ]
    );
}

#[test]
fn loading_session_without_token_offers_sign_in() {
    let links = sidebar_links(&Session::default());
    assert_eq!(links[0].label, "Sign In");
}

#[test]
fn signed_in_offers_role_dashboard_and_logout() {
    let links = sidebar_links(&signed_in(Role::Institution, Some("Uni")));
    assert_eq!(links[0].action, NavAction::Navigate("/institution/dashboard".to_owned()));
    assert_eq!(links[1].action, NavAction::Logout);
}

#[test]
fn display_name_requires_non_blank_name() {
    assert_eq!(display_name(&signed_in(Role::Student, Some("A"))), Some("A"));
    assert_eq!(display_name(&signed_in(Role::Student, Some("  "))), None);
    assert_eq!(display_name(&signed_in(Role::Student, None)), None);
    assert_eq!(display_name(&Session::signed_out()), None);
}

#[test]
fn sidebar_opens_from_tablet_width() {
    assert!(!SidebarState::for_width(767.0).open);
    assert!(SidebarState::for_width(768.0).open);
}

#[test]
fn sidebar_toggle_flips() {
    let state = SidebarState::default();
    assert!(!state.toggled().open);
    assert!(state.toggled().toggled().open);
}
