//! Session context for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! A single `SessionStore` owns the session; components read it through an
//! `RwSignal<Session>` mirror kept current by a store subscription, and
//! trigger transitions through the stored handle. The marketplace client is
//! provided next to it and reads the bearer token from the same session.

use std::rc::Rc;

use leptos::prelude::*;
use session::{ApiConfig, Marketplace, Session, SessionStore};

use crate::net::api::BrowserApi;
use crate::util::storage::LocalTokenStorage;

pub type ClientSessionStore = SessionStore<BrowserApi, LocalTokenStorage>;

/// Context handle to the store. `Copy`, so event handlers can capture it.
pub type SessionHandle = StoredValue<Rc<ClientSessionStore>, LocalStorage>;

pub type ClientMarketplace = Marketplace<BrowserApi>;
pub type MarketplaceHandle = StoredValue<Rc<ClientMarketplace>, LocalStorage>;

/// Build the store, rehydrate it from `localStorage`, and provide both the
/// store handle and the mirrored session signal as context, plus the
/// marketplace client.
pub fn provide_session() -> RwSignal<Session> {
    let config = ApiConfig::from_build_env();
    let market = Rc::new(Marketplace::new(BrowserApi::new(config.clone())));
    let store = Rc::new(SessionStore::new(BrowserApi::new(config), LocalTokenStorage));
    store.rehydrate();

    let session = RwSignal::new(store.session());
    store.subscribe(move |next| session.set(next.clone()));

    provide_context(session);
    provide_context::<SessionHandle>(StoredValue::new_local(store));
    provide_context::<MarketplaceHandle>(StoredValue::new_local(market));
    session
}

pub fn use_session() -> RwSignal<Session> {
    expect_context::<RwSignal<Session>>()
}

pub fn use_session_handle() -> SessionHandle {
    expect_context::<SessionHandle>()
}

pub fn use_marketplace() -> MarketplaceHandle {
    expect_context::<MarketplaceHandle>()
}

/// Bearer token of the current session, read without tracking.
pub fn current_token(session: RwSignal<Session>) -> Option<String> {
    session.with_untracked(|s| s.token().map(str::to_owned))
}
