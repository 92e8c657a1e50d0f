//! Session store: the single writer of authentication state.
//!
//! SYSTEM CONTEXT
//! ==============
//! One store is built at startup and injected into the UI. Route guards and
//! navigation chrome only read [`Session`] snapshots (directly or through
//! [`SessionStore::subscribe`]); `rehydrate`, `login` and `logout` are the only
//! mutations.
//!
//! DESIGN
//! ======
//! The store is `!Sync` and expects the single-threaded event loop of the
//! browser. Overlapping `login` calls are still possible across await points,
//! so every attempt takes a monotonic number. A completion is applied only if
//! no newer attempt has been applied or superseded by `logout`; anything older
//! is dropped without touching state or storage.
//!
//! ERROR HANDLING
//! ==============
//! No operation returns an error across this boundary. Login failures land in
//! `Session::error`, stored-token decode failures reset silently, and
//! register/password changes return a user-facing message.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::cell::{Cell, RefCell};

use crate::api::{AuthApi, Credentials, LoginResponse, PasswordChange, Registration};
use crate::error::AuthError;
use crate::state::Session;
use crate::storage::TokenStorage;
use crate::token;

type Listener = Box<dyn Fn(&Session)>;

#[derive(Clone, Copy, Debug, Default)]
struct Attempts {
    /// Number handed to the most recently started login.
    started: u64,
    /// Newest attempt whose outcome is reflected in state.
    settled: u64,
}

impl Attempts {
    fn in_flight(self) -> bool {
        self.started > self.settled
    }
}

pub struct SessionStore<A, S> {
    api: A,
    storage: S,
    state: RefCell<Session>,
    attempts: Cell<Attempts>,
    listeners: RefCell<Vec<Listener>>,
}

impl<A: AuthApi, S: TokenStorage> SessionStore<A, S> {
    /// Build a store in the initial loading state. Call [`Self::rehydrate`]
    /// before any guard reads it.
    pub fn new(api: A, storage: S) -> Self {
        Self {
            api,
            storage,
            state: RefCell::new(Session::default()),
            attempts: Cell::new(Attempts::default()),
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> Session {
        self.state.borrow().clone()
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Register `listener` to receive a snapshot after every mutation.
    ///
    /// Listeners may read the store or call its operations, but must not
    /// subscribe further listeners while being notified.
    pub fn subscribe(&self, listener: impl Fn(&Session) + 'static) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    /// Restore the session from durable storage.
    ///
    /// A stored token that cannot be decoded is removed and the session is
    /// left signed out; the user is not told.
    pub fn rehydrate(&self) {
        self.supersede_attempts();
        let Some(stored) = self.storage.load() else {
            log::debug!("no stored token");
            self.update(Session::clear);
            return;
        };
        match token::decode(&stored) {
            Ok(identity) => {
                log::info!("restored session for role {}", identity.role);
                self.update(|s| s.authenticate(stored, identity));
            }
            Err(e) => {
                log::warn!("discarding stored token: {e}");
                self.logout();
            }
        }
    }

    /// Sign in with `credentials`. Returns `true` if this attempt's session
    /// was applied.
    pub async fn login(&self, credentials: &Credentials) -> bool {
        let attempt = self.begin_attempt();
        log::info!("login attempt {attempt} started");

        let outcome = self.api.login(credentials).await;
        if !self.is_current(attempt) {
            log::warn!("login attempt {attempt} superseded; discarding its result");
            return false;
        }

        let outcome = outcome.and_then(|response| {
            self.storage.store(&response.token)?;
            Ok(response)
        });
        let still_loading = self.settle(attempt);

        match outcome {
            Ok(LoginResponse { user, token }) => {
                log::info!("login attempt {attempt} succeeded as {}", user.role);
                self.update(|s| {
                    s.authenticate(token, user);
                    s.set_loading(still_loading);
                });
                true
            }
            Err(e) => {
                log::warn!("login attempt {attempt} failed: {e}");
                let message = e.login_message();
                self.update(|s| s.fail(message, still_loading));
                false
            }
        }
    }

    /// Forget the session and its stored token. Idempotent.
    pub fn logout(&self) {
        self.storage.clear();
        self.supersede_attempts();
        self.update(Session::clear);
        log::info!("signed out");
    }

    /// Create an account. The current session is not affected.
    ///
    /// # Errors
    ///
    /// Returns a message suitable for the sign-up form.
    pub async fn register(&self, registration: &Registration) -> Result<(), String> {
        self.api.register(registration).await.map_err(|e| {
            log::warn!("registration failed: {e}");
            e.register_message()
        })
    }

    /// Change the signed-in user's password.
    ///
    /// # Errors
    ///
    /// Returns a message suitable for the settings form. Fails without calling
    /// the API when no session is held.
    pub async fn change_password(&self, change: &PasswordChange) -> Result<(), String> {
        let token = self.state.borrow().token().map(str::to_owned);
        let result = match token {
            Some(token) => self.api.change_password(&token, change).await,
            None => Err(AuthError::NotAuthenticated),
        };
        result.map_err(|e| {
            log::warn!("password change failed: {e}");
            e.change_password_message()
        })
    }

    fn begin_attempt(&self) -> u64 {
        let mut attempts = self.attempts.get();
        attempts.started += 1;
        self.attempts.set(attempts);
        self.update(Session::begin_attempt);
        attempts.started
    }

    fn is_current(&self, attempt: u64) -> bool {
        attempt > self.attempts.get().settled
    }

    /// Mark `attempt` applied; returns whether a newer one is still pending.
    fn settle(&self, attempt: u64) -> bool {
        let mut attempts = self.attempts.get();
        attempts.settled = attempt;
        self.attempts.set(attempts);
        attempts.in_flight()
    }

    fn supersede_attempts(&self) {
        let mut attempts = self.attempts.get();
        attempts.settled = attempts.started;
        self.attempts.set(attempts);
    }

    fn update(&self, mutate: impl FnOnce(&mut Session)) {
        let snapshot = {
            let mut state = self.state.borrow_mut();
            mutate(&mut state);
            state.clone()
        };
        for listener in self.listeners.borrow().iter() {
            listener(&snapshot);
        }
    }
}
