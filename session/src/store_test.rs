use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;
use futures::executor::block_on;
use serde_json::{Map, json};

use super::*;
use crate::error::{GENERIC_FAILURE, LOGIN_FAILED, StorageError};
use crate::role::Role;
use crate::state::Identity;
use crate::storage::MemoryStorage;
use crate::token::unsigned;

// =============================================================
// Fakes
// =============================================================

type LoginResult = Result<LoginResponse, AuthError>;

enum Reply {
    Ready(LoginResult),
    Gated(oneshot::Receiver<LoginResult>),
}

#[derive(Default)]
struct ScriptedApi {
    logins: RefCell<VecDeque<Reply>>,
    register_result: RefCell<Option<Result<(), AuthError>>>,
    password_result: RefCell<Option<Result<(), AuthError>>>,
    password_tokens: RefCell<Vec<String>>,
}

impl ScriptedApi {
    fn replying(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self { logins: RefCell::new(replies.into_iter().collect()), ..Self::default() }
    }
}

#[async_trait(?Send)]
impl AuthApi for ScriptedApi {
    async fn login(&self, _credentials: &Credentials) -> LoginResult {
        let reply = self.logins.borrow_mut().pop_front().expect("unscripted login call");
        match reply {
            Reply::Ready(result) => result,
            Reply::Gated(rx) => rx
                .await
                .unwrap_or_else(|_| Err(AuthError::Network("gate dropped".to_owned()))),
        }
    }

    async fn register(&self, _registration: &Registration) -> Result<(), AuthError> {
        self.register_result.borrow_mut().take().unwrap_or(Ok(()))
    }

    async fn change_password(&self, token: &str, _change: &PasswordChange) -> Result<(), AuthError> {
        self.password_tokens.borrow_mut().push(token.to_owned());
        self.password_result.borrow_mut().take().unwrap_or(Ok(()))
    }
}

struct FailingStorage;

impl TokenStorage for FailingStorage {
    fn load(&self) -> Option<String> {
        None
    }

    fn store(&self, _token: &str) -> Result<(), StorageError> {
        Err(StorageError("quota exceeded".to_owned()))
    }

    fn clear(&self) {}
}

fn user(role: Role, name: &str) -> Identity {
    Identity { role, name: Some(name.to_owned()), extra: Map::new() }
}

fn ok(role: Role, name: &str, token: &str) -> LoginResult {
    Ok(LoginResponse { user: user(role, name), token: token.to_owned() })
}

fn creds() -> Credentials {
    Credentials::new("a@b.com", "x")
}

fn settled_store(api: ScriptedApi) -> SessionStore<ScriptedApi, MemoryStorage> {
    let store = SessionStore::new(api, MemoryStorage::default());
    store.rehydrate();
    store
}

// =============================================================
// rehydrate
// =============================================================

#[test]
fn new_store_is_loading_until_rehydrated() {
    let store = SessionStore::new(ScriptedApi::default(), MemoryStorage::default());
    assert!(store.session().loading());
    store.rehydrate();
    assert!(!store.session().loading());
}

#[test]
fn rehydrate_without_stored_token_is_signed_out() {
    let store = settled_store(ScriptedApi::default());
    let session = store.session();
    assert!(session.token().is_none());
    assert!(session.role().is_none());
    assert!(!session.loading());
}

#[test]
fn rehydrate_restores_identity_from_stored_token() {
    let token = unsigned(&json!({ "role": "Institution", "name": "Uni", "id": "i1" }));
    let store = SessionStore::new(ScriptedApi::default(), MemoryStorage::with_token(token.clone()));
    store.rehydrate();

    let session = store.session();
    assert_eq!(session.token(), Some(token.as_str()));
    assert_eq!(session.role(), Some(Role::Institution));
    assert_eq!(session.identity().and_then(|i| i.name.as_deref()), Some("Uni"));
}

#[test]
fn rehydrate_with_corrupt_token_resets_and_clears_storage() {
    let store = SessionStore::new(ScriptedApi::default(), MemoryStorage::with_token("definitely.not.a-jwt"));
    store.rehydrate();

    assert_eq!(store.session(), Session::signed_out());
    assert!(store.storage().load().is_none());
}

#[test]
fn rehydrate_with_unknown_role_signs_out() {
    let token = unsigned(&json!({ "role": "Admin", "name": "Root" }));
    let store = SessionStore::new(ScriptedApi::default(), MemoryStorage::with_token(token));
    store.rehydrate();

    assert!(store.session().role().is_none());
    assert!(store.storage().load().is_none());
}

// =============================================================
// login
// =============================================================

#[test]
fn login_success_sets_session_and_persists_token() {
    let store = settled_store(ScriptedApi::replying([Reply::Ready(ok(Role::Student, "A", "abc"))]));

    assert!(block_on(store.login(&creds())));

    let session = store.session();
    assert_eq!(session.token(), Some("abc"));
    assert_eq!(session.role(), Some(Role::Student));
    assert!(!session.loading());
    assert!(session.error().is_none());
    assert_eq!(store.storage().load().as_deref(), Some("abc"));
}

#[test]
fn login_rejected_surfaces_server_message_without_storage_write() {
    let rejection = AuthError::rejected(401, r#"{"message":"Invalid email or password"}"#);
    let store = settled_store(ScriptedApi::replying([Reply::Ready(Err(rejection))]));

    assert!(!block_on(store.login(&creds())));

    let session = store.session();
    assert!(session.token().is_none());
    assert!(!session.loading());
    assert_eq!(session.error(), Some("Invalid email or password"));
    assert!(store.storage().load().is_none());
}

#[test]
fn login_network_failure_uses_generic_message() {
    let store = settled_store(ScriptedApi::replying([Reply::Ready(Err(AuthError::Timeout))]));
    assert!(!block_on(store.login(&creds())));
    assert_eq!(store.session().error(), Some(GENERIC_FAILURE));
}

#[test]
fn login_malformed_response_uses_login_failed_message() {
    let err = AuthError::MalformedResponse("missing token".to_owned());
    let store = settled_store(ScriptedApi::replying([Reply::Ready(Err(err))]));
    assert!(!block_on(store.login(&creds())));
    assert_eq!(store.session().error(), Some(LOGIN_FAILED));
}

#[test]
fn login_storage_failure_is_a_login_failure() {
    let api = ScriptedApi::replying([Reply::Ready(ok(Role::Student, "A", "abc"))]);
    let store = SessionStore::new(api, FailingStorage);
    store.rehydrate();

    assert!(!block_on(store.login(&creds())));
    let session = store.session();
    assert!(session.token().is_none());
    assert_eq!(session.error(), Some(GENERIC_FAILURE));
}

#[test]
fn new_attempt_clears_previous_error() {
    let store = settled_store(ScriptedApi::replying([
        Reply::Ready(Err(AuthError::Timeout)),
        Reply::Ready(ok(Role::Student, "A", "abc")),
    ]));
    assert!(!block_on(store.login(&creds())));
    assert!(store.session().error().is_some());
    assert!(block_on(store.login(&creds())));
    assert!(store.session().error().is_none());
}

#[test]
fn loading_is_observable_while_login_in_flight() {
    let (tx, rx) = oneshot::channel();
    let store = settled_store(ScriptedApi::replying([Reply::Gated(rx)]));

    block_on(async {
        let credentials = creds();
        let login = store.login(&credentials);
        futures::pin_mut!(login);
        assert!(futures::poll!(login.as_mut()).is_pending());

        let session = store.session();
        assert!(session.loading());
        assert!(session.token().is_none());

        tx.send(ok(Role::Student, "A", "abc")).unwrap();
        assert!(login.await);
    });
    assert!(!store.session().loading());
}

#[test]
fn login_then_rehydrate_reproduces_role_and_identity() {
    let claims = json!({ "role": "Student", "name": "A" });
    let token = unsigned(&claims);
    let store = settled_store(ScriptedApi::replying([Reply::Ready(ok(Role::Student, "A", &token))]));
    assert!(block_on(store.login(&creds())));
    let before = store.session();

    store.rehydrate();
    let after = store.session();

    assert_eq!(after.role(), before.role());
    assert!(after.identity().unwrap().is_equivalent(before.identity().unwrap()));
    assert_eq!(after.token(), before.token());
}

// =============================================================
// overlapping attempts
// =============================================================

#[test]
fn older_attempt_finishing_last_is_discarded() {
    let (tx_first, rx_first) = oneshot::channel();
    let (tx_second, rx_second) = oneshot::channel();
    let store = settled_store(ScriptedApi::replying([Reply::Gated(rx_first), Reply::Gated(rx_second)]));
    tx_second.send(ok(Role::Institution, "Uni", "newer")).unwrap();

    let credentials = creds();
    let (first, second) = block_on(async {
        let second = async {
            let applied = store.login(&credentials).await;
            tx_first.send(ok(Role::Student, "A", "older")).unwrap();
            applied
        };
        futures::join!(store.login(&credentials), second)
    });

    assert!(!first);
    assert!(second);
    let session = store.session();
    assert_eq!(session.token(), Some("newer"));
    assert_eq!(session.role(), Some(Role::Institution));
    assert!(!session.loading());
    assert_eq!(store.storage().load().as_deref(), Some("newer"));
}

#[test]
fn older_attempt_finishing_first_keeps_loading_for_newer() {
    let (tx_first, rx_first) = oneshot::channel();
    let (tx_second, rx_second) = oneshot::channel();
    let store = settled_store(ScriptedApi::replying([Reply::Gated(rx_first), Reply::Gated(rx_second)]));

    let credentials = creds();
    let observed = RefCell::new(None);
    let (first, second, ()) = block_on(async {
        let first = async {
            let applied = store.login(&credentials).await;
            *observed.borrow_mut() = Some(store.session());
            tx_second.send(ok(Role::Institution, "Uni", "newer")).unwrap();
            applied
        };
        let release_first = async {
            tx_first.send(ok(Role::Student, "A", "older")).unwrap();
        };
        futures::join!(first, store.login(&credentials), release_first)
    });

    let interim = observed.into_inner().unwrap();
    assert!(first);
    assert!(interim.loading());
    assert_eq!(interim.token(), Some("older"));

    assert!(second);
    assert_eq!(store.session().token(), Some("newer"));
    assert!(!store.session().loading());
}

#[test]
fn logout_discards_in_flight_login() {
    let (tx, rx) = oneshot::channel();
    let store = settled_store(ScriptedApi::replying([Reply::Gated(rx)]));

    let applied = block_on(async {
        let credentials = creds();
        let login = store.login(&credentials);
        futures::pin_mut!(login);
        assert!(futures::poll!(login.as_mut()).is_pending());
        store.logout();
        tx.send(ok(Role::Student, "A", "abc")).unwrap();
        login.await
    });

    assert!(!applied);
    assert_eq!(store.session(), Session::signed_out());
    assert!(store.storage().load().is_none());
}

// =============================================================
// logout
// =============================================================

#[test]
fn logout_is_idempotent() {
    let store = settled_store(ScriptedApi::replying([Reply::Ready(ok(Role::Student, "A", "abc"))]));
    assert!(block_on(store.login(&creds())));

    store.logout();
    let once = store.session();
    store.logout();

    assert_eq!(once, Session::signed_out());
    assert_eq!(store.session(), once);
    assert!(store.storage().load().is_none());
}

#[test]
fn subscribers_see_every_mutation() {
    let store = SessionStore::new(
        ScriptedApi::replying([Reply::Ready(ok(Role::Student, "A", "abc"))]),
        MemoryStorage::default(),
    );
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    store.subscribe(move |s| sink.borrow_mut().push((s.loading(), s.is_authenticated())));

    store.rehydrate();
    assert!(block_on(store.login(&creds())));
    store.logout();

    assert_eq!(*seen.borrow(), vec![(false, false), (true, false), (false, true), (false, false)]);
}

// =============================================================
// register / change password
// =============================================================

#[test]
fn register_failure_returns_form_message() {
    let api = ScriptedApi::default();
    *api.register_result.borrow_mut() = Some(Err(AuthError::rejected(400, r#"{"message":"User already exists"}"#)));
    let store = settled_store(api);

    let registration = Registration {
        name: "A".into(),
        email: "a@b.com".into(),
        password: "Secret1!".into(),
        role: Role::Student,
    };
    assert_eq!(block_on(store.register(&registration)), Err("User already exists".to_owned()));
    assert_eq!(store.session(), Session::signed_out());
}

#[test]
fn change_password_requires_session() {
    let store = settled_store(ScriptedApi::default());
    let change = PasswordChange { old_password: "a".into(), new_password: "b".into() };

    assert_eq!(block_on(store.change_password(&change)), Err("Please sign in again.".to_owned()));
    assert!(store.api().password_tokens.borrow().is_empty());
}

#[test]
fn change_password_sends_current_token() {
    let store = settled_store(ScriptedApi::replying([Reply::Ready(ok(Role::Student, "A", "abc"))]));
    assert!(block_on(store.login(&creds())));
    let change = PasswordChange { old_password: "a".into(), new_password: "b".into() };

    assert_eq!(block_on(store.change_password(&change)), Ok(()));
    assert_eq!(*store.api().password_tokens.borrow(), vec!["abc".to_owned()]);
}
