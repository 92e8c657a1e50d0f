//! Authentication session core for the GrantHive client.
//!
//! This crate owns the session state machine shared by the Leptos client and
//! the command-line driver: the session store, bearer-token decoding, route
//! guard decisions, the route access policy, and the navigation contract.
//! It also carries the typed [`Marketplace`] client for profiles, courses and
//! applications. It has no browser or framework dependencies; the remote REST
//! API and the durable token storage are reached through the [`AuthApi`],
//! [`ApiTransport`] and [`TokenStorage`] traits so each host supplies its own
//! transport.
//!
//! TRUST BOUNDARY
//! ==============
//! Tokens are decoded for UI personalization only. Signatures are never
//! verified here; the backend remains the authority on every request.

pub mod api;
pub mod config;
pub mod error;
pub mod guard;
pub mod marketplace;
pub mod nav;
pub mod role;
pub mod routes;
pub mod search;
pub mod state;
pub mod storage;
pub mod store;
pub mod token;
pub mod transport;

pub use api::{AuthApi, Credentials, LoginResponse, PasswordChange, Registration};
pub use config::ApiConfig;
pub use error::{AuthError, DecodeError, ErrorBody, StorageError};
pub use guard::{GuardDecision, GuardState, PublicLayout, Viewport};
pub use marketplace::Marketplace;
pub use role::Role;
pub use search::{Facet, FilterOptions, InstituteFilter};
pub use state::{Identity, Session};
pub use storage::{MemoryStorage, TOKEN_KEY, TokenStorage};
pub use store::SessionStore;
pub use transport::{ApiRequest, ApiTransport, Method};
