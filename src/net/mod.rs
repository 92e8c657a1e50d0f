//! Network layer: the browser transport for the authentication API.

pub mod api;
