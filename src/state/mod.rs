//! Reactive state provided through Leptos context.

pub mod remote;
pub mod session;
pub mod ui;
