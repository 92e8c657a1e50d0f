//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser concerns from page and component logic so
//! the logic stays testable off-browser.

pub mod storage;
pub mod validators;
pub mod viewport;
