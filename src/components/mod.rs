//! Route guard shells, the navigation sidebar and shared form fields.

pub mod field;
pub mod private_route;
pub mod public_route;
pub mod sidebar;
