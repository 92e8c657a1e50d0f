//! Route-level page components.

pub mod applications;
pub mod dashboard;
pub mod home;
pub mod profile;
pub mod scholarship;
pub mod search;
pub mod settings;
pub mod signin;
pub mod signup;
pub mod unauthorized;
