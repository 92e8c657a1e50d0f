//! Closed set of account roles carried in token claims.

#[cfg(test)]
#[path = "role_test.rs"]
mod role_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Account classification controlling which route subtrees a session may enter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    /// Applicant browsing institutions and submitting applications.
    Student,
    /// Institution publishing scholarships and reviewing applications.
    Institution,
}

impl Role {
    /// Every known role, in display order.
    pub const ALL: [Role; 2] = [Role::Student, Role::Institution];

    /// Wire tag as it appears in claims and API payloads.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "Student",
            Self::Institution => "Institution",
        }
    }

    /// Lowercase URL segment rooting this role's private subtree.
    #[must_use]
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Institution => "institution",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a role name that is not in the closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownRole(s.to_owned()))
    }
}
