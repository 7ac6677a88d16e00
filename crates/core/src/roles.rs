//! The closed set of user roles.
//!
//! Stored as TEXT in the database (with a CHECK constraint) and carried as a
//! string claim in access tokens; both boundaries parse back into [`Role`] so
//! every authorization check matches exhaustively.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A user's role. There is no escalation path: admins are seeded, never
/// self-registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Submits projects and appears in author sets.
    Author,
    /// Scores projects. The only role allowed to record evaluations.
    Evaluator,
    /// Manages awards, users, and winner recomputation.
    Admin,
}

impl Role {
    /// The canonical lowercase string stored in the database and tokens.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Author => "author",
            Role::Evaluator => "evaluator",
            Role::Admin => "admin",
        }
    }

    /// Whether this role may self-register through the public endpoint.
    pub fn self_registrable(self) -> bool {
        match self {
            Role::Author | Role::Evaluator => true,
            Role::Admin => false,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "author" => Ok(Role::Author),
            "evaluator" => Ok(Role::Evaluator),
            "admin" => Ok(Role::Admin),
            other => Err(CoreError::Validation(format!(
                "Unknown role '{other}'. Must be one of: author, evaluator, admin"
            ))),
        }
    }
}
