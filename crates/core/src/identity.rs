// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Caller identity carried by a signed session token.

#[cfg(test)]
#[path = "identity_tests.rs"]
mod tests;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What an authenticated caller may do with leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access to every lead.
    Admin,
    /// Access restricted to leads assigned to the caller.
    Sales,
    /// Any other configured role. Denied all lead operations.
    #[serde(other)]
    Other,
}

impl Role {
    /// Returns the string representation used in tokens and config.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Sales => "sales",
            Role::Other => "other",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "admin" => Role::Admin,
            "sales" => Role::Sales,
            _ => Role::Other,
        })
    }
}

/// The `{id, username, role}` triple embedded in a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub username: String,
    pub role: Role,
}

impl Identity {
    pub fn new(id: impl Into<String>, username: impl Into<String>, role: Role) -> Self {
        Identity { id: id.into(), username: username.into(), role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Returns true if this identity may act on a lead owned by `owner`.
    ///
    /// Admins may act on any lead; sales only on their own.
    pub fn owns(&self, owner: Option<&str>) -> bool {
        match self.role {
            Role::Admin => true,
            Role::Sales => owner == Some(self.id.as_str()),
            Role::Other => false,
        }
    }
}
