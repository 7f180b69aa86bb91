// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Login against the configured user directory.
//!
//! Users come from static configuration and are loaded once at startup.
//! Passwords are stored as lowercase hex SHA-256 digests.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::identity::{Identity, Role};
use crate::token::TokenSigner;

/// One configured user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    /// Hex SHA-256 of the password.
    pub password_sha256: String,
    pub id: String,
    pub role: Role,
    /// Name shown in exports; falls back to `username`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl UserRecord {
    pub fn identity(&self) -> Identity {
        Identity::new(&self.id, &self.username, self.role)
    }
}

/// Successful login result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub token: String,
    pub user: Identity,
}

/// Returns the hex SHA-256 digest stored for `password`.
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Checks credentials and session tokens.
#[derive(Debug, Clone)]
pub struct Authenticator {
    users: Vec<UserRecord>,
    signer: TokenSigner,
}

impl Authenticator {
    /// Builds an authenticator over `users`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for duplicate usernames (case-insensitive),
    /// duplicate ids, or digests that are not 64 hex characters.
    pub fn new(users: Vec<UserRecord>, signer: TokenSigner) -> Result<Self> {
        let mut usernames = HashSet::new();
        let mut ids = HashSet::new();
        for user in &users {
            if !usernames.insert(user.username.to_lowercase()) {
                return Err(Error::Config(format!("duplicate username '{}'", user.username)));
            }
            if !ids.insert(user.id.as_str()) {
                return Err(Error::Config(format!("duplicate user id '{}'", user.id)));
            }
            if !is_sha256_hex(&user.password_sha256) {
                return Err(Error::Config(format!(
                    "password_sha256 for '{}' must be 64 hex characters",
                    user.username
                )));
            }
        }
        Ok(Authenticator { users, signer })
    }

    /// Logs in with the current time.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<Session> {
        self.authenticate_at(username, password, Utc::now())
    }

    /// Logs in, issuing a token that starts at `now`.
    pub fn authenticate_at(
        &self,
        username: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<Session> {
        let wanted = username.to_lowercase();
        let Some(user) = self.users.iter().find(|u| u.username.to_lowercase() == wanted) else {
            warn!("login failed: unknown user '{}'", username);
            return Err(Error::InvalidCredentials);
        };

        let given = hash_password(password);
        let stored = user.password_sha256.to_lowercase();
        if !bool::from(given.as_bytes().ct_eq(stored.as_bytes())) {
            warn!("login failed: bad password for '{}'", user.username);
            return Err(Error::InvalidCredentials);
        }

        let identity = user.identity();
        let token = self.signer.issue(&identity, now)?;
        info!("login: {} ({})", identity.username, identity.role);
        Ok(Session { token, user: identity })
    }

    /// Resolves a presented token to an identity using the current time.
    pub fn authorize(&self, token: Option<&str>) -> Result<Identity> {
        self.authorize_at(token, Utc::now())
    }

    pub fn authorize_at(&self, token: Option<&str>, now: DateTime<Utc>) -> Result<Identity> {
        match token.filter(|t| !t.trim().is_empty()) {
            Some(token) => self.signer.verify(token, now),
            None => Err(Error::Unauthorized("no token, authorization denied".into())),
        }
    }

    /// Display name for a user id, if the id is configured.
    pub fn display_name(&self, id: &str) -> Option<String> {
        self.users
            .iter()
            .find(|u| u.id == id)
            .map(|u| u.display_name.clone().unwrap_or_else(|| u.username.clone()))
    }
}

fn is_sha256_hex(s: &str) -> bool {
    s.len() == 64 && s.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
