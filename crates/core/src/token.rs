// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Signed session tokens.
//!
//! Tokens use the compact JWT layout (`header.payload.signature`, each part
//! base64url without padding) signed with HMAC-SHA256. The payload carries
//! the caller's identity under `user` plus `iat`/`exp` in Unix seconds.
//! There is no revocation: a token stays valid until `exp`.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::error::{Error, Result};
use crate::identity::Identity;

type HmacSha256 = Hmac<Sha256>;

/// Validity window in seconds used when none is configured.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 60 * 60;

const ALGORITHM: &str = "HS256";
const INVALID: &str = "token is not valid";

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    alg: String,
    typ: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    user: Identity,
    iat: i64,
    exp: i64,
}

/// Issues and verifies session tokens with a shared secret.
#[derive(Clone)]
pub struct TokenSigner {
    secret: Vec<u8>,
    ttl: Duration,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner").field("ttl", &self.ttl).finish_non_exhaustive()
    }
}

impl TokenSigner {
    /// Creates a signer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the secret is empty or the TTL is not positive.
    pub fn new(secret: impl Into<Vec<u8>>, ttl: Duration) -> Result<Self> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(Error::Config("token secret must not be empty".into()));
        }
        if ttl <= Duration::zero() {
            return Err(Error::Config("token lifetime must be positive".into()));
        }
        Ok(TokenSigner { secret, ttl })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issues a token for `identity` valid from `now` until `now + ttl`.
    pub fn issue(&self, identity: &Identity, now: DateTime<Utc>) -> Result<String> {
        let header = Header { alg: ALGORITHM.into(), typ: "JWT".into() };
        let claims = Claims {
            user: identity.clone(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(serde_json::to_vec(&header)?),
            URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims)?)
        );
        let signature = self.mac()?.chain_update(signing_input.as_bytes()).finalize().into_bytes();
        Ok(format!("{}.{}", signing_input, URL_SAFE_NO_PAD.encode(signature)))
    }

    /// Verifies signature and expiry and returns the embedded identity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] for malformed, tampered, or expired tokens.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Identity> {
        let mut parts = token.trim().split('.');
        let (Some(header), Some(payload), Some(signature), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(unauthorized());
        };

        let signature = URL_SAFE_NO_PAD.decode(signature).map_err(|_| unauthorized())?;
        self.mac()?
            .chain_update(header.as_bytes())
            .chain_update(b".")
            .chain_update(payload.as_bytes())
            .verify_slice(&signature)
            .map_err(|_| unauthorized())?;

        let header: Header = decode_part(header)?;
        if header.alg != ALGORITHM {
            return Err(unauthorized());
        }
        let claims: Claims = decode_part(payload)?;
        if now.timestamp() >= claims.exp {
            return Err(Error::Unauthorized("token has expired".into()));
        }
        Ok(claims.user)
    }

    fn mac(&self) -> Result<HmacSha256> {
        HmacSha256::new_from_slice(&self.secret).map_err(|e| Error::Signing(e.to_string()))
    }
}

fn decode_part<T: serde::de::DeserializeOwned>(part: &str) -> Result<T> {
    let bytes = URL_SAFE_NO_PAD.decode(part).map_err(|_| unauthorized())?;
    serde_json::from_slice(&bytes).map_err(|_| unauthorized())
}

fn unauthorized() -> Error {
    Error::Unauthorized(INVALID.into())
}

#[cfg(test)]
#[path = "token_tests.rs"]
mod tests;
