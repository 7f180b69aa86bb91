// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Server state management.
//!
//! Wraps the lead service and the user directory for shared access from
//! request handlers.

use std::sync::Arc;

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use chrono::Duration;
use tokio::sync::{Mutex, MutexGuard};
use tracing::info;

use lb_core::{
    Authenticator, Error, Identity, JsonFileStore, LeadService, LeadStore, Result, TokenSigner,
};

use crate::config::Config;

/// Alternative header carrying the raw token.
pub const TOKEN_HEADER: &str = "x-auth-token";

/// The service type handlers operate on.
pub type Service = LeadService<Box<dyn LeadStore>>;

/// Shared server state containing the lead service and user directory.
#[derive(Clone)]
pub struct ServerState {
    inner: Arc<ServerStateInner>,
}

struct ServerStateInner {
    /// Lead operations; one request at a time holds the lock so that
    /// load-modify-save cycles within this process never interleave.
    service: Mutex<Service>,
    /// Read-only user directory and token signer.
    auth: Authenticator,
    /// Revenue per converted lead for analytics.
    average_deal_value: u64,
}

impl ServerState {
    /// Creates server state from a loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let ttl = Duration::try_seconds(config.auth.token_ttl_secs)
            .ok_or_else(|| Error::Config("auth.token_ttl_secs is out of range".into()))?;
        let signer = TokenSigner::new(config.auth.secret.as_str(), ttl)?;
        info!("  Token lifetime: {}s", signer.ttl().num_seconds());
        let auth = Authenticator::new(config.users.clone(), signer)?;
        let store = JsonFileStore::open(&config.storage.path, config.storage.policy())?;
        info!("  Lead document: {} ({:?})", store.path().display(), store.policy());
        info!("  Users: {}", config.users.len());

        Ok(Self::new(Box::new(store), auth, config.analytics.average_deal_value))
    }

    /// Creates server state over an arbitrary store.
    pub fn new(store: Box<dyn LeadStore>, auth: Authenticator, average_deal_value: u64) -> Self {
        ServerState {
            inner: Arc::new(ServerStateInner {
                service: Mutex::new(LeadService::new(store)),
                auth,
                average_deal_value,
            }),
        }
    }

    /// Locks the lead service for the duration of one operation.
    pub async fn service(&self) -> MutexGuard<'_, Service> {
        self.inner.service.lock().await
    }

    pub fn auth(&self) -> &Authenticator {
        &self.inner.auth
    }

    pub fn average_deal_value(&self) -> u64 {
        self.inner.average_deal_value
    }

    /// Resolves the caller's identity from request headers.
    pub fn authorize(&self, headers: &HeaderMap) -> Result<Identity> {
        self.inner.auth.authorize(token_from_headers(headers))
    }
}

/// Extracts the token from `x-auth-token` or `Authorization: Bearer`.
pub fn token_from_headers(headers: &HeaderMap) -> Option<&str> {
    if let Some(token) = headers.get(TOKEN_HEADER).and_then(|v| v.to_str().ok()) {
        return Some(token);
    }
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
