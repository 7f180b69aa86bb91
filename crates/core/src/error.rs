// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for lb-core operations.

use thiserror::Error;

/// All possible errors that can occur in lb-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("lead not found: {0}")]
    LeadNotFound(String),

    #[error(
        "invalid status: '{0}'\n  hint: valid statuses are: New, Contacted, Converted, Closed"
    )]
    InvalidStatus(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("storage failure: {0}")]
    Storage(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("token signing failed: {0}")]
    Signing(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// A specialized Result type for lb-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
