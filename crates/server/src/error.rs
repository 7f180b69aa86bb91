// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Maps core errors onto HTTP responses.
//!
//! Client errors carry a `{"msg": ...}` body. Server-side failures answer
//! `500 Server Error` and keep the cause in the log only.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use lb_core::Error;

/// A core error on its way out as a response.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        ApiError(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(Error::InvalidInput(rejection.body_text()))
    }
}

impl ApiError {
    /// Status code and client-facing message for this error.
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match &self.0 {
            Error::InvalidCredentials => (StatusCode::BAD_REQUEST, "Invalid Credentials".into()),
            Error::InvalidStatus(status) => {
                (StatusCode::BAD_REQUEST, format!("Invalid status '{}'", status))
            }
            Error::InvalidInput(msg) => (StatusCode::BAD_REQUEST, sentence(msg)),
            Error::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, sentence(msg)),
            Error::Forbidden(msg) => (StatusCode::FORBIDDEN, sentence(msg)),
            Error::LeadNotFound(_) => (StatusCode::NOT_FOUND, "Lead not found".into()),
            Error::Storage(_)
            | Error::Config(_)
            | Error::Signing(_)
            | Error::Io(_)
            | Error::Json(_)
            | Error::Csv(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server Error".into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = self.status_and_message();
        if status.is_server_error() {
            error!("request failed: {}", self.0);
            return (status, msg).into_response();
        }
        (status, Json(json!({ "msg": msg }))).into_response()
    }
}

/// Uppercases the first character.
fn sentence(msg: &str) -> String {
    let mut chars = msg.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
