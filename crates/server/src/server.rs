// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP server implementation.
//!
//! Routes JSON requests under `/api` to the lead service. Every lead route
//! except the public form resolves the caller from the request headers
//! before touching the service.

use std::future::Future;
use std::net::SocketAddr;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use lb_core::analytics::Summary;
use lb_core::lead::Status;
use lb_core::{ImportReport, Lead, LeadPatch, NewLead, Session};

use crate::error::ApiError;
use crate::state::ServerState;

/// Body answered by `GET /`.
pub const ROOT_MESSAGE: &str = "API is running...";

/// Filename offered for CSV exports.
pub const EXPORT_FILENAME: &str = "leads_export.csv";

type ApiResult<T> = Result<T, ApiError>;

/// A JSON body whose rejection is answered as an [`ApiError`].
type JsonBody<T> = Result<Json<T>, JsonRejection>;

#[derive(Debug, Deserialize)]
struct LoginRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateRequest {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    note: Option<String>,
    #[serde(default)]
    assigned_to: Option<String>,
}

impl UpdateRequest {
    /// Converts the wire shape, rejecting unknown status names.
    fn into_patch(self) -> lb_core::Result<LeadPatch> {
        let status = match self.status.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => Some(s.parse::<Status>()?),
            _ => None,
        };
        Ok(LeadPatch { status, note: self.note, assigned_to: self.assigned_to })
    }
}

/// Builds the application router.
pub fn router(state: ServerState) -> Router {
    let api = Router::new()
        .route("/auth/login", post(login))
        .route("/leads/public", post(create_public))
        .route("/leads", post(create_lead).get(list_leads))
        .route("/leads/export", get(export_leads))
        .route("/leads/import", post(import_leads))
        .route("/leads/analytics", get(analytics))
        .route("/leads/:id", patch(update_lead).delete(delete_lead));

    Router::new().route("/", get(root)).nest("/api", api).with_state(state)
}

/// Run the HTTP server on the given address until interrupted.
pub async fn run(addr: SocketAddr, state: ServerState) -> Result<(), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on: {}", listener.local_addr()?);
    serve(listener, state, shutdown_signal()).await?;
    info!("Server stopped");
    Ok(())
}

/// Serve requests on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: ServerState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(state)).with_graceful_shutdown(shutdown).await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown requested"),
        Err(e) => {
            warn!("Cannot listen for ctrl-c, running until killed: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

async fn root() -> &'static str {
    ROOT_MESSAGE
}

async fn login(
    State(state): State<ServerState>,
    body: JsonBody<LoginRequest>,
) -> ApiResult<Json<Session>> {
    let Json(body) = body?;
    let session = state.auth().authenticate(&body.username, &body.password)?;
    Ok(Json(session))
}

async fn create_public(
    State(state): State<ServerState>,
    body: JsonBody<NewLead>,
) -> ApiResult<Json<Lead>> {
    let Json(body) = body?;
    let lead = state.service().await.create_public(body)?;
    Ok(Json(lead))
}

async fn create_lead(
    State(state): State<ServerState>,
    headers: HeaderMap,
    body: JsonBody<NewLead>,
) -> ApiResult<Json<Lead>> {
    let identity = state.authorize(&headers)?;
    let Json(body) = body?;
    let lead = state.service().await.create_internal(&identity, body)?;
    Ok(Json(lead))
}

async fn list_leads(
    State(state): State<ServerState>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<Lead>>> {
    let identity = state.authorize(&headers)?;
    let leads = state.service().await.list(&identity)?;
    Ok(Json(leads))
}

async fn update_lead(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: JsonBody<UpdateRequest>,
) -> ApiResult<Json<Lead>> {
    let identity = state.authorize(&headers)?;
    let Json(body) = body?;
    let patch = body.into_patch()?;
    let lead = state.service().await.update(&identity, &id, patch)?;
    Ok(Json(lead))
}

async fn delete_lead(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Json<Value>> {
    let identity = state.authorize(&headers)?;
    if !state.service().await.delete(&identity, &id)? {
        debug!("delete of unknown lead {} by {}", id, identity.id);
    }
    Ok(Json(json!({ "msg": "Lead removed" })))
}

async fn export_leads(
    State(state): State<ServerState>,
    headers: HeaderMap,
) -> ApiResult<impl IntoResponse> {
    let identity = state.authorize(&headers)?;
    let csv = state.service().await.export_csv(&identity, |id| state.auth().display_name(id))?;
    let disposition = format!("attachment; filename=\"{}\"", EXPORT_FILENAME);
    Ok(([(CONTENT_TYPE, "text/csv".to_string()), (CONTENT_DISPOSITION, disposition)], csv))
}

async fn import_leads(
    State(state): State<ServerState>,
    headers: HeaderMap,
    body: String,
) -> ApiResult<Json<ImportReport>> {
    let identity = state.authorize(&headers)?;
    let report = state.service().await.import_csv(&identity, body.as_bytes())?;
    Ok(Json(report))
}

async fn analytics(
    State(state): State<ServerState>,
    headers: HeaderMap,
) -> ApiResult<Json<Summary>> {
    let identity = state.authorize(&headers)?;
    let summary = state.service().await.analytics(&identity, state.average_deal_value())?;
    Ok(Json(summary))
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;
