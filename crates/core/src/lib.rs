// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! lb-core: Shared library for the leadbook lead tracker
//!
//! This crate provides the lead data model, whole-collection storage,
//! authentication and session tokens, and the role-aware lead operations
//! used by the leadbook server.

pub mod analytics;
pub mod auth;
pub mod clock;
pub mod csv_io;
pub mod error;
pub mod id;
pub mod identity;
pub mod lead;
pub mod service;
pub mod store;
pub mod token;

pub use analytics::Summary;
pub use auth::{hash_password, Authenticator, Session, UserRecord};
pub use clock::{Clock, ManualClock, SystemClock};
pub use csv_io::ImportReport;
pub use error::{Error, Result};
pub use identity::{Identity, Role};
pub use lead::{Lead, LeadPatch, NewLead, Note, Status};
pub use service::LeadService;
pub use store::{JsonFileStore, LeadStore, LoadPolicy, MemoryStore};
pub use token::{TokenSigner, DEFAULT_TOKEN_TTL_SECS};
