// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Core lead types for the leadbook service.
//!
//! This module contains the fundamental data types: Lead, Status, Note, and
//! the input shapes used to create and update leads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Source tag for leads submitted through the public contact form.
pub const SOURCE_CONTACT_FORM: &str = "Website Contact Form";
/// Source tag for leads entered from the dashboard.
pub const SOURCE_MANUAL: &str = "Manual Entry";
/// Source tag for leads created by a CSV import.
pub const SOURCE_CSV_IMPORT: &str = "Imported CSV";
/// `createdBy` value for unauthenticated submissions.
pub const CREATED_BY_PUBLIC: &str = "public";

/// Pipeline status of a lead.
///
/// Any status may be set from any other; there is no guarded transition table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Status {
    /// Not yet contacted. Initial state for new leads.
    #[default]
    New,
    /// Someone has reached out.
    Contacted,
    /// Became a customer.
    Converted,
    /// Closed without a deal.
    Closed,
}

impl Status {
    /// All statuses in pipeline order.
    pub const ALL: [Status; 4] = [Status::New, Status::Contacted, Status::Converted, Status::Closed];

    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::New => "New",
            Status::Contacted => "Contacted",
            Status::Converted => "Converted",
            Status::Closed => "Closed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "new" => Ok(Status::New),
            "contacted" => Ok(Status::Contacted),
            "converted" => Ok(Status::Converted),
            "closed" => Ok(Status::Closed),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }
}

// Stored documents may carry any casing, so reading goes through `FromStr`.
impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A note appended to a lead. Notes are never edited or removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// The note content.
    pub text: String,
    /// Username of whoever wrote the note.
    #[serde(default)]
    pub author: String,
    /// When the note was added.
    pub created_at: DateTime<Utc>,
}

/// A prospective customer record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    /// Unique identifier (UUID v4). Older documents key it as `_id`.
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Free-text origin tag.
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub status: Status,
    /// Id of the owning sales identity; `null` when unassigned.
    #[serde(default)]
    pub assigned_to: Option<String>,
    /// `"public"` or the id of the identity that created the lead.
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    /// Append-only note history, oldest first.
    #[serde(default)]
    pub notes: Vec<Note>,
}

impl Lead {
    /// Creates a lead in the `New` state with no owner and no notes.
    pub fn new(id: String, fields: NewLead, created_by: String, created_at: DateTime<Utc>) -> Self {
        Lead {
            id,
            name: fields.name,
            email: fields.email,
            phone: fields.phone,
            source: fields.source.unwrap_or_default(),
            status: Status::New,
            assigned_to: None,
            created_by,
            created_at,
            notes: Vec::new(),
        }
    }

    /// Returns true if `owner_id` owns this lead.
    pub fn is_assigned_to(&self, owner_id: &str) -> bool {
        self.assigned_to.as_deref() == Some(owner_id)
    }

    /// Appends a note to the history.
    pub fn append_note(&mut self, text: String, author: String, created_at: DateTime<Utc>) {
        self.notes.push(Note { text, author, created_at });
    }
}

/// Submitter-supplied fields for a new lead.
///
/// Name and email default to empty strings; the create paths accept them as is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLead {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    /// Requested owner. Honored only for admin creation.
    #[serde(default)]
    pub assigned_to: Option<String>,
}

impl NewLead {
    /// Creates the minimal field set.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        NewLead { name: name.into(), email: email.into(), ..Default::default() }
    }

    /// Sets the phone number (builder pattern).
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Sets the source tag (builder pattern).
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the requested owner (builder pattern).
    pub fn with_assigned_to(mut self, owner: impl Into<String>) -> Self {
        self.assigned_to = Some(owner.into());
        self
    }

    /// Fills in `source` when the submitter left it empty.
    pub(crate) fn or_source(mut self, default: &str) -> Self {
        if non_empty(self.source.as_deref()).is_none() {
            self.source = Some(default.to_string());
        }
        self
    }
}

/// A partial update to an existing lead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadPatch {
    pub status: Option<Status>,
    pub note: Option<String>,
    pub assigned_to: Option<String>,
}

impl LeadPatch {
    /// Sets the new status (builder pattern).
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets a note to append (builder pattern).
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Sets the new owner (builder pattern).
    pub fn with_assigned_to(mut self, owner: impl Into<String>) -> Self {
        self.assigned_to = Some(owner.into());
        self
    }
}

/// Treats an empty string the same as a missing value.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "lead_tests.rs"]
mod tests;
