// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CSV export and import of leads.
//!
//! Export writes one row per lead with a fixed header. Import reads a
//! header row and accepts `Name`/`name`, `Email`/`email`, and
//! `Phone`/`phone` columns; everything else is ignored.

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::lead::{non_empty, Lead, NewLead, SOURCE_CSV_IMPORT};

/// Header row of an export, in column order.
pub const EXPORT_HEADER: [&str; 7] =
    ["Name", "Email", "Phone", "Source", "Status", "AssignedTo", "Date"];

const UNASSIGNED: &str = "Unassigned";

/// Renders `leads` as CSV.
///
/// `display_name` maps an owner id to a human-readable name; unknown ids are
/// written as-is.
pub fn export<F>(leads: &[Lead], display_name: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(EXPORT_HEADER)?;

    for lead in leads {
        let assignee = match lead.assigned_to.as_deref() {
            Some(id) => display_name(id).unwrap_or_else(|| id.to_string()),
            None => UNASSIGNED.to_string(),
        };
        let date = lead.created_at.format("%Y-%m-%d").to_string();
        writer.write_record([
            lead.name.as_str(),
            lead.email.as_str(),
            lead.phone.as_deref().unwrap_or(""),
            lead.source.as_str(),
            lead.status.as_str(),
            assignee.as_str(),
            date.as_str(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[derive(Debug, Deserialize)]
struct ImportRow {
    #[serde(default, alias = "Name")]
    name: Option<String>,
    #[serde(default, alias = "Email")]
    email: Option<String>,
    #[serde(default, alias = "Phone")]
    phone: Option<String>,
}

/// Outcome of parsing an import file.
#[derive(Debug, Default)]
pub struct ParsedImport {
    /// Accepted rows, in file order.
    pub rows: Vec<NewLead>,
    /// Rows that could not be read or lacked a name or email.
    pub failed: usize,
}

/// Per-file import counts reported back to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub added: usize,
    pub failed: usize,
}

/// Parses an import file into lead fields tagged with the import source.
///
/// Fails only when the header row itself cannot be read.
pub fn parse_import<R: Read>(input: R) -> Result<ParsedImport> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);
    reader.headers()?;

    let mut parsed = ParsedImport::default();
    for row in reader.deserialize::<ImportRow>() {
        let Ok(row) = row else {
            parsed.failed += 1;
            continue;
        };
        match (non_empty(row.name.as_deref()), non_empty(row.email.as_deref())) {
            (Some(name), Some(email)) => {
                let mut fields = NewLead::new(name, email).with_source(SOURCE_CSV_IMPORT);
                fields.phone = non_empty(row.phone.as_deref()).map(str::to_string);
                parsed.rows.push(fields);
            }
            _ => parsed.failed += 1,
        }
    }
    Ok(parsed)
}

#[cfg(test)]
#[path = "csv_io_tests.rs"]
mod tests;
