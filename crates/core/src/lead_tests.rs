// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use chrono::TimeZone;
use yare::parameterized;

fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, hour, 0, 0).unwrap()
}

#[parameterized(
    new_title = { "New", Status::New },
    new_lower = { "new", Status::New },
    contacted = { "Contacted", Status::Contacted },
    converted_upper = { "CONVERTED", Status::Converted },
    closed_padded = { " closed ", Status::Closed },
)]
fn status_from_str_valid(input: &str, expected: Status) {
    assert_eq!(input.parse::<Status>().unwrap(), expected);
}

#[parameterized(
    invalid = { "Won" },
    empty = { "" },
    snake = { "in_progress" },
)]
fn status_from_str_invalid(input: &str) {
    assert!(matches!(input.parse::<Status>(), Err(Error::InvalidStatus(_))));
}

#[test]
fn status_serializes_as_display_name() {
    assert_eq!(serde_json::to_string(&Status::Converted).unwrap(), "\"Converted\"");
    for status in Status::ALL {
        assert_eq!(status.to_string(), status.as_str());
    }
}

#[test]
fn new_lead_starts_unassigned_with_no_notes() {
    let lead = Lead::new(
        "id-1".into(),
        NewLead::new("Ada", "ada@example.com").with_assigned_to("sales_1"),
        CREATED_BY_PUBLIC.into(),
        at(9),
    );

    assert_eq!(lead.status, Status::New);
    assert_eq!(lead.assigned_to, None);
    assert!(lead.notes.is_empty());
    assert_eq!(lead.created_by, "public");
}

#[test]
fn lead_json_uses_camel_case_and_null_owner() {
    let lead = Lead::new("id-1".into(), NewLead::new("Ada", "ada@example.com"), "admin_1".into(), at(9));
    let value = serde_json::to_value(&lead).unwrap();

    assert!(value.get("assignedTo").unwrap().is_null());
    assert_eq!(value["createdBy"], "admin_1");
    assert_eq!(value["status"], "New");
    assert!(value.get("phone").is_none());
    assert!(value.get("created_at").is_none());
}

#[test]
fn lead_deserializes_from_stored_document() {
    let json = r#"{
        "id": "c0ffee",
        "name": "Grace",
        "email": "grace@example.com",
        "phone": "555-0100",
        "source": "Website Contact Form",
        "status": "Contacted",
        "assignedTo": "sales_2",
        "createdBy": "public",
        "createdAt": "2026-01-05T10:00:00.000Z",
        "notes": [{"text": "called", "author": "sales_2", "createdAt": "2026-01-06T10:00:00Z"}]
    }"#;

    let lead: Lead = serde_json::from_str(json).unwrap();
    assert_eq!(lead.status, Status::Contacted);
    assert!(lead.is_assigned_to("sales_2"));
    assert_eq!(lead.notes.len(), 1);
    assert_eq!(lead.notes[0].author, "sales_2");
}

#[test]
fn append_note_preserves_order() {
    let mut lead = Lead::new("id-1".into(), NewLead::default(), "admin_1".into(), at(9));
    lead.append_note("first".into(), "admin".into(), at(10));
    lead.append_note("second".into(), "admin".into(), at(11));

    let texts: Vec<&str> = lead.notes.iter().map(|n| n.text.as_str()).collect();
    assert_eq!(texts, vec!["first", "second"]);
}

#[parameterized(
    missing = { None, "Manual Entry" },
    empty = { Some(""), "Manual Entry" },
    given = { Some("Referral"), "Referral" },
)]
fn or_source_fills_only_blank_sources(source: Option<&str>, expected: &str) {
    let mut fields = NewLead::new("Ada", "ada@example.com");
    fields.source = source.map(str::to_string);
    assert_eq!(fields.or_source(SOURCE_MANUAL).source.as_deref(), Some(expected));
}

#[test]
fn stored_status_reads_in_any_case() {
    let status: Status = serde_json::from_str("\"converted\"").unwrap();
    assert_eq!(status, Status::Converted);
    assert!(serde_json::from_str::<Status>("\"Lost\"").is_err());
}

#[test]
fn legacy_underscore_id_is_accepted() {
    let json = r#"{"_id": "old-7", "createdBy": "public", "createdAt": "2026-01-05T10:00:00Z"}"#;
    let lead: Lead = serde_json::from_str(json).unwrap();
    assert_eq!(lead.id, "old-7");
    assert!(serde_json::to_value(&lead).unwrap().get("_id").is_none());
}
