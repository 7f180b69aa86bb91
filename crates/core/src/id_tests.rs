// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use std::cell::Cell;
use std::collections::HashSet;

#[test]
fn generated_id_is_a_uuid() {
    let id = generate_id();
    assert_eq!(id.len(), 36);
    assert!(Uuid::parse_str(&id).is_ok());
}

#[test]
fn generated_ids_do_not_repeat() {
    let ids: HashSet<String> = (0..500).map(|_| generate_id()).collect();
    assert_eq!(ids.len(), 500);
}

#[test]
fn unique_id_retries_until_unused() {
    let calls = Cell::new(0);
    let id = generate_unique_id(|_| {
        calls.set(calls.get() + 1);
        calls.get() < 3
    });

    assert_eq!(calls.get(), 3);
    assert!(Uuid::parse_str(&id).is_ok());
}
