// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use uuid::Uuid;

/// Generate a random lead ID (UUID v4, hyphenated lowercase).
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Generate an ID that `exists` reports as unused, drawing again on collision.
pub fn generate_unique_id<F>(exists: F) -> String
where
    F: Fn(&str) -> bool,
{
    loop {
        let id = generate_id();
        if !exists(&id) {
            return id;
        }
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
