// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use chrono::{Duration, TimeZone};
use yare::parameterized;

fn user(username: &str, password: &str, id: &str, role: Role) -> UserRecord {
    UserRecord {
        username: username.into(),
        password_sha256: hash_password(password),
        id: id.into(),
        role,
        display_name: None,
    }
}

fn authenticator() -> Authenticator {
    let mut sales = user("sales1", "sales123", "sales_1", Role::Sales);
    sales.display_name = Some("Sales Rep 1".into());
    Authenticator::new(
        vec![user("Admin", "admin123", "admin_1", Role::Admin), sales],
        TokenSigner::new("secret", Duration::hours(1)).unwrap(),
    )
    .unwrap()
}

fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap()
}

#[test]
fn hash_password_is_sha256_hex() {
    assert_eq!(
        hash_password("abc"),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[parameterized(
    exact = { "Admin" },
    lower = { "admin" },
    upper = { "ADMIN" },
)]
fn username_lookup_ignores_case(username: &str) {
    let session = authenticator().authenticate(username, "admin123").unwrap();
    assert_eq!(session.user.id, "admin_1");
    assert_eq!(session.user.username, "Admin");
    assert_eq!(session.user.role, Role::Admin);
}

#[parameterized(
    unknown_user = { "mallory", "admin123" },
    wrong_password = { "admin", "Admin123" },
    empty_password = { "admin", "" },
)]
fn bad_credentials_are_rejected(username: &str, password: &str) {
    assert!(matches!(
        authenticator().authenticate(username, password),
        Err(Error::InvalidCredentials)
    ));
}

#[test]
fn issued_token_authorizes_until_expiry() {
    let auth = authenticator();
    let session = auth.authenticate_at("sales1", "sales123", noon()).unwrap();

    let identity = auth.authorize_at(Some(&session.token), noon() + Duration::minutes(30)).unwrap();
    assert_eq!(identity, session.user);

    let expired = auth.authorize_at(Some(&session.token), noon() + Duration::hours(2));
    assert!(matches!(expired, Err(Error::Unauthorized(_))));
}

#[test]
fn token_stays_valid_after_user_removal() {
    let session = authenticator().authenticate_at("sales1", "sales123", noon()).unwrap();
    let without_sales = Authenticator::new(
        vec![user("admin", "admin123", "admin_1", Role::Admin)],
        TokenSigner::new("secret", Duration::hours(1)).unwrap(),
    )
    .unwrap();

    assert!(without_sales.authorize_at(Some(&session.token), noon()).is_ok());
}

#[parameterized(
    missing = { None },
    blank = { Some("  ") },
)]
fn missing_token_is_unauthorized(token: Option<&str>) {
    let err = authenticator().authorize(token).unwrap_err();
    assert!(err.to_string().contains("no token"));
}

#[test]
fn display_name_prefers_configured_name() {
    let auth = authenticator();
    assert_eq!(auth.display_name("sales_1").as_deref(), Some("Sales Rep 1"));
    assert_eq!(auth.display_name("admin_1").as_deref(), Some("Admin"));
    assert_eq!(auth.display_name("sales_9"), None);
}

#[test]
fn duplicate_usernames_are_rejected() {
    let result = Authenticator::new(
        vec![
            user("admin", "a", "admin_1", Role::Admin),
            user("ADMIN", "b", "admin_2", Role::Admin),
        ],
        TokenSigner::new("secret", Duration::hours(1)).unwrap(),
    );
    assert!(matches!(result, Err(Error::Config(msg)) if msg.contains("duplicate username")));
}

#[test]
fn duplicate_ids_are_rejected() {
    let result = Authenticator::new(
        vec![user("a", "a", "same", Role::Sales), user("b", "b", "same", Role::Sales)],
        TokenSigner::new("secret", Duration::hours(1)).unwrap(),
    );
    assert!(matches!(result, Err(Error::Config(msg)) if msg.contains("duplicate user id")));
}

#[test]
fn malformed_digest_is_rejected() {
    let mut bad = user("a", "a", "a", Role::Sales);
    bad.password_sha256 = "plaintext".into();
    let result =
        Authenticator::new(vec![bad], TokenSigner::new("secret", Duration::hours(1)).unwrap());
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn uppercase_digest_still_matches() {
    let mut admin = user("admin", "admin123", "admin_1", Role::Admin);
    admin.password_sha256 = admin.password_sha256.to_uppercase();
    let auth =
        Authenticator::new(vec![admin], TokenSigner::new("secret", Duration::hours(1)).unwrap())
            .unwrap();
    assert!(auth.authenticate("admin", "admin123").is_ok());
}
