// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Integration tests for the leadbook server binary.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::process::{Child, Command, Stdio};
use std::time::Duration;

use serde_json::{json, Value};

// sha256("admin123") and sha256("sales123")
const CONFIG: &str = r#"
[storage]
path = "data/leads.json"

[auth]
secret = "integration-secret"

[[users]]
username = "admin"
password_sha256 = "240be518fabd2724ddb6f04eeb1da5967448d7e831c08c8fa822809f74c720a9"
id = "admin_1"
role = "admin"

[[users]]
username = "sales1"
password_sha256 = "6bc0a63cb29c92306020c0a6bbc358cc4628db277dc06e253535e126517ad637"
id = "sales_1"
role = "sales"
display_name = "Sales Rep 1"
"#;

/// Helper to spawn a server process and clean it up on drop.
struct ServerProcess {
    child: Child,
    port: u16,
    temp_dir: tempfile::TempDir,
}

impl ServerProcess {
    fn spawn() -> Self {
        let temp_dir = tempfile::tempdir().expect("create temp dir");
        let config_path = temp_dir.path().join("leadbook.toml");
        std::fs::write(&config_path, CONFIG).expect("write config");

        // Use a port range that's less likely to conflict
        let port = 50152 + (std::process::id() % 1000) as u16;

        let child = Command::new(env!("CARGO_BIN_EXE_leadbook"))
            .arg("serve")
            .arg("--config")
            .arg(&config_path)
            .arg("--bind")
            .arg(format!("127.0.0.1:{}", port))
            .env_remove("LEADBOOK_JWT_SECRET")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .expect("spawn server process");

        ServerProcess { child, port, temp_dir }
    }

    fn url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}{}", self.port, path)
    }

    /// Waits until `GET /` answers. CI runners can be slow.
    async fn wait_ready(&self, client: &reqwest::Client) {
        for _ in 0..50 {
            if let Ok(resp) = client.get(self.url("/")).send().await {
                if resp.status().is_success() {
                    return;
                }
            }
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
        panic!("server did not become ready");
    }
}

impl Drop for ServerProcess {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn digest(password: &str) -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_leadbook"))
        .arg("hash-password")
        .arg(password)
        .output()
        .expect("run hash-password");
    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

#[test]
fn test_hash_password_prints_sha256() {
    assert_eq!(
        digest("admin123"),
        "240be518fabd2724ddb6f04eeb1da5967448d7e831c08c8fa822809f74c720a9"
    );
}

#[tokio::test]
async fn test_server_lifecycle() {
    let server = ServerProcess::spawn();
    let client = reqwest::Client::new();
    server.wait_ready(&client).await;

    let root = client.get(server.url("/")).send().await.unwrap().text().await.unwrap();
    assert_eq!(root, "API is running...");

    // Public submission needs no token.
    let resp = client
        .post(server.url("/api/leads/public"))
        .json(&json!({ "name": "Ada", "email": "ada@example.com" }))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());

    // Sales creates a lead without an owner and gets it.
    let login: Value = client
        .post(server.url("/api/auth/login"))
        .json(&json!({ "username": "sales1", "password": "sales123" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let sales_token = login["token"].as_str().unwrap().to_string();

    let created: Value = client
        .post(server.url("/api/leads"))
        .bearer_auth(&sales_token)
        .json(&json!({ "name": "Bob", "email": "bob@example.com" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(created["assignedTo"], "sales_1");

    let listed: Vec<Value> = client
        .get(server.url("/api/leads"))
        .header("x-auth-token", &sales_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);

    // Sales may not delete.
    let id = created["id"].as_str().unwrap();
    let resp = client
        .delete(server.url(&format!("/api/leads/{id}")))
        .bearer_auth(&sales_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 403);

    // Both leads are on disk.
    let document =
        std::fs::read_to_string(server.temp_dir.path().join("data/leads.json")).unwrap();
    let stored: Vec<Value> = serde_json::from_str(&document).unwrap();
    assert_eq!(stored.len(), 2);
}
