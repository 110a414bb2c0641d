//! Integration tests for the `lendmit` CLI binary.
//!
//! These tests cover argument parsing, help output, shell completions,
//! and error exit codes without a running LendMIT backend.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `lendmit` binary with env isolation.
///
/// Clears all `LENDMIT_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn lendmit_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("lendmit");
    cmd.env("HOME", "/tmp/lendmit-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/lendmit-cli-test-nonexistent")
        .env("XDG_CACHE_HOME", "/tmp/lendmit-cli-test-nonexistent")
        .env_remove("LENDMIT_PROFILE")
        .env_remove("LENDMIT_BASE_URL")
        .env_remove("LENDMIT_EMAIL")
        .env_remove("LENDMIT_OUTPUT")
        .env_remove("LENDMIT_TIMEOUT")
        .env_remove("LENDMIT_PASSWORD")
        .env_remove("LENDMIT_SIGNUP_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = lendmit_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    lendmit_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("LendMIT")
            .and(predicate::str::contains("signup"))
            .and(predicate::str::contains("listings"))
            .and(predicate::str::contains("follow")),
    );
}

#[test]
fn test_version_flag() {
    lendmit_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("lendmit"));
}

#[test]
fn test_listings_help_lists_subcommands() {
    lendmit_cmd()
        .args(["listings", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("mine")
                .and(predicate::str::contains("feed"))
                .and(predicate::str::contains("remember")),
        );
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    lendmit_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    lendmit_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Argument errors ─────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = lendmit_cmd().arg("borrow-everything").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_invalid_output_format() {
    let output = lendmit_cmd()
        .args(["--output", "xml", "followees"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("xml"), "Expected rejected value in output:\n{text}");
}

#[test]
fn test_verify_requires_user() {
    let output = lendmit_cmd().args(["verify", "123456"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path() {
    lendmit_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_show_defaults() {
    lendmit_cmd()
        .args(["config", "show", "--output", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default_profile"));
}

#[test]
fn test_unknown_profile_is_reported() {
    let output = lendmit_cmd()
        .args(["--profile", "nope", "followees"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let text = combined_output(&output);
    assert!(text.contains("nope"), "Expected profile name in output:\n{text}");
}

// ── Runtime errors ──────────────────────────────────────────────────

#[test]
fn test_follow_without_credentials_is_auth_error() {
    let output = lendmit_cmd().args(["follow", "u2"]).output().unwrap();
    assert_eq!(output.status.code(), Some(3));
    let text = combined_output(&output);
    assert!(
        text.contains("No credentials"),
        "Expected credentials hint in output:\n{text}"
    );
}

#[test]
fn test_login_unreachable_backend_is_connection_error() {
    let output = lendmit_cmd()
        .args([
            "--base-url",
            "http://127.0.0.1:9/api",
            "--email",
            "ada@mit.edu",
            "--timeout",
            "5",
            "login",
        ])
        .env("LENDMIT_PASSWORD", "hunter22")
        .output()
        .unwrap();
    let code = output.status.code();
    assert!(
        code == Some(7) || code == Some(8),
        "Expected connection/timeout exit code, got {code:?}:\n{}",
        combined_output(&output)
    );
}

#[test]
fn test_remember_rejects_unknown_category() {
    let output = lendmit_cmd()
        .args([
            "listings",
            "remember",
            "--id",
            "r1",
            "--name",
            "Couch",
            "--category",
            "Furniture",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("Furniture"), "Expected category in output:\n{text}");
}

#[test]
fn test_invalid_base_url_is_usage_error() {
    let output = lendmit_cmd()
        .args(["--base-url", "not a url", "followees"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

// ── Config file profiles ────────────────────────────────────────────

/// Write a config file under a temporary XDG config home.
#[cfg(target_os = "linux")]
fn write_config(home: &tempfile::TempDir, toml: &str) {
    let dir = home.path().join("lendmit");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), toml).unwrap();
}

#[cfg(target_os = "linux")]
const CLASSROOM_PROFILE: &str = r#"
default_profile = "classroom"

[profiles.classroom]
base_url = "http://127.0.0.1:9/api"
email = "ada@mit.edu"
password = "plaintext-secret"
timeout = 5
"#;

#[cfg(target_os = "linux")]
#[test]
fn test_config_show_redacts_passwords() {
    let home = tempfile::tempdir().unwrap();
    write_config(&home, CLASSROOM_PROFILE);

    let output = lendmit_cmd()
        .env("XDG_CONFIG_HOME", home.path())
        .args(["config", "show", "--output", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let text = combined_output(&output);
    assert!(text.contains("classroom"), "Expected profile in output:\n{text}");
    assert!(!text.contains("plaintext-secret"), "Password leaked:\n{text}");
}

#[cfg(target_os = "linux")]
#[test]
fn test_profile_credentials_reach_the_backend() {
    let home = tempfile::tempdir().unwrap();
    write_config(&home, CLASSROOM_PROFILE);

    let output = lendmit_cmd()
        .env("XDG_CONFIG_HOME", home.path())
        .env("XDG_CACHE_HOME", home.path())
        .arg("followees")
        .output()
        .unwrap();
    let code = output.status.code();
    assert!(
        code == Some(7) || code == Some(8),
        "Expected connection/timeout exit code, got {code:?}:\n{}",
        combined_output(&output)
    );
}

// ── Against a mock backend ──────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_feed_reports_cache_and_owned_fallbacks() {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/UserAuthentication/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "user": "u1" })))
        .mount(&server)
        .await;
    // Every listing endpoint answers 404, so the owned listing comes from
    // the (empty) cache and the feed reuses it.

    let cache_home = tempfile::tempdir().unwrap();
    let output = lendmit_cmd()
        .env("XDG_CACHE_HOME", cache_home.path())
        .env("LENDMIT_PASSWORD", "pw")
        .args([
            "--base-url",
            &format!("{}/api", server.uri()),
            "--email",
            "a@mit.edu",
            "--color",
            "never",
            "listings",
            "feed",
        ])
        .output()
        .unwrap();

    let text = combined_output(&output);
    assert!(output.status.success(), "feed failed:\n{text}");
    assert!(
        text.contains("showing cached listings"),
        "Expected cache fallback notice:\n{text}"
    );
    assert!(
        text.contains("showing your own listings"),
        "Expected owned fallback notice:\n{text}"
    );
}
