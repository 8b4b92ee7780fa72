//! Comprehensive test plan for the `spendlog-config` crate.
//!
//! These tests exercise the configuration loader across default handling,
//! file discovery, environment overrides, and validation behaviour.

use std::fs;
use std::path::{Path, PathBuf};

use serial_test::serial;
use tempfile::TempDir;

use spendlog_config::{load, AdvisorConfig, AppConfig, AuthConfig, HttpConfig};

const ENV_VARS_TO_RESET: &[&str] = &[
    "DATABASE_URL",
    "SPENDLOG_CONFIG",
    "SPENDLOG__ADVISOR__API_KEY",
    "SPENDLOG__ADVISOR__BASE_URL",
    "SPENDLOG__ADVISOR__MAX_TOKENS",
    "SPENDLOG__ADVISOR__MODEL",
    "SPENDLOG__ADVISOR__REQUEST_TIMEOUT_SECONDS",
    "SPENDLOG__AUTH__SECRET",
    "SPENDLOG__AUTH__TOKEN_TTL_SECONDS",
    "SPENDLOG__DATABASE__MAX_CONNECTIONS",
    "SPENDLOG__DATABASE__URL",
    "SPENDLOG__HTTP__ADDRESS",
    "SPENDLOG__HTTP__PORT",
];

struct TestContext {
    vars: Vec<(String, Option<String>)>,
    original_dir: Option<PathBuf>,
}

impl TestContext {
    fn new() -> Self {
        Self {
            vars: Vec::new(),
            original_dir: None,
        }
    }

    fn reset_environment(&mut self) {
        for key in ENV_VARS_TO_RESET {
            self.remove_var(key);
        }
    }

    fn set_var(&mut self, key: &str, value: impl AsRef<str>) {
        let previous = std::env::var(key).ok();
        std::env::set_var(key, value.as_ref());
        self.vars.push((key.to_string(), previous));
    }

    fn remove_var(&mut self, key: &str) {
        let previous = std::env::var(key).ok();
        std::env::remove_var(key);
        self.vars.push((key.to_string(), previous));
    }

    fn set_current_dir(&mut self, dir: &Path) {
        if self.original_dir.is_none() {
            self.original_dir =
                Some(std::env::current_dir().expect("failed to capture current directory"));
        }
        std::env::set_current_dir(dir).expect("failed to set current directory");
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        if let Some(original) = self.original_dir.take() {
            let _ = std::env::set_current_dir(original);
        }

        while let Some((key, value)) = self.vars.pop() {
            match value {
                Some(val) => std::env::set_var(&key, val),
                None => std::env::remove_var(&key),
            }
        }
    }
}

fn write_config_file(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("failed to create config directories");
    }
    fs::write(path, contents).expect("failed to write config file");
}

#[test]
#[serial]
fn load_uses_default_values_when_no_files_found() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let mut ctx = TestContext::new();
    ctx.reset_environment();
    ctx.set_current_dir(temp_dir.path());

    let config = load().expect("configuration load should succeed without files");
    let defaults = AppConfig::default();

    assert_eq!(config.http.address, defaults.http.address);
    assert_eq!(config.http.port, defaults.http.port);
    assert_eq!(config.database.url, defaults.database.url);
    assert_eq!(
        config.database.max_connections,
        defaults.database.max_connections
    );
    assert_eq!(config.auth.secret, defaults.auth.secret);
    assert_eq!(
        config.auth.token_ttl_seconds,
        defaults.auth.token_ttl_seconds
    );
    assert_eq!(config.advisor.api_key, defaults.advisor.api_key);
    assert_eq!(config.advisor.model, defaults.advisor.model);
}

#[test]
#[serial]
fn load_picks_first_available_file_in_search_order() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let mut ctx = TestContext::new();
    ctx.reset_environment();
    ctx.set_current_dir(temp_dir.path());

    write_config_file(
        temp_dir.path(),
        "spendlog.toml",
        r#"
        [http]
        port = 4242
        "#,
    );
    write_config_file(
        temp_dir.path(),
        "config/spendlog.toml",
        r#"
        [http]
        port = 5151
        "#,
    );

    let config = load().expect("configuration load should pick the first file");
    assert_eq!(config.http.port, 4242);
}

#[test]
#[serial]
fn load_merges_partial_file_with_defaults() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let mut ctx = TestContext::new();
    ctx.reset_environment();
    ctx.set_current_dir(temp_dir.path());

    write_config_file(
        temp_dir.path(),
        "spendlog.toml",
        r#"
        [http]
        port = 8181

        [database]
        max_connections = 50
        "#,
    );

    let config = load().expect("configuration load should succeed");
    let defaults = AppConfig::default();

    assert_eq!(config.http.port, 8181);
    assert_eq!(config.http.address, defaults.http.address);
    assert_eq!(config.database.max_connections, 50);
    assert_eq!(config.database.url, defaults.database.url);
    assert_eq!(config.advisor.base_url, defaults.advisor.base_url);
}

#[test]
#[serial]
fn load_applies_environment_overrides() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let mut ctx = TestContext::new();
    ctx.reset_environment();
    ctx.set_current_dir(temp_dir.path());

    write_config_file(
        temp_dir.path(),
        "spendlog.toml",
        r#"
        [http]
        port = 3030
        "#,
    );

    ctx.set_var("SPENDLOG__HTTP__PORT", "8080");

    let config = load().expect("configuration load should honour env overrides");
    assert_eq!(config.http.port, 8080);
}

#[test]
#[serial]
fn load_supports_database_url_environment_variable() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let mut ctx = TestContext::new();
    ctx.reset_environment();
    ctx.set_current_dir(temp_dir.path());

    let url = "sqlite:///var/lib/spendlog/spendlog.db";
    ctx.set_var("SPENDLOG__DATABASE__URL", url);

    let config = load().expect("configuration load should read database env override");
    assert_eq!(config.database.url, url);
}

#[test]
#[serial]
fn load_reads_auth_secret_from_env() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let mut ctx = TestContext::new();
    ctx.reset_environment();
    ctx.set_current_dir(temp_dir.path());

    ctx.set_var("SPENDLOG__AUTH__SECRET", "super-secret-signing-key");

    let config = load().expect("configuration load should read auth secret");
    assert_eq!(config.auth.secret, "super-secret-signing-key");
}

#[test]
#[serial]
fn load_clamps_token_ttl_to_i64_maximum() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let mut ctx = TestContext::new();
    ctx.reset_environment();
    ctx.set_current_dir(temp_dir.path());

    let oversized = (i64::MAX as u128 + 42).to_string();
    ctx.set_var("SPENDLOG__AUTH__TOKEN_TTL_SECONDS", &oversized);

    let config = load().expect("configuration load should succeed with oversized TTL");
    assert_eq!(
        config.auth.token_ttl_seconds,
        i64::MAX as u64,
        "token TTL should be clamped to i64::MAX"
    );
}

#[test]
#[serial]
fn load_populates_advisor_defaults_when_missing() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let mut ctx = TestContext::new();
    ctx.reset_environment();
    ctx.set_current_dir(temp_dir.path());

    write_config_file(
        temp_dir.path(),
        "spendlog.toml",
        r#"
        [auth]
        secret = "test-secret"
        "#,
    );

    let config = load().expect("configuration load should succeed with missing advisor");
    let defaults = AdvisorConfig::default();

    assert!(config.advisor.api_key.is_none());
    assert_eq!(config.advisor.base_url, defaults.base_url);
    assert_eq!(config.advisor.model, defaults.model);
    assert_eq!(
        config.advisor.request_timeout_seconds,
        defaults.request_timeout_seconds
    );
    assert_eq!(config.advisor.max_tokens, defaults.max_tokens);
}

#[test]
#[serial]
fn load_accepts_advisor_api_key_from_env() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let mut ctx = TestContext::new();
    ctx.reset_environment();
    ctx.set_current_dir(temp_dir.path());

    ctx.set_var("SPENDLOG__ADVISOR__API_KEY", "sk-test-key");

    let config = load().expect("configuration load should read advisor API key");
    assert_eq!(config.advisor.api_key.as_deref(), Some("sk-test-key"));
}

#[test]
#[serial]
fn load_errors_on_invalid_toml_contents() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let mut ctx = TestContext::new();
    ctx.reset_environment();
    ctx.set_current_dir(temp_dir.path());

    write_config_file(
        temp_dir.path(),
        "spendlog.toml",
        r#"
        [http]
        port = "not-a-number
        "#,
    );

    let error = load().expect_err("invalid TOML should cause load to fail");
    let message = error.to_string();
    assert!(
        message.contains("invalid configuration")
            || message.contains("unable to build configuration"),
        "unexpected error message: {message}"
    );
}

#[test]
fn auth_config_defaults_to_empty_secret_and_week_long_ttl() {
    let defaults = AuthConfig::default();
    assert!(defaults.secret.is_empty());
    assert_eq!(defaults.token_ttl_seconds, 604_800);
}

#[test]
fn advisor_config_defaults_target_openai() {
    let defaults = AdvisorConfig::default();
    assert_eq!(defaults.base_url, "https://api.openai.com/v1");
    assert_eq!(defaults.model, "gpt-3.5-turbo");
    assert_eq!(defaults.max_tokens, 56);
}

#[test]
fn http_config_defaults_match_expected_host_and_port() {
    let defaults = HttpConfig::default();
    assert_eq!(defaults.address, "127.0.0.1");
    assert_eq!(defaults.port, 7070);
}
