use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "spendlog.toml",
    "config/spendlog.toml",
    "crates/config/spendlog.toml",
    "../spendlog.toml",
    "../config/spendlog.toml",
    "../crates/config/spendlog.toml",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub advisor: AdvisorConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            advisor: AdvisorConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub address: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 7070,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://spendlog.db".to_string(),
            max_connections: 10,
        }
    }
}

/// Settings for token issuance. The secret has no usable default; deployments
/// must provide one or the server refuses to start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub secret: String,
    #[serde(default = "AuthConfig::default_token_ttl")]
    pub token_ttl_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            token_ttl_seconds: 604_800,
        }
    }
}

impl AuthConfig {
    fn default_token_ttl() -> u64 {
        604_800
    }
}

/// Configuration options for the OpenAI-compatible advice upstream.
///
/// ```
/// use spendlog_config::AdvisorConfig;
///
/// let advisor = AdvisorConfig::default();
/// assert_eq!(advisor.base_url, "https://api.openai.com/v1");
/// assert_eq!(advisor.model, "gpt-3.5-turbo");
/// assert_eq!(advisor.request_timeout_seconds, 30);
/// assert!(advisor.api_key.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "AdvisorConfig::default_base_url")]
    pub base_url: String,
    #[serde(default = "AdvisorConfig::default_model")]
    pub model: String,
    #[serde(default = "AdvisorConfig::default_request_timeout")]
    pub request_timeout_seconds: u64,
    #[serde(default = "AdvisorConfig::default_max_tokens")]
    pub max_tokens: u32,
}

impl AdvisorConfig {
    fn default_base_url() -> String {
        "https://api.openai.com/v1".to_string()
    }

    fn default_model() -> String {
        "gpt-3.5-turbo".to_string()
    }

    const fn default_request_timeout() -> u64 {
        30
    }

    const fn default_max_tokens() -> u32 {
        56
    }
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: Self::default_base_url(),
            model: Self::default_model(),
            request_timeout_seconds: Self::default_request_timeout(),
            max_tokens: Self::default_max_tokens(),
        }
    }
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use spendlog_config::load;
///
/// std::env::remove_var("SPENDLOG_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.http.address.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let db_max = defaults.database.max_connections as i64;
    let token_ttl = defaults.auth.token_ttl_seconds;
    let token_ttl_i64 = if token_ttl > i64::MAX as u64 {
        i64::MAX
    } else {
        token_ttl as i64
    };

    let mut builder = config::Config::builder();
    builder = builder
        .set_default("http.address", defaults.http.address.clone())
        .unwrap()
        .set_default("http.port", i64::from(defaults.http.port))
        .unwrap()
        .set_default("database.url", defaults.database.url.clone())
        .unwrap()
        .set_default("database.max_connections", db_max)
        .unwrap()
        .set_default("auth.secret", defaults.auth.secret.clone())
        .unwrap()
        .set_default("auth.token_ttl_seconds", token_ttl_i64)
        .unwrap()
        .set_default("advisor.base_url", defaults.advisor.base_url.clone())
        .unwrap()
        .set_default("advisor.model", defaults.advisor.model.clone())
        .unwrap()
        .set_default(
            "advisor.request_timeout_seconds",
            i64::try_from(defaults.advisor.request_timeout_seconds).unwrap_or(i64::MAX),
        )
        .unwrap()
        .set_default("advisor.max_tokens", i64::from(defaults.advisor.max_tokens))
        .unwrap();

    let environment_overrides = config::Environment::with_prefix("SPENDLOG").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("SPENDLOG_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via SPENDLOG_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let mut config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    if config.auth.token_ttl_seconds > i64::MAX as u64 {
        config.auth.token_ttl_seconds = i64::MAX as u64;
    }

    debug!(?config, "loaded backend configuration");
    Ok(config)
}
