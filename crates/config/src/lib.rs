use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "hirenup.toml",
    "config/hirenup.toml",
    "crates/config/hirenup.toml",
    "../hirenup.toml",
    "../config/hirenup.toml",
    "../crates/config/hirenup.toml",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub assistant: AssistantConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            assistant: AssistantConfig::default(),
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
            port: 8080,
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
            url: "sqlite://hirenup.db".to_string(),
            max_connections: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "AuthConfig::default_session_ttl")]
    pub session_ttl_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_seconds: 86_400,
        }
    }
}

impl AuthConfig {
    fn default_session_ttl() -> u64 {
        86_400
    }
}

/// Settings for the project assistant reply pipeline.
///
/// ```
/// use hirenup_config::AssistantConfig;
///
/// let assistant = AssistantConfig::default();
/// assert_eq!(assistant.generator, "template");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default = "AssistantConfig::default_generator")]
    pub generator: String,
}

impl AssistantConfig {
    fn default_generator() -> String {
        "template".to_string()
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            generator: Self::default_generator(),
        }
    }
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use hirenup_config::load;
///
/// std::env::remove_var("HIRENUP_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.http.address.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = config::Config::try_from(&AppConfig::default())
        .context("unable to seed configuration defaults")?;

    let mut builder = config::Config::builder().add_source(defaults);

    match locate_config_file() {
        Some(path) => {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
        }
        None => debug!("no configuration file found, relying on defaults and environment overrides"),
    }

    let settings = builder
        .add_source(config::Environment::with_prefix("HIRENUP").separator("__"))
        .build()
        .context("unable to build configuration")?;

    let mut config: AppConfig = settings.try_deserialize().context("invalid configuration")?;

    // The authenticator turns the ttl into a signed chrono Duration.
    config.auth.session_ttl_seconds = config.auth.session_ttl_seconds.min(i64::MAX as u64);

    debug!(?config, "loaded backend configuration");
    Ok(config)
}

/// `HIRENUP_CONFIG` wins; otherwise the first well-known candidate that
/// exists relative to the working directory.
fn locate_config_file() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("HIRENUP_CONFIG") {
        debug!(path, "configuration file set via HIRENUP_CONFIG");
        return Some(PathBuf::from(path));
    }

    let cwd = std::env::current_dir().ok()?;
    DEFAULT_CONFIG_FILES
        .iter()
        .map(|candidate| cwd.join(candidate))
        .find(|path| path.exists())
}
