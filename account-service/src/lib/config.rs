use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Application configuration for account-service.
///
/// Loaded from configuration files with environment variable overrides.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    /// Absent means accounts live in process memory.
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub password: PasswordConfig,
}

/// PostgreSQL database configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

/// HTTP server configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Token signing configuration.
#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_expiration_minutes")]
    pub expiration_minutes: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiration_minutes", &self.expiration_minutes)
            .finish()
    }
}

/// Password hashing configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    /// Random salt bytes per hash, clamped to [16, 32].
    #[serde(default = "default_salt_length")]
    pub salt_length: usize,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            salt_length: default_salt_length(),
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_expiration_minutes() -> i64 {
    60
}

fn default_salt_length() -> usize {
    16
}

impl Config {
    /// Load configuration from files with environment variable overrides.
    ///
    /// # Configuration Priority (highest to lowest)
    /// 1. Environment variables (JWT__SECRET, SERVER__HTTP_PORT, DATABASE__URL, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// # Errors
    /// Returns error if required values (notably `jwt.secret`) are missing or invalid
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables
            .add_source(environment())
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject values that would make the service start in an unusable state.
    ///
    /// # Errors
    /// * Empty `jwt.secret`
    /// * Non-positive `jwt.expiration_minutes`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "jwt.secret must be set (JWT__SECRET)".to_string(),
            ));
        }
        if self.jwt.expiration_minutes <= 0 {
            return Err(ConfigError::Message(format!(
                "jwt.expiration_minutes must be positive, got {}",
                self.jwt.expiration_minutes
            )));
        }
        Ok(())
    }
}

/// Unprefixed environment overrides, `__` separating path segments:
/// `JWT__SECRET` sets `jwt.secret`, `SERVER__HTTP_PORT` sets `server.http_port`.
fn environment() -> Environment {
    Environment::default().separator("__")
}
