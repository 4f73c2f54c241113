use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid configuration: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
}

impl Environment {
    pub fn from_env() -> Self {
        match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            _ => Environment::Development,
        }
    }

    fn default_max_connections(&self) -> u32 {
        match self {
            Environment::Development => 10,
            Environment::Production => 50,
        }
    }

    fn default_acquire_timeout_secs(&self) -> u64 {
        match self {
            Environment::Development => 30,
            Environment::Production => 5,
        }
    }

    fn default_jwt_expiry_hours(&self) -> u64 {
        match self {
            Environment::Development => 24 * 7, // 1 week
            Environment::Production => 4,
        }
    }
}

impl AppConfig {
    /// Build the full configuration from the process environment.
    ///
    /// `DATABASE_URL` and `JWT_SECRET` are required; everything else falls
    /// back to per-environment defaults overridable by env vars.
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();

        let port = env::var("TODO_API_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .map(|s| s.parse::<u16>().map_err(|_| ConfigError::Invalid("PORT")))
            .transpose()?
            .unwrap_or(3001);

        let database_url =
            env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;
        url::Url::parse(&database_url).map_err(|_| ConfigError::Invalid("DATABASE_URL"))?;

        Ok(Self {
            environment,
            server: ServerConfig { port },
            database: DatabaseConfig {
                url: database_url,
                max_connections: env_parse(
                    "DATABASE_MAX_CONNECTIONS",
                    environment.default_max_connections(),
                ),
                acquire_timeout_secs: env_parse(
                    "DATABASE_ACQUIRE_TIMEOUT_SECS",
                    environment.default_acquire_timeout_secs(),
                ),
            },
            security: SecurityConfig::from_env(&environment)?,
        })
    }
}

impl SecurityConfig {
    /// Read the signing secret and token lifetime. Split out so the token
    /// CLI can mint tokens without the database configuration.
    pub fn from_env(environment: &Environment) -> Result<Self, ConfigError> {
        let jwt_secret = env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;
        if jwt_secret.is_empty() {
            return Err(ConfigError::Invalid("JWT_SECRET"));
        }

        Ok(Self {
            jwt_secret,
            jwt_expiry_hours: env_parse("JWT_EXPIRY_HOURS", environment.default_jwt_expiry_hours()),
        })
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}
