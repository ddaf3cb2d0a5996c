// ABOUTME: Server configuration loaded from environment variables
// ABOUTME: Validates secret strength, API prefix and port, and redacts the secret in Debug output

use std::env;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use atelier_core::constants::{
    API_V1_STR, CORS_ORIGIN, DATABASE_URL, DEFAULT_API_V1_STR, DEFAULT_CORS_ORIGIN,
    DEFAULT_DATABASE_URL, DEFAULT_ENVIRONMENT, DEFAULT_PORT, DEFAULT_PROJECT_NAME, ENVIRONMENT,
    MIN_PRODUCTION_SECRET_LEN, PORT, PROJECT_NAME, SECRET_KEY,
};
use atelier_storage::PoolSettings;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[from] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
    #[error("SECRET_KEY must be set")]
    MissingSecret,
    #[error("SECRET_KEY must be at least {min} characters in production")]
    WeakSecret { min: usize },
    #[error("Invalid environment: {0} (expected development, test or production)")]
    InvalidEnvironment(String),
    #[error("Invalid API prefix '{0}': must start with '/' and not end with '/'")]
    InvalidApiPrefix(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            "production" => Ok(Environment::Production),
            _ => Err(ConfigError::InvalidEnvironment(s.to_string())),
        }
    }
}

pub struct Config {
    pub database_url: String,
    pub secret_key: String,
    pub environment: Environment,
    pub project_name: String,
    pub api_v1_str: String,
    pub port: u16,
    pub cors_origin: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &self.database_url)
            .field("secret_key", &"[REDACTED]")
            .field("environment", &self.environment)
            .field("project_name", &self.project_name)
            .field("api_v1_str", &self.api_v1_str)
            .field("port", &self.port)
            .field("cors_origin", &self.cors_origin)
            .finish()
    }
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

impl Config {
    /// Build the configuration from the process environment.
    /// Callers load `.env` beforehand.
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = var_or(ENVIRONMENT, DEFAULT_ENVIRONMENT).parse::<Environment>()?;

        let secret_key = env::var(SECRET_KEY).unwrap_or_default();
        if secret_key.trim().is_empty() {
            return Err(ConfigError::MissingSecret);
        }
        if environment == Environment::Production
            && secret_key.chars().count() < MIN_PRODUCTION_SECRET_LEN
        {
            return Err(ConfigError::WeakSecret {
                min: MIN_PRODUCTION_SECRET_LEN,
            });
        }

        let api_v1_str = var_or(API_V1_STR, DEFAULT_API_V1_STR);
        if !api_v1_str.starts_with('/') || (api_v1_str.len() > 1 && api_v1_str.ends_with('/')) {
            return Err(ConfigError::InvalidApiPrefix(api_v1_str));
        }

        let port = match env::var(PORT) {
            Ok(raw) => raw.trim().parse::<u16>()?,
            Err(_) => DEFAULT_PORT,
        };
        if port == 0 {
            return Err(ConfigError::PortOutOfRange(port));
        }

        Ok(Config {
            database_url: var_or(DATABASE_URL, DEFAULT_DATABASE_URL),
            secret_key,
            environment,
            project_name: var_or(PROJECT_NAME, DEFAULT_PROJECT_NAME),
            api_v1_str,
            port,
            cors_origin: var_or(CORS_ORIGIN, DEFAULT_CORS_ORIGIN),
        })
    }

    /// SQL statements are only logged in development
    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            log_statements: self.environment == Environment::Development,
            ..PoolSettings::default()
        }
    }
}
