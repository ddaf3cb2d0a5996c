use crate::config::{Config, ConfigError, Environment};
use rstest::rstest;
use serial_test::serial;
use std::env;

const VARS: &[&str] = &[
    "DATABASE_URL",
    "SECRET_KEY",
    "ENVIRONMENT",
    "PROJECT_NAME",
    "API_V1_STR",
    "PORT",
    "CORS_ORIGIN",
];

fn reset_env() {
    for var in VARS {
        env::remove_var(var);
    }
    env::set_var("SECRET_KEY", "dev-secret");
}

#[test]
#[serial]
fn test_config_from_env_defaults() {
    reset_env();

    let config = Config::from_env().unwrap();

    assert_eq!(config.database_url, "sqlite:atelier.db");
    assert_eq!(config.environment, Environment::Development);
    assert_eq!(config.project_name, "Atelier Catalog API");
    assert_eq!(config.api_v1_str, "/api/v1");
    assert_eq!(config.port, 8000);
    assert_eq!(config.cors_origin, "*");
    assert!(config.pool_settings().log_statements);
}

#[test]
#[serial]
fn test_config_with_custom_values() {
    reset_env();
    env::set_var("DATABASE_URL", "sqlite:/tmp/shop.db");
    env::set_var("PROJECT_NAME", "Shop");
    env::set_var("API_V1_STR", "/v2");
    env::set_var("PORT", "3000");
    env::set_var("CORS_ORIGIN", "https://shop.example.com");
    env::set_var("ENVIRONMENT", "test");

    let config = Config::from_env().unwrap();

    assert_eq!(config.database_url, "sqlite:/tmp/shop.db");
    assert_eq!(config.project_name, "Shop");
    assert_eq!(config.api_v1_str, "/v2");
    assert_eq!(config.port, 3000);
    assert_eq!(config.cors_origin, "https://shop.example.com");
    assert_eq!(config.environment, Environment::Test);
    assert!(!config.pool_settings().log_statements);

    reset_env();
}

#[test]
#[serial]
fn test_missing_secret_is_rejected() {
    reset_env();
    env::remove_var("SECRET_KEY");

    assert!(matches!(Config::from_env(), Err(ConfigError::MissingSecret)));

    env::set_var("SECRET_KEY", "   ");
    assert!(matches!(Config::from_env(), Err(ConfigError::MissingSecret)));

    reset_env();
}

#[test]
#[serial]
fn test_production_requires_long_secret() {
    reset_env();
    env::set_var("ENVIRONMENT", "production");

    assert!(matches!(
        Config::from_env(),
        Err(ConfigError::WeakSecret { min: 32 })
    ));

    env::set_var("SECRET_KEY", "x".repeat(32));
    let config = Config::from_env().unwrap();
    assert_eq!(config.environment, Environment::Production);

    reset_env();
}

#[rstest]
#[case("api/v1")]
#[case("/api/v1/")]
#[serial]
fn test_invalid_api_prefix(#[case] prefix: &str) {
    reset_env();
    env::set_var("API_V1_STR", prefix);

    assert!(matches!(
        Config::from_env(),
        Err(ConfigError::InvalidApiPrefix(_))
    ));

    reset_env();
}

#[test]
#[serial]
fn test_config_invalid_port() {
    reset_env();
    env::set_var("PORT", "not-a-number");
    assert!(matches!(Config::from_env(), Err(ConfigError::InvalidPort(_))));

    env::set_var("PORT", "0");
    assert!(matches!(
        Config::from_env(),
        Err(ConfigError::PortOutOfRange(0))
    ));

    reset_env();
}

#[test]
#[serial]
fn test_invalid_environment() {
    reset_env();
    env::set_var("ENVIRONMENT", "staging");

    assert!(matches!(
        Config::from_env(),
        Err(ConfigError::InvalidEnvironment(_))
    ));

    reset_env();
}

#[rstest]
#[case("development", Environment::Development)]
#[case("TEST", Environment::Test)]
#[case(" Production ", Environment::Production)]
fn test_environment_parsing(#[case] raw: &str, #[case] expected: Environment) {
    assert_eq!(raw.parse::<Environment>().unwrap(), expected);
}

#[test]
#[serial]
fn test_debug_redacts_secret() {
    reset_env();
    env::set_var("SECRET_KEY", "super-secret-value");

    let config = Config::from_env().unwrap();
    let rendered = format!("{:?}", config);

    assert!(!rendered.contains("super-secret-value"));
    assert!(rendered.contains("[REDACTED]"));

    reset_env();
}
