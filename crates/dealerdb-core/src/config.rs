use crate::app_config::{AnalyzerConfig, AppConfig, Environment};
use crate::ConfigError;

/// Load backend configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load backend configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Load analyzer configuration, loading `.env` first.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_analyzer_config() -> Result<AnalyzerConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_analyzer_config_from_env()
}

/// Load analyzer configuration from the process environment only.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_analyzer_config_from_env() -> Result<AnalyzerConfig, ConfigError> {
    build_analyzer_config(|key| std::env::var(key))
}

/// Env-var accessors shared by both config builders.
///
/// Wraps a lookup function so parsing can be tested against a plain
/// `HashMap` with no `set_var`/`remove_var`.
struct Vars<F> {
    lookup: F,
}

impl<F> Vars<F>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    fn require(&self, var: &str) -> Result<String, ConfigError> {
        (self.lookup)(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    }

    fn or_default(&self, var: &str, default: &str) -> String {
        (self.lookup)(var).unwrap_or_else(|_| default.to_string())
    }

    fn parse<T>(&self, var: &str, default: &str) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        let raw = self.or_default(var, default);
        raw.parse::<T>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    }

    fn environment(&self) -> Result<Environment, ConfigError> {
        parse_environment(&self.or_default("DEALERDB_ENV", "development"))
    }
}

fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let vars = Vars { lookup };

    let database_url = vars.require("DATABASE_URL")?;
    let env = vars.environment()?;

    let bind_addr = vars.parse("DEALERDB_BIND_ADDR", "0.0.0.0:8000")?;
    let log_level = vars.or_default("DEALERDB_LOG_LEVEL", "info");
    let inventory_path = PathBuf::from(
        vars.or_default("DEALERDB_INVENTORY_PATH", "./config/inventory.yaml"),
    );

    let sentiment_url = vars
        .or_default("DEALERDB_SENTIMENT_URL", "http://localhost:5000")
        .trim_end_matches('/')
        .to_string();
    if sentiment_url.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "DEALERDB_SENTIMENT_URL".to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    let sentiment_timeout_secs: u64 = vars.parse("DEALERDB_SENTIMENT_TIMEOUT_SECS", "5")?;
    if sentiment_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "DEALERDB_SENTIMENT_TIMEOUT_SECS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let db_max_connections = vars.parse("DEALERDB_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = vars.parse("DEALERDB_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = vars.parse("DEALERDB_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        inventory_path,
        sentiment_url,
        sentiment_timeout_secs,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
    })
}

fn build_analyzer_config<F>(lookup: F) -> Result<AnalyzerConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let vars = Vars { lookup };

    Ok(AnalyzerConfig {
        env: vars.environment()?,
        bind_addr: vars.parse("DEALERDB_ANALYZER_BIND_ADDR", "0.0.0.0:5000")?,
        log_level: vars.or_default("DEALERDB_LOG_LEVEL", "info"),
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "DEALERDB_ENV".to_string(),
            reason: format!("expected development, test or production, got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
