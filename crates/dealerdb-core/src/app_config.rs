use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Settings for the review backend (`dealerdb-server`) and the CLI.
#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub inventory_path: PathBuf,
    /// Base URL of the sentiment analyzer service, without a trailing path.
    pub sentiment_url: String,
    pub sentiment_timeout_secs: u64,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("inventory_path", &self.inventory_path)
            .field("database_url", &"[redacted]")
            .field("sentiment_url", &self.sentiment_url)
            .field("sentiment_timeout_secs", &self.sentiment_timeout_secs)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .finish()
    }
}

/// Settings for the standalone sentiment analyzer (`dealerdb-analyzer`).
///
/// The analyzer has no database, so it needs far less than [`AppConfig`].
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
}
