//! Shared configuration and domain types for the dealership review workspace.

pub mod app_config;
pub mod config;
pub mod inventory;
pub mod sentiment;

pub use app_config::{AnalyzerConfig, AppConfig, Environment};
pub use config::{
    load_analyzer_config, load_analyzer_config_from_env, load_app_config,
    load_app_config_from_env,
};
pub use inventory::{
    load_inventory, parse_inventory, CarType, DealerSeed, InventoryFile, MakeSeed, ModelSeed,
    ReviewSeed, MAX_CAR_YEAR, MIN_CAR_YEAR,
};
pub use sentiment::{ParseLabelError, SentimentLabel};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read inventory file {path}: {source}")]
    InventoryFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse inventory file: {0}")]
    InventoryFileParse(#[from] serde_yaml::Error),

    #[error("inventory validation failed: {0}")]
    Validation(String),
}
