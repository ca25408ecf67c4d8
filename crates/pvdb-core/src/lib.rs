pub mod app_config;
mod config;
pub mod filter;
pub mod incident;
pub mod news_source;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use filter::{IncidentFilter, SortKey};
pub use incident::{
    AiAnalysis, Casualties, Coordinates, ExtractedInfo, Incident, IncidentPatch, NewIncident,
    Severity,
};
pub use news_source::{NewNewsSource, NewsSource};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid severity: {0}")]
    InvalidSeverity(String),
    #[error("invalid sort key: {0}")]
    InvalidSortKey(String),
}
