pub mod app_config;
pub mod config;
pub mod schedule;

use thiserror::Error;

pub use app_config::{AppConfig, FeedVariant};
pub use config::{load_app_config, load_app_config_from_env};
pub use schedule::{
    sold_out_status, MetafieldEntry, ScheduleEntry, TimestampEntry, WorkshopsResponse,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
