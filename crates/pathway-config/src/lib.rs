//! pathway-config
//!
//! Client settings for the onboarding tools: backend location, completion
//! redirect, upload limits and where wizard progress is kept.
//! Owns the Config data structure plus disk persistence helpers.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::{Config, UploadLimits};
