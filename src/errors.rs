use pathway_config::ConfigError;
use pathway_core::{BackendError, StorageError, UploadError, WizardError};
use thiserror::Error;

/// Top-level failures surfaced by the command-line front end.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Progress store error: {0}")]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Wizard(#[from] WizardError),
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}
