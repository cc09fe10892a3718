use std::io;

use thiserror::Error;

use crate::schema::FieldErrors;

/// Failures reported by the onboarding backend or the transport reaching it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("Request failed: {0}")]
    Transport(String),
    #[error("Backend rejected request ({status}): {detail}")]
    Rejected { status: u16, detail: String },
    #[error("Invalid backend response: {0}")]
    Decode(String),
    #[error("{0} not found")]
    MissingResource(String),
}

/// Failures of the durable progress store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
}

/// Rejections raised before a document leaves the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("Please upload a PDF or Word document.")]
    UnsupportedType { mime_type: String },
    #[error("File size should not exceed {}MB.", .max_bytes / (1024 * 1024))]
    TooLarge { size_bytes: u64, max_bytes: u64 },
    #[error("Email address is required")]
    MissingEmail,
    #[error(transparent)]
    Backend(#[from] BackendError),
}

#[derive(Debug, Error)]
pub enum WizardError {
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),
    #[error("A submission is already in progress")]
    SubmissionInFlight,
    #[error(transparent)]
    Dispatch(#[from] BackendError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Wizard `{0}` defines no steps")]
    EmptyFlow(&'static str),
}

impl WizardError {
    /// Field errors when this is a validation failure.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            WizardError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_large_message_reports_limit_in_megabytes() {
        let err = UploadError::TooLarge {
            size_bytes: 6 * 1024 * 1024,
            max_bytes: 5 * 1024 * 1024,
        };
        assert_eq!(err.to_string(), "File size should not exceed 5MB.");
    }
}
