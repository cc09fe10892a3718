//! Client-side document constraints and CV upload.
//!
//! Files are checked before anything reaches the backend; a rejected file is
//! cleared from the input and the user is told why.

use std::path::Path;
use std::sync::Arc;

use pathway_config::model::{DOCX_MIME, DOC_MIME, PDF_MIME};
use pathway_config::UploadLimits;
use pathway_domain::SelectedFile;
use tracing::{error, info};

use crate::backend::CandidateBackend;
use crate::notify::{Notification, Notifier};
use crate::UploadError;

/// Allowed document types and maximum size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    max_bytes: u64,
    allowed_mime_types: Vec<String>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::from_limits(&UploadLimits::default())
    }
}

impl UploadPolicy {
    pub fn from_limits(limits: &UploadLimits) -> Self {
        Self {
            max_bytes: limits.max_bytes,
            allowed_mime_types: limits.allowed_mime_types.clone(),
        }
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Type is checked before size.
    pub fn check(&self, file: &SelectedFile) -> Result<(), UploadError> {
        if !self
            .allowed_mime_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(&file.mime_type))
        {
            return Err(UploadError::UnsupportedType {
                mime_type: file.mime_type.clone(),
            });
        }
        if file.size_bytes > self.max_bytes {
            return Err(UploadError::TooLarge {
                size_bytes: file.size_bytes,
                max_bytes: self.max_bytes,
            });
        }
        Ok(())
    }
}

/// MIME type inferred from a file extension.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("pdf") => PDF_MIME,
        Some("doc") => DOC_MIME,
        Some("docx") => DOCX_MIME,
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Single-file picker that refuses files outside the policy.
pub struct FileInput {
    policy: UploadPolicy,
    notifier: Arc<dyn Notifier>,
    selected: Option<SelectedFile>,
}

impl FileInput {
    pub fn new(policy: UploadPolicy, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            policy,
            notifier,
            selected: None,
        }
    }

    pub fn select(&mut self, file: SelectedFile) -> Result<&SelectedFile, UploadError> {
        match self.policy.check(&file) {
            Ok(()) => Ok(self.selected.insert(file)),
            Err(err) => {
                self.selected = None;
                self.notifier
                    .notify(Notification::error("Error", err.to_string()));
                Err(err)
            }
        }
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }
}

/// Sends a candidate's CV to the onboarding record identified by email.
pub struct CvUploader {
    backend: Arc<dyn CandidateBackend>,
    policy: UploadPolicy,
    notifier: Arc<dyn Notifier>,
}

impl CvUploader {
    pub fn new(
        backend: Arc<dyn CandidateBackend>,
        policy: UploadPolicy,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            backend,
            policy,
            notifier,
        }
    }

    pub async fn upload(
        &self,
        email: Option<&str>,
        file: SelectedFile,
        contents: Vec<u8>,
    ) -> Result<(), UploadError> {
        let Some(email) = email.map(str::trim).filter(|email| !email.is_empty()) else {
            self.notifier.notify(Notification::error(
                "Error",
                UploadError::MissingEmail.to_string(),
            ));
            return Err(UploadError::MissingEmail);
        };

        if let Err(err) = self.policy.check(&file) {
            self.notifier
                .notify(Notification::error("Error", err.to_string()));
            return Err(err);
        }

        match self
            .backend
            .upload_resume(email.to_string(), file.clone(), contents)
            .await
        {
            Ok(()) => {
                info!(file = %file.name, "CV uploaded");
                self.notifier
                    .notify(Notification::success("Success", "CV uploaded successfully!"));
                Ok(())
            }
            Err(err) => {
                error!(error = %err, file = %file.name, "error uploading CV");
                self.notifier.notify(Notification::error(
                    "Error",
                    "Error uploading CV. Please try again.",
                ));
                Err(UploadError::Backend(err))
            }
        }
    }
}
