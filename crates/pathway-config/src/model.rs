use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};

use crate::ConfigError;

/// Environment variable overriding [`Config::api_base_url`].
pub const API_URL_ENV: &str = "PATHWAY_API_URL";

pub const PDF_MIME: &str = "application/pdf";
pub const DOC_MIME: &str = "application/msword";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Stores the client-side settings shared by every wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "Config::default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "Config::default_completion_delay_ms")]
    pub completion_delay_ms: u64,
    #[serde(default = "Config::default_status_route")]
    pub status_route: String,
    #[serde(default)]
    pub upload: UploadLimits,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional directory for wizard progress. Defaults to the platform data dir.
    pub state_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: Self::default_api_base_url(),
            request_timeout_secs: Self::default_request_timeout_secs(),
            completion_delay_ms: Self::default_completion_delay_ms(),
            status_route: Self::default_status_route(),
            upload: UploadLimits::default(),
            state_dir: None,
        }
    }
}

impl Config {
    pub fn default_api_base_url() -> String {
        "http://localhost:8000/api/".into()
    }

    pub fn default_request_timeout_secs() -> u64 {
        30
    }

    pub fn default_completion_delay_ms() -> u64 {
        3000
    }

    pub fn default_status_route() -> String {
        "/candidate/status".into()
    }

    pub fn completion_delay(&self) -> Duration {
        Duration::from_millis(self.completion_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Applies `PATHWAY_API_URL` when it is set to a non-empty value.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            let trimmed = url.trim();
            if !trimmed.is_empty() {
                self.api_base_url = trimmed.to_string();
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                key: "api_base_url",
                reason: format!("`{url}` is not an http(s) URL"),
            });
        }
        if self.upload.max_bytes == 0 {
            return Err(ConfigError::Invalid {
                key: "upload.max_bytes",
                reason: "must be greater than zero".into(),
            });
        }
        if self.upload.allowed_mime_types.is_empty() {
            return Err(ConfigError::Invalid {
                key: "upload.allowed_mime_types",
                reason: "at least one type is required".into(),
            });
        }
        Ok(())
    }

    pub fn resolve_state_dir(&self) -> PathBuf {
        if let Some(path) = &self.state_dir {
            return path.clone();
        }

        let base = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join("pathway")
    }
}

/// Constraints applied to documents before they are sent anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadLimits {
    #[serde(default = "UploadLimits::default_max_bytes")]
    pub max_bytes: u64,
    #[serde(default = "UploadLimits::default_allowed_mime_types")]
    pub allowed_mime_types: Vec<String>,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_bytes: Self::default_max_bytes(),
            allowed_mime_types: Self::default_allowed_mime_types(),
        }
    }
}

impl UploadLimits {
    pub fn default_max_bytes() -> u64 {
        5 * 1024 * 1024
    }

    pub fn default_allowed_mime_types() -> Vec<String> {
        vec![PDF_MIME.into(), DOC_MIME.into(), DOCX_MIME.into()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "completion_delay_ms": 10 }"#).expect("parse config");
        assert_eq!(config.completion_delay_ms, 10);
        assert_eq!(config.status_route, "/candidate/status");
        assert_eq!(config.upload.max_bytes, 5 * 1024 * 1024);
        assert_eq!(config.upload.allowed_mime_types.len(), 3);
    }

    #[test]
    fn validate_rejects_non_http_urls() {
        let config = Config {
            api_base_url: "ftp://example.com".into(),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { key: "api_base_url", .. })
        ));
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn explicit_state_dir_wins() {
        let config = Config {
            state_dir: Some(PathBuf::from("/tmp/pathway-state")),
            ..Config::default()
        };
        assert_eq!(config.resolve_state_dir(), PathBuf::from("/tmp/pathway-state"));
    }
}
