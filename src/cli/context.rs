use std::env;
use std::path::PathBuf;

use pathway_config::{Config, ConfigManager};
use pathway_core::UploadPolicy;
use pathway_domain::Session;

use crate::errors::AppError;

pub const HOME_ENV: &str = "PATHWAY_HOME";
pub const CANDIDATE_ENV: &str = "PATHWAY_CANDIDATE_ID";
pub const TOKEN_ENV: &str = "PATHWAY_TOKEN";
pub const SCRIPT_ENV: &str = "PATHWAY_CLI_SCRIPT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    /// Answers are read line by line from stdin.
    Script,
}

impl CliMode {
    pub fn from_env() -> Self {
        if env::var_os(SCRIPT_ENV).is_some() {
            CliMode::Script
        } else {
            CliMode::Interactive
        }
    }
}

/// Settings and identity resolved once per invocation.
#[derive(Debug, Clone)]
pub struct CliContext {
    pub mode: CliMode,
    pub config: Config,
    pub config_path: PathBuf,
    pub state_dir: PathBuf,
    candidate_id: Option<String>,
    access_token: Option<String>,
}

impl CliContext {
    pub fn load(mode: CliMode) -> Result<Self, AppError> {
        let home = env::var_os(HOME_ENV).map(PathBuf::from);
        let base = home
            .clone()
            .or_else(|| dirs::config_dir().map(|dir| dir.join("pathway")))
            .unwrap_or_else(|| PathBuf::from(".pathway"));
        let manager = ConfigManager::with_base_dir(base)?;
        let config = manager.load_effective()?;

        // An explicit home keeps everything, progress included, under it.
        let state_dir = match (&config.state_dir, &home) {
            (Some(dir), _) => dir.clone(),
            (None, Some(home)) => home.join("state"),
            (None, None) => config.resolve_state_dir(),
        };

        Ok(Self {
            mode,
            config_path: manager.config_path().to_path_buf(),
            config,
            state_dir,
            candidate_id: non_empty_env(CANDIDATE_ENV),
            access_token: non_empty_env(TOKEN_ENV),
        })
    }

    /// Session for `candidate`, falling back to the environment.
    pub fn session(&self, candidate: Option<String>) -> Result<Session, AppError> {
        let candidate_id = candidate
            .or_else(|| self.candidate_id.clone())
            .ok_or_else(|| {
                AppError::InvalidArguments(format!(
                    "a candidate id is required (argument or {CANDIDATE_ENV})"
                ))
            })?;
        Ok(self.authorize(Session::new(candidate_id)))
    }

    /// Session for calls not tied to one candidate, such as listings and
    /// uploads addressed by email.
    pub fn staff_session(&self) -> Session {
        self.authorize(Session::new(String::new()))
    }

    fn authorize(&self, session: Session) -> Session {
        match &self.access_token {
            Some(token) => session.with_token(token.clone()),
            None => session,
        }
    }

    pub fn upload_policy(&self) -> UploadPolicy {
        UploadPolicy::from_limits(&self.config.upload)
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
