//! Submission dispatch: turns a validated step into backend calls.
//!
//! A [`WizardFlow`] couples a wizard's step table with the handler for each
//! step and the completion action run after the final step. Calls within one
//! step run in order and the first failure aborts the rest of that step.

pub mod payloads;
pub mod registration;
pub mod resume;
pub mod school;

use std::time::Duration;

use async_trait::async_trait;
use pathway_domain::FormValues;

use crate::steps::{StepDefinition, StepTag};
use crate::BackendError;

pub use registration::{RegistrationFlow, REGISTRATION_PROGRESS_KEY};
pub use resume::{ResumeFlow, RESUME_PROGRESS_KEY};
pub use school::{SchoolFlow, SCHOOL_PROGRESS_KEY};

/// Redirect requested once a wizard has been completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub route: String,
    pub delay: Duration,
}

impl NavigationRequest {
    pub fn new(route: impl Into<String>, delay: Duration) -> Self {
        Self {
            route: route.into(),
            delay,
        }
    }

    pub fn immediate(route: impl Into<String>) -> Self {
        Self::new(route, Duration::ZERO)
    }
}

/// Step table plus per-step submission logic for one wizard.
#[async_trait]
pub trait WizardFlow: Send + Sync {
    type Step: StepTag;

    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Key under which the current step index is persisted.
    fn progress_key(&self) -> &'static str;

    fn steps(&self) -> &[StepDefinition<Self::Step>];

    /// Success notice shown once the completion action succeeded.
    fn completion_message(&self) -> &'static str {
        "Form submitted successfully."
    }

    /// Sends the data collected so far for `step`.
    async fn dispatch(&self, step: Self::Step, data: &FormValues) -> Result<(), BackendError>;

    /// Terminal action run after the last step was dispatched.
    async fn complete(&self, data: &FormValues) -> Result<NavigationRequest, BackendError>;
}
