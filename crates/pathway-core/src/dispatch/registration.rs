use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pathway_config::Config;
use pathway_domain::{FormValues, Session};
use tracing::info;

use crate::backend::CandidateBackend;
use crate::steps::{registration_steps, RegistrationStep, StepDefinition};
use crate::BackendError;

use super::{payloads, NavigationRequest, WizardFlow};

pub const REGISTRATION_PROGRESS_KEY: &str = "currentPage";

/// Candidate self-registration, ending with the application submission.
pub struct RegistrationFlow {
    backend: Arc<dyn CandidateBackend>,
    session: Session,
    steps: Vec<StepDefinition<RegistrationStep>>,
    status_route: String,
    completion_delay: Duration,
}

impl RegistrationFlow {
    pub fn new(backend: Arc<dyn CandidateBackend>, session: Session) -> Self {
        Self::with_config(backend, session, &Config::default())
    }

    pub fn with_config(
        backend: Arc<dyn CandidateBackend>,
        session: Session,
        config: &Config,
    ) -> Self {
        Self {
            backend,
            session,
            steps: registration_steps(),
            status_route: config.status_route.clone(),
            completion_delay: config.completion_delay(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }
}

#[async_trait]
impl WizardFlow for RegistrationFlow {
    type Step = RegistrationStep;

    fn name(&self) -> &'static str {
        "registration"
    }

    fn progress_key(&self) -> &'static str {
        REGISTRATION_PROGRESS_KEY
    }

    fn steps(&self) -> &[StepDefinition<RegistrationStep>] {
        &self.steps
    }

    fn completion_message(&self) -> &'static str {
        "Your application has been submitted successfully."
    }

    async fn dispatch(&self, step: RegistrationStep, data: &FormValues) -> Result<(), BackendError> {
        let candidate = self.session.candidate_id.as_str();
        info!(candidate, ?step, "dispatching registration step");

        match step {
            RegistrationStep::PersonalDetails => {
                self.backend
                    .update_personal_details(payloads::personal_details(data))
                    .await
            }
            RegistrationStep::EducationDetails => {
                self.backend
                    .submit_education_details(payloads::education_history(data, candidate))
                    .await?;
                if payloads::has_advanced_degree(data) {
                    self.backend
                        .update_advanced_degree(payloads::advanced_education(data, candidate))
                        .await?;
                }
                Ok(())
            }
            RegistrationStep::WorkExperience => {
                self.backend
                    .submit_work_experience(payloads::work_experience(data, candidate))
                    .await
            }
            RegistrationStep::RefereeDetails => {
                self.backend
                    .submit_recommender_details(payloads::recommenders(data, candidate))
                    .await?;
                let (first, second) = payloads::referees(data, candidate);
                self.backend.submit_referee_details(first, second).await
            }
            // Documents are uploaded as they are picked; the step itself has nothing to send.
            RegistrationStep::UploadDocuments => Ok(()),
        }
    }

    async fn complete(&self, _data: &FormValues) -> Result<NavigationRequest, BackendError> {
        info!(candidate = %self.session.candidate_id, "submitting application");
        self.backend
            .toggle_application_status(self.session.candidate_id.clone())
            .await?;
        Ok(NavigationRequest::new(
            self.status_route.clone(),
            self.completion_delay,
        ))
    }
}
