use std::sync::Arc;

use async_trait::async_trait;
use pathway_domain::{FormValues, SchoolSlot, Session};
use tracing::info;

use crate::backend::CandidateBackend;
use crate::steps::{school_steps, SchoolStep, StepDefinition};
use crate::BackendError;

use super::{payloads, NavigationRequest, WizardFlow};

pub const SCHOOL_PROGRESS_KEY: &str = "schoolFormPage";

/// Staff record of a candidate's application to one recommended school.
pub struct SchoolFlow {
    backend: Arc<dyn CandidateBackend>,
    session: Session,
    slot: SchoolSlot,
    steps: Vec<StepDefinition<SchoolStep>>,
}

impl SchoolFlow {
    pub fn new(backend: Arc<dyn CandidateBackend>, session: Session, slot: SchoolSlot) -> Self {
        Self {
            backend,
            session,
            slot,
            steps: school_steps(),
        }
    }

    pub fn slot(&self) -> SchoolSlot {
        self.slot
    }

    pub fn candidate_route(&self) -> String {
        format!("/assigned-candidates/{}", self.session.candidate_id)
    }
}

#[async_trait]
impl WizardFlow for SchoolFlow {
    type Step = SchoolStep;

    fn name(&self) -> &'static str {
        "school"
    }

    fn progress_key(&self) -> &'static str {
        SCHOOL_PROGRESS_KEY
    }

    fn steps(&self) -> &[StepDefinition<SchoolStep>] {
        &self.steps
    }

    fn completion_message(&self) -> &'static str {
        "School application details saved."
    }

    async fn dispatch(&self, step: SchoolStep, data: &FormValues) -> Result<(), BackendError> {
        let candidate = self.session.candidate_id.clone();
        match step {
            SchoolStep::Application => {
                info!(%candidate, slot = ?self.slot, "saving school application");
                self.backend
                    .update_school_application(
                        candidate,
                        self.slot,
                        payloads::school_application(data),
                    )
                    .await
            }
        }
    }

    async fn complete(&self, _data: &FormValues) -> Result<NavigationRequest, BackendError> {
        Ok(NavigationRequest::immediate(self.candidate_route()))
    }
}
