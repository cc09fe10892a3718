use std::sync::Arc;

use async_trait::async_trait;
use pathway_domain::{FormValues, Session};
use tracing::{info, warn};

use crate::backend::CandidateBackend;
use crate::steps::{resume_steps, ResumeStep, StepDefinition};
use crate::BackendError;

use super::{payloads, NavigationRequest, WizardFlow};

pub const RESUME_PROGRESS_KEY: &str = "resumeCurrentPage";

/// Staff refinement of a candidate's resume before generation.
pub struct ResumeFlow {
    backend: Arc<dyn CandidateBackend>,
    session: Session,
    steps: Vec<StepDefinition<ResumeStep>>,
}

impl ResumeFlow {
    pub fn new(backend: Arc<dyn CandidateBackend>, session: Session) -> Self {
        Self {
            backend,
            session,
            steps: resume_steps(),
        }
    }

    pub fn final_resume_route(&self) -> String {
        format!("/refine-resume/final-resume/{}", self.session.candidate_id)
    }
}

#[async_trait]
impl WizardFlow for ResumeFlow {
    type Step = ResumeStep;

    fn name(&self) -> &'static str {
        "resume"
    }

    fn progress_key(&self) -> &'static str {
        RESUME_PROGRESS_KEY
    }

    fn steps(&self) -> &[StepDefinition<ResumeStep>] {
        &self.steps
    }

    fn completion_message(&self) -> &'static str {
        "Your resume has been generated."
    }

    async fn dispatch(&self, step: ResumeStep, data: &FormValues) -> Result<(), BackendError> {
        let candidate = self.session.candidate_id.clone();
        match step {
            ResumeStep::PersonalDetails => {
                info!(%candidate, "updating candidate contact details");
                self.backend
                    .edit_candidate(candidate, payloads::edited_candidate(data))
                    .await
            }
            ResumeStep::Education => {
                info!(%candidate, "patching education detail");
                let patch = payloads::education_patch(data, &candidate);
                self.backend.patch_education_detail(candidate, patch).await
            }
            // Kept in memory and used when the resume is generated.
            ResumeStep::Profile | ResumeStep::JobExperiences | ResumeStep::Prompt => Ok(()),
        }
    }

    async fn complete(&self, _data: &FormValues) -> Result<NavigationRequest, BackendError> {
        let draft = self
            .backend
            .craft_candidate_resume(self.session.candidate_id.clone())
            .await?;
        match draft.resume.filter(|url| !url.trim().is_empty()) {
            Some(_) => Ok(NavigationRequest::immediate(self.final_resume_route())),
            None => {
                warn!(candidate = %self.session.candidate_id, "resume URL not found");
                Err(BackendError::MissingResource("resume".into()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockCandidateBackend;
    use pathway_domain::ResumeDraft;

    fn flow(backend: MockCandidateBackend) -> ResumeFlow {
        ResumeFlow::new(Arc::new(backend), Session::new("cand-7"))
    }

    #[tokio::test]
    async fn personal_step_edits_city_and_phone() {
        let mut backend = MockCandidateBackend::new();
        backend
            .expect_edit_candidate()
            .withf(|id, payload| {
                id == "cand-7" && payload.city_of_birth == "Accra" && payload.phone_number == "024"
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let data = FormValues::new().with("city", "Accra").with("phoneNumber", "024");
        flow(backend)
            .dispatch(ResumeStep::PersonalDetails, &data)
            .await
            .expect("edit candidate");
    }

    #[tokio::test]
    async fn completion_requires_generated_resume() {
        let mut backend = MockCandidateBackend::new();
        backend
            .expect_craft_candidate_resume()
            .times(1)
            .returning(|_| Ok(ResumeDraft { resume: None }));

        let err = flow(backend)
            .complete(&FormValues::new())
            .await
            .expect_err("no resume yet");
        assert_eq!(err, BackendError::MissingResource("resume".into()));
    }

    #[tokio::test]
    async fn completion_navigates_to_final_resume() {
        let mut backend = MockCandidateBackend::new();
        backend.expect_craft_candidate_resume().returning(|_| {
            Ok(ResumeDraft {
                resume: Some("https://files.example.com/cand-7.pdf".into()),
            })
        });

        let request = flow(backend)
            .complete(&FormValues::new())
            .await
            .expect("resume exists");
        assert_eq!(request, NavigationRequest::immediate("/refine-resume/final-resume/cand-7"));
    }
}
