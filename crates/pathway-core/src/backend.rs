//! Port to the onboarding REST backend.
//!
//! Every write is an upsert keyed by the candidate identifier, so repeating a
//! call with the same payload leaves the backend unchanged.

use async_trait::async_trait;
use pathway_domain::{
    AdvancedEducation, CandidateSummary, EditedCandidate, EducationHistory, EducationPatch,
    LoanReferee, PersonalDetails, Recommender, ResumeDraft, SchoolApplication, SchoolSlot,
    SelectedFile, WorkExperience,
};

use crate::BackendError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CandidateBackend: Send + Sync {
    async fn update_personal_details(&self, payload: PersonalDetails) -> Result<(), BackendError>;

    async fn submit_education_details(
        &self,
        payload: EducationHistory,
    ) -> Result<(), BackendError>;

    async fn update_advanced_degree(&self, payload: AdvancedEducation)
        -> Result<(), BackendError>;

    async fn submit_work_experience(&self, payload: WorkExperience) -> Result<(), BackendError>;

    async fn submit_recommender_details(
        &self,
        recommenders: Vec<Recommender>,
    ) -> Result<(), BackendError>;

    async fn submit_referee_details(
        &self,
        first: LoanReferee,
        second: LoanReferee,
    ) -> Result<(), BackendError>;

    /// Flips the candidate's application-submitted flag.
    async fn toggle_application_status(&self, candidate_id: String) -> Result<(), BackendError>;

    async fn edit_candidate(
        &self,
        candidate_id: String,
        payload: EditedCandidate,
    ) -> Result<(), BackendError>;

    async fn patch_education_detail(
        &self,
        candidate_id: String,
        payload: EducationPatch,
    ) -> Result<(), BackendError>;

    async fn craft_candidate_resume(&self, candidate_id: String)
        -> Result<ResumeDraft, BackendError>;

    async fn upload_resume(
        &self,
        email: String,
        file: SelectedFile,
        contents: Vec<u8>,
    ) -> Result<(), BackendError>;

    async fn update_school_application(
        &self,
        candidate_id: String,
        slot: SchoolSlot,
        payload: SchoolApplication,
    ) -> Result<(), BackendError>;

    /// Candidates visible to the signed-in staff member.
    async fn list_candidates(&self) -> Result<Vec<CandidateSummary>, BackendError>;

    async fn fetch_candidate(&self, candidate_id: String)
        -> Result<CandidateSummary, BackendError>;
}
