use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pathway::cli::prompts::ScriptPrompter;
use pathway::cli::runner::{run_wizard, SessionEnd};
use pathway_core::dispatch::{RESUME_PROGRESS_KEY, SCHOOL_PROGRESS_KEY};
use pathway_core::notify::LogNotifier;
use pathway_core::{
    BackendError, CandidateBackend, FileInput, MemoryProgressStore, NavigationRequest,
    ResumeFlow, SchoolFlow, UploadPolicy, WizardEngine,
};
use pathway_domain::{
    AdvancedEducation, CandidateSummary, EditedCandidate, EducationHistory, EducationPatch,
    LoanReferee, PersonalDetails, Recommender, ResumeDraft, SchoolApplication, SchoolSlot,
    SelectedFile, Session, WorkExperience,
};

#[derive(Default)]
struct ResumeBackend {
    edits: Mutex<Vec<EditedCandidate>>,
    patches: Mutex<Vec<EducationPatch>>,
    applications: Mutex<Vec<(SchoolSlot, SchoolApplication)>>,
}

#[async_trait]
impl CandidateBackend for ResumeBackend {
    async fn update_personal_details(&self, _: PersonalDetails) -> Result<(), BackendError> {
        Ok(())
    }

    async fn submit_education_details(&self, _: EducationHistory) -> Result<(), BackendError> {
        Ok(())
    }

    async fn update_advanced_degree(&self, _: AdvancedEducation) -> Result<(), BackendError> {
        Ok(())
    }

    async fn submit_work_experience(&self, _: WorkExperience) -> Result<(), BackendError> {
        Ok(())
    }

    async fn submit_recommender_details(&self, _: Vec<Recommender>) -> Result<(), BackendError> {
        Ok(())
    }

    async fn submit_referee_details(
        &self,
        _: LoanReferee,
        _: LoanReferee,
    ) -> Result<(), BackendError> {
        Ok(())
    }

    async fn toggle_application_status(&self, _: String) -> Result<(), BackendError> {
        Ok(())
    }

    async fn edit_candidate(
        &self,
        _candidate_id: String,
        payload: EditedCandidate,
    ) -> Result<(), BackendError> {
        self.edits.lock().unwrap().push(payload);
        Ok(())
    }

    async fn patch_education_detail(
        &self,
        _candidate_id: String,
        payload: EducationPatch,
    ) -> Result<(), BackendError> {
        self.patches.lock().unwrap().push(payload);
        Ok(())
    }

    async fn craft_candidate_resume(&self, _: String) -> Result<ResumeDraft, BackendError> {
        Ok(ResumeDraft {
            resume: Some("https://files.test/cand-9.pdf".into()),
        })
    }

    async fn upload_resume(
        &self,
        _: String,
        _: SelectedFile,
        _: Vec<u8>,
    ) -> Result<(), BackendError> {
        Ok(())
    }

    async fn update_school_application(
        &self,
        _candidate_id: String,
        slot: SchoolSlot,
        payload: SchoolApplication,
    ) -> Result<(), BackendError> {
        self.applications.lock().unwrap().push((slot, payload));
        Ok(())
    }

    async fn list_candidates(&self) -> Result<Vec<CandidateSummary>, BackendError> {
        Ok(Vec::new())
    }

    async fn fetch_candidate(&self, _: String) -> Result<CandidateSummary, BackendError> {
        Ok(CandidateSummary::default())
    }
}

fn script(lines: &[&str]) -> ScriptPrompter {
    ScriptPrompter::new(lines.iter().map(|line| line.to_string()))
}

fn files() -> FileInput {
    FileInput::new(UploadPolicy::default(), Arc::new(LogNotifier))
}

fn engine(
    backend: Arc<ResumeBackend>,
    store: Arc<MemoryProgressStore>,
) -> WizardEngine<ResumeFlow> {
    WizardEngine::new(ResumeFlow::new(backend, Session::new("cand-9")), store).unwrap()
}

#[tokio::test]
async fn resume_wizard_runs_to_final_resume() {
    let backend = Arc::new(ResumeBackend::default());
    let store = Arc::new(MemoryProgressStore::new());
    let wizard = engine(backend.clone(), store.clone());
    let mut prompter = script(&[
        // personal
        "Ada Mensah", "024", "ada@example.com", "Accra", "Greater Accra", "Engineer",
        // profile
        "Female", "1995-02-01", "Ghanaian", "data, design",
        // education
        "BSc", "KNUST", "Kumasi", "Ashanti", "Physics", "Ghana", "", "", "",
        // job experiences
        "1", "Acme", "Analyst", "", "Built dashboards", "Remote", "Accra", "", "",
        // prompt
        "Focus on data roles",
    ]);

    let end = run_wizard(&wizard, &mut prompter, &mut files()).await.unwrap();

    assert_eq!(
        end,
        SessionEnd::Completed(NavigationRequest::immediate("/refine-resume/final-resume/cand-9"))
    );
    {
        let edits = backend.edits.lock().unwrap();
        assert_eq!(edits.len(), 1);
        assert_eq!(edits[0].city_of_birth, "Accra");
    }
    assert_eq!(backend.patches.lock().unwrap()[0].school_name, "KNUST");
    assert_eq!(store.get(RESUME_PROGRESS_KEY), Some(0));
    assert_eq!(wizard.current_step(), 0);
}

#[tokio::test]
async fn invalid_answers_are_asked_again() {
    let backend = Arc::new(ResumeBackend::default());
    let store = Arc::new(MemoryProgressStore::new());
    let wizard = engine(backend.clone(), store.clone());
    let mut prompter = script(&[
        "", "024", "ada@example.com", "Accra", "Greater Accra", "Engineer",
        "Ada Mensah", "024", "ada@example.com", "Accra", "Greater Accra", "Engineer",
        ":quit",
    ]);

    let end = run_wizard(&wizard, &mut prompter, &mut files()).await.unwrap();

    assert_eq!(end, SessionEnd::Suspended { step: 1 });
    assert_eq!(backend.edits.lock().unwrap().len(), 1);
    assert_eq!(store.get(RESUME_PROGRESS_KEY), Some(1));
}

#[tokio::test]
async fn back_returns_to_previous_step() {
    let backend = Arc::new(ResumeBackend::default());
    let store = Arc::new(MemoryProgressStore::new().with_step(RESUME_PROGRESS_KEY, 2));
    let wizard = engine(backend, store.clone());
    let mut prompter = script(&[":back", ":quit"]);

    let end = run_wizard(&wizard, &mut prompter, &mut files()).await.unwrap();

    assert_eq!(end, SessionEnd::Suspended { step: 1 });
    assert_eq!(store.get(RESUME_PROGRESS_KEY), Some(1));
}

#[tokio::test]
async fn school_wizard_saves_second_school_record() {
    let backend = Arc::new(ResumeBackend::default());
    let store = Arc::new(MemoryProgressStore::new());
    let flow = SchoolFlow::new(backend.clone(), Session::new("cand-9"), SchoolSlot::Second);
    let wizard = WizardEngine::new(flow, store.clone()).unwrap();
    let mut prompter = script(&[
        "portal-user", "abc",
        "yes", "75 USD", "https://apply.example.edu", "2025-01-15", "2024-12-01", "Fall 2025",
        // whole step asked again after the length check
        "portal-user", "s3cret!",
        "yes", "75 USD", "https://apply.example.edu", "2025-01-15", "2024-12-01", "Fall 2025",
    ]);

    let end = run_wizard(&wizard, &mut prompter, &mut files()).await.unwrap();

    assert_eq!(
        end,
        SessionEnd::Completed(NavigationRequest::immediate("/assigned-candidates/cand-9"))
    );
    let applications = backend.applications.lock().unwrap();
    assert_eq!(applications.len(), 1);
    assert_eq!(applications[0].0, SchoolSlot::Second);
    assert_eq!(applications[0].1.password, "s3cret!");
    assert_eq!(applications[0].1.application_fee_amount.as_deref(), Some("75 USD"));
    assert_eq!(store.get(SCHOOL_PROGRESS_KEY), Some(0));
}
