//! Onboarding REST client
//!
//! Implements [`CandidateBackend`] over HTTP with JSON bodies. Every write is
//! an upsert on the server side, keyed by the candidate identifier.

use async_trait::async_trait;
use pathway_config::Config;
use pathway_core::{BackendError, CandidateBackend};
use pathway_domain::{
    AdvancedEducation, CandidatePage, CandidateSummary, EditedCandidate, EducationHistory,
    EducationPatch, LoanReferee, PersonalDetails, Recommender, ResumeDraft, SchoolApplication,
    SchoolSlot, SelectedFile, Session, WorkExperience,
};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

const PERSONAL_DETAILS: &str = "onboarding-candidate/personal-details/";
const EDUCATION_HISTORY: &str = "education-history/";
const ADVANCED_EDUCATION: &str = "advanced-education/";
const WORK_EXPERIENCE: &str = "work-experience/";
const RECOMMENDERS: &str = "recommenders/";
const LOAN_REFEREES: &str = "loan-referees/";
const CANDIDATES: &str = "onboarding-candidate/";

/// Client for the onboarding API
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    access_token: Option<String>,
}

impl HttpBackend {
    pub fn new(config: &Config, session: &Session) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: normalize_base(&config.api_base_url),
            access_token: session.access_token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.endpoint(path);
        debug!(%method, %url, "backend request");
        let builder = self.client.request(method, url);
        match &self.access_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send_json<T: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &T,
    ) -> Result<(), BackendError> {
        let response = self
            .request(method, path)
            .json(body)
            .send()
            .await
            .map_err(transport)?;
        check_status(response).await.map(|_| ())
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        let response = self
            .request(Method::GET, path)
            .send()
            .await
            .map_err(transport)?;
        check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))
    }
}

#[async_trait]
impl CandidateBackend for HttpBackend {
    async fn update_personal_details(&self, payload: PersonalDetails) -> Result<(), BackendError> {
        self.send_json(Method::PATCH, PERSONAL_DETAILS, &payload)
            .await
    }

    async fn submit_education_details(
        &self,
        payload: EducationHistory,
    ) -> Result<(), BackendError> {
        self.send_json(Method::POST, EDUCATION_HISTORY, &payload)
            .await
    }

    async fn update_advanced_degree(
        &self,
        payload: AdvancedEducation,
    ) -> Result<(), BackendError> {
        self.send_json(Method::POST, ADVANCED_EDUCATION, &payload)
            .await
    }

    async fn submit_work_experience(&self, payload: WorkExperience) -> Result<(), BackendError> {
        self.send_json(Method::POST, WORK_EXPERIENCE, &payload).await
    }

    async fn submit_recommender_details(
        &self,
        recommenders: Vec<Recommender>,
    ) -> Result<(), BackendError> {
        self.send_json(Method::POST, RECOMMENDERS, &recommenders)
            .await
    }

    async fn submit_referee_details(
        &self,
        first: LoanReferee,
        second: LoanReferee,
    ) -> Result<(), BackendError> {
        self.send_json(Method::POST, LOAN_REFEREES, &[first, second])
            .await
    }

    async fn toggle_application_status(&self, candidate_id: String) -> Result<(), BackendError> {
        let path = format!("{CANDIDATES}{candidate_id}/toggle-status/");
        self.send_json(Method::POST, &path, &serde_json::json!({}))
            .await
    }

    async fn edit_candidate(
        &self,
        candidate_id: String,
        payload: EditedCandidate,
    ) -> Result<(), BackendError> {
        let path = format!("{CANDIDATES}{candidate_id}/");
        self.send_json(Method::PATCH, &path, &payload).await
    }

    async fn patch_education_detail(
        &self,
        candidate_id: String,
        payload: EducationPatch,
    ) -> Result<(), BackendError> {
        let path = format!("{EDUCATION_HISTORY}{candidate_id}/");
        self.send_json(Method::PATCH, &path, &payload).await
    }

    async fn craft_candidate_resume(
        &self,
        candidate_id: String,
    ) -> Result<ResumeDraft, BackendError> {
        self.fetch(&format!("{CANDIDATES}{candidate_id}/craft-resume/"))
            .await
    }

    async fn upload_resume(
        &self,
        email: String,
        file: SelectedFile,
        contents: Vec<u8>,
    ) -> Result<(), BackendError> {
        let part = Part::bytes(contents)
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        let form = Form::new().part("resume", part);

        let response = self
            .request(Method::PATCH, &format!("{CANDIDATES}s/{email}/"))
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;
        check_status(response).await.map(|_| ())
    }

    async fn update_school_application(
        &self,
        candidate_id: String,
        slot: SchoolSlot,
        payload: SchoolApplication,
    ) -> Result<(), BackendError> {
        let path = school_application_path(&candidate_id, slot);
        self.send_json(Method::PATCH, &path, &payload).await
    }

    async fn list_candidates(&self) -> Result<Vec<CandidateSummary>, BackendError> {
        let page: CandidatePage = self.fetch(CANDIDATES).await?;
        Ok(page.results)
    }

    async fn fetch_candidate(
        &self,
        candidate_id: String,
    ) -> Result<CandidateSummary, BackendError> {
        self.fetch(&format!("{CANDIDATES}{candidate_id}/")).await
    }
}

fn school_application_path(candidate_id: &str, slot: SchoolSlot) -> String {
    format!(
        "{CANDIDATES}{candidate_id}/school-application/{}/",
        slot.field_suffix()
    )
}

fn normalize_base(raw: &str) -> String {
    format!("{}/", raw.trim().trim_end_matches('/'))
}

fn transport(err: reqwest::Error) -> BackendError {
    BackendError::Transport(err.to_string())
}

async fn check_status(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let detail = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    warn!(status = status.as_u16(), %detail, "backend rejected request");
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(BackendError::MissingResource(detail));
    }
    Err(BackendError::Rejected {
        status: status.as_u16(),
        detail,
    })
}
