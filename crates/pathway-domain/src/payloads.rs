//! Record shapes accepted by the onboarding backend.
//!
//! Field names follow the backend's snake_case contract; every record that
//! carries a `candidate` field is upserted under that identifier.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalDetails {
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_call_name: Option<String>,
    pub gender: String,
    pub birth_date: String,
    pub country_of_birth: String,
    pub city_of_birth: String,
    pub state_of_birth: String,
    pub phone_number: String,
    pub email_address: String,
    pub country_current_reside: String,
    pub state_current_reside: String,
    pub city_current_reside: String,
    pub current_house_address: String,
    pub postal_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationHistory {
    pub current_status: String,
    pub degree_type: String,
    pub country: String,
    pub school_name: String,
    pub specific_course_of_study: String,
    pub class_of_degree: String,
    pub specific_cgpa: String,
    pub graduation_date: String,
    pub admission_date: String,
    pub has_advanced_degree: bool,
    pub candidate: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvancedEducation {
    pub advanced_degree_type: String,
    pub graduate_type: String,
    pub country: String,
    pub school_name: String,
    pub class_of_degree: String,
    pub specific_cgpa: String,
    pub graduation_date: String,
    pub admission_date: String,
    pub candidate: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerInterest {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkExperience {
    pub profession: String,
    pub sector: String,
    pub technical_skill: String,
    pub career_interests: Vec<CareerInterest>,
    pub years_of_experience_post_degree: String,
    pub years_of_experience_pre_graduation: String,
    pub jobs_to_show: String,
    pub candidate: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommenderType {
    Professional,
    Academic,
    #[serde(rename = "other")]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommender {
    pub recommender_type: RecommenderType,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub relationship: String,
    pub organization: String,
    pub job_title: String,
    pub candidate: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanReferee {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub relationship: String,
    pub candidate: String,
}

/// Partial candidate edit issued while refining a resume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditedCandidate {
    pub city_of_birth: String,
    pub phone_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationPatch {
    pub school_name: String,
    pub specific_course_of_study: String,
    pub degree_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_of_degree: Option<String>,
    pub candidate: String,
}

/// Resume generated by the backend for a candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeDraft {
    #[serde(default)]
    pub resume: Option<String>,
}

/// Portal credentials and deadlines staff record for one school application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolApplication {
    pub username: String,
    pub password: String,
    pub application_fee: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_fee_amount: Option<String>,
    pub school_application_url: String,
    pub application_deadline: String,
    pub date_application_submitted: String,
    pub session_timeline_for_admission: String,
}
