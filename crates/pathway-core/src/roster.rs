//! Staff roster: candidate listing rows with display fallbacks.

use pathway_domain::{CandidateSummary, SchoolSlot};

pub const ROSTER_HEADERS: [&str; 13] = [
    "S/N",
    "Student Name",
    "Recommended School 1",
    "Recommended Course 1",
    "First Country",
    "Recommended School 2",
    "Recommended Course 2",
    "Second Country",
    "Resume",
    "SOP 1",
    "SOP 2",
    "School Application Status 1",
    "School Application Status 2",
];

const NO_NAME: &str = "No name";
const NO_COURSE: &str = "No course assigned";
const NO_SCHOOL: &str = "No school assigned";
const NO_COUNTRY: &str = "No country";
const NOT_STARTED: &str = "Not Started";
const NOT_AVAILABLE: &str = "Not available";
const INACTIVE: &str = "Inactive";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRow {
    pub serial_number: usize,
    pub id: Option<String>,
    pub full_name: String,
    pub status: String,
    pub school1: String,
    pub course1: String,
    pub first_country: String,
    pub school2: String,
    pub course2: String,
    pub second_country: String,
    pub resume_status: String,
    pub sop_status1: String,
    pub sop_status2: String,
    pub application_status1: String,
    pub application_status2: String,
}

impl CandidateRow {
    /// Cells in `ROSTER_HEADERS` order.
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.serial_number.to_string(),
            self.full_name.clone(),
            self.school1.clone(),
            self.course1.clone(),
            self.first_country.clone(),
            self.school2.clone(),
            self.course2.clone(),
            self.second_country.clone(),
            self.resume_status.clone(),
            self.sop_status1.clone(),
            self.sop_status2.clone(),
            self.application_status1.clone(),
            self.application_status2.clone(),
        ]
    }
}

/// Numbers candidates from 1 and fills missing or blank fields.
pub fn candidate_rows(candidates: &[CandidateSummary]) -> Vec<CandidateRow> {
    candidates
        .iter()
        .enumerate()
        .map(|(index, candidate)| CandidateRow {
            serial_number: index + 1,
            id: candidate.id.clone(),
            full_name: or_default(candidate.full_name(), NO_NAME),
            status: or_default(candidate.status.as_deref(), INACTIVE),
            school1: or_default(candidate.university(SchoolSlot::First), NO_SCHOOL),
            course1: or_default(candidate.course(SchoolSlot::First), NO_COURSE),
            first_country: or_default(candidate.first_country.as_deref(), NO_COUNTRY),
            school2: or_default(candidate.university(SchoolSlot::Second), NO_SCHOOL),
            course2: or_default(candidate.course(SchoolSlot::Second), NO_COURSE),
            second_country: or_default(candidate.second_country.as_deref(), NO_COUNTRY),
            resume_status: or_default(candidate.resume_status.as_deref(), NOT_STARTED),
            sop_status1: or_default(candidate.sop_status1.as_deref(), NOT_STARTED),
            sop_status2: or_default(candidate.sop_status2.as_deref(), NOT_STARTED),
            application_status1: or_default(
                candidate.school_application_status1.as_deref(),
                NOT_AVAILABLE,
            ),
            application_status2: or_default(
                candidate.school_application_status2.as_deref(),
                NOT_AVAILABLE,
            ),
        })
        .collect()
}

fn or_default(value: Option<&str>, fallback: &str) -> String {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => fallback.to_string(),
    }
}
