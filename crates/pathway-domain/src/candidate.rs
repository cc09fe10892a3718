use serde::{Deserialize, Serialize};

/// One of the two schools recommended to a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchoolSlot {
    First,
    Second,
}

impl SchoolSlot {
    /// Accepts `school1`/`1` and `school2`/`2`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "school1" | "1" => Some(SchoolSlot::First),
            "school2" | "2" => Some(SchoolSlot::Second),
            _ => None,
        }
    }

    /// Suffix used by the candidate record's per-school fields.
    pub fn field_suffix(self) -> &'static str {
        match self {
            SchoolSlot::First => "1",
            SchoolSlot::Second => "2",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateUser {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SopDocument {
    #[serde(default)]
    pub text: Option<String>,
}

/// Candidate as returned by the listing and detail endpoints.
///
/// Every field may be missing or null on records still being onboarded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateSummary {
    pub id: Option<String>,
    pub user: Option<CandidateUser>,
    pub status: Option<String>,
    pub phone_number: Option<String>,
    pub assigned_course1: Option<String>,
    pub assigned_course2: Option<String>,
    pub assigned_university1: Option<String>,
    pub assigned_university2: Option<String>,
    pub program_type1: Option<String>,
    pub program_type2: Option<String>,
    pub first_country: Option<String>,
    pub second_country: Option<String>,
    pub resume_status: Option<String>,
    pub sop_status1: Option<String>,
    pub sop_status2: Option<String>,
    pub school_application_status1: Option<String>,
    pub school_application_status2: Option<String>,
    pub first_sop: Option<SopDocument>,
    pub second_sop: Option<SopDocument>,
}

impl CandidateSummary {
    pub fn full_name(&self) -> Option<&str> {
        self.user.as_ref()?.full_name.as_deref()
    }

    pub fn course(&self, slot: SchoolSlot) -> Option<&str> {
        match slot {
            SchoolSlot::First => self.assigned_course1.as_deref(),
            SchoolSlot::Second => self.assigned_course2.as_deref(),
        }
    }

    pub fn university(&self, slot: SchoolSlot) -> Option<&str> {
        match slot {
            SchoolSlot::First => self.assigned_university1.as_deref(),
            SchoolSlot::Second => self.assigned_university2.as_deref(),
        }
    }

    pub fn program_type(&self, slot: SchoolSlot) -> Option<&str> {
        match slot {
            SchoolSlot::First => self.program_type1.as_deref(),
            SchoolSlot::Second => self.program_type2.as_deref(),
        }
    }

    pub fn sop_text(&self, slot: SchoolSlot) -> Option<&str> {
        let sop = match slot {
            SchoolSlot::First => self.first_sop.as_ref(),
            SchoolSlot::Second => self.second_sop.as_ref(),
        };
        sop?.text.as_deref()
    }
}

/// Paged listing wrapper used by `GET onboarding-candidate/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidatePage {
    #[serde(default)]
    pub results: Vec<CandidateSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_record_parses_with_nulls() {
        let json = r#"{
            "id": "c-1",
            "user": { "full_name": "Ada Obi", "email": null },
            "assigned_course2": "Finance",
            "second_sop": { "text": "Dear committee" },
            "status": null
        }"#;
        let candidate: CandidateSummary = serde_json::from_str(json).expect("parse candidate");
        assert_eq!(candidate.full_name(), Some("Ada Obi"));
        assert_eq!(candidate.course(SchoolSlot::Second), Some("Finance"));
        assert_eq!(candidate.course(SchoolSlot::First), None);
        assert_eq!(candidate.sop_text(SchoolSlot::Second), Some("Dear committee"));
        assert_eq!(candidate.status, None);
    }

    #[test]
    fn slot_names_parse() {
        assert_eq!(SchoolSlot::parse("school2"), Some(SchoolSlot::Second));
        assert_eq!(SchoolSlot::parse("1").map(SchoolSlot::field_suffix), Some("1"));
        assert_eq!(SchoolSlot::parse("school3"), None);
    }
}
