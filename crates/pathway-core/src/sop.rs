//! Statement of Purpose headings and body cleanup.

use std::sync::OnceLock;

use pathway_domain::{CandidateSummary, SchoolSlot};
use regex::Regex;

pub fn sop_title(program_type: &str, course: &str, university: &str) -> String {
    let is_mba =
        program_type.eq_ignore_ascii_case("mba") && course.eq_ignore_ascii_case("mba");
    if is_mba {
        format!("{course} AT THE {university}")
    } else {
        format!("PURSUING AN {program_type} IN {course} at {university}")
    }
}

fn marker_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^\*\*?Statement of Purpose\*\*?").expect("marker pattern compiles")
    })
}

/// Drops a leading `*Statement of Purpose*` marker left by the generator.
pub fn strip_sop_marker(text: &str) -> String {
    marker_pattern().replace(text, "").into_owned()
}

/// Heading and cleaned body of one school's SOP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SopSheet {
    pub title: String,
    pub body: Option<String>,
}

/// Builds the SOP sheet for `slot` from the candidate's assignments.
pub fn sop_sheet(candidate: &CandidateSummary, slot: SchoolSlot) -> SopSheet {
    let title = sop_title(
        candidate.program_type(slot).unwrap_or_default(),
        candidate.course(slot).unwrap_or_default(),
        candidate.university(slot).unwrap_or_default(),
    );
    SopSheet {
        title,
        body: candidate.sop_text(slot).map(strip_sop_marker),
    }
}
