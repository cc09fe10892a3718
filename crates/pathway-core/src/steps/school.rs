//! Per-school application record kept by staff.

use crate::schema::{FieldRule, StepSchema};

use super::StepDefinition;

pub const APPLICATION_FEE_OPTIONS: &[&str] = &["yes", "no"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchoolStep {
    Application,
}

/// Single-page wizard: the whole record is one step.
pub fn school_steps() -> Vec<StepDefinition<SchoolStep>> {
    vec![StepDefinition::new(
        SchoolStep::Application,
        "SCHOOL APPLICATION",
        school_form_schema(),
    )]
}

pub fn school_form_schema() -> StepSchema {
    StepSchema::new(vec![
        FieldRule::text("username", "Portal username").required("Username is required"),
        FieldRule::text("password", "Portal password")
            .min_len(6, "Password must be at least 6 characters"),
        FieldRule::text("applicationFee", "Application fee")
            .choice(APPLICATION_FEE_OPTIONS)
            .required("Please select an option"),
        FieldRule::text("applicationFeeAmount", "Application fee amount").optional(),
        FieldRule::text("schoolApplicationUrl", "School application URL")
            .url("Please enter a valid URL"),
        FieldRule::text("applicationDeadline", "Application deadline")
            .required("Application deadline is required"),
        FieldRule::text("applicationSubmitted", "Application submitted on")
            .required("Application submission date is required"),
        FieldRule::text("sessionTimeline", "Session timeline")
            .required("Please select a session timeline"),
    ])
}
