//! Staff-side resume refinement for an existing candidate.

use crate::schema::{FieldRule, StepSchema};

use super::registration::GENDERS;
use super::StepDefinition;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResumeStep {
    PersonalDetails,
    Profile,
    Education,
    JobExperiences,
    Prompt,
}

pub fn resume_steps() -> Vec<StepDefinition<ResumeStep>> {
    vec![
        StepDefinition::new(
            ResumeStep::PersonalDetails,
            "PERSONAL DETAILS",
            personal_schema(),
        ),
        StepDefinition::new(ResumeStep::Profile, "PROFILE", profile_schema()),
        StepDefinition::new(ResumeStep::Education, "EDUCATION DETAILS", education_schema()),
        StepDefinition::new(
            ResumeStep::JobExperiences,
            "WORK EXPERIENCE",
            job_experiences_schema(),
        ),
        StepDefinition::new(ResumeStep::Prompt, "RESUME PROMPT", prompt_schema()),
    ]
}

pub fn personal_schema() -> StepSchema {
    StepSchema::new(vec![
        FieldRule::text("fullName", "Full name").required("Full name is required"),
        FieldRule::text("phoneNumber", "Phone number").required("Phone number is required"),
        FieldRule::text("email", "Email").email("Invalid email address"),
        FieldRule::text("city", "City").required("City is required"),
        FieldRule::text("state", "State").required("State is required"),
        FieldRule::text("profession", "Profession").required("Profession is required"),
    ])
}

pub fn profile_schema() -> StepSchema {
    StepSchema::new(vec![
        FieldRule::text("gender", "Gender").one_of(GENDERS),
        FieldRule::text("dateOfBirth", "Date of birth").required("Date of birth is required"),
        FieldRule::text("nationality", "Nationality").required("Nationality is required"),
        FieldRule::list("interest", "Career interests")
            .optional()
            .each_min_len(2, "Each career interest must be at least 2 characters long"),
    ])
}

pub fn education_schema() -> StepSchema {
    StepSchema::new(vec![
        FieldRule::text("kindOfDegree", "Kind of degree").required("Kind of degree is required"),
        FieldRule::text("tertiaryInstitutionAttended", "Tertiary institution attended")
            .required("Tertiary institution attended is required"),
        FieldRule::text("city", "City").required("City is required"),
        FieldRule::text("state", "State").required("State is required"),
        FieldRule::text("course", "Course").required("Course is required"),
        FieldRule::text("country", "Country").required("Country is required"),
        FieldRule::text("classOfDegree", "Class of degree").optional(),
        FieldRule::text("startDate", "Start date").optional(),
        FieldRule::text("endDate", "End date").optional(),
    ])
}

pub fn job_experiences_schema() -> StepSchema {
    StepSchema::new(vec![FieldRule::records(
        "jobExperiences",
        "Job experiences",
        vec![
            FieldRule::text("nameOfCompany", "Name of company")
                .required("Name of company is required"),
            FieldRule::text("jobTitle", "Job title").required("Job title is required"),
            FieldRule::text("companyDescription", "Company description").optional(),
            FieldRule::text("jobDescription", "Job description")
                .required("Job description is required"),
            FieldRule::text("mode", "Mode").required("Mode is required"),
            FieldRule::text("location", "Location").required("Location is required"),
            FieldRule::text("startDate", "Start date").optional(),
            FieldRule::text("endDate", "End date").optional(),
        ],
    )
    .optional()])
}

pub fn prompt_schema() -> StepSchema {
    StepSchema::new(vec![
        FieldRule::text("prompt", "Prompt").min_len(1, "Prompt is required")
    ])
}
