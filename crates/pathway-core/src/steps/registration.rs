//! Candidate registration: five steps ending in the application submission.

use crate::schema::{FieldRule, StepSchema};

use super::StepDefinition;

pub const GENDERS: &[&str] = &["Male", "Female", "Other"];
pub const YES_NO: &[&str] = &["yes", "no"];
pub const CURRENT_STATUSES: &[&str] = &["student", "graduate", "employed", "unemployed"];
pub const DEGREE_TYPES: &[&str] = &["bachelor", "master", "doctorate"];
pub const RELATIONSHIPS: &[&str] = &[
    "father", "mother", "uncle", "aunt", "sister", "brother", "cousin",
];

/// Number of optional document slots on the upload step.
pub const DOCUMENT_SLOTS: usize = 10;

const DOCUMENT_KEYS: [&str; DOCUMENT_SLOTS] = [
    "document1",
    "document2",
    "document3",
    "document4",
    "document5",
    "document6",
    "document7",
    "document8",
    "document9",
    "document10",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrationStep {
    PersonalDetails,
    EducationDetails,
    WorkExperience,
    RefereeDetails,
    UploadDocuments,
}

pub fn registration_steps() -> Vec<StepDefinition<RegistrationStep>> {
    vec![
        StepDefinition::new(
            RegistrationStep::PersonalDetails,
            "PERSONAL DETAILS",
            personal_details_schema(),
        ),
        StepDefinition::new(
            RegistrationStep::EducationDetails,
            "EDUCATION DETAILS",
            education_details_schema(),
        ),
        StepDefinition::new(
            RegistrationStep::WorkExperience,
            "WORK EXPERIENCE",
            work_experience_schema(),
        ),
        StepDefinition::new(
            RegistrationStep::RefereeDetails,
            "REFEREE DETAILS",
            referee_details_schema(),
        ),
        StepDefinition::new(
            RegistrationStep::UploadDocuments,
            "UPLOAD DOCUMENTS",
            upload_documents_schema(),
        ),
    ]
}

pub fn personal_details_schema() -> StepSchema {
    StepSchema::new(vec![
        FieldRule::text("firstName", "First name").required("First name is required"),
        FieldRule::text("middleName", "Middle name").optional(),
        FieldRule::text("surname", "Surname").required("Surname is required"),
        FieldRule::text("preferredName", "Preferred name").optional(),
        FieldRule::text("dateOfBirth", "Date of birth").required("Date of birth is required"),
        FieldRule::text("gender", "Gender").one_of(GENDERS),
        FieldRule::text("cityOfBirth", "City of birth").required("City of birth is required"),
        FieldRule::text("stateOfBirth", "State of birth").required("State of birth is required"),
        FieldRule::text("countryOfBirth", "Country of birth")
            .required("Country of birth is required"),
        FieldRule::text("emailAddress", "Email address").email("Invalid email address"),
        FieldRule::text("phoneNumber", "Phone number").required("Phone number is required"),
        FieldRule::text("countryOfResidence", "Country of residence")
            .required("Country of residence is required"),
        FieldRule::text("stateOfResidence", "State of residence")
            .required("State of residence is required"),
        FieldRule::text("cityOfResidence", "City of residence")
            .required("City of residence is required"),
        FieldRule::text("postalAddress", "Postal address").required("Postal address is required"),
        FieldRule::text("houseAddress", "House address").required("House address is required"),
    ])
}

pub fn education_details_schema() -> StepSchema {
    StepSchema::new(vec![
        FieldRule::text("currentStatus", "Current status")
            .choice(CURRENT_STATUSES)
            .required("Current status is required"),
        FieldRule::text("degreeType", "Degree type")
            .choice(DEGREE_TYPES)
            .required("Degree type is required"),
        FieldRule::text("countryOfEducation", "Country").required("Country is required"),
        FieldRule::text("courseOfStudy", "Course of study")
            .required("Course of study is required"),
        FieldRule::text("institutionName", "Name of tertiary institution")
            .required("Name of institution is required"),
        FieldRule::text("degreeClass", "Class of degree").required("Class of degree is required"),
        FieldRule::text("currentCGPA", "Current CGPA").required("Current CGPA is required"),
        FieldRule::text("yearAdmitted", "Year admitted")
            .min_len(4, "Year admitted must be a positive integer"),
        FieldRule::text("yearGraduated", "Year graduated")
            .min_len(4, "Year graduated must be a positive integer"),
        FieldRule::text("advancedDegree", "Do you have an advanced degree?").one_of(YES_NO),
    ])
    .when(
        "advancedDegree",
        "yes",
        vec![
            FieldRule::text("advancedDegreeType", "Advanced degree type")
                .required("Advanced Degree Type is required"),
            FieldRule::text("graduateType", "Graduate type").required("Graduate Type is required"),
            FieldRule::text("advancedCountry", "Country").required("Country is required"),
            FieldRule::text("advancedDegreeClass", "Class of degree")
                .required("Class of degree is required"),
            FieldRule::text("advancedInstitutionName", "Name of tertiary institution")
                .required("Name of tertiary institution is required"),
            FieldRule::text("advancedCurrentCGPA", "Current CGPA")
                .required("Current CGPA is required"),
            FieldRule::text("advancedYearAdmitted", "Year admitted")
                .min_len(4, "Year admitted must be a positive integer"),
            FieldRule::text("advancedYearGraduated", "Year graduated")
                .min_len(4, "Year graduated must be a positive integer"),
        ],
    )
}

pub fn work_experience_schema() -> StepSchema {
    StepSchema::new(vec![
        FieldRule::text("profession", "Profession").min_len(2, "Profession is required"),
        FieldRule::text("sectorOfProfession", "Sector of profession")
            .min_len(2, "Sector of profession is required"),
        FieldRule::text("technicalSkill", "Technical skill")
            .min_len(2, "Technical skill is required"),
        FieldRule::records(
            "careerInterest",
            "Career interests",
            vec![FieldRule::text("name", "Career interest")
                .min_len(2, "Each career interest must be at least 2 characters long")],
        )
        .min_items(1, "At least one career interest is required"),
        FieldRule::text(
            "yearsOfProfessionalExperiencePostFirstDegree",
            "Years of experience after first degree",
        )
        .min_len(1, "Must be a positive number"),
        FieldRule::text(
            "yearsOfProfessionalExperiencePriorToGraduation",
            "Years of experience before graduation",
        )
        .min_len(1, "Must be a positive number"),
        FieldRule::text("jobsToShowcase", "Jobs to showcase").int_range(
            1,
            3,
            "Must be at least 1",
            "Must be no more than 3",
        ),
        FieldRule::text("workPlaceName", "Name of work place")
            .min_len(2, "Name of work place is required"),
        FieldRule::text("currentProfessionalStatus", "Current professional status")
            .min_len(2, "Current professional status is required"),
        FieldRule::text("currentJobTitle", "Current job title")
            .min_len(2, "Current job title is required"),
        FieldRule::text("employmentType", "Employment type")
            .min_len(2, "Employment type is required"),
        FieldRule::text("stateLocation", "State/Province")
            .min_len(2, "State/Province location is required"),
        FieldRule::text("countryLocation", "Country").min_len(2, "Country location is required"),
        FieldRule::text("startedDate", "Start date").min_len(2, "Start date is required"),
        FieldRule::text("endedDate", "End date").min_len(2, "End date is required"),
        FieldRule::text("jobStatus", "Job status").min_len(2, "Job status is required"),
        FieldRule::text("companyDescription", "Company description")
            .min_len(2, "Company description is required"),
        FieldRule::text("jobSummary", "Job summary").min_len(2, "Job summary is required"),
    ])
}

pub fn referee_details_schema() -> StepSchema {
    let mut fields = vec![
        FieldRule::text("referee1fullname", "Referee 1 full name")
            .required("Referee 1 full name is required"),
        FieldRule::text("referee1email", "Referee 1 email").email("Invalid email address"),
        FieldRule::text("referee1phoneNumber", "Referee 1 phone number")
            .required("Phone number is required"),
        FieldRule::text("referee1relationship", "Referee 1 relationship").one_of(RELATIONSHIPS),
        FieldRule::text("referee2fullname", "Referee 2 full name")
            .required("Referee 2 full name is required"),
        FieldRule::text("referee2email", "Referee 2 email").email("Invalid email address"),
        FieldRule::text("referee2phoneNumber", "Referee 2 phone number")
            .required("Phone number is required"),
        FieldRule::text("referee2relationship", "Referee 2 relationship").one_of(RELATIONSHIPS),
    ];
    fields.extend(recommender_fields());
    StepSchema::new(fields)
}

// Recommenders are collected on the referee step but may be left blank.
fn recommender_fields() -> Vec<FieldRule> {
    const KEYS: [[(&str, &str); 6]; 3] = [
        [
            ("recommendation1fullname", "Professional recommender full name"),
            ("recommendation1email", "Professional recommender email"),
            ("recommendation1phoneNumber", "Professional recommender phone number"),
            ("recommendation1relationship", "Professional recommender relationship"),
            ("recommendation1organization", "Professional recommender organization"),
            ("recommendation1job", "Professional recommender job title"),
        ],
        [
            ("recommendation2fullname", "Academic recommender full name"),
            ("recommendation2email", "Academic recommender email"),
            ("recommendation2phoneNumber", "Academic recommender phone number"),
            ("recommendation2relationship", "Academic recommender relationship"),
            ("recommendation2organization", "Academic recommender organization"),
            ("recommendation2job", "Academic recommender job title"),
        ],
        [
            ("recommendation3fullname", "Other recommender full name"),
            ("recommendation3email", "Other recommender email"),
            ("recommendation3phoneNumber", "Other recommender phone number"),
            ("recommendation3relationship", "Other recommender relationship"),
            ("recommendation3organization", "Other recommender organization"),
            ("recommendation3job", "Other recommender job title"),
        ],
    ];

    KEYS.iter()
        .flat_map(|group| group.iter())
        .map(|&(key, label)| {
            let field = FieldRule::text(key, label).optional();
            if key.ends_with("email") {
                field.email("Invalid email address")
            } else {
                field
            }
        })
        .collect()
}

pub fn upload_documents_schema() -> StepSchema {
    StepSchema::new(
        DOCUMENT_KEYS
            .iter()
            .map(|&key| FieldRule::file(key, key))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathway_domain::FormValues;

    fn valid_education() -> FormValues {
        FormValues::new()
            .with("currentStatus", "graduate")
            .with("degreeType", "bachelor")
            .with("countryOfEducation", "Canada")
            .with("courseOfStudy", "Computer Science")
            .with("institutionName", "University of Toronto")
            .with("degreeClass", "First class")
            .with("currentCGPA", "4.5")
            .with("yearAdmitted", "2015")
            .with("yearGraduated", "2019")
    }

    #[test]
    fn table_has_five_steps_in_order() {
        let steps = registration_steps();
        let tags: Vec<_> = steps.iter().map(|def| def.step).collect();
        assert_eq!(
            tags,
            vec![
                RegistrationStep::PersonalDetails,
                RegistrationStep::EducationDetails,
                RegistrationStep::WorkExperience,
                RegistrationStep::RefereeDetails,
                RegistrationStep::UploadDocuments,
            ]
        );
        assert_eq!(steps[4].title, "UPLOAD DOCUMENTS");
    }

    #[test]
    fn advanced_degree_yes_requires_sub_fields() {
        let values = valid_education()
            .with("advancedDegree", "yes")
            .with("advancedDegreeType", "Masters")
            .with("graduateType", "Taught")
            .with("advancedCountry", "Canada")
            .with("advancedDegreeClass", "Distinction")
            .with("advancedInstitutionName", "McGill University")
            .with("advancedYearAdmitted", "2020")
            .with("advancedYearGraduated", "2021");

        let errors = education_details_schema()
            .validate(&values)
            .expect_err("advanced CGPA missing");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("advancedCurrentCGPA"), Some("Current CGPA is required"));
    }

    #[test]
    fn advanced_degree_no_ignores_sub_fields() {
        let values = valid_education().with("advancedDegree", "no");
        assert!(education_details_schema().validate(&values).is_ok());
    }

    #[test]
    fn advanced_degree_must_be_yes_or_no() {
        let errors = education_details_schema()
            .validate(&valid_education())
            .expect_err("toggle missing");
        assert_eq!(errors.get("advancedDegree"), Some("Expected one of: yes, no"));
    }

    #[test]
    fn referee_relationship_is_restricted() {
        let values = FormValues::new()
            .with("referee1fullname", "Grace Hopper")
            .with("referee1email", "grace@example.com")
            .with("referee1phoneNumber", "+1 555 0100")
            .with("referee1relationship", "friend")
            .with("referee2fullname", "Alan Turing")
            .with("referee2email", "alan@example.com")
            .with("referee2phoneNumber", "+44 20 0000")
            .with("referee2relationship", "uncle")
            .with("recommendation1email", "not-an-email");

        let errors = referee_details_schema()
            .validate(&values)
            .expect_err("bad relationship");
        assert!(errors.contains("referee1relationship"));
        assert!(!errors.contains("referee2relationship"));
        assert_eq!(errors.get("recommendation1email"), Some("Invalid email address"));
        assert!(!errors.contains("recommendation2email"));
    }

    #[test]
    fn upload_step_collects_ten_optional_slots() {
        let schema = upload_documents_schema();
        assert_eq!(schema.field_keys().len(), DOCUMENT_SLOTS);
        assert!(schema.validate(&FormValues::new()).is_ok());
    }
}
