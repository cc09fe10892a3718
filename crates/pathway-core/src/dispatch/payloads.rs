//! Wizard field names to backend record shapes.
//!
//! Pure renaming: no calls, no validation. Absent fields map to empty strings
//! and the schema layer is responsible for rejecting them beforehand.

use pathway_domain::{
    AdvancedEducation, CareerInterest, EditedCandidate, EducationHistory, EducationPatch,
    FormValues, LoanReferee, PersonalDetails, Recommender, RecommenderType, SchoolApplication,
    WorkExperience,
};

pub fn personal_details(data: &FormValues) -> PersonalDetails {
    PersonalDetails {
        first_name: data.text("firstName"),
        middle_name: data.opt_text("middleName"),
        last_name: data.text("surname"),
        preferred_call_name: data.opt_text("preferredName"),
        gender: data.text("gender"),
        birth_date: data.text("dateOfBirth"),
        country_of_birth: data.text("countryOfBirth"),
        city_of_birth: data.text("cityOfBirth"),
        state_of_birth: data.text("stateOfBirth"),
        phone_number: data.text("phoneNumber"),
        email_address: data.text("emailAddress"),
        country_current_reside: data.text("countryOfResidence"),
        state_current_reside: data.text("stateOfResidence"),
        city_current_reside: data.text("cityOfResidence"),
        current_house_address: data.text("houseAddress"),
        postal_code: data.text("postalAddress"),
    }
}

/// Whether the education step declared an advanced degree.
pub fn has_advanced_degree(data: &FormValues) -> bool {
    data.text("advancedDegree").trim() == "yes"
}

pub fn education_history(data: &FormValues, candidate: &str) -> EducationHistory {
    EducationHistory {
        current_status: data.text("currentStatus"),
        degree_type: data.text("degreeType"),
        country: data.text("countryOfEducation"),
        school_name: data.text("institutionName"),
        specific_course_of_study: data.text("courseOfStudy"),
        class_of_degree: data.text("degreeClass"),
        specific_cgpa: data.text("currentCGPA"),
        graduation_date: data.text("yearGraduated"),
        admission_date: data.text("yearAdmitted"),
        has_advanced_degree: has_advanced_degree(data),
        candidate: candidate.to_string(),
    }
}

pub fn advanced_education(data: &FormValues, candidate: &str) -> AdvancedEducation {
    AdvancedEducation {
        advanced_degree_type: data.text("advancedDegreeType"),
        graduate_type: data.text("graduateType"),
        country: data.text("advancedCountry"),
        school_name: data.text("advancedInstitutionName"),
        class_of_degree: data.text("advancedDegreeClass"),
        specific_cgpa: data.text("advancedCurrentCGPA"),
        graduation_date: data.text("advancedYearGraduated"),
        admission_date: data.text("advancedYearAdmitted"),
        candidate: candidate.to_string(),
    }
}

pub fn work_experience(data: &FormValues, candidate: &str) -> WorkExperience {
    WorkExperience {
        profession: data.text("profession"),
        sector: data.text("sectorOfProfession"),
        technical_skill: data.text("technicalSkill"),
        career_interests: data
            .records("careerInterest")
            .iter()
            .map(|record| CareerInterest {
                name: record.text("name"),
            })
            .collect(),
        years_of_experience_post_degree: data
            .text("yearsOfProfessionalExperiencePostFirstDegree"),
        years_of_experience_pre_graduation: data
            .text("yearsOfProfessionalExperiencePriorToGraduation"),
        jobs_to_show: data.text("jobsToShowcase"),
        candidate: candidate.to_string(),
    }
}

pub fn recommenders(data: &FormValues, candidate: &str) -> Vec<Recommender> {
    [
        (1, RecommenderType::Professional),
        (2, RecommenderType::Academic),
        (3, RecommenderType::Other),
    ]
    .into_iter()
    .map(|(slot, recommender_type)| {
        let field = |suffix: &str| data.text(&format!("recommendation{slot}{suffix}"));
        Recommender {
            recommender_type,
            full_name: field("fullname"),
            email: field("email"),
            phone_number: field("phoneNumber"),
            relationship: field("relationship"),
            organization: field("organization"),
            job_title: field("job"),
            candidate: candidate.to_string(),
        }
    })
    .collect()
}

pub fn referees(data: &FormValues, candidate: &str) -> (LoanReferee, LoanReferee) {
    let referee = |slot: u8| {
        let field = |suffix: &str| data.text(&format!("referee{slot}{suffix}"));
        LoanReferee {
            name: field("fullname"),
            email: field("email"),
            phone_number: field("phoneNumber"),
            relationship: field("relationship"),
            candidate: candidate.to_string(),
        }
    };
    (referee(1), referee(2))
}

pub fn edited_candidate(data: &FormValues) -> EditedCandidate {
    EditedCandidate {
        city_of_birth: data.text("city"),
        phone_number: data.text("phoneNumber"),
    }
}

pub fn education_patch(data: &FormValues, candidate: &str) -> EducationPatch {
    EducationPatch {
        school_name: data.text("tertiaryInstitutionAttended"),
        specific_course_of_study: data.text("course"),
        degree_type: data.text("kindOfDegree"),
        class_of_degree: data.opt_text("classOfDegree"),
        candidate: candidate.to_string(),
    }
}

pub fn school_application(data: &FormValues) -> SchoolApplication {
    SchoolApplication {
        username: data.text("username"),
        password: data.text("password"),
        application_fee: data.text("applicationFee"),
        application_fee_amount: data.opt_text("applicationFeeAmount"),
        school_application_url: data.text("schoolApplicationUrl"),
        application_deadline: data.text("applicationDeadline"),
        date_application_submitted: data.text("applicationSubmitted"),
        session_timeline_for_admission: data.text("sessionTimeline"),
    }
}
