use crate::cli::output;

const COMMANDS: &[(&str, &str)] = &[
    ("register [id]", "Fill in the candidate registration wizard"),
    ("resume <id>", "Refine a candidate's resume and generate it"),
    ("school <id> [school1|school2]", "Record a candidate's school application details"),
    ("candidates", "List assigned candidates with their progress"),
    ("sop <id> [school1|school2]", "Show the SOP heading and text for a school"),
    ("upload-cv <email> <path>", "Upload a CV to the candidate with that email"),
    ("check-file <path>", "Check a document against the upload limits"),
    ("reset <register|resume|school>", "Forget saved wizard progress"),
    ("config", "Show the effective configuration"),
    ("help", "Show this overview"),
];

pub fn print_overview() {
    output::section("Pathway onboarding");
    for (usage, description) in COMMANDS {
        println!("  {:<32} {}", usage, description);
    }
    println!();
    println!("Environment: PATHWAY_CANDIDATE_ID, PATHWAY_TOKEN, PATHWAY_API_URL, PATHWAY_HOME.");
    println!("Inside a wizard, type :back for the previous step or :quit to stop.");
}
