use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

fn cli(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pathway_cli").unwrap();
    cmd.env("PATHWAY_HOME", home.path())
        .env("PATHWAY_CLI_SCRIPT", "1")
        .env_remove("PATHWAY_CANDIDATE_ID")
        .env_remove("PATHWAY_TOKEN")
        .env_remove("PATHWAY_API_URL");
    cmd
}

#[test]
fn help_lists_commands() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .arg("help")
        .assert()
        .success()
        .stdout(contains("upload-cv <email> <path>"))
        .stdout(contains("school <id> [school1|school2]"))
        .stdout(contains("candidates"))
        .stdout(contains(":back"));
}

#[test]
fn unknown_command_fails() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .arg("launch")
        .assert()
        .failure()
        .stderr(contains("unknown command"));
}

#[test]
fn check_file_enforces_upload_limits() {
    let home = TempDir::new().unwrap();
    let big = home.path().join("transcript.pdf");
    std::fs::write(&big, vec![0u8; 6 * 1024 * 1024]).unwrap();
    let small = home.path().join("essay.docx");
    std::fs::write(&small, vec![0u8; 1024]).unwrap();
    let image = home.path().join("photo.png");
    std::fs::write(&image, vec![0u8; 1024]).unwrap();

    cli(&home)
        .arg("check-file")
        .arg(&big)
        .assert()
        .failure()
        .stderr(contains("File size should not exceed 5MB."));

    cli(&home)
        .arg("check-file")
        .arg(&small)
        .assert()
        .success()
        .stdout(contains("essay.docx accepted"));

    cli(&home)
        .arg("check-file")
        .arg(&image)
        .assert()
        .failure()
        .stderr(contains("Please upload a PDF or Word document."));
}

#[test]
fn register_requires_candidate_id() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .arg("register")
        .assert()
        .failure()
        .stderr(contains("PATHWAY_CANDIDATE_ID"));
}

#[test]
fn register_reports_field_errors_before_sending() {
    let home = TempDir::new().unwrap();
    let answers = [
        "", "", "Okafor", "", "1996-04-12", "Male", "Enugu", "Enugu", "Nigeria",
        "not-an-email", "+234 800", "Nigeria", "Lagos", "Ikeja", "100001", "12 Marina Road",
    ]
    .join("\n");

    cli(&home)
        .arg("register")
        .arg("cand-1")
        .env("PATHWAY_API_URL", "http://127.0.0.1:9/api/")
        .write_stdin(format!("{answers}\n"))
        .assert()
        .failure()
        .stdout(contains("=== PERSONAL DETAILS ==="))
        .stdout(contains("Step 1 of 5"))
        .stdout(contains("firstName: First name is required"))
        .stdout(contains("emailAddress: Invalid email address"))
        .stderr(contains("no scripted answer"));
}

#[test]
fn reset_clears_saved_progress() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["reset", "register"])
        .assert()
        .success()
        .stdout(contains("cleared"));
}

#[test]
fn reset_replaces_unreadable_progress_file() {
    let home = TempDir::new().unwrap();
    let state = home.path().join("state");
    std::fs::create_dir_all(&state).unwrap();
    std::fs::write(state.join("progress.json"), "{ not json").unwrap();

    cli(&home)
        .args(["reset", "school"])
        .assert()
        .success()
        .stdout(contains("Progress for school application cleared."));
}

#[test]
fn school_form_reports_field_errors_before_sending() {
    let home = TempDir::new().unwrap();
    let answers = [
        "", "abc", "yes", "", "example.edu", "2025-01-15", "2024-12-01", "Fall 2025",
    ]
    .join("\n");

    cli(&home)
        .args(["school", "cand-1", "school2"])
        .env("PATHWAY_API_URL", "http://127.0.0.1:9/api/")
        .write_stdin(format!("{answers}\n"))
        .assert()
        .failure()
        .stdout(contains("=== SCHOOL APPLICATION ==="))
        .stdout(contains("Step 1 of 1"))
        .stdout(contains("username: Username is required"))
        .stdout(contains("password: Password must be at least 6 characters"))
        .stdout(contains("schoolApplicationUrl: Please enter a valid URL"))
        .stderr(contains("no scripted answer"));
}

#[test]
fn unknown_school_slot_is_rejected() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["sop", "cand-1", "school3"])
        .assert()
        .failure()
        .stderr(contains("expected school1 or school2"));
}

#[test]
fn candidates_reports_unreachable_backend() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .arg("candidates")
        .env("PATHWAY_API_URL", "http://127.0.0.1:9/api/")
        .assert()
        .failure()
        .stderr(contains("Request failed"));
}
