use std::path::PathBuf;
use std::sync::Arc;

use pathway_core::dispatch::{REGISTRATION_PROGRESS_KEY, RESUME_PROGRESS_KEY, SCHOOL_PROGRESS_KEY};
use pathway_core::{
    candidate_rows, sop_sheet, CandidateBackend, CvUploader, FileInput, RegistrationFlow,
    ResumeFlow, SchoolFlow, WizardEngine, WizardFlow, ROSTER_HEADERS,
};
use pathway_domain::{CandidateSummary, SchoolSlot};
use pathway_storage_json::JsonProgressStore;

use crate::cli::context::CliContext;
use crate::cli::help;
use crate::cli::output;
use crate::cli::ports::{TerminalNavigator, TerminalNotifier};
use crate::cli::prompts::{describe_file, Prompter};
use crate::cli::runner::{run_wizard, SessionEnd};
use crate::cli::table::{Table, TableColumn};
use crate::errors::AppError;
use crate::http::HttpBackend;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardKind {
    Registration,
    Resume,
    School(SchoolSlot),
}

impl WizardKind {
    fn parse(raw: &str) -> Result<Self, AppError> {
        match raw {
            "register" | "registration" => Ok(WizardKind::Registration),
            "resume" => Ok(WizardKind::Resume),
            "school" => Ok(WizardKind::School(SchoolSlot::First)),
            other => Err(AppError::InvalidArguments(format!(
                "unknown wizard `{other}` (expected register, resume or school)"
            ))),
        }
    }

    fn label(self) -> &'static str {
        match self {
            WizardKind::Registration => "registration",
            WizardKind::Resume => "resume",
            WizardKind::School(_) => "school application",
        }
    }

    fn progress_key(self) -> &'static str {
        match self {
            WizardKind::Registration => REGISTRATION_PROGRESS_KEY,
            WizardKind::Resume => RESUME_PROGRESS_KEY,
            WizardKind::School(_) => SCHOOL_PROGRESS_KEY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run {
        wizard: WizardKind,
        candidate: Option<String>,
    },
    Candidates,
    Sop {
        candidate: String,
        slot: SchoolSlot,
    },
    UploadCv {
        email: String,
        path: PathBuf,
    },
    CheckFile {
        path: PathBuf,
    },
    Reset {
        wizard: WizardKind,
    },
    Config,
    Help,
}

impl Command {
    pub fn parse(args: &[String]) -> Result<Self, AppError> {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        match args.as_slice() {
            [] | ["help"] | ["--help"] | ["-h"] => Ok(Command::Help),
            ["register"] => Ok(Command::Run {
                wizard: WizardKind::Registration,
                candidate: None,
            }),
            ["register", id] => Ok(Command::Run {
                wizard: WizardKind::Registration,
                candidate: Some(id.to_string()),
            }),
            ["resume"] => Ok(Command::Run {
                wizard: WizardKind::Resume,
                candidate: None,
            }),
            ["resume", id] => Ok(Command::Run {
                wizard: WizardKind::Resume,
                candidate: Some(id.to_string()),
            }),
            ["school"] => Ok(Command::Run {
                wizard: WizardKind::School(SchoolSlot::First),
                candidate: None,
            }),
            ["school", id] => Ok(Command::Run {
                wizard: WizardKind::School(SchoolSlot::First),
                candidate: Some(id.to_string()),
            }),
            ["school", id, slot] => Ok(Command::Run {
                wizard: WizardKind::School(parse_slot(slot)?),
                candidate: Some(id.to_string()),
            }),
            ["candidates"] => Ok(Command::Candidates),
            ["sop", id] => Ok(Command::Sop {
                candidate: id.to_string(),
                slot: SchoolSlot::First,
            }),
            ["sop", id, slot] => Ok(Command::Sop {
                candidate: id.to_string(),
                slot: parse_slot(slot)?,
            }),
            ["upload-cv", email, path] => Ok(Command::UploadCv {
                email: email.to_string(),
                path: PathBuf::from(path),
            }),
            ["check-file", path] => Ok(Command::CheckFile {
                path: PathBuf::from(path),
            }),
            ["reset", wizard] => Ok(Command::Reset {
                wizard: WizardKind::parse(wizard)?,
            }),
            ["config"] => Ok(Command::Config),
            [name, ..] => Err(AppError::InvalidArguments(format!(
                "unknown command or arguments for `{name}`; try `help`"
            ))),
        }
    }
}

fn parse_slot(raw: &str) -> Result<SchoolSlot, AppError> {
    SchoolSlot::parse(raw).ok_or_else(|| {
        AppError::InvalidArguments(format!("unknown school `{raw}` (expected school1 or school2)"))
    })
}

pub async fn execute(
    command: Command,
    context: &CliContext,
    prompter: &mut dyn Prompter,
) -> Result<(), AppError> {
    match command {
        Command::Help => {
            help::print_overview();
            Ok(())
        }
        Command::Config => show_config(context),
        Command::CheckFile { path } => check_file(context, path),
        Command::Reset { wizard } => {
            let store = JsonProgressStore::new(context.state_dir.clone())?;
            store.clear(wizard.progress_key())?;
            output::success(format!("Progress for {} cleared.", wizard.label()));
            Ok(())
        }
        Command::UploadCv { email, path } => upload_cv(context, &email, path).await,
        Command::Candidates => list_candidates(context).await,
        Command::Sop { candidate, slot } => show_sop(context, candidate, slot).await,
        Command::Run { wizard, candidate } => {
            let session = context.session(candidate)?;
            let backend = Arc::new(HttpBackend::new(&context.config, &session)?);
            match wizard {
                WizardKind::Registration => {
                    let flow = RegistrationFlow::with_config(backend, session, &context.config);
                    drive(context, flow, prompter).await
                }
                WizardKind::Resume => {
                    drive(context, ResumeFlow::new(backend, session), prompter).await
                }
                WizardKind::School(slot) => {
                    drive(context, SchoolFlow::new(backend, session, slot), prompter).await
                }
            }
        }
    }
}

async fn drive<F: WizardFlow>(
    context: &CliContext,
    flow: F,
    prompter: &mut dyn Prompter,
) -> Result<(), AppError> {
    let store = Arc::new(JsonProgressStore::new(context.state_dir.clone())?);
    let engine = WizardEngine::new(flow, store)?
        .with_notifier(Arc::new(TerminalNotifier))
        .with_navigator(Arc::new(TerminalNavigator));
    let mut files = FileInput::new(context.upload_policy(), Arc::new(TerminalNotifier));

    match run_wizard(&engine, prompter, &mut files).await? {
        SessionEnd::Completed(request) => {
            output::success(format!("Continue at {}", request.route));
        }
        SessionEnd::Suspended { step } => {
            output::info(format!(
                "Progress saved at step {} of {}.",
                step + 1,
                engine.total_steps()
            ));
        }
    }
    Ok(())
}

fn show_config(context: &CliContext) -> Result<(), AppError> {
    output::section("Configuration");
    println!("file: {}", context.config_path.display());
    println!("state: {}", context.state_dir.display());
    let json = serde_json::to_string_pretty(&context.config)
        .map_err(|err| AppError::InvalidArguments(err.to_string()))?;
    println!("{json}");
    Ok(())
}

fn check_file(context: &CliContext, path: PathBuf) -> Result<(), AppError> {
    let file = describe_file(&path)?;
    context.upload_policy().check(&file)?;
    output::success(format!(
        "{} accepted ({}, {} bytes)",
        file.name, file.mime_type, file.size_bytes
    ));
    Ok(())
}

async fn upload_cv(context: &CliContext, email: &str, path: PathBuf) -> Result<(), AppError> {
    let file = describe_file(&path)?;
    let contents = std::fs::read(&path)?;
    let session = context.staff_session().with_email(email);
    let backend = Arc::new(HttpBackend::new(&context.config, &session)?);
    let uploader = CvUploader::new(
        backend,
        context.upload_policy(),
        Arc::new(TerminalNotifier),
    );
    uploader
        .upload(session.email.as_deref(), file, contents)
        .await?;
    Ok(())
}

async fn list_candidates(context: &CliContext) -> Result<(), AppError> {
    let backend = HttpBackend::new(&context.config, &context.staff_session())?;
    let candidates = backend.list_candidates().await?;
    if candidates.is_empty() {
        output::warning("No candidates assigned yet.");
        return Ok(());
    }

    output::section("Assigned candidates");
    println!("{}", roster_table(&candidates).render());
    Ok(())
}

fn roster_table(candidates: &[CandidateSummary]) -> Table {
    let columns = ROSTER_HEADERS
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            let column = TableColumn::new(*header);
            if idx == 0 {
                column
            } else {
                column.max_width(24)
            }
        })
        .collect();
    let rows = candidate_rows(candidates)
        .iter()
        .map(|row| row.cells())
        .collect();
    Table::new(columns, rows)
}

async fn show_sop(context: &CliContext, candidate: String, slot: SchoolSlot) -> Result<(), AppError> {
    let session = context.session(Some(candidate))?;
    let backend = HttpBackend::new(&context.config, &session)?;
    let record = backend.fetch_candidate(session.candidate_id.clone()).await?;
    let sheet = sop_sheet(&record, slot);

    output::section(&sheet.title);
    match sheet.body {
        Some(body) => println!("{}", body.trim()),
        None => output::warning(format!(
            "No SOP drafted for school {} yet.",
            slot.field_suffix()
        )),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn parses_wizard_commands() {
        assert_eq!(Command::parse(&args(&[])).unwrap(), Command::Help);
        assert_eq!(
            Command::parse(&args(&["resume", "cand-7"])).unwrap(),
            Command::Run {
                wizard: WizardKind::Resume,
                candidate: Some("cand-7".into()),
            }
        );
        assert_eq!(
            Command::parse(&args(&["reset", "register"])).unwrap(),
            Command::Reset {
                wizard: WizardKind::Registration
            }
        );
    }

    #[test]
    fn parses_staff_commands() {
        assert_eq!(
            Command::parse(&args(&["school", "cand-2", "school2"])).unwrap(),
            Command::Run {
                wizard: WizardKind::School(SchoolSlot::Second),
                candidate: Some("cand-2".into()),
            }
        );
        assert_eq!(
            Command::parse(&args(&["sop", "cand-2"])).unwrap(),
            Command::Sop {
                candidate: "cand-2".into(),
                slot: SchoolSlot::First,
            }
        );
        assert_eq!(Command::parse(&args(&["candidates"])).unwrap(), Command::Candidates);
        assert_eq!(
            Command::parse(&args(&["reset", "school"])).unwrap(),
            Command::Reset {
                wizard: WizardKind::School(SchoolSlot::First)
            }
        );
    }

    #[test]
    fn roster_table_applies_fallbacks() {
        let candidates = vec![CandidateSummary::default()];
        let rendered = roster_table(&candidates).render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with(" S/N | Student Name"));
        assert!(lines[2].starts_with(" 1   | No name"));
        assert!(lines[2].contains("No school assigned"));
        assert!(lines[2].ends_with("Not available"));
    }

    #[test]
    fn rejects_unknown_commands() {
        let err = Command::parse(&args(&["launch"])).unwrap_err();
        assert!(err.to_string().contains("launch"));
        assert!(Command::parse(&args(&["reset", "launch"])).is_err());
        assert!(Command::parse(&args(&["school", "cand-1", "school3"])).is_err());
    }
}
