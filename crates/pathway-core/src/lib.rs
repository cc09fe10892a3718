//! pathway-core
//!
//! Wizard progression, step schemas and submission dispatch for the
//! candidate onboarding flows. Depends on pathway-domain. No terminal I/O,
//! no HTTP client, no direct file access; those arrive through the ports in
//! [`backend`], [`storage`] and [`notify`].

pub mod backend;
pub mod dispatch;
pub mod error;
pub mod notify;
pub mod roster;
pub mod schema;
pub mod sop;
pub mod steps;
pub mod storage;
pub mod upload;
pub mod view;
pub mod wizard;

pub use backend::CandidateBackend;
pub use dispatch::{NavigationRequest, RegistrationFlow, ResumeFlow, SchoolFlow, WizardFlow};
pub use error::{BackendError, StorageError, UploadError, WizardError};
pub use notify::{Navigator, Notification, NotificationKind, Notifier};
pub use roster::{candidate_rows, CandidateRow, ROSTER_HEADERS};
pub use schema::{FieldErrors, FieldKind, FieldRule, StepSchema};
pub use sop::{sop_sheet, SopSheet};
pub use steps::{RegistrationStep, ResumeStep, SchoolStep, StepDefinition};
pub use storage::{MemoryProgressStore, ProgressStore};
pub use upload::{CvUploader, FileInput, UploadPolicy};
pub use view::StepView;
pub use wizard::{StepOutcome, WizardEngine, WizardPhase, WizardState};
