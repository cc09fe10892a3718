use pathway_core::{
    FileInput, NavigationRequest, StepOutcome, StepView, WizardEngine, WizardError, WizardFlow,
};
use tokio::time::sleep;
use tracing::debug;

use crate::cli::output;
use crate::cli::prompts::{collect_step, Prompter, StepInput};
use crate::errors::AppError;

/// How a terminal wizard session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    Completed(NavigationRequest),
    /// Left with `:quit`; progress stays saved.
    Suspended { step: usize },
}

/// Drives `engine` until the final step is submitted or the user quits.
pub async fn run_wizard<F: WizardFlow>(
    engine: &WizardEngine<F>,
    prompter: &mut dyn Prompter,
    files: &mut FileInput,
) -> Result<SessionEnd, AppError> {
    loop {
        let view = engine.view();
        output::step_header(&view);
        if view.show_back() {
            output::info("Type :back to return to the previous step, :quit to stop.");
        }

        let existing = engine.snapshot().data;
        let schema = &engine.current_definition().schema;
        let values = match collect_step(prompter, schema, &existing, files)? {
            StepInput::Values(values) => values,
            StepInput::Back => {
                engine.retreat()?;
                continue;
            }
            StepInput::Quit => {
                return Ok(SessionEnd::Suspended {
                    step: engine.current_step(),
                })
            }
        };

        output::info(saving_label(&view));
        match engine.submit_step(values).await {
            Ok(StepOutcome::Advanced { from, to }) => {
                debug!(from, to, "step accepted");
            }
            Ok(StepOutcome::Completed(request)) => {
                sleep(request.delay).await;
                engine.finish_navigation();
                return Ok(SessionEnd::Completed(request));
            }
            Err(WizardError::Validation(errors)) => {
                for (field, message) in errors.iter() {
                    output::error(format!("{field}: {message}"));
                }
            }
            // Already reported through the notifier; the step can be retried.
            Err(WizardError::Dispatch(_)) => {}
            Err(err) => return Err(err.into()),
        }
    }
}

fn saving_label(view: &StepView) -> &'static str {
    StepView {
        in_flight: true,
        ..view.clone()
    }
    .submit_label()
}
