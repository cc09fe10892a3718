pub mod commands;
pub mod context;
pub mod help;
pub mod output;
pub mod ports;
pub mod prompts;
pub mod runner;
pub mod table;

use std::io;

use crate::cli::commands::{execute, Command};
use crate::cli::context::{CliContext, CliMode};
use crate::cli::output::OutputPreferences;
use crate::cli::prompts::{DialoguerPrompter, Prompter, ScriptPrompter};
use crate::errors::AppError;

/// Parses `args` (without the program name) and runs the command.
pub async fn run_cli(args: Vec<String>) -> Result<(), AppError> {
    let command = Command::parse(&args)?;
    let mode = CliMode::from_env();
    if mode == CliMode::Script {
        output::set_preferences(OutputPreferences {
            plain_mode: true,
            quiet_mode: false,
        });
    }

    if command == Command::Help {
        help::print_overview();
        return Ok(());
    }

    let context = CliContext::load(mode)?;
    let mut prompter: Box<dyn Prompter> = match mode {
        CliMode::Interactive => Box::new(DialoguerPrompter::default()),
        CliMode::Script => Box::new(ScriptPrompter::from_reader(io::stdin().lock())?),
    };
    execute(command, &context, prompter.as_mut()).await
}
