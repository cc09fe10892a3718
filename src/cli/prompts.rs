//! Field-by-field collection of a step's values.
//!
//! Answers come from a [`Prompter`]: dialoguer widgets when attached to a
//! terminal, or newline-separated stdin in script mode. Typing `:back`
//! returns to the previous step and `:quit` leaves the wizard with its
//! progress saved.

use std::collections::VecDeque;
use std::io::{self, BufRead};
use std::path::Path;

use dialoguer::{theme::ColorfulTheme, Input, Select};
use pathway_core::schema::{FieldKind, FieldRule};
use pathway_core::upload::mime_for_path;
use pathway_core::{FileInput, StepSchema};
use pathway_domain::{FieldValue, FormValues, SelectedFile};

use crate::cli::output;
use crate::errors::AppError;

pub const BACK: &str = ":back";
pub const QUIT: &str = ":quit";

/// Source of raw answers.
pub trait Prompter {
    fn text(&mut self, prompt: &str, default: Option<&str>) -> Result<String, AppError>;

    fn select(
        &mut self,
        prompt: &str,
        options: &[&'static str],
        default: Option<&str>,
    ) -> Result<String, AppError>;
}

pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Prompter for DialoguerPrompter {
    fn text(&mut self, prompt: &str, default: Option<&str>) -> Result<String, AppError> {
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true);
        if let Some(default) = default.filter(|value| !value.is_empty()) {
            input = input.default(default.to_string());
        }
        Ok(input.interact_text()?)
    }

    fn select(
        &mut self,
        prompt: &str,
        options: &[&'static str],
        default: Option<&str>,
    ) -> Result<String, AppError> {
        let mut items: Vec<&str> = options.to_vec();
        items.push(BACK);
        items.push(QUIT);
        let start = default
            .and_then(|current| options.iter().position(|option| *option == current))
            .unwrap_or(0);
        let index = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(&items)
            .default(start)
            .interact()?;
        Ok(items[index].to_string())
    }
}

/// Reads one answer per line; a blank line keeps the current value.
pub struct ScriptPrompter {
    lines: VecDeque<String>,
}

impl ScriptPrompter {
    pub fn new(lines: impl IntoIterator<Item = String>) -> Self {
        Self {
            lines: lines.into_iter().collect(),
        }
    }

    pub fn from_reader(reader: impl BufRead) -> Result<Self, AppError> {
        let lines = reader.lines().collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(lines))
    }

    fn next_line(&mut self, prompt: &str, default: Option<&str>) -> Result<String, AppError> {
        let line = self.lines.pop_front().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("no scripted answer for `{prompt}`"),
            )
        })?;
        let line = line.trim().to_string();
        match default {
            Some(default) if line.is_empty() => Ok(default.to_string()),
            _ => Ok(line),
        }
    }
}

impl Prompter for ScriptPrompter {
    fn text(&mut self, prompt: &str, default: Option<&str>) -> Result<String, AppError> {
        self.next_line(prompt, default)
    }

    fn select(
        &mut self,
        prompt: &str,
        _options: &[&'static str],
        default: Option<&str>,
    ) -> Result<String, AppError> {
        self.next_line(prompt, default)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StepInput {
    Values(FormValues),
    Back,
    Quit,
}

enum Answer {
    Value(Option<FieldValue>),
    Back,
    Quit,
}

/// Prompts every field the step applies, conditional groups included once
/// their toggle has been answered.
pub fn collect_step(
    prompter: &mut dyn Prompter,
    schema: &StepSchema,
    existing: &FormValues,
    files: &mut FileInput,
) -> Result<StepInput, AppError> {
    let mut values = FormValues::new();

    let groups = schema
        .conditionals
        .iter()
        .map(|group| (Some(group), group.fields.as_slice()));
    for (group, fields) in std::iter::once((None, schema.fields.as_slice())).chain(groups) {
        if group.is_some_and(|group| !group.is_active(&values)) {
            continue;
        }
        for field in fields {
            match ask_field(prompter, field, existing.get(field.key), files)? {
                Answer::Value(Some(value)) => values.insert(field.key, value),
                Answer::Value(None) => {}
                Answer::Back => return Ok(StepInput::Back),
                Answer::Quit => return Ok(StepInput::Quit),
            }
        }
    }

    Ok(StepInput::Values(values))
}

fn ask_field(
    prompter: &mut dyn Prompter,
    field: &FieldRule,
    current: Option<&FieldValue>,
    files: &mut FileInput,
) -> Result<Answer, AppError> {
    let current_text = current.and_then(FieldValue::as_text);
    let raw = match &field.kind {
        FieldKind::Choice(options) => prompter.select(field.label, options, current_text)?,
        FieldKind::Text => prompter.text(&field_prompt(field), current_text)?,
        FieldKind::List => {
            let joined = match current {
                Some(FieldValue::List(items)) => Some(items.join(", ")),
                _ => None,
            };
            let prompt = format!("{} (comma separated)", field_prompt(field));
            prompter.text(&prompt, joined.as_deref())?
        }
        FieldKind::Records(sub_fields) => {
            return ask_records(prompter, field, sub_fields, current, files)
        }
        FieldKind::File => {
            let prompt = format!("{} (path, blank to skip)", field.label);
            let raw = prompter.text(&prompt, None)?;
            return Ok(match control(&raw) {
                Some(answer) => answer,
                None => Answer::Value(pick_file(files, raw.trim())),
            });
        }
    };

    if let Some(answer) = control(&raw) {
        return Ok(answer);
    }
    Ok(Answer::Value(match &field.kind {
        FieldKind::List => Some(FieldValue::List(split_list(&raw))),
        _ => Some(FieldValue::Text(raw)),
    }))
}

fn ask_records(
    prompter: &mut dyn Prompter,
    field: &FieldRule,
    sub_fields: &[FieldRule],
    current: Option<&FieldValue>,
    files: &mut FileInput,
) -> Result<Answer, AppError> {
    let existing: &[FormValues] = match current {
        Some(FieldValue::Records(records)) => records,
        _ => &[],
    };
    let prompt = format!("How many entries for {}?", field.label);
    let default_count = existing.len().to_string();
    let raw = prompter.text(&prompt, Some(&default_count))?;
    if let Some(answer) = control(&raw) {
        return Ok(answer);
    }
    let count = raw.trim().parse::<usize>().unwrap_or(0);

    let mut records = Vec::with_capacity(count);
    for index in 0..count {
        output::info(format!("{} {} of {}", field.label, index + 1, count));
        let previous = existing.get(index);
        let mut record = FormValues::new();
        for sub in sub_fields {
            let current = previous.and_then(|record| record.get(sub.key));
            match ask_field(prompter, sub, current, files)? {
                Answer::Value(Some(value)) => record.insert(sub.key, value),
                Answer::Value(None) => {}
                other => return Ok(other),
            }
        }
        records.push(record);
    }
    Ok(Answer::Value(Some(FieldValue::Records(records))))
}

fn field_prompt(field: &FieldRule) -> String {
    if field.optional {
        format!("{} (optional)", field.label)
    } else {
        field.label.to_string()
    }
}

fn control(raw: &str) -> Option<Answer> {
    match raw.trim() {
        BACK => Some(Answer::Back),
        QUIT => Some(Answer::Quit),
        _ => None,
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Describes the file at `path`, or `None` when the path is blank, unreadable
/// or rejected by the upload policy.
fn pick_file(files: &mut FileInput, path: &str) -> Option<FieldValue> {
    if path.is_empty() {
        return None;
    }
    let file = describe_file(Path::new(path)).ok()?;
    let value = files.select(file).ok().cloned().map(FieldValue::File);
    files.clear();
    value
}

pub fn describe_file(path: &Path) -> io::Result<SelectedFile> {
    let metadata = std::fs::metadata(path)?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(SelectedFile::new(name, mime_for_path(path), metadata.len()))
}
