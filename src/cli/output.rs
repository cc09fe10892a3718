use colored::Colorize;
use pathway_core::StepView;
use std::fmt;
use std::sync::{OnceLock, RwLock};

const PROGRESS_WIDTH: usize = 40;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Section,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct OutputPreferences {
    /// No colors; labels only.
    pub plain_mode: bool,
    pub quiet_mode: bool,
}

static PREFERENCES: OnceLock<RwLock<OutputPreferences>> = OnceLock::new();

pub fn set_preferences(prefs: OutputPreferences) {
    let lock = PREFERENCES.get_or_init(|| RwLock::new(OutputPreferences::default()));
    if let Ok(mut guard) = lock.write() {
        *guard = prefs;
    }
}

fn preferences() -> OutputPreferences {
    PREFERENCES
        .get_or_init(|| RwLock::new(OutputPreferences::default()))
        .read()
        .map(|guard| *guard)
        .unwrap_or_default()
}

fn build_label(kind: MessageKind) -> (&'static str, &'static str) {
    match kind {
        MessageKind::Info => ("INFO", "[i]"),
        MessageKind::Success => ("SUCCESS", "[✓]"),
        MessageKind::Warning => ("WARNING", "[!]"),
        MessageKind::Error => ("ERROR", "[x]"),
        MessageKind::Section => ("INFO", ""),
    }
}

fn apply_style(kind: MessageKind, message: impl fmt::Display, prefs: &OutputPreferences) -> String {
    let text = message.to_string();

    let formatted = match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()),
        _ => {
            let (label, icon) = build_label(kind);
            format!("{label}: {icon} {text}")
        }
    };

    if prefs.plain_mode {
        return formatted;
    }

    match kind {
        MessageKind::Success => formatted.bright_green().to_string(),
        MessageKind::Warning => formatted.bright_yellow().to_string(),
        MessageKind::Error => formatted.bright_red().to_string(),
        MessageKind::Section => formatted.bold().to_string(),
        MessageKind::Info => formatted,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let prefs = preferences();
    if prefs.quiet_mode && kind == MessageKind::Info {
        return;
    }
    let formatted = apply_style(kind, message, &prefs);
    match kind {
        MessageKind::Section => println!("\n{}", formatted),
        _ => println!("{}", formatted),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

/// `Step i of N [####----] 40%`
pub fn progress_line(view: &StepView) -> String {
    format!(
        "{} {} {:.0}%",
        view.position_label(),
        view.progress_bar(PROGRESS_WIDTH),
        view.progress_percent()
    )
}

/// Header printed above each step's prompts.
pub fn step_header(view: &StepView) {
    section(view.title);
    println!("{}", progress_line(view));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_labels_carry_no_escape_codes() {
        let prefs = OutputPreferences {
            plain_mode: true,
            quiet_mode: false,
        };
        assert_eq!(
            apply_style(MessageKind::Error, "Surname is required", &prefs),
            "ERROR: [x] Surname is required"
        );
        assert_eq!(
            apply_style(MessageKind::Section, " WORK EXPERIENCE ", &prefs),
            "=== WORK EXPERIENCE ==="
        );
    }

    #[test]
    fn progress_line_matches_layout() {
        let view = StepView {
            title: "EDUCATION DETAILS",
            index: 1,
            total: 5,
            in_flight: false,
            submitted: false,
        };
        insta::assert_snapshot!(
            progress_line(&view),
            @"Step 2 of 5 [################------------------------] 40%"
        );
    }
}
