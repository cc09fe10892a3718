//! Declarative per-step validation.
//!
//! A [`StepSchema`] lists the fields a step collects together with their
//! constraints. Validation is pure: it looks only at the submitted values and
//! reports, for each offending field, the message of the first constraint it
//! violates. Conditional groups are evaluated against the whole payload so a
//! toggle field can switch a block of sub-fields between ignored and required.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use pathway_domain::{FieldValue, FormValues};
use regex::Regex;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+'-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
            .expect("email pattern compiles")
    })
}

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*://[^\s/?#]+[^\s]*$").expect("url pattern compiles")
    })
}

/// How a field is collected. Drives prompting and which value shape is valid.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    Choice(&'static [&'static str]),
    /// Free list of short strings.
    List,
    /// Repeated group of sub-fields.
    Records(Vec<FieldRule>),
    File,
}

/// Single constraint attached to a field.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    Required(&'static str),
    MinLen(usize, &'static str),
    MaxLen(usize, &'static str),
    Email(&'static str),
    Url(&'static str),
    OneOf(&'static [&'static str]),
    IntRange {
        min: i64,
        max: i64,
        below: &'static str,
        above: &'static str,
    },
    MinItems(usize, &'static str),
    EachMinLen(usize, &'static str),
    File(&'static str),
}

impl Rule {
    fn check(&self, value: Option<&FieldValue>) -> Result<(), String> {
        let text = value.and_then(FieldValue::as_text).unwrap_or_default();
        match self {
            Rule::Required(message) => {
                if value.map_or(true, FieldValue::is_blank) {
                    Err((*message).to_string())
                } else {
                    Ok(())
                }
            }
            Rule::MinLen(min, message) => {
                if text.trim().chars().count() < *min {
                    Err((*message).to_string())
                } else {
                    Ok(())
                }
            }
            Rule::MaxLen(max, message) => {
                if text.trim().chars().count() > *max {
                    Err((*message).to_string())
                } else {
                    Ok(())
                }
            }
            Rule::Email(message) => {
                if email_pattern().is_match(text.trim()) {
                    Ok(())
                } else {
                    Err((*message).to_string())
                }
            }
            Rule::Url(message) => {
                if url_pattern().is_match(text.trim()) {
                    Ok(())
                } else {
                    Err((*message).to_string())
                }
            }
            Rule::OneOf(options) => {
                if options.iter().any(|option| *option == text.trim()) {
                    Ok(())
                } else {
                    Err(format!("Expected one of: {}", options.join(", ")))
                }
            }
            Rule::IntRange {
                min,
                max,
                below,
                above,
            } => {
                let parsed = text.trim().parse::<i64>().map_err(|_| below.to_string())?;
                if parsed < *min {
                    Err((*below).to_string())
                } else if parsed > *max {
                    Err((*above).to_string())
                } else {
                    Ok(())
                }
            }
            Rule::MinItems(min, message) => {
                let count = match value {
                    Some(FieldValue::List(items)) => items.len(),
                    Some(FieldValue::Records(items)) => items.len(),
                    _ => 0,
                };
                if count < *min {
                    Err((*message).to_string())
                } else {
                    Ok(())
                }
            }
            Rule::EachMinLen(min, message) => match value {
                Some(FieldValue::List(items))
                    if items.iter().any(|item| item.trim().chars().count() < *min) =>
                {
                    Err((*message).to_string())
                }
                _ => Ok(()),
            },
            Rule::File(message) => match value {
                None | Some(FieldValue::File(_)) => Ok(()),
                Some(_) => Err((*message).to_string()),
            },
        }
    }
}

/// Declarative description of a single form field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub optional: bool,
    pub rules: Vec<Rule>,
}

impl FieldRule {
    pub fn text(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::Text,
            optional: false,
            rules: Vec::new(),
        }
    }

    pub fn list(key: &'static str, label: &'static str) -> Self {
        Self {
            kind: FieldKind::List,
            ..Self::text(key, label)
        }
    }

    pub fn records(key: &'static str, label: &'static str, fields: Vec<FieldRule>) -> Self {
        Self {
            kind: FieldKind::Records(fields),
            ..Self::text(key, label)
        }
    }

    /// Optional document slot; anything other than a selected file is rejected.
    pub fn file(key: &'static str, label: &'static str) -> Self {
        Self {
            kind: FieldKind::File,
            optional: true,
            rules: vec![Rule::File("Invalid file")],
            ..Self::text(key, label)
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn required(self, message: &'static str) -> Self {
        self.rule(Rule::Required(message))
    }

    pub fn min_len(self, min: usize, message: &'static str) -> Self {
        self.rule(Rule::MinLen(min, message))
    }

    pub fn max_len(self, max: usize, message: &'static str) -> Self {
        self.rule(Rule::MaxLen(max, message))
    }

    pub fn email(self, message: &'static str) -> Self {
        self.rule(Rule::Email(message))
    }

    pub fn url(self, message: &'static str) -> Self {
        self.rule(Rule::Url(message))
    }

    /// Offers `options` when prompting without restricting accepted values.
    pub fn choice(mut self, options: &'static [&'static str]) -> Self {
        self.kind = FieldKind::Choice(options);
        self
    }

    /// Restricts the value to one of `options`.
    pub fn one_of(self, options: &'static [&'static str]) -> Self {
        self.choice(options).rule(Rule::OneOf(options))
    }

    pub fn int_range(self, min: i64, max: i64, below: &'static str, above: &'static str) -> Self {
        self.rule(Rule::IntRange {
            min,
            max,
            below,
            above,
        })
    }

    pub fn min_items(self, min: usize, message: &'static str) -> Self {
        self.rule(Rule::MinItems(min, message))
    }

    pub fn each_min_len(self, min: usize, message: &'static str) -> Self {
        self.rule(Rule::EachMinLen(min, message))
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    fn validate_into(&self, prefix: &str, values: &FormValues, errors: &mut FieldErrors) {
        let path = format!("{prefix}{}", self.key);
        let value = values.get(self.key);
        if self.optional && value.map_or(true, FieldValue::is_blank) {
            return;
        }

        if let Some(message) = self.rules.iter().find_map(|rule| rule.check(value).err()) {
            errors.insert(path, message);
            return;
        }

        if let (FieldKind::Records(fields), Some(FieldValue::Records(items))) = (&self.kind, value) {
            for (index, item) in items.iter().enumerate() {
                let nested = format!("{path}.{index}.");
                for field in fields {
                    field.validate_into(&nested, item, errors);
                }
            }
        }
    }
}

/// Block of fields that only apply when `toggle` equals `equals`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalGroup {
    pub toggle: &'static str,
    pub equals: &'static str,
    pub fields: Vec<FieldRule>,
}

impl ConditionalGroup {
    pub fn is_active(&self, values: &FormValues) -> bool {
        values.text(self.toggle).trim() == self.equals
    }
}

/// Validation rules for one wizard step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepSchema {
    pub fields: Vec<FieldRule>,
    pub conditionals: Vec<ConditionalGroup>,
}

impl StepSchema {
    pub fn new(fields: Vec<FieldRule>) -> Self {
        Self {
            fields,
            conditionals: Vec::new(),
        }
    }

    pub fn when(
        mut self,
        toggle: &'static str,
        equals: &'static str,
        fields: Vec<FieldRule>,
    ) -> Self {
        self.conditionals.push(ConditionalGroup {
            toggle,
            equals,
            fields,
        });
        self
    }

    /// Every field key the step collects, conditional ones included.
    pub fn field_keys(&self) -> Vec<&'static str> {
        self.fields
            .iter()
            .chain(self.conditionals.iter().flat_map(|group| group.fields.iter()))
            .map(|field| field.key)
            .collect()
    }

    /// Fields that apply to `values`, in collection order.
    pub fn active_fields<'a>(&'a self, values: &FormValues) -> Vec<&'a FieldRule> {
        let mut active: Vec<&FieldRule> = self.fields.iter().collect();
        for group in &self.conditionals {
            if group.is_active(values) {
                active.extend(group.fields.iter());
            }
        }
        active
    }

    pub fn validate(&self, values: &FormValues) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        for field in self.active_fields(values) {
            field.validate_into("", values, &mut errors);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Field path to the first violated constraint's message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(field, message)| (field.as_str(), message.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect();
        f.write_str(&rendered.join("; "))
    }
}
