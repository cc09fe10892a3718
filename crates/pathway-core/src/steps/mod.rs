//! Ordered step tables for each wizard.
//!
//! Each wizard names its steps with an enum and resolves the table of
//! `(step, title, schema)` once, when the flow is built. Order is traversal
//! order.

pub mod registration;
pub mod resume;
pub mod school;

use std::fmt;

use crate::schema::StepSchema;

pub use registration::{registration_steps, RegistrationStep};
pub use resume::{resume_steps, ResumeStep};
pub use school::{school_form_schema, school_steps, SchoolStep};

/// One entry of a wizard's step table.
#[derive(Debug, Clone, PartialEq)]
pub struct StepDefinition<S> {
    pub step: S,
    pub title: &'static str,
    pub schema: StepSchema,
}

impl<S> StepDefinition<S> {
    pub fn new(step: S, title: &'static str, schema: StepSchema) -> Self {
        Self {
            step,
            title,
            schema,
        }
    }
}

/// Marker for enums used as step tags.
pub trait StepTag: Copy + Eq + fmt::Debug + Send + Sync + 'static {}

impl<T> StepTag for T where T: Copy + Eq + fmt::Debug + Send + Sync + 'static {}
