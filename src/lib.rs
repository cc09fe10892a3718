#![doc(test(attr(deny(warnings))))]

//! Pathway drives the candidate onboarding wizards: registration and resume
//! refinement, backed by the onboarding REST API and a local progress file.

pub mod cli;
pub mod errors;
pub mod http;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Pathway tracing initialized.");
    });
}
