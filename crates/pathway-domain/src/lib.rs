//! pathway-domain
//!
//! Plain data carried through the onboarding wizards: collected form values,
//! the payload shapes the backend expects, and the session identity.
//! No I/O, no validation, no network.

pub mod candidate;
pub mod form;
pub mod payloads;
pub mod session;

pub use candidate::*;
pub use form::*;
pub use payloads::*;
pub use session::*;
