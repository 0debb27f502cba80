//! Phone-verification agent crate.
//!
//! Combines per-identifier admission control with the Place&Play
//! login-then-request-code flow.

pub mod config;
mod agent;
mod guard;
mod types;

pub use agent::{VerificationAgent, VerificationError};
pub use config::VerificationAgentConfig;
pub use guard::{Admission, AttemptGuard};
pub use types::IssuedCode;
