//! Configuration types for the verification agent.

use std::time::Duration;

/// Configuration for VerificationAgent (parameters only; the API client is
/// passed to `VerificationAgent::new`).
pub struct VerificationAgentConfig {
    /// Service account the agent logs in with (the upstream accepts an email
    /// address in its phone-number field)
    pub login_phone_number: String,
    /// Service account password
    pub login_password: String,
    /// Maximum admitted attempts per identifier within one cool-down window
    pub max_attempts: u32,
    /// Cool-down window length; also the lockout duration once the limit is exceeded
    pub cooldown: Duration,
}
