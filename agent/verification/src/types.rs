//! Shared types for the verification agent.

/// Result of a successful verification flow, relayed to the end user.
#[derive(Debug, Clone)]
pub struct IssuedCode {
    /// Short-lived code issued by the upstream system
    pub code: String,
    /// 1-based attempt number within the current window
    pub attempt: u32,
    /// Configured attempt limit, for display alongside `attempt`
    pub max_attempts: u32,
}
