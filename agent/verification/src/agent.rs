//! Verification flow: admission check, upstream login, code request.

use std::time::Duration;

use placeandplay::{PlaceAndPlayClient, UpstreamSession};
use thiserror::Error;

use crate::config::VerificationAgentConfig;
use crate::guard::{Admission, AttemptGuard};
use crate::types::IssuedCode;

/// Errors surfaced by a verification flow.
#[derive(Debug, Error)]
pub enum VerificationError {
    /// The attempt guard rejected the request
    #[error("attempt limit exceeded, retry in {}s", retry_after.as_secs())]
    RateLimited { retry_after: Duration },

    /// Login or session tokens were rejected upstream
    #[error("upstream authentication failed")]
    UpstreamAuth(#[source] placeandplay::Error),

    /// Any other upstream failure
    #[error("upstream request failed")]
    Upstream(#[source] placeandplay::Error),
}

/// Drives one verification request end to end.
///
/// Owns the attempt guard and the service credentials; the API client is
/// injected so the same shared HTTP client serves the whole process.
pub struct VerificationAgent {
    api: PlaceAndPlayClient,
    guard: AttemptGuard,
    login_phone_number: String,
    login_password: String,
}

impl VerificationAgent {
    pub fn new(config: VerificationAgentConfig, api: PlaceAndPlayClient) -> Self {
        Self {
            api,
            guard: AttemptGuard::new(config.max_attempts, config.cooldown),
            login_phone_number: config.login_phone_number,
            login_password: config.login_password,
        }
    }

    /// Requests a verification code for `phone_number`, rate-limited per
    /// `identifier` (the caller picks a stable key, e.g. the chat id).
    ///
    /// Obtains fresh session tokens on every call; the session is dropped
    /// once the code has been fetched.
    pub async fn issue_code(
        &self,
        identifier: &str,
        phone_number: &str,
    ) -> Result<IssuedCode, VerificationError> {
        let attempt = match self.guard.check_and_record(identifier) {
            Admission::Rejected { retry_after } => {
                tracing::warn!(
                    identifier,
                    retry_after_secs = retry_after.as_secs(),
                    "verification attempt rejected by guard"
                );
                return Err(VerificationError::RateLimited { retry_after });
            }
            Admission::Allowed { attempt } => attempt,
        };
        tracing::info!(
            identifier,
            attempt,
            max_attempts = self.guard.max_attempts(),
            "processing verification request"
        );

        let session: UpstreamSession = self
            .api
            .login(&self.login_phone_number, &self.login_password)
            .await
            .map_err(classify)?;
        let code = self
            .api
            .request_verification_code(&session, phone_number)
            .await
            .map_err(classify)?;

        Ok(IssuedCode {
            code,
            attempt,
            max_attempts: self.guard.max_attempts(),
        })
    }

    pub fn max_attempts(&self) -> u32 {
        self.guard.max_attempts()
    }
}

fn classify(err: placeandplay::Error) -> VerificationError {
    match err {
        e @ placeandplay::Error::Auth => VerificationError::UpstreamAuth(e),
        other => VerificationError::Upstream(other),
    }
}
