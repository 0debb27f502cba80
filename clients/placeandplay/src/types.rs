/// Session tokens obtained from the Place&Play login endpoint.
///
/// Held only for the duration of one verification flow; there is no
/// long-lived session cache.
#[derive(Debug, Clone)]
pub struct UpstreamSession {
    pub access_token: String,
    pub refresh_token: String,
}
