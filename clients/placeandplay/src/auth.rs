use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;

use crate::config::PlaceAndPlayClientConfig;
use crate::error::{Error, Result};
use crate::types::UpstreamSession;
use crate::utils;

const USER_AGENT: &str = "PlaceAndPlay-TelegramBot/1.0";

/// Client for the Place&Play authentication/verification API.
pub struct PlaceAndPlayClient {
    client: reqwest::Client,
    base_url: String,
    language: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    phone_number: &'a str,
    password: &'a str,
}

impl PlaceAndPlayClient {
    pub fn new(client: reqwest::Client, config: PlaceAndPlayClientConfig) -> Self {
        Self {
            client,
            base_url: config.base_url,
            language: config.language,
        }
    }

    /// Logs in with the service account and returns the session tokens.
    ///
    /// The login endpoint accepts an email address in the `phoneNumber`
    /// field; that is how the service account is registered upstream.
    pub async fn login(&self, phone_number: &str, password: &str) -> Result<UpstreamSession> {
        let url = format!("{}/auth/login", self.base_url);
        let body = LoginRequest {
            phone_number,
            password,
        };
        let response = self
            .client
            .post(&url)
            .json(&body)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header("isUser", "true")
            .header("language", &self.language)
            .send()
            .await?;

        let payload = check_status(response).await?;
        let envelope_ok = payload.get("status").and_then(Value::as_i64) == Some(200);
        let tokens = payload.get("result");
        let access_token = tokens
            .and_then(|r| r.get("accessToken"))
            .and_then(Value::as_str);
        let refresh_token = tokens
            .and_then(|r| r.get("refreshToken"))
            .and_then(Value::as_str);

        match (envelope_ok, access_token, refresh_token) {
            (true, Some(access), Some(refresh)) => {
                tracing::debug!("obtained Place&Play session tokens");
                Ok(UpstreamSession {
                    access_token: access.to_string(),
                    refresh_token: refresh.to_string(),
                })
            }
            _ => Err(Error::UnexpectedResponse(payload.to_string())),
        }
    }

    /// Requests a verification code for the given phone number.
    pub async fn request_verification_code(
        &self,
        session: &UpstreamSession,
        phone_number: &str,
    ) -> Result<String> {
        let url = format!("{}/auth/phoneNumberVerification", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("phoneNumber", phone_number)])
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header("isUser", "true")
            .header("language", &self.language)
            .header("accessToken", &session.access_token)
            .header("refreshToken", &session.refresh_token)
            .send()
            .await?;

        let payload = check_status(response).await?;
        match utils::extract_code(&payload) {
            Some(code) => {
                tracing::debug!(phone_number, "verification code received");
                Ok(code)
            }
            None => Err(Error::UnexpectedResponse(payload.to_string())),
        }
    }
}

/// Maps HTTP-level failures and parses the JSON body of a success response.
async fn check_status(response: reqwest::Response) -> Result<Value> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return Err(Error::Auth);
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Api {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.json().await?)
}
