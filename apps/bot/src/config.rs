//! Environment configuration for the verification bot.

use std::time::Duration;

use anyhow::{Context, Result};
use url::Url;

const DEFAULT_BASE_URL: &str = "http://95.46.96.94:8080/PlaceAndPlay/api";

pub struct BotConfig {
    pub telegram_token: String,
    pub api_base_url: String,
    pub language: String,
    pub login_phone_number: String,
    pub login_password: String,
    pub max_attempts: u32,
    pub cooldown: Duration,
    pub upstream_timeout: Duration,
}

impl BotConfig {
    pub fn from_env() -> Result<Self> {
        let api_base_url = std::env::var("PLACE_AND_PLAY_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Url::parse(&api_base_url)
            .with_context(|| format!("invalid PLACE_AND_PLAY_API_BASE_URL: {api_base_url}"))?;

        Ok(Self {
            telegram_token: require("TELEGRAM_BOT_TOKEN")?,
            api_base_url,
            language: std::env::var("PLACE_AND_PLAY_LANGUAGE").unwrap_or_else(|_| "en".to_string()),
            login_phone_number: require("PLACE_AND_PLAY_LOGIN_PHONE")?,
            login_password: require("PLACE_AND_PLAY_LOGIN_PASSWORD")?,
            max_attempts: parse_var("MAX_VERIFICATION_ATTEMPTS", 5)?,
            cooldown: Duration::from_secs(parse_var("ATTEMPT_COOLDOWN_SECS", 600)?),
            upstream_timeout: Duration::from_secs(parse_var("UPSTREAM_TIMEOUT_SECS", 30)?),
        })
    }
}

fn require(name: &str) -> Result<String> {
    std::env::var(name).with_context(|| format!("{name} is not set"))
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(raw) => raw.parse().with_context(|| format!("invalid {name}: {raw}")),
        Err(_) => Ok(default),
    }
}
