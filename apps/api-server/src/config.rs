//! Environment configuration for the notification API server.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};

pub struct ServerConfig {
    pub telegram_token: String,
    pub bind_addr: SocketAddr,
    pub request_timeout: Duration,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        let telegram_token =
            std::env::var("TELEGRAM_BOT_TOKEN").context("TELEGRAM_BOT_TOKEN is not set")?;
        let bind_addr = std::env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8000".to_string())
            .parse()
            .context("invalid BIND_ADDR")?;
        let timeout_secs = match std::env::var("UPSTREAM_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("invalid UPSTREAM_TIMEOUT_SECS: {raw}"))?,
            Err(_) => 30,
        };
        Ok(Self {
            telegram_token,
            bind_addr,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
