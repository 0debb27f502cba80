//! Notification API server: lets the Place&Play backend push messages into
//! Telegram chats and resolve usernames to chat ids.

mod config;
mod routes;

use std::sync::Arc;

use anyhow::Result;
use axum::routing::{get, post};
use axum::Router;
use clients_telegrambot::TelegramBot;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ServerConfig;
use crate::routes::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = ServerConfig::from_env()?;
    let client = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()?;
    let telegram = Arc::new(TelegramBot::new(client, config.telegram_token.clone()));

    let app = Router::new()
        .route("/health", get(routes::health))
        .route("/api/v1/sendNotification", post(routes::send_notification))
        .route("/api/v1/getChatId", post(routes::get_chat_id))
        .with_state(AppState { telegram });

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!("notification API listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
