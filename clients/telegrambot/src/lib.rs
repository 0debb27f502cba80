use serde::{Deserialize, Serialize};
use thiserror::Error;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Result type alias using the Telegram client [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the Telegram Bot API client.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested chat (username) does not exist or has never talked to the bot.
    #[error("chat not found")]
    ChatNotFound,
    /// The Bot API answered with `ok: false`.
    #[error("Telegram API error: {0}")]
    Api(String),
    /// Transport failure.
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Client for outbound calls to the Telegram Bot API.
pub struct TelegramBot {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: i64,
    text: &'a str,
    parse_mode: &'a str,
}

#[derive(Serialize)]
struct GetChatRequest {
    chat_id: String,
}

/// Bot API response envelope: `{"ok": bool, "result": ..., "description": ...}`.
#[derive(Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Deserialize)]
struct Chat {
    id: i64,
}

impl TelegramBot {
    /// Creates a new `TelegramBot` with the given shared HTTP client and API key.
    pub fn new(client: reqwest::Client, api_key: String) -> Self {
        Self {
            client,
            api_key,
            base_url: TELEGRAM_API_BASE.to_string(),
        }
    }

    /// Sends an HTML-formatted text message to the given chat.
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        let url = format!("{}/bot{}/sendMessage", self.base_url, self.api_key);
        let body = SendMessageRequest {
            chat_id,
            text,
            parse_mode: "HTML",
        };
        let response: ApiResponse<serde_json::Value> = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await?
            .json()
            .await?;
        if response.ok {
            tracing::debug!(chat_id, "message delivered");
            Ok(())
        } else {
            Err(api_error(response.description))
        }
    }

    /// Resolves a Telegram username (without the leading `@`) to its chat id.
    pub async fn get_chat_id(&self, username: &str) -> Result<i64> {
        let url = format!("{}/bot{}/getChat", self.base_url, self.api_key);
        let body = GetChatRequest {
            chat_id: format!("@{}", username),
        };
        let response: ApiResponse<Chat> = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await?
            .json()
            .await?;
        match response {
            ApiResponse {
                ok: true,
                result: Some(chat),
                ..
            } => Ok(chat.id),
            ApiResponse { description, .. } => Err(api_error(description)),
        }
    }
}

/// Telegram reports unknown chats as a plain `ok: false` with a
/// "chat not found" description rather than a dedicated error code.
fn api_error(description: Option<String>) -> Error {
    let description = description.unwrap_or_else(|| "no description".to_string());
    if description.to_lowercase().contains("not found") {
        Error::ChatNotFound
    } else {
        Error::Api(description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_description_maps_to_chat_not_found() {
        let err = api_error(Some("Bad Request: chat not found".to_string()));
        assert!(matches!(err, Error::ChatNotFound));
    }

    #[test]
    fn other_descriptions_map_to_api_error() {
        let err = api_error(Some("Unauthorized".to_string()));
        assert!(matches!(err, Error::Api(d) if d == "Unauthorized"));
    }

    #[test]
    fn missing_description_maps_to_api_error() {
        assert!(matches!(api_error(None), Error::Api(_)));
    }
}
