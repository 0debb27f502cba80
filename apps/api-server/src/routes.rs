//! HTTP routes: push a notification into a chat, resolve a username.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use clients_telegrambot::{Error as TelegramError, TelegramBot};
use serde::{Deserialize, Serialize};

#[derive(Clone)]
pub struct AppState {
    pub telegram: Arc<TelegramBot>,
}

#[derive(Debug, Deserialize)]
pub struct NotificationRequest {
    pub message: String,
    #[serde(rename = "chatId")]
    pub chat_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct ChatIdRequest {
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct ChatIdResponse {
    #[serde(rename = "chatId")]
    pub chat_id: i64,
}

#[derive(Debug, Serialize)]
pub struct StatusBody {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorBody>);

pub async fn health() -> Json<StatusBody> {
    Json(StatusBody { status: "healthy" })
}

pub async fn send_notification(
    State(state): State<AppState>,
    Json(request): Json<NotificationRequest>,
) -> Result<Json<StatusBody>, ApiError> {
    if request.message.trim().is_empty() {
        return Err(bad_request("message must not be empty"));
    }
    tracing::info!(chat_id = request.chat_id, "forwarding notification");
    state
        .telegram
        .send_message(request.chat_id, &request.message)
        .await
        .map_err(telegram_error)?;
    Ok(Json(StatusBody { status: "ok" }))
}

pub async fn get_chat_id(
    State(state): State<AppState>,
    Json(request): Json<ChatIdRequest>,
) -> Result<Json<ChatIdResponse>, ApiError> {
    let username = normalize_username(&request.username);
    if username.is_empty() {
        return Err(bad_request("username must not be empty"));
    }
    let chat_id = state
        .telegram
        .get_chat_id(username)
        .await
        .map_err(telegram_error)?;
    Ok(Json(ChatIdResponse { chat_id }))
}

/// Callers may pass the username with or without the leading `@`.
fn normalize_username(raw: &str) -> &str {
    raw.trim().trim_start_matches('@')
}

fn bad_request(message: &str) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
}

fn telegram_error(err: TelegramError) -> ApiError {
    match err {
        TelegramError::ChatNotFound => (
            StatusCode::NOT_FOUND,
            Json(ErrorBody {
                error: "chat not found".to_string(),
            }),
        ),
        other => {
            tracing::error!(error = %other, "telegram call failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorBody {
                    error: "telegram call failed".to_string(),
                }),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_request_uses_camel_case_chat_id() {
        let request: NotificationRequest =
            serde_json::from_str(r#"{"message": "hi", "chatId": 42}"#).unwrap();
        assert_eq!(request.chat_id, 42);
        assert_eq!(request.message, "hi");
    }

    #[test]
    fn chat_id_response_serializes_camel_case() {
        let body = serde_json::to_string(&ChatIdResponse { chat_id: 7 }).unwrap();
        assert_eq!(body, r#"{"chatId":7}"#);
    }

    #[test]
    fn status_body_matches_wire_format() {
        let body = serde_json::to_string(&StatusBody { status: "ok" }).unwrap();
        assert_eq!(body, r#"{"status":"ok"}"#);
    }

    #[test]
    fn username_normalization_strips_at_sign() {
        assert_eq!(normalize_username("@someone"), "someone");
        assert_eq!(normalize_username("  someone "), "someone");
        assert_eq!(normalize_username("@"), "");
    }

    #[test]
    fn unknown_chat_maps_to_not_found() {
        let (status, _) = telegram_error(TelegramError::ChatNotFound);
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn other_telegram_failures_map_to_bad_gateway() {
        let (status, _) = telegram_error(TelegramError::Api("boom".to_string()));
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }
}
