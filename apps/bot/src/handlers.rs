//! Command and message handlers for the verification bot.

use std::sync::Arc;
use std::time::Duration;

use teloxide::dispatching::dialogue::{Dialogue, InMemStorage, InMemStorageError};
use teloxide::prelude::*;
use teloxide::types::{ButtonRequest, KeyboardButton, KeyboardMarkup, KeyboardRemove, ParseMode};
use teloxide::utils::command::BotCommands;
use thiserror::Error;
use verification::{IssuedCode, VerificationAgent, VerificationError};

pub type ChatDialogue = Dialogue<ChatState, InMemStorage<ChatState>>;
pub type HandlerResult = Result<(), BotError>;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),
    #[error("dialogue storage error: {0}")]
    Storage(#[from] InMemStorageError),
}

/// Per-chat conversation state. The machine restarts on every /start.
#[derive(Debug, Clone, Default)]
pub enum ChatState {
    #[default]
    Idle,
    AwaitingPhone,
}

#[derive(Debug, Clone, BotCommands)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    /// Start phone verification
    Start,
    /// Show usage help
    Help,
}

pub async fn handle_command(
    bot: Bot,
    agent: Arc<VerificationAgent>,
    dialogue: ChatDialogue,
    msg: Message,
    command: Command,
) -> HandlerResult {
    match command {
        Command::Start => handle_start(bot, dialogue, msg).await,
        Command::Help => handle_help(bot, agent, msg).await,
    }
}

async fn handle_start(bot: Bot, dialogue: ChatDialogue, msg: Message) -> HandlerResult {
    let keyboard = KeyboardMarkup::new([[
        KeyboardButton::new("Share my phone number").request(ButtonRequest::Contact)
    ]])
    .resize_keyboard();
    bot.send_message(
        msg.chat.id,
        "Welcome to Place&Play!\n\n\
         Send the phone number you want to verify (for example +998998888931), \
         or share your contact with the button below.",
    )
    .reply_markup(keyboard)
    .await?;
    dialogue.update(ChatState::AwaitingPhone).await?;
    Ok(())
}

async fn handle_help(bot: Bot, agent: Arc<VerificationAgent>, msg: Message) -> HandlerResult {
    let text = format!(
        "How it works:\n\
         1. Send /start\n\
         2. Send your phone number, or share your contact\n\
         3. Enter the received code in the Place&Play app\n\n\
         At most {} attempts are allowed per cool-down window.",
        agent.max_attempts()
    );
    bot.send_message(msg.chat.id, text).await?;
    Ok(())
}

pub async fn handle_message(
    bot: Bot,
    agent: Arc<VerificationAgent>,
    dialogue: ChatDialogue,
    msg: Message,
) -> HandlerResult {
    let chat_id = msg.chat.id;

    // Shared contacts carry the phone number outside the text field.
    let raw = if let Some(contact) = msg.contact() {
        contact.phone_number.clone()
    } else if let Some(text) = msg.text() {
        text.to_string()
    } else {
        return Ok(());
    };

    match dialogue.get().await?.unwrap_or_default() {
        ChatState::Idle => {
            bot.send_message(chat_id, "Use /start to begin phone verification.")
                .await?;
        }
        ChatState::AwaitingPhone => {
            let phone = utils::normalize_phone(&raw);
            if !utils::is_valid_phone(&phone) {
                bot.send_message(
                    chat_id,
                    "That does not look like a phone number.\n\
                     It must start with '+' followed by 9-15 digits, \
                     for example +998998888931.",
                )
                .await?;
                // Invalid input keeps the conversation in AwaitingPhone.
                return Ok(());
            }
            process_phone(&bot, &agent, &dialogue, chat_id, &phone).await?;
        }
    }
    Ok(())
}

async fn process_phone(
    bot: &Bot,
    agent: &VerificationAgent,
    dialogue: &ChatDialogue,
    chat_id: ChatId,
    phone: &str,
) -> HandlerResult {
    match agent.issue_code(&chat_id.to_string(), phone).await {
        Ok(issued) => {
            bot.send_message(chat_id, code_message(&issued, phone))
                .parse_mode(ParseMode::Html)
                .reply_markup(KeyboardRemove::new())
                .await?;
            dialogue.update(ChatState::Idle).await?;
        }
        Err(VerificationError::RateLimited { retry_after }) => {
            bot.send_message(chat_id, lockout_message(retry_after))
                .await?;
            // The lockout keeps the conversation in AwaitingPhone.
        }
        Err(err) => {
            tracing::error!(error = ?err, phone, "verification flow failed");
            bot.send_message(
                chat_id,
                "Could not get a verification code right now. Please try again later.",
            )
            .await?;
            dialogue.update(ChatState::Idle).await?;
        }
    }
    Ok(())
}

fn code_message(issued: &IssuedCode, phone: &str) -> String {
    format!(
        "Your verification code: <code>{}</code>\n\
         Number: <code>{}</code>\n\
         Attempt {} of {}\n\n\
         Enter the code in the Place&Play app.",
        issued.code, phone, issued.attempt, issued.max_attempts
    )
}

fn lockout_message(retry_after: Duration) -> String {
    let secs = retry_after.as_secs();
    format!(
        "Too many verification attempts.\nTry again in {:02}:{:02}.",
        secs / 60,
        secs % 60
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lockout_message_formats_minutes_and_seconds() {
        assert!(lockout_message(Duration::from_secs(400)).contains("06:40"));
        assert!(lockout_message(Duration::from_secs(59)).contains("00:59"));
    }

    #[test]
    fn code_message_shows_attempt_counter() {
        let issued = IssuedCode {
            code: "123456".to_string(),
            attempt: 2,
            max_attempts: 5,
        };
        let text = code_message(&issued, "+998998888931");
        assert!(text.contains("123456"));
        assert!(text.contains("Attempt 2 of 5"));
    }
}
