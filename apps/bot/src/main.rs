//! Place&Play verification bot: collects a phone number over Telegram,
//! obtains a verification code from the Place&Play API and relays it back.

mod config;
mod handlers;

use std::sync::Arc;

use anyhow::Result;
use clients_placeandplay::{PlaceAndPlayClient, PlaceAndPlayClientConfig};
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::{dptree, prelude::*};
use tracing::info;
use verification::{VerificationAgent, VerificationAgentConfig};

use crate::config::BotConfig;
use crate::handlers::{ChatState, Command};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = BotConfig::from_env()?;
    info!("starting Place&Play verification bot");
    info!(
        api_base_url = %config.api_base_url,
        max_attempts = config.max_attempts,
        cooldown_secs = config.cooldown.as_secs(),
        "configuration loaded"
    );

    let client = reqwest::Client::builder()
        .timeout(config.upstream_timeout)
        .build()?;
    let api = PlaceAndPlayClient::new(
        client,
        PlaceAndPlayClientConfig {
            base_url: config.api_base_url.clone(),
            language: config.language.clone(),
        },
    );
    let agent = Arc::new(VerificationAgent::new(
        VerificationAgentConfig {
            login_phone_number: config.login_phone_number.clone(),
            login_password: config.login_password.clone(),
            max_attempts: config.max_attempts,
            cooldown: config.cooldown,
        },
        api,
    ));

    let bot = Bot::new(config.telegram_token.clone());

    let handler = Update::filter_message()
        .enter_dialogue::<Message, InMemStorage<ChatState>, ChatState>()
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(handlers::handle_command),
        )
        .branch(dptree::endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![agent, InMemStorage::<ChatState>::new()])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
