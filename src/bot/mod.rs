//! # Telegram Bot
//!
//! A long-polling bot run as its own process. It tells every user their
//! Telegram ID and lets configured admins grant access by sending messages
//! containing IDs. It shares only `users.json` with the HTTP server.

pub mod handlers;
pub mod ids;

use std::sync::Arc;

use teloxide::dispatching::UpdateFilterExt;
use teloxide::prelude::*;
use thiserror::Error;

use crate::auth::AllowList;
use crate::config::{AppConfig, ConfigError};

pub use handlers::{candidates_for, register_candidate, BotState, Command};
pub use ids::{extract_candidate_ids, parse_admin_ids};

pub type BotResult<T> = Result<T, BotError>;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Run the bot until Ctrl-C
pub async fn run(config: &AppConfig) -> BotResult<()> {
    let token = config.bot.require_token()?;
    let bot = Bot::new(token);

    let state = Arc::new(BotState {
        allow_list: AllowList::in_dir(&config.data_dir),
        admin_ids: config.bot.admin_ids.clone(),
    });

    let admin_ids = if state.admin_ids.is_empty() {
        "нет".to_string()
    } else {
        state.admin_ids.iter().cloned().collect::<Vec<_>>().join(", ")
    };
    tracing::info!(admin_ids = %admin_ids, "bot started");

    let handler = Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(handlers::handle_command),
        )
        .branch(dptree::endpoint(handlers::handle_text));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
