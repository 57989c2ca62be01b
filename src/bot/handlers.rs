//! Message handlers

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use super::ids::extract_candidate_ids;
use super::BotError;
use crate::auth::{AllowList, AuthError};

pub type HandlerResult = Result<(), BotError>;

#[derive(Debug, Clone, BotCommands)]
#[command(rename_rule = "lowercase", description = "Доступные команды:")]
pub enum Command {
    /// Показать ваш Telegram ID
    Start,
}

/// Dependencies injected into every handler
pub struct BotState {
    pub allow_list: AllowList,
    pub admin_ids: BTreeSet<String>,
}

impl BotState {
    pub fn is_admin(&self, user_id: &str) -> bool {
        self.admin_ids.contains(user_id)
    }
}

pub async fn handle_command(bot: Bot, msg: Message, command: Command) -> HandlerResult {
    match command {
        Command::Start => reply_with_user_id(&bot, &msg).await,
    }
}

/// Plain text: echo the sender's ID; for admins also register any IDs found
pub async fn handle_text(bot: Bot, state: Arc<BotState>, msg: Message) -> HandlerResult {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    if is_command(text) {
        return Ok(());
    }

    reply_with_user_id(&bot, &msg).await?;

    let sender = msg.from.as_ref().map(|u| u.id.0.to_string());
    for candidate in candidates_for(&state, sender.as_deref(), text) {
        let reply = register_candidate(&state.allow_list, &candidate);
        bot.send_message(msg.chat.id, reply).await?;
    }

    Ok(())
}

fn is_command(text: &str) -> bool {
    text.starts_with('/')
}

/// IDs an admin's message asks to register
///
/// Empty unless the sender is a configured admin. The admin's own ID is
/// never registered.
pub fn candidates_for(state: &BotState, sender: Option<&str>, text: &str) -> Vec<String> {
    let Some(sender) = sender.filter(|id| state.is_admin(id)) else {
        return Vec::new();
    };
    if is_command(text) {
        return Vec::new();
    }

    extract_candidate_ids(text)
        .into_iter()
        .filter(|candidate| candidate != sender)
        .collect()
}

async fn reply_with_user_id(bot: &Bot, msg: &Message) -> HandlerResult {
    if let Some(user) = msg.from.as_ref() {
        bot.send_message(msg.chat.id, format!("Ваш Telegram ID: {}", user.id.0))
            .await?;
    }
    Ok(())
}

/// Add one ID to the allow-list and describe the outcome for the admin
pub fn register_candidate(allow_list: &AllowList, candidate: &str) -> String {
    let id = match candidate.parse::<i64>() {
        Ok(id) => id,
        Err(e) => return failure_reply(candidate, &e),
    };

    match allow_list.add(id, "") {
        Ok(_) => {
            tracing::info!(user_id = id, "user added via bot");
            format!("✅ Пользователь с ID {} добавлен в доступ.", candidate)
        }
        Err(e @ AuthError::UserAlreadyExists) => {
            format!("ℹ️ ID {} не добавлен: {}.", candidate, e)
        }
        Err(e) => failure_reply(candidate, &e),
    }
}

fn failure_reply(candidate: &str, error: &dyn fmt::Display) -> String {
    tracing::error!(user_id = %candidate, error = %error, "failed to add user via bot");
    format!("⚠️ Ошибка при добавлении ID {}: {}", candidate, error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_register_new_and_duplicate() {
        let temp = TempDir::new().unwrap();
        let list = AllowList::in_dir(temp.path());

        assert_eq!(
            register_candidate(&list, "555555"),
            "✅ Пользователь с ID 555555 добавлен в доступ."
        );
        assert_eq!(
            register_candidate(&list, "555555"),
            "ℹ️ ID 555555 не добавлен: Пользователь уже существует."
        );

        let users = list.list();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name, "Без имени");
    }

    #[test]
    fn test_register_overflowing_id() {
        let temp = TempDir::new().unwrap();
        let list = AllowList::in_dir(temp.path());

        let reply = register_candidate(&list, "99999999999999999999999");
        assert!(reply.starts_with("⚠️ Ошибка при добавлении ID 99999999999999999999999:"));
        assert!(list.list().is_empty());
    }

    fn admin_state(temp: &TempDir) -> BotState {
        BotState {
            allow_list: AllowList::in_dir(temp.path()),
            admin_ids: ["100200".to_string()].into_iter().collect(),
        }
    }

    #[test]
    fn test_candidates_only_for_admins() {
        let temp = TempDir::new().unwrap();
        let state = admin_state(&temp);

        assert_eq!(
            candidates_for(&state, Some("100200"), "добавь 555555 и 777777"),
            vec!["555555", "777777"]
        );
        assert!(candidates_for(&state, Some("999999"), "добавь 555555").is_empty());
        assert!(candidates_for(&state, None, "добавь 555555").is_empty());
    }

    #[test]
    fn test_admin_own_id_is_skipped() {
        let temp = TempDir::new().unwrap();
        let state = admin_state(&temp);

        assert_eq!(
            candidates_for(&state, Some("100200"), "100200 555555"),
            vec!["555555"]
        );
        assert!(candidates_for(&state, Some("100200"), "я 100200").is_empty());
    }

    #[test]
    fn test_command_text_registers_nothing() {
        let temp = TempDir::new().unwrap();
        let state = admin_state(&temp);

        assert!(candidates_for(&state, Some("100200"), "/start 555555").is_empty());
        assert!(candidates_for(&state, Some("100200"), "/add 555555").is_empty());
    }

    #[test]
    fn test_start_command_parses() {
        assert!(matches!(
            Command::parse("/start", "tgcnc_bot"),
            Ok(Command::Start)
        ));
    }
}
