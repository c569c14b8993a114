//! Telegram adapter (teloxide).
//!
//! This crate implements the `hwr-core` MessagingPort over Telegram Bot API.

use async_trait::async_trait;

use teloxide::{prelude::*, types::Recipient};

use hwr_core::{domain::ChatTarget, errors::Error, messaging::port::MessagingPort, Result};

#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    pub fn from_token(token: impl Into<String>) -> Self {
        Self::new(Bot::new(token))
    }

    /// `@username` of the bot, if Telegram answers `getMe`.
    pub async fn username(&self) -> Option<String> {
        match self.bot.get_me().await {
            Ok(me) => Some(me.username().to_string()),
            Err(e) => {
                tracing::warn!("Не удалось выполнить getMe в Telegram: {e}");
                None
            }
        }
    }

    fn recipient(chat: &ChatTarget) -> Recipient {
        let raw = chat.0.trim();
        match raw.parse::<i64>() {
            Ok(id) => Recipient::Id(teloxide::types::ChatId(id)),
            Err(_) if raw.starts_with('@') => Recipient::ChannelUsername(raw.to_string()),
            Err(_) => Recipient::ChannelUsername(format!("@{raw}")),
        }
    }

    fn map_err(e: teloxide::RequestError) -> Error {
        Error::Delivery(format!("Telegram: {e}"))
    }
}

#[async_trait]
impl MessagingPort for TelegramMessenger {
    async fn send_text(&self, chat: &ChatTarget, text: &str) -> Result<()> {
        self.bot
            .send_message(Self::recipient(chat), text.to_string())
            .await
            .map_err(Self::map_err)?;
        Ok(())
    }
}
