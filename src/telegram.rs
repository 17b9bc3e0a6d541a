use std::path::Path;

use async_trait::async_trait;
use teloxide::{
    prelude::*,
    types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, InputFile},
};

use crate::{
    errors::BotResult,
    messenger::{Keyboard, Messenger},
};

/// Telegram limits media captions to this many characters
const MAX_CAPTION_CHARS: usize = 1024;

#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

fn to_markup(keyboard: Keyboard) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(keyboard.rows.into_iter().map(|row| {
        row.into_iter()
            .map(|b| InlineKeyboardButton::callback(b.label, b.payload))
            .collect::<Vec<_>>()
    }))
}

/// Cut a caption to Telegram's limit
pub fn fit_caption(caption: &str) -> String {
    if caption.chars().count() <= MAX_CAPTION_CHARS {
        return caption.to_string();
    }
    caption.chars().take(MAX_CAPTION_CHARS - 1).collect::<String>() + "…"
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn answer_callback(&self, callback_id: &str) -> BotResult<()> {
        self.bot
            .answer_callback_query(callback_id.to_string())
            .await?;
        Ok(())
    }

    async fn send_text(&self, chat_id: ChatId, text: &str) -> BotResult<()> {
        self.bot.send_message(chat_id, text).await?;
        Ok(())
    }

    async fn send_keyboard(
        &self,
        chat_id: ChatId,
        text: &str,
        keyboard: Keyboard,
    ) -> BotResult<()> {
        self.bot
            .send_message(chat_id, text)
            .reply_markup(to_markup(keyboard))
            .await?;
        Ok(())
    }

    async fn send_audio(
        &self,
        chat_id: ChatId,
        path: &Path,
        title: &str,
        caption: &str,
    ) -> BotResult<()> {
        self.bot
            .send_audio(chat_id, InputFile::file(path))
            .title(title)
            .caption(fit_caption(caption))
            .await?;
        Ok(())
    }

    async fn send_video(&self, chat_id: ChatId, path: &Path, caption: &str) -> BotResult<()> {
        self.bot
            .send_video(chat_id, InputFile::file(path))
            .caption(fit_caption(caption))
            .supports_streaming(true)
            .await?;
        Ok(())
    }
}
