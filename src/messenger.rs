use std::path::Path;

use async_trait::async_trait;
use teloxide::types::ChatId;

use crate::errors::BotResult;

/// Outgoing side of the chat platform.
///
/// Telegram is implemented in [`crate::telegram`]; tests plug in a recorder.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Acknowledge a button press, otherwise the client keeps a spinner
    async fn answer_callback(&self, callback_id: &str) -> BotResult<()>;

    async fn send_text(&self, chat_id: ChatId, text: &str) -> BotResult<()>;

    async fn send_keyboard(&self, chat_id: ChatId, text: &str, keyboard: Keyboard)
    -> BotResult<()>;

    async fn send_audio(
        &self,
        chat_id: ChatId,
        path: &Path,
        title: &str,
        caption: &str,
    ) -> BotResult<()>;

    async fn send_video(&self, chat_id: ChatId, path: &Path, caption: &str) -> BotResult<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub payload: String,
}

impl Button {
    pub fn new(label: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            payload: payload.into(),
        }
    }
}

/// Inline keyboard as rows of buttons
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keyboard {
    pub rows: Vec<Vec<Button>>,
}

impl Keyboard {
    pub fn single_row(buttons: impl IntoIterator<Item = Button>) -> Self {
        Self {
            rows: vec![buttons.into_iter().collect()],
        }
    }

    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.rows.iter().flatten()
    }
}
