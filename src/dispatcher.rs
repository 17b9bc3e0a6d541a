use std::sync::Arc;

use log::{debug, info, warn};
use teloxide::types::{ChatId, UserId};

use crate::{
    config::Config,
    download::DownloadOrchestrator,
    errors::HandlerResult,
    handlers::{download_selected, language_selected, link_received, start},
    limiter::DownloadLimiter,
    messenger::Messenger,
    payload::{CallbackAction, PendingLinks},
    session::SessionStore,
    youtube::MediaExtractor,
};

/// Protocol-neutral incoming update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncomingEvent {
    /// `/start` command
    Start { chat_id: ChatId, user_id: UserId },
    /// Plain text that is not a command
    Text {
        chat_id: ChatId,
        user_id: UserId,
        text: String,
    },
    /// Inline button press
    Callback {
        chat_id: ChatId,
        user_id: UserId,
        callback_id: String,
        data: String,
    },
}

impl IncomingEvent {
    /// `None` for messages without a sender (channel posts, anonymous admins)
    pub fn start(chat_id: ChatId, sender: Option<UserId>) -> Option<Self> {
        sender.map(|user_id| Self::Start { chat_id, user_id })
    }

    pub fn text(chat_id: ChatId, sender: Option<UserId>, text: String) -> Option<Self> {
        sender.map(|user_id| Self::Text {
            chat_id,
            user_id,
            text,
        })
    }
}

/// Collaborators shared by all handlers
pub struct AppState {
    pub messenger: Arc<dyn Messenger>,
    pub sessions: Arc<dyn SessionStore>,
    pub links: PendingLinks,
    pub downloads: DownloadOrchestrator,
}

impl AppState {
    pub fn new(
        messenger: Arc<dyn Messenger>,
        sessions: Arc<dyn SessionStore>,
        extractor: Arc<dyn MediaExtractor>,
        config: &Config,
    ) -> Self {
        let downloads = DownloadOrchestrator::new(
            messenger.clone(),
            sessions.clone(),
            extractor,
            config.download_dir.clone(),
            DownloadLimiter::new(config.max_concurrent_downloads),
        );

        Self {
            messenger,
            sessions,
            links: PendingLinks::new(),
            downloads,
        }
    }
}

pub async fn dispatch(state: &AppState, event: IncomingEvent) -> HandlerResult {
    match event {
        IncomingEvent::Start { chat_id, .. } => {
            debug!("/start from chat {}", chat_id);
            start(state, chat_id).await
        }
        IncomingEvent::Text {
            chat_id,
            user_id,
            text,
        } => {
            debug!("Text from {}: {}", user_id, text);
            link_received(state, chat_id, user_id, &text).await
        }
        IncomingEvent::Callback {
            chat_id,
            user_id,
            callback_id,
            data,
        } => {
            // Acknowledge first. A stale query can't be answered but the press still counts
            if let Err(e) = state.messenger.answer_callback(&callback_id).await {
                warn!("Failed to answer callback {}: {}", callback_id, e);
            }

            match CallbackAction::decode(&data)? {
                CallbackAction::LanguageSelected(language) => {
                    info!("User {} selected language {}", user_id, language);
                    language_selected(state, chat_id, user_id, language).await
                }
                CallbackAction::DownloadRequested(request) => {
                    download_selected(state, chat_id, user_id, request).await
                }
            }
        }
    }
}
