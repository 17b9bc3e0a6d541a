use std::collections::HashMap;

use async_trait::async_trait;
use teloxide::types::UserId;
use tokio::sync::RwLock;

use crate::localization::Language;

/// Per-user language preference.
///
/// Handlers only see this trait, so a persistent backend can replace the
/// in-memory one without touching dispatch logic.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Stored language, or the default (`uz`) for users who never picked one
    async fn language(&self, user_id: UserId) -> Language;

    async fn set_language(&self, user_id: UserId, language: Language);
}

/// Lives as long as the process, entries are never evicted
#[derive(Default)]
pub struct InMemorySessionStore {
    languages: RwLock<HashMap<UserId, Language>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn language(&self, user_id: UserId) -> Language {
        self.languages
            .read()
            .await
            .get(&user_id)
            .copied()
            .unwrap_or_default()
    }

    async fn set_language(&self, user_id: UserId, language: Language) {
        self.languages.write().await.insert(user_id, language);
    }
}
