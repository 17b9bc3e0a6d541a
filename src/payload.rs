//! Callback payloads carried by inline buttons.
//!
//! Buttons encode one of three shapes:
//! - `lang_<code>` for the language picker
//! - `<kind>|<url>` for a download when it fits into Telegram's 64 byte limit
//! - `<kind>#<short_id>` when the url had to be stored in [`PendingLinks`]

use std::{
    collections::{HashMap, VecDeque},
    str::FromStr,
};

use strum::{Display, EnumString};
use tokio::sync::Mutex;

use crate::{
    errors::{BotError, BotResult},
    localization::Language,
};

/// Telegram rejects callback data longer than this (in bytes)
pub const MAX_CALLBACK_DATA_LEN: usize = 64;

const LANGUAGE_PREFIX: &str = "lang_";
const INLINE_DELIMITER: char = '|';
const STORED_DELIMITER: char = '#';
const MAX_PENDING_LINKS: usize = 1024;

#[derive(Display, EnumString, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum MediaKind {
    Audio,
    Video,
}

/// Short ID for callback data (8 chars)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShortId(pub String);

impl ShortId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string()[..8].to_string())
    }
}

impl std::fmt::Display for ShortId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkRef {
    Inline(String),
    Stored(ShortId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub kind: MediaKind,
    pub link: LinkRef,
}

impl DownloadRequest {
    pub fn encode(&self) -> String {
        match &self.link {
            LinkRef::Inline(url) => format!("{}{}{}", self.kind, INLINE_DELIMITER, url),
            LinkRef::Stored(id) => format!("{}{}{}", self.kind, STORED_DELIMITER, id),
        }
    }
}

/// Decoded button press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    LanguageSelected(Language),
    DownloadRequested(DownloadRequest),
}

impl CallbackAction {
    pub fn decode(data: &str) -> BotResult<Self> {
        if let Some(code) = data.strip_prefix(LANGUAGE_PREFIX) {
            let language = Language::from_str(code)
                .map_err(|_| BotError::UnsupportedLanguage(code.to_string()))?;
            return Ok(Self::LanguageSelected(language));
        }

        // First delimiter only, the url itself may contain `|`
        if let Some((kind, url)) = data.split_once(INLINE_DELIMITER) {
            if let Ok(kind) = MediaKind::from_str(kind) {
                return Ok(Self::DownloadRequested(DownloadRequest {
                    kind,
                    link: LinkRef::Inline(url.to_string()),
                }));
            }
        }

        if let Some((kind, id)) = data.split_once(STORED_DELIMITER) {
            if let Ok(kind) = MediaKind::from_str(kind) {
                return Ok(Self::DownloadRequested(DownloadRequest {
                    kind,
                    link: LinkRef::Stored(ShortId(id.to_string())),
                }));
            }
        }

        Err(BotError::parse(format!("Unknown callback payload: {}", data)))
    }

    pub fn encode(&self) -> String {
        match self {
            Self::LanguageSelected(language) => format!("{}{}", LANGUAGE_PREFIX, language),
            Self::DownloadRequested(request) => request.encode(),
        }
    }
}

/// Links too long to fit into a callback payload, keyed by short id.
///
/// Bounded: the oldest links are dropped once the limit is reached.
#[derive(Default)]
pub struct PendingLinks {
    inner: Mutex<PendingLinksInner>,
}

#[derive(Default)]
struct PendingLinksInner {
    links: HashMap<ShortId, String>,
    order: VecDeque<ShortId>,
}

impl PendingLinks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the download payload for `url`, storing it when needed
    pub async fn request_for(&self, kind: MediaKind, url: &str) -> DownloadRequest {
        let inline = DownloadRequest {
            kind,
            link: LinkRef::Inline(url.to_string()),
        };
        if inline.encode().len() <= MAX_CALLBACK_DATA_LEN {
            return inline;
        }

        DownloadRequest {
            kind,
            link: LinkRef::Stored(self.store(url).await),
        }
    }

    pub async fn store(&self, url: &str) -> ShortId {
        self.store_with(url, ShortId::new).await
    }

    async fn store_with(&self, url: &str, mut next_id: impl FnMut() -> ShortId) -> ShortId {
        let mut inner = self.inner.lock().await;

        let mut short_id = next_id();
        while inner.links.contains_key(&short_id) {
            short_id = next_id();
        }

        while inner.order.len() >= MAX_PENDING_LINKS {
            if let Some(oldest) = inner.order.pop_front() {
                inner.links.remove(&oldest);
            }
        }

        inner.links.insert(short_id.clone(), url.to_string());
        inner.order.push_back(short_id.clone());
        short_id
    }

    /// Links stay available so both buttons of a message keep working
    pub async fn get(&self, short_id: &ShortId) -> Option<String> {
        self.inner.lock().await.links.get(short_id).cloned()
    }

    /// Url behind a request, `None` when a stored link was evicted
    pub async fn resolve(&self, link: &LinkRef) -> Option<String> {
        match link {
            LinkRef::Inline(url) => Some(url.clone()),
            LinkRef::Stored(id) => self.get(id).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_inline_download() {
        let action = CallbackAction::decode("audio|https://youtu.be/abc").unwrap();
        assert_eq!(
            action,
            CallbackAction::DownloadRequested(DownloadRequest {
                kind: MediaKind::Audio,
                link: LinkRef::Inline("https://youtu.be/abc".to_string()),
            })
        );
    }

    #[test]
    fn splits_on_first_delimiter_only() {
        let action = CallbackAction::decode("video|https://x/y|z").unwrap();
        assert_eq!(
            action,
            CallbackAction::DownloadRequested(DownloadRequest {
                kind: MediaKind::Video,
                link: LinkRef::Inline("https://x/y|z".to_string()),
            })
        );
    }

    #[test]
    fn decodes_language() {
        assert_eq!(
            CallbackAction::decode("lang_ru").unwrap(),
            CallbackAction::LanguageSelected(Language::Ru)
        );
        assert!(matches!(
            CallbackAction::decode("lang_fr"),
            Err(BotError::UnsupportedLanguage(_))
        ));
    }

    #[test]
    fn decodes_stored_link() {
        assert_eq!(
            CallbackAction::decode("video#1a2b3c4d").unwrap(),
            CallbackAction::DownloadRequested(DownloadRequest {
                kind: MediaKind::Video,
                link: LinkRef::Stored(ShortId("1a2b3c4d".to_string())),
            })
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(CallbackAction::decode("gif|url"), Err(BotError::Parse(_))));
        assert!(matches!(CallbackAction::decode(""), Err(BotError::Parse(_))));
    }

    #[test]
    fn encode_matches_button_format() {
        let action = CallbackAction::LanguageSelected(Language::En);
        assert_eq!(action.encode(), "lang_en");
    }

    #[tokio::test]
    async fn short_links_stay_inline() {
        let links = PendingLinks::new();
        let request = links.request_for(MediaKind::Audio, "http://example.com/v").await;
        assert_eq!(request.encode(), "audio|http://example.com/v");
        assert!(links.inner.lock().await.links.is_empty());
    }

    #[tokio::test]
    async fn long_links_are_stored() {
        let links = PendingLinks::new();
        let url = format!("https://www.youtube.com/watch?v=dQw4w9WgXcQ&list={}", "x".repeat(60));
        let request = links.request_for(MediaKind::Video, &url).await;

        let payload = request.encode();
        assert!(payload.len() <= MAX_CALLBACK_DATA_LEN);
        assert!(payload.starts_with("video#"));

        let CallbackAction::DownloadRequested(decoded) = CallbackAction::decode(&payload).unwrap()
        else {
            panic!("expected a download request");
        };
        assert_eq!(links.resolve(&decoded.link).await.as_deref(), Some(url.as_str()));
    }

    #[tokio::test]
    async fn oldest_links_are_evicted() {
        let links = PendingLinks::new();
        let first = links.store("https://first").await;
        for i in 0..MAX_PENDING_LINKS {
            links.store(&format!("https://link/{}", i)).await;
        }
        assert_eq!(links.inner.lock().await.links.len(), MAX_PENDING_LINKS);
        assert_eq!(links.get(&first).await, None);
    }

    #[tokio::test]
    async fn colliding_id_is_regenerated() {
        let links = PendingLinks::new();
        let first = links
            .store_with("https://first", || ShortId("aaaaaaaa".to_string()))
            .await;

        let mut ids = ["aaaaaaaa", "aaaaaaaa", "bbbbbbbb"].into_iter();
        let second = links
            .store_with("https://second", || ShortId(ids.next().unwrap().to_string()))
            .await;

        assert_eq!(second, ShortId("bbbbbbbb".to_string()));
        assert_eq!(links.get(&first).await.as_deref(), Some("https://first"));
        assert_eq!(links.get(&second).await.as_deref(), Some("https://second"));
        assert_eq!(links.inner.lock().await.order.len(), 2);
    }
}
