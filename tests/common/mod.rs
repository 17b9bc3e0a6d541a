//! Fakes for the chat platform and the extractor used by the integration tests.
#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use async_trait::async_trait;
use teloxide::types::ChatId;
use yt_saver_bot::{
    config::Config,
    dispatcher::AppState,
    errors::{BotError, BotResult},
    messenger::{Keyboard, Messenger},
    session::InMemorySessionStore,
    youtube::{ExtractedMedia, ExtractionOptions, MediaExtractor},
};

#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Answer(String),
    Text(ChatId, String),
    Keyboard(ChatId, String, Keyboard),
    Audio {
        chat_id: ChatId,
        path: PathBuf,
        title: String,
        caption: String,
        existed: bool,
    },
    Video {
        chat_id: ChatId,
        path: PathBuf,
        caption: String,
        existed: bool,
    },
}

/// Records everything the bot would send
#[derive(Default)]
pub struct RecordingMessenger {
    sent: Mutex<Vec<Sent>>,
    fail_answers: AtomicBool,
    consume_uploads: AtomicBool,
}

impl RecordingMessenger {
    /// Callback answers fail as they do for queries older than Telegram allows
    pub fn fail_answers(&self) {
        self.fail_answers.store(true, Ordering::SeqCst);
    }

    /// Uploaded files are deleted while being sent
    pub fn consume_uploads(&self) {
        self.consume_uploads.store(true, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    /// Everything except callback acknowledgements
    pub fn replies(&self) -> Vec<Sent> {
        self.sent()
            .into_iter()
            .filter(|s| !matches!(s, Sent::Answer(_)))
            .collect()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Text(_, text) => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn attachments(&self) -> Vec<Sent> {
        self.sent()
            .into_iter()
            .filter(|s| matches!(s, Sent::Audio { .. } | Sent::Video { .. }))
            .collect()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }

    fn push(&self, sent: Sent) {
        self.sent.lock().unwrap().push(sent);
    }

    fn upload(&self, path: &Path) -> bool {
        let existed = path.is_file();
        if existed && self.consume_uploads.load(Ordering::SeqCst) {
            std::fs::remove_file(path).unwrap();
        }
        existed
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn answer_callback(&self, callback_id: &str) -> BotResult<()> {
        if self.fail_answers.load(Ordering::SeqCst) {
            return Err(BotError::Telegram(teloxide::RequestError::Api(
                teloxide::ApiError::Unknown("Bad Request: query is too old".to_string()),
            )));
        }
        self.push(Sent::Answer(callback_id.to_string()));
        Ok(())
    }

    async fn send_text(&self, chat_id: ChatId, text: &str) -> BotResult<()> {
        self.push(Sent::Text(chat_id, text.to_string()));
        Ok(())
    }

    async fn send_keyboard(
        &self,
        chat_id: ChatId,
        text: &str,
        keyboard: Keyboard,
    ) -> BotResult<()> {
        self.push(Sent::Keyboard(chat_id, text.to_string(), keyboard));
        Ok(())
    }

    async fn send_audio(
        &self,
        chat_id: ChatId,
        path: &Path,
        title: &str,
        caption: &str,
    ) -> BotResult<()> {
        let existed = self.upload(path);
        self.push(Sent::Audio {
            chat_id,
            path: path.to_path_buf(),
            title: title.to_string(),
            caption: caption.to_string(),
            existed,
        });
        Ok(())
    }

    async fn send_video(&self, chat_id: ChatId, path: &Path, caption: &str) -> BotResult<()> {
        let existed = self.upload(path);
        self.push(Sent::Video {
            chat_id,
            path: path.to_path_buf(),
            caption: caption.to_string(),
            existed,
        });
        Ok(())
    }
}

#[derive(Clone)]
pub enum Script {
    /// Write a file at the templated path and report it
    Succeed { title: String, ext: String },
    /// Write `<title>.<ext>` but report a different, re-encoded extension
    /// without a final path
    SucceedReencoded {
        title: String,
        original_ext: String,
        written_ext: String,
    },
    /// Report success without writing anything
    SucceedWithoutFile { title: String, ext: String },
    Fail(String),
}

/// Extractor that follows a script instead of running yt-dlp
pub struct ScriptedExtractor {
    script: Script,
    calls: Mutex<Vec<(String, ExtractionOptions)>>,
    written: Mutex<Vec<PathBuf>>,
}

impl ScriptedExtractor {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            calls: Mutex::new(Vec::new()),
            written: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, ExtractionOptions)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn written(&self) -> Vec<PathBuf> {
        self.written.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaExtractor for ScriptedExtractor {
    async fn extract(&self, url: &str, options: &ExtractionOptions) -> BotResult<ExtractedMedia> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), options.clone()));

        match &self.script {
            Script::Succeed { title, ext } => {
                let path = options.predicted_path(title, ext);
                std::fs::write(&path, b"media")?;
                self.written.lock().unwrap().push(path.clone());
                Ok(ExtractedMedia {
                    title: title.clone(),
                    ext: Some(ext.clone()),
                    filepath: Some(path),
                })
            }
            Script::SucceedReencoded {
                title,
                original_ext,
                written_ext,
            } => {
                let path = options.predicted_path(title, written_ext);
                std::fs::write(&path, b"media")?;
                self.written.lock().unwrap().push(path);
                Ok(ExtractedMedia {
                    title: title.clone(),
                    ext: Some(original_ext.clone()),
                    filepath: None,
                })
            }
            Script::SucceedWithoutFile { title, ext } => Ok(ExtractedMedia {
                title: title.clone(),
                ext: Some(ext.clone()),
                filepath: None,
            }),
            Script::Fail(message) => Err(BotError::extraction(message.clone())),
        }
    }
}

pub struct Harness {
    pub state: AppState,
    pub messenger: Arc<RecordingMessenger>,
    pub extractor: Arc<ScriptedExtractor>,
    pub download_dir: tempfile::TempDir,
}

pub fn test_config(download_dir: &Path) -> Config {
    Config {
        bot_token: "test-token".to_string(),
        download_dir: download_dir.to_path_buf(),
        ytdlp_path: PathBuf::from("yt-dlp"),
        max_concurrent_downloads: 0,
        download_timeout: None,
    }
}

pub fn harness(script: Script) -> Harness {
    let download_dir = tempfile::tempdir().expect("temp dir");
    let messenger = Arc::new(RecordingMessenger::default());
    let extractor = Arc::new(ScriptedExtractor::new(script));
    let state = AppState::new(
        messenger.clone(),
        Arc::new(InMemorySessionStore::new()),
        extractor.clone(),
        &test_config(download_dir.path()),
    );

    Harness {
        state,
        messenger,
        extractor,
        download_dir,
    }
}

/// Files left anywhere under the download root
pub fn leftover_files(root: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        let Ok(entries) = std::fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
            } else {
                found.push(path);
            }
        }
    }
    found
}
