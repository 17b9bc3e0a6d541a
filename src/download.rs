use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use log::{error, info, warn};
use teloxide::types::{ChatId, UserId};
use tokio::fs;

use crate::{
    errors::{BotError, BotResult, HandlerResult},
    limiter::DownloadLimiter,
    localization::{LocalizedMessages, get_messages},
    messenger::Messenger,
    payload::MediaKind,
    session::SessionStore,
    temp_file::TempDir,
    youtube::{AUDIO_CONTAINER, ExtractedMedia, ExtractionOptions, MediaExtractor},
};

/// Runs one download: fetch through the extractor, send the file back, clean up.
pub struct DownloadOrchestrator {
    messenger: Arc<dyn Messenger>,
    sessions: Arc<dyn SessionStore>,
    extractor: Arc<dyn MediaExtractor>,
    download_dir: PathBuf,
    limiter: DownloadLimiter,
}

impl DownloadOrchestrator {
    pub fn new(
        messenger: Arc<dyn Messenger>,
        sessions: Arc<dyn SessionStore>,
        extractor: Arc<dyn MediaExtractor>,
        download_dir: impl Into<PathBuf>,
        limiter: DownloadLimiter,
    ) -> Self {
        Self {
            messenger,
            sessions,
            extractor,
            download_dir: download_dir.into(),
            limiter,
        }
    }

    /// Extraction and sending failures are reported to the user, not returned.
    /// Only failing to deliver that report is an error.
    pub async fn handle_download(
        &self,
        chat_id: ChatId,
        user_id: UserId,
        kind: MediaKind,
        url: &str,
    ) -> HandlerResult {
        let tr = get_messages(self.sessions.language(user_id).await);

        let Some(_permit) = self.limiter.try_acquire() else {
            warn!("Download limit reached, rejecting {} for {}", url, user_id);
            self.messenger.send_text(chat_id, tr.busy_text).await?;
            return Ok(());
        };

        self.messenger.send_text(chat_id, tr.downloading_text).await?;
        info!("Downloading {} as {} for {}", url, kind, user_id);

        match self.fetch_and_send(chat_id, kind, url, tr).await {
            Ok(()) => {
                info!("Sent {} ({}) to {}", url, kind, chat_id);
                Ok(())
            }
            Err(e) => {
                error!("Download of {} failed: {}", url, e);
                self.messenger
                    .send_text(chat_id, &format!("{} {}", tr.error_prefix, e))
                    .await
            }
        }
    }

    async fn fetch_and_send(
        &self,
        chat_id: ChatId,
        kind: MediaKind,
        url: &str,
        tr: &LocalizedMessages,
    ) -> BotResult<()> {
        let workspace = TempDir::create(&self.download_dir).await?;
        let options = ExtractionOptions::for_kind(kind, workspace.path());

        let media = self.extractor.extract(url, &options).await?;
        let path = resolve_media_path(&options, &media, kind)
            .await
            .ok_or_else(|| BotError::file_not_found(describe_expected(&options, &media)))?;

        match kind {
            MediaKind::Audio => {
                self.messenger
                    .send_audio(chat_id, &path, &media.title, tr.attribution_suffix)
                    .await?
            }
            MediaKind::Video => {
                let caption = format!("{}{}", media.title, tr.attribution_suffix);
                self.messenger.send_video(chat_id, &path, &caption).await?
            }
        }

        // Already delivered, a leftover file is swept with the workspace
        if let Err(e) = fs::remove_file(&path).await {
            warn!("Failed to remove {}: {}", path.display(), e);
        }
        Ok(())
    }
}

/// Pick the file to send: the path yt-dlp reported, then the templated path
/// (with the audio container swapped in for audio), first one that exists.
pub async fn resolve_media_path(
    options: &ExtractionOptions,
    media: &ExtractedMedia,
    kind: MediaKind,
) -> Option<PathBuf> {
    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Some(reported) = &media.filepath {
        candidates.push(reported.clone());
    }
    if kind == MediaKind::Audio {
        candidates.push(options.predicted_path(&media.title, AUDIO_CONTAINER));
    }
    if let Some(ext) = &media.ext {
        candidates.push(options.predicted_path(&media.title, ext));
    }

    for candidate in candidates {
        if is_file(&candidate).await {
            return Some(candidate);
        }
    }
    None
}

async fn is_file(path: &Path) -> bool {
    fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}

fn describe_expected(options: &ExtractionOptions, media: &ExtractedMedia) -> String {
    match (&media.filepath, &media.ext) {
        (Some(path), _) => path.display().to_string(),
        (None, Some(ext)) => options.predicted_path(&media.title, ext).display().to_string(),
        (None, None) => options.output_path_template().display().to_string(),
    }
}
