use std::{
    path::{Path, PathBuf},
    process::Output,
    time::Duration,
};

use async_trait::async_trait;
use log::info;
use serde::Deserialize;
use tokio::process;

use crate::{
    errors::{BotError, BotResult},
    payload::MediaKind,
};

const AUDIO_FORMAT: &str = "bestaudio/best";
const VIDEO_FORMAT: &str = "best[ext=mp4]/best";
/// Container yt-dlp re-encodes audio into
pub const AUDIO_CONTAINER: &str = "m4a";
const OUTPUT_TEMPLATE: &str = "%(title)s.%(ext)s";
// Printed once the file reached its final location
const RESULT_PRINT: &str = "after_move:%(.{title,ext,filepath})j";

/// What yt-dlp is asked to do for one request
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionOptions {
    pub format: String,
    pub output_dir: PathBuf,
    pub output_template: String,
    pub quiet: bool,
    pub no_playlist: bool,
    /// Re-encode the result into this audio container
    pub audio_container: Option<String>,
}

impl ExtractionOptions {
    pub fn for_kind(kind: MediaKind, output_dir: impl Into<PathBuf>) -> Self {
        let (format, audio_container) = match kind {
            MediaKind::Audio => (AUDIO_FORMAT, Some(AUDIO_CONTAINER.to_string())),
            MediaKind::Video => (VIDEO_FORMAT, None),
        };

        Self {
            format: format.to_string(),
            output_dir: output_dir.into(),
            output_template: OUTPUT_TEMPLATE.to_string(),
            quiet: true,
            no_playlist: true,
            audio_container,
        }
    }

    /// Full `-o` argument
    pub fn output_path_template(&self) -> PathBuf {
        self.output_dir.join(&self.output_template)
    }

    /// Where the template puts a file with this title and extension
    pub fn predicted_path(&self, title: &str, ext: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", sanitize_title(title), ext))
    }
}

/// yt-dlp replaces path separators in titles with a lookalike character
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .map(|c| match c {
            '/' => '⧸',
            '\0' => '_',
            c => c,
        })
        .collect()
}

/// Metadata reported for a finished download
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ExtractedMedia {
    pub title: String,
    #[serde(default)]
    pub ext: Option<String>,
    /// Final location after post-processing
    #[serde(default)]
    pub filepath: Option<PathBuf>,
}

#[async_trait]
pub trait MediaExtractor: Send + Sync {
    /// Fetch metadata and download the media in one call
    async fn extract(&self, url: &str, options: &ExtractionOptions) -> BotResult<ExtractedMedia>;
}

pub struct YtDlp {
    program: PathBuf,
    timeout: Option<Duration>,
}

impl YtDlp {
    pub fn new(program: impl Into<PathBuf>, timeout: Option<Duration>) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    pub fn build_command(&self, url: &str, options: &ExtractionOptions) -> process::Command {
        let mut cmd = process::Command::new(&self.program);
        if options.no_playlist {
            cmd.arg("--no-playlist");
        }
        if options.quiet {
            cmd.arg("--no-warnings");
        }
        cmd.args(["--socket-timeout", "5", "--retries", "3"])
            .args(["-f", &options.format]);

        if let Some(container) = &options.audio_container {
            cmd.args(["-x", "--audio-format", container]);
        }

        cmd.arg("--no-simulate")
            .arg("-o")
            .arg(options.output_path_template())
            .args(["--print", RESULT_PRINT])
            .arg("--")
            .arg(url)
            .kill_on_drop(true);
        cmd
    }

    async fn run(&self, mut cmd: process::Command) -> BotResult<Output> {
        let output = cmd.output();
        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, output)
                .await
                .map_err(|_| BotError::Timeout(limit))?,
            None => output.await,
        };
        result.map_err(|e| BotError::external_command_error("yt-dlp", e.to_string()))
    }
}

#[async_trait]
impl MediaExtractor for YtDlp {
    async fn extract(&self, url: &str, options: &ExtractionOptions) -> BotResult<ExtractedMedia> {
        let cmd = self.build_command(url, options);
        info!("Starting yt-dlp: {} (format: {})", url, options.format);

        let output = self.run(cmd).await?;
        info!("yt-dlp exit code: {:?}", output.status.code());

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            log::error!("yt-dlp failed: {}", stderr);
            return Err(BotError::extraction(stderr));
        }

        parse_output(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Parse the JSON line printed after the file was moved into place
pub fn parse_output(stdout: &str) -> BotResult<ExtractedMedia> {
    let line = stdout
        .lines()
        .rev()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .ok_or_else(|| BotError::parse("yt-dlp printed no metadata"))?;

    let mut media: ExtractedMedia = serde_json::from_str(line)?;
    if media.ext.is_none() {
        media.ext = media
            .filepath
            .as_deref()
            .and_then(Path::extension)
            .map(|e| e.to_string_lossy().into_owned());
    }
    Ok(media)
}
