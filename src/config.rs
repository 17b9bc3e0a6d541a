use std::{path::PathBuf, str::FromStr, time::Duration};

use crate::errors::{BotError, BotResult};

const DEFAULT_DOWNLOAD_DIR: &str = "downloads";
const DEFAULT_YTDLP_PATH: &str = "yt-dlp";
const DEFAULT_MAX_CONCURRENT_DOWNLOADS: usize = 4;
const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = 600;

/// Runtime configuration read from the environment at startup.
#[derive(Clone)]
pub struct Config {
    pub bot_token: String,
    pub download_dir: PathBuf,
    pub ytdlp_path: PathBuf,
    /// `0` disables the limit
    pub max_concurrent_downloads: usize,
    pub download_timeout: Option<Duration>,
}

impl Config {
    /// Read configuration from the process environment (`.env` is loaded by `main`)
    pub fn from_env() -> BotResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> BotResult<Self> {
        let bot_token = lookup("BOT_TOKEN")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| BotError::config("BOT_TOKEN is not set"))?;

        let download_dir = lookup("DOWNLOAD_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DOWNLOAD_DIR));

        let ytdlp_path = lookup("YTDLP_PATH")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_YTDLP_PATH));

        let max_concurrent_downloads = parse_var(
            &lookup,
            "MAX_CONCURRENT_DOWNLOADS",
            DEFAULT_MAX_CONCURRENT_DOWNLOADS,
        )?;

        let timeout_secs: u64 =
            parse_var(&lookup, "DOWNLOAD_TIMEOUT_SECS", DEFAULT_DOWNLOAD_TIMEOUT_SECS)?;
        let download_timeout = (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs));

        Ok(Self {
            bot_token,
            download_dir,
            ytdlp_path,
            max_concurrent_downloads,
            download_timeout,
        })
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("bot_token", &"<redacted>")
            .field("download_dir", &self.download_dir)
            .field("ytdlp_path", &self.ytdlp_path)
            .field("max_concurrent_downloads", &self.max_concurrent_downloads)
            .field("download_timeout", &self.download_timeout)
            .finish()
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> BotResult<T> {
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| BotError::config(format!("{} has an invalid value: {}", key, raw))),
        _ => Ok(default),
    }
}
