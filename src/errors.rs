use std::{fmt, time::Duration};

/// Central error type of the bot
#[derive(Debug)]
pub enum BotError {
    /// Missing or malformed configuration
    Config(String),
    /// yt-dlp reported a failure (invalid link, removed video, geo-block...)
    Extraction(String),
    /// Filesystem errors
    FileSystem(std::io::Error),
    /// Telegram API errors
    Telegram(teloxide::RequestError),
    /// Malformed data (callback payloads, extractor output)
    Parse(String),
    /// Downloaded file was not found where it was expected
    FileNotFound(String),
    /// Language code outside of the supported set
    UnsupportedLanguage(String),
    /// External command could not be run
    ExternalCommand { command: String, stderr: String },
    /// Extraction took longer than allowed
    Timeout(Duration),
}

impl fmt::Display for BotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BotError::Config(msg) => write!(f, "Configuration error: {}", msg),
            BotError::Extraction(msg) => write!(f, "{}", msg),
            BotError::FileSystem(e) => write!(f, "Filesystem error: {}", e),
            BotError::Telegram(e) => write!(f, "Telegram API error: {}", e),
            BotError::Parse(msg) => write!(f, "Parse error: {}", msg),
            BotError::FileNotFound(path) => write!(f, "Downloaded file not found: {}", path),
            BotError::UnsupportedLanguage(code) => write!(f, "Unsupported language: {}", code),
            BotError::ExternalCommand { command, stderr } => {
                write!(f, "Command {} failed: {}", command, stderr)
            }
            BotError::Timeout(limit) => write!(f, "Download timed out after {:?}", limit),
        }
    }
}

impl std::error::Error for BotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BotError::FileSystem(e) => Some(e),
            BotError::Telegram(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BotError {
    fn from(err: std::io::Error) -> Self {
        BotError::FileSystem(err)
    }
}

impl From<teloxide::RequestError> for BotError {
    fn from(err: teloxide::RequestError) -> Self {
        BotError::Telegram(err)
    }
}

impl From<serde_json::Error> for BotError {
    fn from(err: serde_json::Error) -> Self {
        BotError::Parse(format!("JSON parsing error: {}", err))
    }
}

impl BotError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn extraction(msg: impl Into<String>) -> Self {
        Self::Extraction(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound(path.into())
    }

    pub fn external_command_error(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self::ExternalCommand {
            command: command.into(),
            stderr: stderr.into(),
        }
    }
}

/// Result of bot operations
pub type BotResult<T> = Result<T, BotError>;

/// Result for handlers
pub type HandlerResult = BotResult<()>;
