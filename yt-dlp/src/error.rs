use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("yt-dlp binary not found: {0}")]
    BinaryNotFound(PathBuf),

    #[error("yt-dlp binary not executable: {0}")]
    BinaryNotExecutable(PathBuf),

    #[error("failed to execute yt-dlp: {0}")]
    ExecutionFailed(#[from] std::io::Error),

    /// yt-dlp ran and exited unsuccessfully. `message` is the error line it
    /// reported, e.g. `ERROR: [youtube] xyz: Video unavailable`.
    #[error("{message}")]
    CommandFailed { code: i32, message: String },

    #[error("failed to parse JSON output: {0}")]
    JsonParseFailed(#[from] serde_json::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(String)
}

impl Error {
    /// Exit code of the yt-dlp process, when it got far enough to have one.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Error::CommandFailed { code, .. } => Some(*code),
            _ => None
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
