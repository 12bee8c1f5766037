use thiserror::Error;

use crate::downloader::DownloaderError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid selector pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("cannot resolve `{url}`: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The fetched page could not be turned into a document.
    #[error("document at {url} is unreadable: {reason}")]
    DocumentUnreadable { url: String, reason: String },

    #[error(transparent)]
    Download(#[from] DownloaderError),

    #[error("invalid config: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize item: {0}")]
    Serialize(#[from] serde_json::Error),
}
