use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Caller-supplied payload was missing or malformed
    #[error("{0}")]
    Input(String),

    #[error("HTTP {status} from {url}")]
    Status { status: StatusCode, url: String },

    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Markup error: {0}")]
    Markup(String),

    #[error("Import code error: {0}")]
    ImportCode(String),

    #[error("{0}")]
    Resolve(String),

    /// Every source in a fallback chain came back empty
    #[error("{0}")]
    Exhausted(String),
}

impl Error {
    /// Network or HTTP-status failures. Fallback chains only swallow these.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Error::Status { .. } | Error::Request(_) | Error::Transport(_)
        )
    }
}

impl From<roxmltree::Error> for Error {
    fn from(e: roxmltree::Error) -> Self {
        Error::Markup(e.to_string())
    }
}

impl From<base64::DecodeError> for Error {
    fn from(e: base64::DecodeError) -> Self {
        Error::ImportCode(e.to_string())
    }
}
