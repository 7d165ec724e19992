use thiserror::Error;
use parquet::errors::ParquetError;
use arrow::error::ArrowError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Restaurant {identifier} not found: {detail}")]
    NotFound {
        identifier: String,
        detail: &'static str,
    },

    #[error("Cannot resolve restaurant {identifier}: {detail}")]
    Resolution {
        identifier: String,
        detail: String,
    },

    #[error("Invalid restaurant identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Unexpected status {status} from {url}")]
    UnexpectedStatus {
        status: u16,
        url: String,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] rquest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Rate limit exceeded")]
    RateLimit,

    #[error("Forbidden - Access denied")]
    Forbidden,

    #[error("Invalid options: {0}")]
    InvalidOptions(&'static str),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),
}

impl Error {
    pub fn not_found(identifier: impl ToString, detail: &'static str) -> Self {
        Error::NotFound {
            identifier: identifier.to_string(),
            detail,
        }
    }

    pub fn resolution(identifier: impl ToString, detail: impl Into<String>) -> Self {
        Error::Resolution {
            identifier: identifier.to_string(),
            detail: detail.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    pub fn is_resolution(&self) -> bool {
        matches!(self, Error::Resolution { .. })
    }
}
