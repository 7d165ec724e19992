pub mod pool;
pub mod http;

pub use self::pool::ClientPool;
pub use self::http::HttpClient;

use async_trait::async_trait;
use ::http::StatusCode;
use url::Url;
use crate::error::Result;

/// A fetched document together with the status it was served with.
#[derive(Debug, Clone)]
pub struct Page {
    pub status: StatusCode,
    pub body: String,
}

impl Page {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn is_not_found(&self) -> bool {
        self.status == StatusCode::NOT_FOUND
    }
}

/// Transport seam between the scraping pipeline and the network.
///
/// Implementations return every status except rate limiting and access
/// denial as a [`Page`], leaving the interpretation of 404 to the caller.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<Page>;
}
