use async_trait::async_trait;
use rquest::{Client, RequestBuilder};
use rquest_util::Emulation;
use ::http::header::{HeaderMap, HeaderName, HeaderValue};
use ::http::StatusCode;
use url::Url;
use crate::clients::{Fetcher, Page};
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use tracing::{error, debug};

pub struct HttpClient {
    client: Client,
    headers: HeaderMap,
}

impl HttpClient {
    pub fn new(api: &ApiConfig, emulation: Emulation) -> Result<Self> {
        let mut headers = HeaderMap::new();

        for (key, value) in api.headers.iter() {
            if let (Ok(header_name), Ok(header_value)) = (
                HeaderName::from_bytes(key.as_bytes()),
                HeaderValue::from_str(value)
            ) {
                headers.insert(header_name, header_value);
                debug!(
                    header_key = %key,
                    header_value = %value,
                    "Adding header"
                );
            } else {
                error!(
                    header_key = %key,
                    header_value = %value,
                    "Invalid header value"
                );
            }
        }

        debug!(
            emulation = ?emulation,
            "Creating client with emulation"
        );

        let client = Client::builder()
            .emulation(emulation)
            .build()?;

        Ok(Self {
            client,
            headers,
        })
    }

    pub fn get(&self, url: &str) -> RequestBuilder {
        let mut request = self.client.get(url);

        // Configured headers override the emulation defaults
        for (key, value) in self.headers.iter() {
            request = request.header(key, value);
        }

        request
    }

    pub async fn send(&self, url: &Url) -> Result<Page> {
        debug!(url = %url, "Sending request");

        let response = self.get(url.as_str()).send().await?;
        let status = response.status();

        debug!(
            status = status.as_u16(),
            url = %url,
            "Response received"
        );

        match status {
            StatusCode::TOO_MANY_REQUESTS => {
                debug!(url = %url, "Rate limit exceeded");
                Err(Error::RateLimit)
            },
            StatusCode::FORBIDDEN => {
                debug!(url = %url, "Received 403 Forbidden");
                Err(Error::Forbidden)
            },
            _ => {
                let body = response.text().await?;
                Ok(Page::new(status, body))
            }
        }
    }
}

#[async_trait]
impl Fetcher for HttpClient {
    async fn fetch(&self, url: &Url) -> Result<Page> {
        self.send(url).await
    }
}
