use async_trait::async_trait;
use rquest_util::Emulation;
use url::Url;
use crate::clients::{Fetcher, Page};
use crate::config::ApiConfig;
use crate::clients::http::HttpClient;
use crate::error::Result;
use tracing::debug;

/// Round-robin set of clients, one per browser emulation profile.
pub struct ClientPool {
    clients: Vec<HttpClient>,
    current: std::sync::atomic::AtomicUsize,
}

impl ClientPool {
    pub fn new(api: &ApiConfig) -> Result<Self> {
        let emulations = vec![
            Emulation::Chrome133,
            Emulation::Firefox136,
            Emulation::Safari18_3,
            Emulation::Edge134,
        ];

        debug!("Creating client pool with {} emulations", emulations.len());

        let clients = emulations.into_iter()
            .map(|emulation| HttpClient::new(api, emulation))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            clients,
            current: std::sync::atomic::AtomicUsize::new(0),
        })
    }

    pub fn next_client(&self) -> &HttpClient {
        let current = self.current.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        &self.clients[current % self.clients.len()]
    }
}

#[async_trait]
impl Fetcher for ClientPool {
    async fn fetch(&self, url: &Url) -> Result<Page> {
        self.next_client().send(url).await
    }
}
