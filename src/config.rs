use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use config::{Config, ConfigError};
use tracing::debug;

pub const DEFAULT_CONFIG_PATH: &str = "config/default";

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 6.0; Nexus 5 Build/MRA58N) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/97.0.4692.99 Mobile Safari/537.36";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub scraper: ScraperConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub region_path: String,
    pub headers: HashMap<String, String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.openrice.com".to_string(),
            region_path: "en/hongkong".to_string(),
            headers: HashMap::from([("user-agent".to_string(), DEFAULT_USER_AGENT.to_string())]),
        }
    }
}

/// Which entry of a multi-entry `poiHours` list supplies the opening period.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum HoursEntry {
    First,
    #[default]
    Last,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ScraperConfig {
    pub attributes_file: PathBuf,
    /// Defaults to the available hardware parallelism when unset.
    pub concurrency: Option<usize>,
    pub hours_entry: HoursEntry,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            attributes_file: PathBuf::from("config/restaurant_attributes.txt"),
            concurrency: None,
            hours_entry: HoursEntry::default(),
        }
    }
}

impl ScraperConfig {
    pub fn effective_concurrency(&self) -> usize {
        self.concurrency
            .filter(|n| *n > 0)
            .unwrap_or_else(default_concurrency)
    }
}

/// One in-flight restaurant per available hardware thread.
pub fn default_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { dir: PathBuf::from("data") }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_path(DEFAULT_CONFIG_PATH)
    }

    pub fn from_path(path: &str) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"));

        let config = builder.build()?;

        if let Ok(headers) = config.get_table("api.headers") {
            debug!(
                ?headers,
                "Loaded API headers from configuration"
            );
        }

        let settings: Settings = config.try_deserialize()?;

        debug!(
            base_url = %settings.api.base_url,
            region_path = %settings.api.region_path,
            attributes_file = ?settings.scraper.attributes_file,
            hours_entry = ?settings.scraper.hours_entry,
            "Parsed settings"
        );

        Ok(settings)
    }
}
