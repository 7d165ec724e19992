//! Restaurant metadata extraction for the OpenRice website.
//!
//! A restaurant identifier is resolved to the search conditions embedded in
//! its public page, the search API is queried with those conditions, and the
//! matching record is projected down to a configured attribute list.

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

pub use clients::{ClientPool, Fetcher, HttpClient, Page};
pub use config::Settings;
pub use error::{Error, Result};
pub use models::{AttributeList, ProjectedRecord, RawRecord, RestaurantData, RestaurantId, Table};
pub use services::{BatchResult, FetchOptions, Lookup, RestaurantScraper, ScrapeOutput};
