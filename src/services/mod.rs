pub mod locator;
pub mod payment;
pub mod projector;
pub mod resolver;
pub mod scraper;

pub use locator::RecordLocator;
pub use payment::PaymentCodeTable;
pub use projector::AttributeProjector;
pub use resolver::IdentifierResolver;
pub use self::scraper::{BatchResult, Failure, FetchOptions, Lookup, RestaurantScraper, ScrapeOutput};

use url::{ParseError, Url};
use crate::config::ApiConfig;
use crate::error::Result;
use crate::models::{QueryFragment, RestaurantId};

/// URL layout of the restaurant site.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
    region_path: String,
}

impl Endpoints {
    pub fn new(base_url: &str, region_path: &str) -> Result<Self> {
        let base = Url::parse(base_url)?;
        if base.cannot_be_a_base() {
            return Err(ParseError::RelativeUrlWithCannotBeABaseBase.into());
        }

        Ok(Self {
            base,
            region_path: region_path.trim_matches('/').to_string(),
        })
    }

    pub fn from_config(api: &ApiConfig) -> Result<Self> {
        Self::new(&api.base_url, &api.region_path)
    }

    /// `<base>/<region>/restaurant/<id>`, the id escaped as one path segment.
    pub fn restaurant_page(&self, id: &RestaurantId) -> Result<Url> {
        let region = self.region_path.split('/').filter(|s| !s.is_empty());
        self.with_segments(region.chain(["restaurant", id.as_str()]))
    }

    /// `<base>/api/pois?uilang=en&<fragment>`
    pub fn search(&self, fragment: &QueryFragment) -> Result<Url> {
        let mut url = self.with_segments(["api", "pois"])?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("uilang", "en");
            for (key, value) in fragment.pairs() {
                query.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Appends to the base path, keeping any prefix the base already has.
    fn with_segments<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}
