use std::sync::Arc;
use tracing::{debug, error};
use crate::clients::Fetcher;
use crate::error::{Error, Result};
use crate::models::{PoiSearchResponse, QueryFragment, RawRecord, RestaurantId};
use super::Endpoints;

const POI_ID_FIELD: &str = "poiId";

/// Queries the search API with resolved conditions and picks out the record
/// for the requested restaurant.
#[derive(Clone)]
pub struct RecordLocator {
    fetcher: Arc<dyn Fetcher>,
    endpoints: Endpoints,
}

impl RecordLocator {
    pub fn new(fetcher: Arc<dyn Fetcher>, endpoints: Endpoints) -> Self {
        Self { fetcher, endpoints }
    }

    pub async fn locate(&self, id: &RestaurantId, fragment: &QueryFragment) -> Result<RawRecord> {
        let poi_id = id.poi_id()?;
        let url = self.endpoints.search(fragment)?;
        let page = self.fetcher.fetch(&url).await?;

        debug!(
            identifier = %id,
            status = page.status.as_u16(),
            url = %url,
            "Search API response received"
        );

        if !page.status.is_success() {
            return Err(Error::UnexpectedStatus {
                status: page.status.as_u16(),
                url: url.to_string(),
            });
        }

        let response: PoiSearchResponse = serde_json::from_str(&page.body).map_err(|e| {
            error!(
                error = %e,
                identifier = %id,
                "Failed to parse search response"
            );
            Error::from(e)
        })?;

        find_record(id, poi_id, response.search_result.pagination_result.results)
    }
}

/// First result whose `poiId` equals the requested identifier. The API is not
/// expected to return duplicates; if it does, array order wins.
pub fn find_record(id: &RestaurantId, poi_id: i64, results: Vec<RawRecord>) -> Result<RawRecord> {
    let candidates = results.len();

    results
        .into_iter()
        .find(|record| {
            record
                .get(POI_ID_FIELD)
                .and_then(|value| value.as_i64())
                .is_some_and(|candidate| candidate == poi_id)
        })
        .ok_or_else(|| {
            debug!(
                identifier = %id,
                candidates,
                "No search result matched identifier"
            );
            Error::not_found(id, "no matching search result")
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(values: serde_json::Value) -> Vec<RawRecord> {
        serde_json::from_value(values).unwrap()
    }

    #[test]
    fn picks_record_with_matching_poi_id() {
        let id = RestaurantId::from("494380");
        let results = records(json!([
            {"poiId": 1, "name": "Other"},
            {"poiId": 494380, "name": "Target"},
        ]));

        let record = find_record(&id, 494380, results).unwrap();
        assert_eq!(record["name"], json!("Target"));
    }

    #[test]
    fn first_duplicate_wins() {
        let id = RestaurantId::from("7");
        let results = records(json!([
            {"poiId": 7, "name": "First"},
            {"poiId": 7, "name": "Second"},
        ]));

        let record = find_record(&id, 7, results).unwrap();
        assert_eq!(record["name"], json!("First"));
    }

    #[test]
    fn no_match_is_not_found() {
        let id = RestaurantId::from("7");
        let results = records(json!([{"poiId": 8}, {"name": "no id"}, {"poiId": "7"}]));
        assert!(find_record(&id, 7, results).unwrap_err().is_not_found());
    }

    #[test]
    fn empty_results_are_not_found() {
        let id = RestaurantId::from("7");
        assert!(find_record(&id, 7, Vec::new()).unwrap_err().is_not_found());
    }

    #[test]
    fn envelope_path_is_parsed() {
        let body = r#"{"searchResult":{"paginationResult":{"count":1,"results":[{"poiId":3}]}}}"#;
        let response: PoiSearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.search_result.pagination_result.count, Some(1));
        assert_eq!(response.search_result.pagination_result.results.len(), 1);
    }
}
