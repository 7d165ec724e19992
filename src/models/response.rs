use serde::Deserialize;
use super::RawRecord;

/// Envelope returned by the `/api/pois` search endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoiSearchResponse {
    pub search_result: SearchResult,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub pagination_result: PaginationResult,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationResult {
    #[serde(default)]
    pub count: Option<u64>,
    pub results: Vec<RawRecord>,
}
