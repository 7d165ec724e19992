use std::sync::Arc;
use scraper::{Html, Selector};
use serde_json::{Map, Value};
use tracing::debug;
use crate::clients::Fetcher;
use crate::error::{Error, Result};
use crate::models::{QueryFragment, RestaurantId};
use super::Endpoints;

/// Element on the restaurant page whose `data-target` attribute carries the
/// search conditions for that restaurant.
const CONDITIONS_SELECTOR: &str = "script[data-target]";
const CONDITIONS_ATTRIBUTE: &str = "data-target";

/// Turns a restaurant identifier into the search conditions that surface it,
/// since the search API cannot be queried by identifier.
#[derive(Clone)]
pub struct IdentifierResolver {
    fetcher: Arc<dyn Fetcher>,
    endpoints: Endpoints,
}

impl IdentifierResolver {
    pub fn new(fetcher: Arc<dyn Fetcher>, endpoints: Endpoints) -> Self {
        Self { fetcher, endpoints }
    }

    pub async fn resolve(&self, id: &RestaurantId) -> Result<QueryFragment> {
        let url = self.endpoints.restaurant_page(id)?;
        let page = self.fetcher.fetch(&url).await?;

        debug!(
            identifier = %id,
            status = page.status.as_u16(),
            url = %url,
            "Restaurant page received"
        );

        if page.is_not_found() {
            return Err(Error::not_found(id, "restaurant page does not exist"));
        }
        if !page.status.is_success() {
            return Err(Error::UnexpectedStatus {
                status: page.status.as_u16(),
                url: url.to_string(),
            });
        }

        let fragment = query_fragment_from_html(id, &page.body)?;

        debug!(
            identifier = %id,
            conditions = fragment.len(),
            "Resolved search conditions"
        );

        Ok(fragment)
    }
}

/// Extracts the first `data-target` blob from a restaurant page and flattens
/// it into `<category>id=<value>` pairs, categories in document order.
pub fn query_fragment_from_html(id: &RestaurantId, html: &str) -> Result<QueryFragment> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(CONDITIONS_SELECTOR)
        .map_err(|e| Error::resolution(id, format!("invalid selector: {e}")))?;

    let blob = document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr(CONDITIONS_ATTRIBUTE))
        .ok_or_else(|| Error::resolution(id, "page has no embedded search conditions"))?;

    let conditions: Map<String, Value> = serde_json::from_str(blob)
        .map_err(|e| Error::resolution(id, format!("malformed search conditions: {e}")))?;

    let mut fragment = QueryFragment::new();
    for (category, values) in &conditions {
        let values = values.as_array().ok_or_else(|| {
            Error::resolution(id, format!("conditions for `{category}` are not a list"))
        })?;

        for value in values {
            let value = condition_value(value).ok_or_else(|| {
                Error::resolution(id, format!("unsupported `{category}` condition: {value}"))
            })?;
            fragment.push_condition(category, value);
        }
    }

    Ok(fragment)
}

fn condition_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(blob: &str) -> String {
        format!(
            r#"<html><head><script src="/app.js"></script></head>
            <body><script type="text/template" data-target='{blob}'></script>
            <script data-target='{{"other":[1]}}'></script></body></html>"#
        )
    }

    #[test]
    fn flattens_categories_in_document_order() {
        let id = RestaurantId::from("494380");
        let html = page(r#"{"district":[1019],"cuisine":[4001,1004],"dish":["1203"]}"#);

        let fragment = query_fragment_from_html(&id, &html).unwrap();
        assert_eq!(
            fragment.to_string(),
            "districtid=1019&cuisineid=4001&cuisineid=1004&dishid=1203"
        );
    }

    #[test]
    fn empty_categories_contribute_nothing() {
        let id = RestaurantId::from("1");
        let fragment = query_fragment_from_html(&id, &page(r#"{"district":[],"cuisine":[7]}"#)).unwrap();
        assert_eq!(fragment.to_string(), "cuisineid=7");
    }

    #[test]
    fn missing_blob_is_a_resolution_error() {
        let id = RestaurantId::from("1");
        let err = query_fragment_from_html(&id, "<html><script>var x = 1;</script></html>").unwrap_err();
        assert!(err.is_resolution());
    }

    #[test]
    fn malformed_blob_is_a_resolution_error() {
        let id = RestaurantId::from("1");
        let err = query_fragment_from_html(&id, &page("not json")).unwrap_err();
        assert!(err.is_resolution());

        let err = query_fragment_from_html(&id, &page(r#"{"district":1019}"#)).unwrap_err();
        assert!(err.is_resolution());

        let err = query_fragment_from_html(&id, &page(r#"["district"]"#)).unwrap_err();
        assert!(err.is_resolution());
    }
}
