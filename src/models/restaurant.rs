use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use crate::error::{Error, Result};

/// Caller-supplied token naming one restaurant on the site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RestaurantId(String);

impl RestaurantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The numeric `poiId` this identifier must match in search results.
    pub fn poi_id(&self) -> Result<i64> {
        self.0
            .parse::<i64>()
            .map_err(|_| Error::InvalidIdentifier(self.0.clone()))
    }
}

impl fmt::Display for RestaurantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RestaurantId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RestaurantId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl From<u64> for RestaurantId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

/// Every field the search API returned for one restaurant.
pub type RawRecord = Map<String, Value>;

/// Attribute name to transformed value, keyed in attribute-list order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectedRecord(Map<String, Value>);

impl ProjectedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, attribute: impl Into<String>, value: Value) {
        self.0.insert(attribute.into(), value);
    }

    pub fn get(&self, attribute: &str) -> Option<&Value> {
        self.0.get(attribute)
    }

    pub fn contains(&self, attribute: &str) -> bool {
        self.0.contains_key(attribute)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }
}

/// One scraped restaurant, either projected or in its raw API form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RestaurantData {
    Projected(ProjectedRecord),
    Raw(RawRecord),
}

impl RestaurantData {
    pub fn as_projected(&self) -> Option<&ProjectedRecord> {
        match self {
            RestaurantData::Projected(record) => Some(record),
            RestaurantData::Raw(_) => None,
        }
    }

    pub fn as_raw(&self) -> Option<&RawRecord> {
        match self {
            RestaurantData::Raw(record) => Some(record),
            RestaurantData::Projected(_) => None,
        }
    }
}
