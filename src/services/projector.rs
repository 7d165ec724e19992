//! Reduces a raw search record to the attributes a caller asked for.
//!
//! A handful of attribute names are derived rather than copied; see
//! [`Rule`]. Any attribute whose source data is missing or has the wrong
//! shape is dropped from the output without affecting the others.

use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;
use crate::config::HoursEntry;
use crate::models::{AttributeList, ProjectedRecord, RawRecord};
use super::PaymentCodeTable;

/// Fields whose presence marks a restaurant as bookable online.
const BOOKING_WIDGET_FIELDS: &[&str] = &["tmBookingWidget"];

#[derive(Error, Debug, PartialEq)]
enum AttributeError {
    #[error("field `{0}` is missing")]
    Missing(&'static str),

    #[error("record has no `{0}` field")]
    Absent(String),

    #[error("field `{field}` is not {expected}")]
    Shape {
        field: &'static str,
        expected: &'static str,
    },
}

type AttributeResult = std::result::Result<Value, AttributeError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    CategoryNames,
    Coordinates,
    OpeningHours,
    OnlineBooking,
    DistrictName,
    PaymentNames,
    PassThrough,
}

impl Rule {
    fn for_attribute(name: &str) -> Self {
        match name {
            "categoriesUI" => Rule::CategoryNames,
            "coordinates" => Rule::Coordinates,
            "poiHours" => Rule::OpeningHours,
            "onlineBooking" => Rule::OnlineBooking,
            "district" => Rule::DistrictName,
            "paymentIds" => Rule::PaymentNames,
            _ => Rule::PassThrough,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AttributeProjector {
    payment_codes: PaymentCodeTable,
    hours_entry: HoursEntry,
}

impl AttributeProjector {
    pub fn new(hours_entry: HoursEntry) -> Self {
        Self {
            payment_codes: PaymentCodeTable,
            hours_entry,
        }
    }

    pub fn project(&self, record: &RawRecord, attributes: &AttributeList) -> ProjectedRecord {
        let mut output = ProjectedRecord::new();

        for attribute in attributes.iter() {
            match self.extract(record, attribute) {
                Ok(value) => output.insert(attribute, value),
                Err(e) => {
                    debug!(
                        attribute = attribute,
                        error = %e,
                        "Dropping attribute"
                    );
                }
            }
        }

        output
    }

    fn extract(&self, record: &RawRecord, attribute: &str) -> AttributeResult {
        match Rule::for_attribute(attribute) {
            Rule::CategoryNames => category_names(record),
            Rule::Coordinates => coordinates(record),
            Rule::OpeningHours => opening_hours(record, self.hours_entry),
            Rule::OnlineBooking => Ok(online_booking(record)),
            Rule::DistrictName => district_name(record),
            Rule::PaymentNames => payment_names(record, &self.payment_codes),
            Rule::PassThrough => record
                .get(attribute)
                .cloned()
                .ok_or_else(|| AttributeError::Absent(attribute.to_string())),
        }
    }
}

fn field<'a>(record: &'a RawRecord, name: &'static str) -> Result<&'a Value, AttributeError> {
    record.get(name).ok_or(AttributeError::Missing(name))
}

fn list<'a>(record: &'a RawRecord, name: &'static str) -> Result<&'a Vec<Value>, AttributeError> {
    field(record, name)?
        .as_array()
        .ok_or(AttributeError::Shape { field: name, expected: "a list" })
}

fn category_names(record: &RawRecord) -> AttributeResult {
    let names = list(record, "categoriesUI")?
        .iter()
        .map(|category| {
            category
                .get("name")
                .cloned()
                .ok_or(AttributeError::Missing("categoriesUI.name"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Value::Array(names))
}

fn coordinates(record: &RawRecord) -> AttributeResult {
    Ok(json!({
        "lng": field(record, "mapLongitude")?,
        "lat": field(record, "mapLatitude")?,
    }))
}

/// With several entries, one entry's first period becomes a
/// `[start, end]` pair. A single entry (or none) is copied as-is.
fn opening_hours(record: &RawRecord, entry: HoursEntry) -> AttributeResult {
    let hours = list(record, "poiHours")?;
    if hours.len() <= 1 {
        return Ok(Value::Array(hours.clone()));
    }

    let selected = match entry {
        HoursEntry::First => hours.first(),
        HoursEntry::Last => hours.last(),
    }
    .ok_or(AttributeError::Missing("poiHours"))?;

    let start = selected
        .get("period1Start")
        .ok_or(AttributeError::Missing("poiHours.period1Start"))?;
    let end = selected
        .get("period1End")
        .ok_or(AttributeError::Missing("poiHours.period1End"))?;

    Ok(json!([start, end]))
}

fn online_booking(record: &RawRecord) -> Value {
    let bookable = BOOKING_WIDGET_FIELDS
        .iter()
        .any(|name| record.contains_key(*name));
    Value::from(i64::from(bookable))
}

fn district_name(record: &RawRecord) -> AttributeResult {
    field(record, "district")?
        .get("name")
        .cloned()
        .ok_or(AttributeError::Missing("district.name"))
}

fn payment_names(record: &RawRecord, table: &PaymentCodeTable) -> AttributeResult {
    let names = list(record, "paymentIds")?
        .iter()
        .map(|code| {
            code.as_i64()
                .and_then(|code| table.name(code))
                .map(|name| json!(name))
                .unwrap_or_else(|| code.clone())
        })
        .collect();

    Ok(Value::Array(names))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(value: Value) -> RawRecord {
        serde_json::from_value(value).unwrap()
    }

    fn project_one(record: &RawRecord, attribute: &str) -> Option<Value> {
        AttributeProjector::default()
            .project(record, &AttributeList::new([attribute]))
            .get(attribute)
            .cloned()
    }

    #[test]
    fn category_names_are_extracted_in_order() {
        let record = raw(json!({
            "categoriesUI": [{"categoryId": 1, "name": "Cafe"}, {"categoryId": 2, "name": "Bakery"}]
        }));
        assert_eq!(project_one(&record, "categoriesUI"), Some(json!(["Cafe", "Bakery"])));
    }

    #[test]
    fn category_without_name_drops_attribute() {
        let record = raw(json!({"categoriesUI": [{"name": "Cafe"}, {"categoryId": 2}]}));
        assert_eq!(project_one(&record, "categoriesUI"), None);
    }

    #[test]
    fn coordinates_are_assembled() {
        let record = raw(json!({"mapLongitude": 114.17, "mapLatitude": 22.28}));
        assert_eq!(
            project_one(&record, "coordinates"),
            Some(json!({"lng": 114.17, "lat": 22.28}))
        );
        assert_eq!(project_one(&raw(json!({"mapLongitude": 114.17})), "coordinates"), None);
    }

    #[test]
    fn opening_hours_take_last_entry_by_default() {
        let record = raw(json!({"poiHours": [
            {"period1Start": "08:00", "period1End": "15:00"},
            {"period1Start": "11:30", "period1End": "22:00"},
        ]}));
        assert_eq!(project_one(&record, "poiHours"), Some(json!(["11:30", "22:00"])));

        let first = AttributeProjector::new(HoursEntry::First)
            .project(&record, &AttributeList::new(["poiHours"]));
        assert_eq!(first.get("poiHours"), Some(&json!(["08:00", "15:00"])));
    }

    #[test]
    fn single_opening_hours_entry_passes_through() {
        let record = raw(json!({"poiHours": [{"period1Start": "08:00", "period1End": "15:00"}]}));
        assert_eq!(
            project_one(&record, "poiHours"),
            Some(json!([{"period1Start": "08:00", "period1End": "15:00"}]))
        );
    }

    #[test]
    fn opening_hours_without_period_are_dropped() {
        let record = raw(json!({"poiHours": [{"period1Start": "08:00"}, {"period2Start": "09:00"}]}));
        assert_eq!(project_one(&record, "poiHours"), None);
    }

    #[test]
    fn online_booking_reflects_widget_presence() {
        let bookable = raw(json!({"tmBookingWidget": {"url": "https://example.com"}}));
        assert_eq!(project_one(&bookable, "onlineBooking"), Some(json!(1)));
        assert_eq!(project_one(&raw(json!({"name": "x"})), "onlineBooking"), Some(json!(0)));
    }

    #[test]
    fn district_is_reduced_to_name() {
        let record = raw(json!({"district": {"districtId": 1019, "name": "Central"}}));
        assert_eq!(project_one(&record, "district"), Some(json!("Central")));
        assert_eq!(project_one(&raw(json!({"district": "Central"})), "district"), None);
    }

    #[test]
    fn payment_codes_are_named_and_unknown_codes_kept() {
        let record = raw(json!({"paymentIds": [1, 6, 999]}));
        assert_eq!(project_one(&record, "paymentIds"), Some(json!(["Visa", "Octopus", 999])));
    }

    #[test]
    fn missing_fields_are_omitted_and_others_kept() {
        let record = raw(json!({"name": "Cafe", "poiId": 7, "paymentIds": "cash"}));
        let attributes = AttributeList::new([
            "name", "phones", "district", "categoriesUI", "paymentIds", "poiHours", "poiId",
        ]);

        let projected = AttributeProjector::default().project(&record, &attributes);
        assert_eq!(projected.keys().collect::<Vec<_>>(), ["name", "poiId"]);
        assert!(projected.keys().all(|key| attributes.contains(key)));
    }

    #[test]
    fn pass_through_copies_any_json_value() {
        let record = raw(json!({"phones": ["2345 6789"], "priceRangeId": 3, "shortenUrl": null}));
        assert_eq!(project_one(&record, "phones"), Some(json!(["2345 6789"])));
        assert_eq!(project_one(&record, "priceRangeId"), Some(json!(3)));
        assert_eq!(project_one(&record, "shortenUrl"), Some(Value::Null));
    }

    #[test]
    fn projection_is_repeatable() {
        let record = raw(json!({
            "name": "Cafe",
            "paymentIds": [1, 2],
            "categoriesUI": [{"name": "Cafe"}],
        }));
        let attributes = AttributeList::new(["name", "paymentIds", "categoriesUI", "onlineBooking"]);
        let projector = AttributeProjector::default();

        assert_eq!(projector.project(&record, &attributes), projector.project(&record, &attributes));
    }
}
