use std::sync::Arc;
use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use serde_json::Value;
use crate::error::Result;
use super::ProjectedRecord;

/// Row-per-restaurant view of a batch of projected records.
///
/// Columns are the union of record keys in first-seen order; a record that
/// lacks a column holds a null in that cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Option<Value>>>,
}

impl Table {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ProjectedRecord>,
    {
        let records: Vec<&ProjectedRecord> = records.into_iter().collect();

        let mut columns: Vec<String> = Vec::new();
        for record in &records {
            for key in record.keys() {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
        }

        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|column| record.get(column).cloned())
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Option<Value>>] {
        &self.rows
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let index = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.get(index)?.as_ref()
    }

    /// Rebuilds one record per row; null cells are left out.
    pub fn to_records(&self) -> Vec<ProjectedRecord> {
        self.rows
            .iter()
            .map(|row| {
                let mut record = ProjectedRecord::new();
                for (column, cell) in self.columns.iter().zip(row) {
                    if let Some(value) = cell {
                        record.insert(column.as_str(), value.clone());
                    }
                }
                record
            })
            .collect()
    }

    /// Converts to an Arrow batch with one nullable UTF-8 column per attribute.
    /// Strings are stored as-is, every other value as its JSON text.
    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        let schema = Arc::new(Schema::new(
            self.columns
                .iter()
                .map(|name| Field::new(name, DataType::Utf8, true))
                .collect::<Vec<_>>(),
        ));

        let arrays = (0..self.columns.len())
            .map(|index| {
                let cells: Vec<Option<String>> = self.rows
                    .iter()
                    .map(|row| row[index].as_ref().map(cell_text))
                    .collect();
                Arc::new(StringArray::from(cells)) as ArrayRef
            })
            .collect::<Vec<_>>();

        let options = RecordBatchOptions::new().with_row_count(Some(self.rows.len()));
        Ok(RecordBatch::try_new_with_options(schema, arrays, &options)?)
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::Array;
    use serde_json::json;

    fn record(pairs: &[(&str, Value)]) -> ProjectedRecord {
        let mut record = ProjectedRecord::new();
        for (key, value) in pairs {
            record.insert(*key, value.clone());
        }
        record
    }

    #[test]
    fn columns_are_union_in_first_seen_order() {
        let a = record(&[("name", json!("Cafe A")), ("district", json!("Central"))]);
        let b = record(&[("name", json!("Cafe B")), ("phones", json!(["2345 6789"]))]);

        let table = Table::from_records([&a, &b]);
        assert_eq!(table.column_names(), ["name", "district", "phones"]);
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.get(1, "name"), Some(&json!("Cafe B")));
        assert_eq!(table.get(1, "district"), None);
        assert_eq!(table.get(0, "phones"), None);
    }

    #[test]
    fn record_batch_encodes_non_strings_as_json() {
        let a = record(&[
            ("name", json!("Cafe A")),
            ("coordinates", json!({"lng": 114.17, "lat": 22.28})),
        ]);
        let b = record(&[("name", json!("Cafe B"))]);

        let batch = Table::from_records([&a, &b]).to_record_batch().unwrap();
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.num_columns(), 2);

        let names = batch.column(0).as_any().downcast_ref::<StringArray>().unwrap();
        assert_eq!(names.value(0), "Cafe A");

        let coordinates = batch.column(1).as_any().downcast_ref::<StringArray>().unwrap();
        assert_eq!(coordinates.value(0), r#"{"lng":114.17,"lat":22.28}"#);
        assert!(coordinates.is_null(1));
    }

    #[test]
    fn rows_convert_back_to_records() {
        let a = record(&[("name", json!("Cafe A")), ("district", json!("Central"))]);
        let b = record(&[("name", json!("Cafe B"))]);

        let records = Table::from_records([&a, &b]).to_records();
        assert_eq!(records, [a, b]);
    }

    #[test]
    fn empty_table_converts() {
        let table = Table::from_records(std::iter::empty());
        let batch = table.to_record_batch().unwrap();
        assert_eq!(batch.num_rows(), 0);
        assert_eq!(batch.num_columns(), 0);
    }
}
