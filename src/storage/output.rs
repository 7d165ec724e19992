use std::path::{Path, PathBuf};
use tracing::info;
use crate::error::Result;
use crate::services::ScrapeOutput;
use super::{JsonWriter, ParquetConverter};

/// Files produced for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFiles {
    pub json: PathBuf,
    pub parquet: Option<PathBuf>,
    pub records: usize,
}

/// Writes every result to `restaurants_<slug>.json`; a table is also written
/// to `restaurants_<slug>.parquet` when it has at least one column.
pub async fn write_output(
    output: &ScrapeOutput,
    output_dir: impl AsRef<Path>,
    slug: &str,
) -> Result<WrittenFiles> {
    let output_dir = output_dir.as_ref();
    let mut writer = JsonWriter::new(output_dir, &format!("restaurants_{slug}.json")).await?;
    let mut parquet = None;

    match output {
        ScrapeOutput::Single(data) => {
            writer.write_record(data).await?;
        }
        ScrapeOutput::Batch(batch) => {
            for data in &batch.results {
                writer.write_record(data).await?;
            }
        }
        ScrapeOutput::Table { table, .. } => {
            for record in table.to_records() {
                writer.write_record(&record).await?;
            }
            if table.num_columns() > 0 {
                let path = output_dir.join(format!("restaurants_{slug}.parquet"));
                ParquetConverter::write_table(table, &path)?;
                parquet = Some(path);
            } else {
                info!("No attribute columns, skipping Parquet output");
            }
        }
    }

    writer.finish().await?;

    info!(
        path = ?writer.path(),
        written = writer.count(),
        "Wrote restaurants"
    );

    Ok(WrittenFiles {
        json: writer.path().to_path_buf(),
        parquet,
        records: writer.count(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProjectedRecord, RestaurantData, Table};
    use crate::services::BatchResult;
    use serde_json::{json, Value};

    fn record(name: &str) -> ProjectedRecord {
        let mut record = ProjectedRecord::new();
        record.insert("name", json!(name));
        record
    }

    fn read_json(path: &Path) -> Value {
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn table_output_writes_json_and_parquet() {
        let dir = tempfile::tempdir().unwrap();
        let (a, b) = (record("Cafe A"), record("Cafe B"));
        let output = ScrapeOutput::Table {
            table: Table::from_records([&a, &b]),
            failures: Vec::new(),
        };

        let files = write_output(&output, dir.path(), "run").await.unwrap();

        assert_eq!(files.json, dir.path().join("restaurants_run.json"));
        assert_eq!(files.parquet, Some(dir.path().join("restaurants_run.parquet")));
        assert_eq!(files.records, 2);
        assert_eq!(read_json(&files.json), json!([{"name": "Cafe A"}, {"name": "Cafe B"}]));
        assert!(dir.path().join("restaurants_run.parquet").exists());
    }

    #[tokio::test]
    async fn single_output_uses_the_shared_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let output = ScrapeOutput::Single(RestaurantData::Projected(record("Cafe A")));

        let files = write_output(&output, dir.path(), "run").await.unwrap();

        assert_eq!(files.json, dir.path().join("restaurants_run.json"));
        assert_eq!(files.parquet, None);
        assert_eq!(read_json(&files.json), json!([{"name": "Cafe A"}]));
    }

    #[tokio::test]
    async fn batch_output_writes_successes_only() {
        let dir = tempfile::tempdir().unwrap();
        let output = ScrapeOutput::Batch(BatchResult {
            results: vec![RestaurantData::Projected(record("Cafe C"))],
            failures: Vec::new(),
        });

        let files = write_output(&output, dir.path().join("out"), "run").await.unwrap();
        assert_eq!(files.records, 1);
        assert_eq!(read_json(&files.json), json!([{"name": "Cafe C"}]));
    }

    #[tokio::test]
    async fn empty_table_still_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let output = ScrapeOutput::Table {
            table: Table::from_records(std::iter::empty()),
            failures: Vec::new(),
        };

        let files = write_output(&output, dir.path(), "run").await.unwrap();
        assert_eq!(files.parquet, None);
        assert_eq!(read_json(&files.json), json!([]));
    }
}
