use std::fs::File;
use std::path::Path;
use parquet::arrow::ArrowWriter;
use tracing::info;
use crate::error::Result;
use crate::models::Table;

pub struct ParquetConverter;

impl ParquetConverter {
    pub fn write_table(table: &Table, output_path: impl AsRef<Path>) -> Result<()> {
        let batch = table.to_record_batch()?;

        let file = File::create(output_path.as_ref())?;
        let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
        writer.write(&batch)?;
        writer.close()?;

        info!(
            rows = batch.num_rows(),
            columns = batch.num_columns(),
            path = ?output_path.as_ref(),
            "Wrote table to Parquet"
        );

        Ok(())
    }
}
