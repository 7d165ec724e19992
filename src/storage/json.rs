use std::path::{Path, PathBuf};
use serde::Serialize;
use tokio::fs::File as TokioFile;
use tokio::io::{AsyncWriteExt, BufWriter as TokioBufWriter};
use crate::error::Result;

/// Streams serialized records into a JSON array on disk.
pub struct JsonWriter {
    writer: TokioBufWriter<TokioFile>,
    path: PathBuf,
    count: usize,
    is_first: bool,
}

impl JsonWriter {
    pub async fn new(output_dir: impl AsRef<Path>, filename: &str) -> Result<Self> {
        let output_dir = output_dir.as_ref();
        tokio::fs::create_dir_all(output_dir).await?;

        let path = output_dir.join(filename);
        let file = TokioFile::create(&path).await?;
        let mut writer = TokioBufWriter::new(file);
        writer.write_all(b"[\n").await?;

        Ok(Self {
            writer,
            path,
            count: 0,
            is_first: true,
        })
    }

    pub async fn write_record<T: Serialize>(&mut self, record: &T) -> Result<()> {
        if !self.is_first {
            self.writer.write_all(b",\n").await?;
        }
        self.is_first = false;

        let json = serde_json::to_vec(record)?;
        self.writer.write_all(&json).await?;
        self.count += 1;
        self.writer.flush().await?;

        Ok(())
    }

    pub async fn finish(&mut self) -> Result<()> {
        self.writer.write_all(b"\n]").await?;
        self.writer.flush().await?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn count(&self) -> usize {
        self.count
    }
}
