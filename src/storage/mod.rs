pub mod json;
pub mod output;
pub mod parquet;

pub use self::json::JsonWriter;
pub use self::output::{write_output, WrittenFiles};
pub use self::parquet::ParquetConverter;
