//! Parquet export of the finished feature table.
//!
//! One file, one row group per flush, SNAPPY compression. The schema is the
//! frame itself: a non-null `date` timestamp column followed by one nullable
//! Float64 field per frame column, in frame order. Downstream training code
//! relies on that ordering.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Builder, TimestampMicrosecondBuilder};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use tracing::info;
use types::FeatureFrame;

use crate::error::StorageError;

/// Write a frame to a single Parquet file.
pub fn write_frame<P: AsRef<Path>>(frame: &FeatureFrame, path: P) -> Result<(), StorageError> {
    let schema = Arc::new(build_schema(frame));

    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path.as_ref())?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();

    let mut writer = ArrowWriter::try_new(file, schema.clone(), Some(props))?;
    writer.write(&build_batch(frame, schema)?)?;
    writer.close()?;

    info!(
        path = %path.as_ref().display(),
        rows = frame.len(),
        columns = frame.column_names().len(),
        "wrote feature table"
    );
    Ok(())
}

/// Build the Arrow schema for a frame.
fn build_schema(frame: &FeatureFrame) -> Schema {
    let mut fields = vec![Field::new(
        "date",
        DataType::Timestamp(TimeUnit::Microsecond, None),
        false,
    )];
    for name in frame.column_names() {
        fields.push(Field::new(name, DataType::Float64, true));
    }
    Schema::new(fields)
}

/// Build one RecordBatch holding the entire frame.
fn build_batch(frame: &FeatureFrame, schema: Arc<Schema>) -> Result<RecordBatch, StorageError> {
    let rows = frame.len();

    let mut date_builder = TimestampMicrosecondBuilder::with_capacity(rows);
    for ts in frame.index() {
        date_builder.append_value(ts.and_utc().timestamp_micros());
    }

    let mut arrays: Vec<ArrayRef> = vec![Arc::new(date_builder.finish())];
    for name in frame.column_names() {
        let mut builder = Float64Builder::with_capacity(rows);
        if let Some(column) = frame.column(name) {
            for value in column {
                builder.append_option(*value);
            }
        }
        arrays.push(Arc::new(builder.finish()));
    }

    Ok(RecordBatch::try_new(schema, arrays)?)
}
