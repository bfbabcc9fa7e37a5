//! Reading and writing labeled datasets as headerless CSV.
//!
//! Each row holds the features followed by the label:
//!
//! ```text
//! 5.1,3.5,1.4,0.2,Iris-setosa
//! ```
//!
//! Every row must have the same number of columns. Fields are not trimmed.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use tracing::debug;

use crate::common_types::{DataPoint, Dataset};
use crate::error::LoadError;

/// Loads a dataset from a CSV file, preserving row order.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = read_dataset(file)?;
    debug!(path = %path.display(), rows = dataset.len(), "dataset loaded");
    Ok(dataset)
}

/// Parses a dataset from any reader.
///
/// Row and column numbers in errors are 1-based.
pub fn read_dataset<R: Read>(reader: R) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(false)
        .from_reader(reader);

    let mut dataset = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let row = row + 1;
        let Some((label, features)) = split_record(&record) else {
            return Err(LoadError::MissingLabel { row });
        };
        let features = features
            .iter()
            .enumerate()
            .map(|(column, value)| {
                value.parse::<f64>().map_err(|source| LoadError::InvalidFeature {
                    row,
                    column: column + 1,
                    value: (*value).to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        dataset.push(DataPoint::new(features, label.to_string()));
    }
    Ok(dataset)
}

/// Splits a record into its label (last field) and feature fields.
fn split_record(record: &csv::StringRecord) -> Option<(&str, Vec<&str>)> {
    let fields: Vec<&str> = record.iter().collect();
    let (label, features) = fields.split_last()?;
    Some((*label, features.to_vec()))
}

/// Writes a dataset in the format [`read_dataset`] accepts.
///
/// Features use the shortest representation that parses back to the same
/// `f64`, so a written dataset loads back unchanged.
pub fn write_dataset<W: Write>(writer: W, dataset: &[DataPoint]) -> Result<(), LoadError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    for point in dataset {
        let mut fields: Vec<String> = point.features.iter().map(|f| f.to_string()).collect();
        fields.push(point.label.clone());
        writer.write_record(&fields)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes a dataset to a file, replacing it if it exists.
pub fn save_dataset(path: impl AsRef<Path>, dataset: &[DataPoint]) -> Result<(), LoadError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    write_dataset(file, dataset)?;
    debug!(path = %path.display(), rows = dataset.len(), "dataset written");
    Ok(())
}
