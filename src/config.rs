//! Invocation settings for a single classification run.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, InvalidInput};

/// Which dataset to load, what to classify and how many neighbors vote.
///
/// Read from JSON with camelCase keys; missing keys take their defaults:
///
/// ```json
/// { "datasetPath": "dataset.csv", "queryPoint": [5.1, 3.5, 1.4, 0.2], "k": 3 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KnnConfig {
    /// Headerless CSV file, label in the last column.
    pub dataset_path: PathBuf,
    /// Features of the point to classify.
    pub query_point: Vec<f64>,
    /// Neighbor count. Signed so that bad values from files and flags reach
    /// [`KnnConfig::neighbor_count`] instead of failing to deserialize.
    pub k: i64,
}

impl Default for KnnConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("dataset.csv"),
            query_point: vec![5.1, 3.5, 1.4, 0.2],
            k: 3,
        }
    }
}

impl KnnConfig {
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&s)
    }

    /// Layers settings: defaults, then `config_file` when given, then
    /// [`Self::with_overrides`].
    pub fn resolve(
        config_file: Option<&Path>,
        dataset: Option<PathBuf>,
        query: Option<&str>,
        k: Option<i64>,
    ) -> Result<Self, ConfigError> {
        let base = match config_file {
            Some(path) => Self::from_json_file(path)?,
            None => Self::default(),
        };
        base.with_overrides(dataset, query, k)
    }

    /// Replaces every field whose override is `Some`. The query is given in
    /// the [`parse_query_point`] format.
    pub fn with_overrides(
        mut self,
        dataset: Option<PathBuf>,
        query: Option<&str>,
        k: Option<i64>,
    ) -> Result<Self, ConfigError> {
        if let Some(dataset) = dataset {
            self.dataset_path = dataset;
        }
        if let Some(query) = query {
            self.query_point = parse_query_point(query)?;
        }
        if let Some(k) = k {
            self.k = k;
        }
        Ok(self)
    }

    /// The validated neighbor count.
    pub fn neighbor_count(&self) -> Result<usize, InvalidInput> {
        match usize::try_from(self.k) {
            Ok(k) if k > 0 => Ok(k),
            _ => Err(InvalidInput::NonPositiveK(self.k)),
        }
    }
}

/// Parses a comma-separated list of reals such as `5.1,3.5,1.4,0.2`.
/// Whitespace around each value is ignored.
pub fn parse_query_point(input: &str) -> Result<Vec<f64>, ConfigError> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }
    input
        .split(',')
        .map(|value| {
            value.trim().parse::<f64>().map_err(|e| ConfigError::Query {
                input: input.to_string(),
                reason: format!("{:?}: {}", value.trim(), e),
            })
        })
        .collect()
}
