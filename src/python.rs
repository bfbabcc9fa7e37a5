//! Python bindings, built with the `python` feature.

use pyo3::exceptions::{PyIOError, PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::common_types::DataPoint;
use crate::error::{InvalidInput, LoadError};
use crate::knn::KnnClassifier;

fn value_error(err: InvalidInput) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn io_error(err: LoadError) -> PyErr {
    PyIOError::new_err(err.to_string())
}

/// Calculates the Euclidean distance between two vectors of f64.
#[pyfunction]
#[pyo3(name = "euclidean_distance")]
fn euclidean_distance_py(a: Vec<f64>, b: Vec<f64>) -> PyResult<f64> {
    crate::distance::euclidean_distance(&a, &b).map_err(value_error)
}

/// Loads a CSV dataset as a list of `(features, label)` tuples.
#[pyfunction]
#[pyo3(name = "load_dataset")]
fn load_dataset_py(path: &str) -> PyResult<Vec<(Vec<f64>, String)>> {
    let dataset = crate::dataset::load_dataset(path).map_err(io_error)?;
    Ok(dataset.into_iter().map(|dp| (dp.features, dp.label)).collect())
}

#[pyclass(name = "KnnClassifier")]
struct PyKnnClassifier {
    classifier: KnnClassifier<f64, String>,
}

#[pymethods]
impl PyKnnClassifier {
    #[new]
    fn new(k: usize) -> Self {
        PyKnnClassifier { classifier: KnnClassifier::new(k) }
    }

    /// Accepts `{'features': [...], 'label': '...'}` dicts or `([...], '...')` tuples.
    fn fit(&mut self, training_data_py: &Bound<'_, PyList>) -> PyResult<()> {
        let mut training_data_rust: Vec<DataPoint> = Vec::with_capacity(training_data_py.len());

        for item_py in training_data_py.iter() {
            if let Ok(dict) = item_py.downcast::<PyDict>() {
                let features_py = dict
                    .get_item("features")?
                    .ok_or_else(|| PyValueError::new_err("Missing 'features' key"))?;
                let label_py = dict
                    .get_item("label")?
                    .ok_or_else(|| PyValueError::new_err("Missing 'label' key"))?;
                training_data_rust.push(DataPoint::new(features_py.extract()?, label_py.extract()?));
            } else if let Ok((features, label)) = item_py.extract::<(Vec<f64>, String)>() {
                training_data_rust.push(DataPoint::new(features, label));
            } else {
                return Err(PyTypeError::new_err(
                    "Training data items must be dictionaries {'features': [...], 'label': '...'} or tuples ([...], '...')",
                ));
            }
        }

        self.classifier.fit(training_data_rust).map_err(value_error)
    }

    fn predict_single(&self, test_sample_features: Vec<f64>) -> PyResult<String> {
        self.classifier.predict_single(&test_sample_features).map_err(value_error)
    }

    fn predict(&self, test_data: Vec<Vec<f64>>) -> PyResult<Vec<String>> {
        self.classifier.predict(&test_data).map_err(value_error)
    }

    #[getter]
    fn k(&self) -> usize {
        self.classifier.k()
    }
}

#[pymodule]
fn knn_vote(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(euclidean_distance_py, m)?)?;
    m.add_function(wrap_pyfunction!(load_dataset_py, m)?)?;
    m.add_class::<PyKnnClassifier>()?;
    Ok(())
}
