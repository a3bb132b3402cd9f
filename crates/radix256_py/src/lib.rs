//! Python module `radix256_sort_py` exposing `radix256_sort(list) -> list`.

use pyo3::exceptions::{PyMemoryError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use radix256::SortError;
use tracing::debug;

/// Python exception class a [`SortError`] is raised as.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum PyErrorKind {
    ValueError,
    MemoryError,
    RuntimeError,
}

fn error_kind(err: &SortError) -> PyErrorKind {
    match err {
        SortError::InvalidValue { .. } => PyErrorKind::ValueError,
        SortError::AllocationFailure { .. } => PyErrorKind::MemoryError,
        SortError::ThreadPool(_) => PyErrorKind::RuntimeError,
    }
}

fn to_py_err(err: SortError) -> PyErr {
    let msg = err.to_string();
    match error_kind(&err) {
        PyErrorKind::ValueError => PyValueError::new_err(msg),
        PyErrorKind::MemoryError => PyMemoryError::new_err(msg),
        PyErrorKind::RuntimeError => PyRuntimeError::new_err(msg),
    }
}

/// Sorts a list of integers in `[0, 2**32 - 1]` and returns a new ascending list.
///
/// The input list is not modified. Out-of-range values raise `ValueError`, a
/// failed buffer allocation raises `MemoryError`.
#[pyfunction(name = "radix256_sort")]
fn sort(py: Python<'_>, list: Vec<i128>) -> PyResult<Vec<u32>> {
    debug!(len = list.len(), "sort requested from python");
    py.allow_threads(|| radix256::sort(&list)).map_err(to_py_err)
}

#[pymodule]
fn radix256_sort_py(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(sort, m)?)?;
    Ok(())
}
