//! Python bindings, so a pytest plugin can forward its hook calls in-process.

use crate::collection::error::DocgenError;
use crate::collection::session::DocgenSession;
use crate::config::{DocgenConfig, DEFAULT_DESCRIPTION, DEFAULT_TITLE};
use crate::docprep::doc_prep;
use crate::events::{dispatch, parse_event};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use std::path::PathBuf;

#[pyclass(name = "DocgenSession", unsendable)]
pub struct PyDocgenSession {
    inner: DocgenSession,
    received: usize,
}

#[pymethods]
impl PyDocgenSession {
    #[new]
    #[pyo3(signature = (
        rst_dir=None,
        title=None,
        description=None,
        fixture_results=false,
        include_src=false,
        write_index=false
    ))]
    fn new(
        rst_dir: Option<PathBuf>,
        title: Option<String>,
        description: Option<String>,
        fixture_results: bool,
        include_src: bool,
        write_index: bool,
    ) -> Self {
        let config = DocgenConfig {
            title: title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            description: description.unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            rst_dir,
            fixture_results,
            include_src,
            write_index,
        };
        Self {
            inner: DocgenSession::new(config),
            received: 0,
        }
    }

    /// Feed one JSON encoded event to the session.
    fn handle_event(&mut self, event: &str) -> PyResult<()> {
        self.received += 1;
        let event = parse_event(event, self.received).map_err(to_py_err)?;
        dispatch(&mut self.inner, event).map_err(to_py_err)
    }

    fn render(&self, nodeid: &str) -> Option<String> {
        self.inner.render(nodeid)
    }

    fn documents(&self) -> Vec<String> {
        self.inner
            .report()
            .documents
            .iter()
            .map(|path| path.to_string_lossy().into_owned())
            .collect()
    }
}

fn to_py_err(err: DocgenError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

#[pyfunction]
#[pyo3(name = "doc_prep", signature = (docstring=None))]
fn py_doc_prep(docstring: Option<&str>) -> Vec<String> {
    doc_prep(docstring)
}

#[pymodule]
fn _rdocgen(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyDocgenSession>()?;
    m.add_function(wrap_pyfunction!(py_doc_prep, m)?)?;
    Ok(())
}
