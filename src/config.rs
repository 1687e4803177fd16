//! Docgen configuration read from `pyproject.toml`.
//!
//! Settings live under `[tool.rdocgen]` and use the same names as the
//! command line options, e.g.:
//!
//! ```toml
//! [tool.rdocgen]
//! rst_title = "Integration Suite"
//! rst_dir = "docs/tests"
//! rst_write_index = true
//! ```

use crate::collection::error::DocgenResult;
use log::{debug, warn};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_TITLE: &str = "Test Documentation";
pub const DEFAULT_DESCRIPTION: &str = "Test case results";

#[derive(Debug, Clone, PartialEq)]
pub struct DocgenConfig {
    pub title: String,
    pub description: String,
    /// No documents are written without an output directory
    pub rst_dir: Option<PathBuf>,
    /// Capture every fixture's result value, not just those marked `doc_result`
    pub fixture_results: bool,
    pub include_src: bool,
    pub write_index: bool,
}

impl Default for DocgenConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.into(),
            description: DEFAULT_DESCRIPTION.into(),
            rst_dir: None,
            fixture_results: false,
            include_src: false,
            write_index: false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct PyProject {
    #[serde(default)]
    tool: Option<ToolTable>,
}

#[derive(Debug, Default, Deserialize)]
struct ToolTable {
    #[serde(default)]
    rdocgen: Option<FileConfig>,
}

/// Settings as they appear in the file; unset keys keep the defaults
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    rst_title: Option<String>,
    rst_desc: Option<String>,
    rst_dir: Option<PathBuf>,
    rst_fixture_results: Option<bool>,
    rst_include_src: Option<bool>,
    rst_write_index: Option<bool>,
}

impl DocgenConfig {
    fn apply(&mut self, file: FileConfig, rootpath: &Path) {
        if let Some(title) = file.rst_title {
            self.title = title;
        }
        if let Some(desc) = file.rst_desc {
            self.description = desc;
        }
        if let Some(dir) = file.rst_dir {
            self.rst_dir = Some(if dir.is_absolute() { dir } else { rootpath.join(dir) });
        }
        if let Some(flag) = file.rst_fixture_results {
            self.fixture_results = flag;
        }
        if let Some(flag) = file.rst_include_src {
            self.include_src = flag;
        }
        if let Some(flag) = file.rst_write_index {
            self.write_index = flag;
        }
    }
}

/// Parse the `[tool.rdocgen]` table out of pyproject contents.
pub fn parse_docgen_config(contents: &str, rootpath: &Path) -> DocgenResult<DocgenConfig> {
    let pyproject: PyProject = toml::from_str(contents)?;
    let mut config = DocgenConfig::default();
    if let Some(file) = pyproject.tool.and_then(|tool| tool.rdocgen) {
        config.apply(file, rootpath);
    }
    Ok(config)
}

/// Read the docgen configuration for a project root.
///
/// A missing `pyproject.toml` yields the defaults. A malformed one is
/// reported and also falls back to the defaults, so a broken project file
/// never prevents documentation from being generated.
pub fn read_docgen_config(rootpath: &Path) -> DocgenConfig {
    let path = rootpath.join("pyproject.toml");
    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(_) => {
            debug!("No pyproject.toml at {}, using defaults", rootpath.display());
            return DocgenConfig::default();
        }
    };

    match parse_docgen_config(&contents, rootpath) {
        Ok(config) => config,
        Err(e) => {
            warn!("Ignoring {}: {e}", path.display());
            DocgenConfig::default()
        }
    }
}
