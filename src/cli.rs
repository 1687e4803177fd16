use crate::config::DocgenConfig;
use clap::Parser;
use std::path::{Path, PathBuf};

/// Generate reStructuredText documentation from a recorded test run
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// RST Document Title
    #[arg(long)]
    pub rst_title: Option<String>,

    /// RST Document description
    #[arg(long)]
    pub rst_desc: Option<String>,

    /// Destination directory for generated RST documentation
    #[arg(long)]
    pub rst_dir: Option<PathBuf>,

    /// Force writing of the value of fixture results to the generated RST documentation.
    /// Note: this can be enabled on a per-fixture basis with `doc_result`
    #[arg(long)]
    pub rst_fixture_results: bool,

    /// Include source code for the test itself
    #[arg(long)]
    pub rst_include_src: bool,

    /// Write an index.rst linking every generated document
    #[arg(long)]
    pub rst_write_index: bool,

    /// Event log of the test run, one JSON event per line ('-' for stdin)
    #[arg(default_value = "-")]
    pub events: String,
}

impl Args {
    /// Layer the command line over a file configuration.
    ///
    /// Flags only ever turn options on; values replace the file's values.
    pub fn apply_to(&self, mut config: DocgenConfig, rootpath: &Path) -> DocgenConfig {
        if let Some(title) = &self.rst_title {
            config.title = title.clone();
        }
        if let Some(desc) = &self.rst_desc {
            config.description = desc.clone();
        }
        if let Some(dir) = &self.rst_dir {
            config.rst_dir = Some(if dir.is_absolute() {
                dir.clone()
            } else {
                rootpath.join(dir)
            });
        }
        config.fixture_results |= self.rst_fixture_results;
        config.include_src |= self.rst_include_src;
        config.write_index |= self.rst_write_index;
        config
    }
}
