//! Test documentation generator.
//!
//! Mirrors a test run's collection tree (session, module, class, function)
//! as doc nodes, attaches fixture docs and phase results as the run
//! progresses, and writes one reStructuredText document per module.

pub mod cli;
pub mod collection;
pub mod config;
pub mod docgen_integration;
pub mod docprep;
pub mod events;
pub mod hooks;
#[cfg(feature = "pyo3")]
pub mod python;
pub mod rst;

pub use collection::error::{DocgenError, DocgenResult};
pub use collection::report::DocgenReport;
pub use collection::session::DocgenSession;
pub use collection::types::{
    CollectorNode, FixtureDef, FixtureRequest, Level, NodeKind, Outcome, Phase, TestItem,
    TestReport,
};
pub use config::{read_docgen_config, DocgenConfig};
pub use docgen_integration::{display_docgen_results, run_docgen};
pub use docprep::doc_prep;
pub use events::RunnerEvent;
pub use hooks::TestRunnerHooks;
