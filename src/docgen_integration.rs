//! Integration between a recorded test run and doc generation.

use crate::collection::error::DocgenResult;
use crate::collection::report::DocgenReport;
use crate::collection::session::DocgenSession;
use crate::config::DocgenConfig;
use crate::events::{read_events, replay};
use std::io::BufRead;

/// Replay an event log through a fresh docgen session
pub fn run_docgen<R: BufRead>(config: DocgenConfig, reader: R) -> DocgenResult<DocgenReport> {
    let events = read_events(reader)?;
    let mut session = DocgenSession::new(config);
    replay(&mut session, events)?;
    Ok(session.report().clone())
}

/// Summary line in the style of a test runner's final line
pub fn format_summary(report: &DocgenReport) -> String {
    let mut parts = Vec::new();
    for (count, label) in [
        (report.passed, "passed"),
        (report.failed, "failed"),
        (report.skipped, "skipped"),
    ] {
        if count > 0 {
            parts.push(format!("{count} {label}"));
        }
    }

    let documents = report.documents.len();
    parts.push(format!(
        "{} document{} written",
        documents,
        if documents == 1 { "" } else { "s" }
    ));
    parts.join(", ")
}

pub fn display_docgen_results(report: &DocgenReport) {
    for path in &report.documents {
        println!("  {}", path.display());
    }
    println!("{}", format_summary(report));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_summary() {
        let report = DocgenReport {
            documents: vec![PathBuf::from("_docs/test_a.rst")],
            passed: 2,
            failed: 1,
            skipped: 0,
        };
        assert_eq!(format_summary(&report), "2 passed, 1 failed, 1 document written");
    }

    #[test]
    fn test_format_summary_empty_run() {
        assert_eq!(format_summary(&DocgenReport::default()), "0 documents written");
    }
}
