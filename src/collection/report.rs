//! Run summary reporting.

use super::types::{Outcome, TestReport};
use std::collections::HashMap;
use std::path::PathBuf;

/// What a docgen session produced
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DocgenReport {
    /// Documents written, index first when one was requested
    pub documents: Vec<PathBuf>,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Folds phase reports into one outcome per test.
///
/// A failure in any phase fails the test; otherwise a skip in any phase
/// skips it.
#[derive(Debug, Default)]
pub struct OutcomeTally {
    outcomes: HashMap<String, Outcome>,
}

impl OutcomeTally {
    pub fn record(&mut self, report: &TestReport) {
        self.outcomes
            .entry(report.nodeid.clone())
            .and_modify(|current| *current = merge(*current, report.outcome))
            .or_insert(report.outcome);
    }

    pub fn count(&self, outcome: Outcome) -> usize {
        self.outcomes.values().filter(|&&o| o == outcome).count()
    }

    pub fn outcome(&self, nodeid: &str) -> Option<Outcome> {
        self.outcomes.get(nodeid).copied()
    }

    pub fn fill(&self, report: &mut DocgenReport) {
        report.passed = self.count(Outcome::Passed);
        report.failed = self.count(Outcome::Failed);
        report.skipped = self.count(Outcome::Skipped);
    }
}

fn merge(current: Outcome, next: Outcome) -> Outcome {
    match (current, next) {
        (Outcome::Failed, _) | (_, Outcome::Failed) => Outcome::Failed,
        (Outcome::Skipped, _) | (_, Outcome::Skipped) => Outcome::Skipped,
        _ => Outcome::Passed,
    }
}
