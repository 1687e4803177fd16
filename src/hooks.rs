//! The test runner hook contract.
//!
//! A runner calls these in order: `session_start`, one
//! `collection_modifyitems` once deselection is done, then for every test
//! its fixture setups and phase reports, and finally `session_finish`.
//! `add_section` may be called by other plugins at any point after
//! collection to enrich a node.

use crate::collection::error::DocgenResult;
use crate::collection::types::{FixtureDef, FixtureRequest, TestItem, TestReport};

pub trait TestRunnerHooks {
    fn session_start(&mut self) {}

    fn collection_modifyitems(&mut self, items: &[TestItem]) -> DocgenResult<()>;

    /// `result` is the string form of the value the fixture produced.
    fn fixture_setup(
        &mut self,
        fixturedef: &FixtureDef,
        request: &FixtureRequest,
        result: Option<&str>,
    ) -> DocgenResult<()>;

    fn runtest_makereport(&mut self, report: &TestReport) -> DocgenResult<()>;

    /// Add lines to a named section of a node, creating the section at `loc`
    /// when it does not exist yet.
    fn add_section(
        &mut self,
        nodeid: &str,
        name: &str,
        lines: Vec<String>,
        loc: Option<usize>,
    ) -> DocgenResult<()>;

    fn session_finish(&mut self, exitstatus: i32) -> DocgenResult<()>;
}
