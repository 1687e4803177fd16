//! Session-level docgen plugin.
//!
//! `DocgenSession` is the hook implementation: it builds the doc tree during
//! collection, attaches fixtures and results while tests run, and writes the
//! documents when the session finishes.

use super::error::{DocgenError, DocgenResult};
use super::nodes::DocNode;
use super::report::{DocgenReport, OutcomeTally};
use super::tree::{DocTree, TreeOptions};
use super::types::{FixtureDef, FixtureRequest, TestItem, TestReport};
use crate::config::DocgenConfig;
use crate::hooks::TestRunnerHooks;
use crate::rst::RstDocument;
use log::{debug, info};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct DocgenSession {
    pub config: DocgenConfig,
    tree: DocTree,
    tally: OutcomeTally,
    report: DocgenReport,
}

impl DocgenSession {
    pub fn new(config: DocgenConfig) -> Self {
        Self {
            config,
            tree: DocTree::new(),
            tally: OutcomeTally::default(),
            report: DocgenReport::default(),
        }
    }

    pub fn tree(&self) -> &DocTree {
        &self.tree
    }

    /// Doc node for a runner node id, for hooks that add their own content.
    pub fn node_mut(&mut self, nodeid: &str) -> Option<&mut DocNode> {
        self.tree.node_mut(nodeid)
    }

    pub fn report(&self) -> &DocgenReport {
        &self.report
    }

    /// Render the document of a top-level collector without writing it.
    pub fn render(&self, nodeid: &str) -> Option<String> {
        self.tree.lookup(nodeid).map(|id| self.tree.emit(id))
    }

    pub fn render_index(&self) -> String {
        let mut index = RstDocument::new();
        index.title(&self.config.title);
        index.newline(1);
        index.paragraph(&self.config.description, 0);
        index.newline(1);
        index.directive("toctree", None, &[("includehidden", ""), ("glob", "")], None, 0);
        index.newline(1);
        index.content(&["*"], 3);
        index.data()
    }

    fn tree_options(&self) -> TreeOptions {
        TreeOptions {
            rst_dir: self.config.rst_dir.clone(),
            include_src: self.config.include_src,
        }
    }

    fn write_documents(&mut self, rst_dir: &Path) -> DocgenResult<()> {
        if self.config.write_index {
            let mut index = RstDocument::new();
            index.push_raw(self.render_index());
            let path = rst_dir.join("index.rst");
            index.write(&path)?;
            info!("Wrote {}", path.display());
            self.report.documents.push(path);
        }

        for &id in self.tree.top_level() {
            let node = self.tree.get(id);
            let path = rst_dir.join(format!("{}.rst", node.name));

            let mut doc = RstDocument::new();
            doc.push_raw(self.tree.emit(id));
            doc.write(&path)?;
            info!("Wrote {}", path.display());
            self.report.documents.push(path);
        }
        Ok(())
    }
}

impl TestRunnerHooks for DocgenSession {
    fn session_start(&mut self) {
        // Node ids repeat across runs; each run starts from an empty tree.
        self.tree = DocTree::new();
        self.tally = OutcomeTally::default();
        self.report = DocgenReport::default();
    }

    fn collection_modifyitems(&mut self, items: &[TestItem]) -> DocgenResult<()> {
        let options = self.tree_options();
        for item in items {
            self.tree.attach_item(item, &options)?;
        }
        debug!(
            "Built {} doc nodes under {} documents",
            self.tree.len(),
            self.tree.top_level().len()
        );
        Ok(())
    }

    fn fixture_setup(
        &mut self,
        fixturedef: &FixtureDef,
        request: &FixtureRequest,
        result: Option<&str>,
    ) -> DocgenResult<()> {
        // Only keep the string form, captured right after setup.
        let result = if self.config.fixture_results || fixturedef.doc_result {
            result.map(str::to_string)
        } else {
            None
        };

        match self.tree.node_mut(&request.nodeid) {
            Some(node) => node.add_fixture(fixturedef, request.param_index, result),
            None => debug!(
                "Ignoring fixture '{}' for uncollected node {}",
                fixturedef.argname, request.nodeid
            ),
        }
        Ok(())
    }

    fn runtest_makereport(&mut self, report: &TestReport) -> DocgenResult<()> {
        let node = self
            .tree
            .node_mut(&report.nodeid)
            .ok_or_else(|| DocgenError::UnknownNode(report.nodeid.clone()))?;
        node.add_result(report);
        self.tally.record(report);
        Ok(())
    }

    fn add_section(
        &mut self,
        nodeid: &str,
        name: &str,
        lines: Vec<String>,
        loc: Option<usize>,
    ) -> DocgenResult<()> {
        let node = self
            .tree
            .node_mut(nodeid)
            .ok_or_else(|| DocgenError::UnknownNode(nodeid.to_string()))?;
        if node.has_section(name) {
            node.append_to_section(name, lines)
        } else {
            node.add_section(name, lines, loc);
            Ok(())
        }
    }

    fn session_finish(&mut self, exitstatus: i32) -> DocgenResult<()> {
        debug!("Session finished with exit status {exitstatus}");
        self.tally.fill(&mut self.report);

        let rst_dir: Option<PathBuf> = self.config.rst_dir.clone();
        match rst_dir {
            Some(dir) => self.write_documents(&dir),
            None => {
                debug!("No output directory configured, skipping documents");
                Ok(())
            }
        }
    }
}
