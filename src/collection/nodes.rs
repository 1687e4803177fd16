//! Doc nodes: one per level of the test hierarchy.
//!
//! A node holds its own header, docstring, fixture docs, extra sections and
//! phase results. Children are referenced by id and rendered by the tree.

use super::error::{DocgenError, DocgenResult};
use super::types::{FixtureDef, Level, Outcome, TestReport};
use crate::docprep::doc_prep;
use crate::rst::RstDocument;
use std::fmt;

/// Index of a node inside a [`DocTree`](super::tree::DocTree)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// Documentation gathered for a fixture used at a node
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureDoc {
    pub name: String,
    pub doc: Vec<String>,
    pub result: Option<String>,
}

/// Rendered outcome of one test phase
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRecord {
    pub when: String,
    pub outcome: Vec<String>,
}

impl ResultRecord {
    pub fn from_report(report: &TestReport) -> Self {
        let outcome = match report.outcome {
            Outcome::Passed => vec![report.outcome.as_str().to_uppercase()],
            _ => {
                let mut lines = vec![report.outcome.as_str().to_uppercase(), "::".to_string()];
                lines.extend(report.longrepr.split('\n').map(|line| format!("   {line}")));
                lines
            }
        };
        Self {
            when: report.when.as_str().to_string(),
            outcome,
        }
    }
}

/// Free-form titled section attached by other hooks
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub name: String,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DocNode {
    pub name: String,
    pub doc: Option<String>,
    pub level: Level,
    pub write_toc: bool,
    /// Source path relative to the output directory, when source inclusion is on
    pub source_file: Option<String>,
    /// Object to include from `source_file`, e.g. `TestClass.test_method`
    pub source_obj: Option<String>,
    pub children: Vec<NodeId>,
    fixtures: Vec<FixtureDoc>,
    results: Vec<ResultRecord>,
    sections: Vec<Section>,
}

impl DocNode {
    pub fn new(name: impl Into<String>, doc: Option<String>, level: Level) -> Self {
        Self {
            name: name.into(),
            doc,
            level,
            write_toc: false,
            source_file: None,
            source_obj: None,
            children: Vec::new(),
            fixtures: Vec::new(),
            results: Vec::new(),
            sections: Vec::new(),
        }
    }

    pub fn with_toc(mut self, write_toc: bool) -> Self {
        self.write_toc = write_toc;
        self
    }

    pub fn with_source(mut self, source_file: String, source_obj: String) -> Self {
        self.source_file = Some(source_file);
        self.source_obj = Some(source_obj);
        self
    }

    pub fn fixtures(&self) -> &[FixtureDoc] {
        &self.fixtures
    }

    pub fn results(&self) -> &[ResultRecord] {
        &self.results
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Record a fixture used at this node.
    ///
    /// Direct-parametrization fixtures have no useful docstring, so the
    /// current parameter value stands in for it.
    pub fn add_fixture(&mut self, fixturedef: &FixtureDef, param_index: usize, result: Option<String>) {
        let doc = if fixturedef.is_direct_param() {
            fixturedef
                .params
                .get(param_index)
                .cloned()
                .unwrap_or_default()
        } else {
            fixturedef
                .doc
                .clone()
                .unwrap_or_else(|| "empty docstring".to_string())
        };

        let fixture = FixtureDoc {
            name: fixturedef.argname.clone(),
            doc: doc_prep(Some(doc.as_str())),
            result,
        };
        if !self.fixtures.contains(&fixture) {
            self.fixtures.push(fixture);
        }
    }

    /// Record a phase report. Expected once each for setup, call and teardown.
    pub fn add_result(&mut self, report: &TestReport) {
        self.results.push(ResultRecord::from_report(report));
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.sections.iter().any(|s| s.name == name)
    }

    /// Insert a section at `loc`, or at the end when `loc` is past it.
    pub fn add_section(&mut self, name: impl Into<String>, lines: Vec<String>, loc: Option<usize>) {
        let section = Section {
            name: name.into(),
            lines,
        };
        let index = loc
            .unwrap_or(self.sections.len())
            .min(self.sections.len());
        self.sections.insert(index, section);
    }

    pub fn append_to_section(&mut self, name: &str, lines: Vec<String>) -> DocgenResult<()> {
        match self.sections.iter_mut().find(|s| s.name == name) {
            Some(section) => {
                section.lines.extend(lines);
                Ok(())
            }
            None => Err(DocgenError::MissingSection {
                node: self.name.clone(),
                section: name.to_string(),
            }),
        }
    }

    /// Render this node, inlining the already rendered children.
    pub fn build(&self, rendered_children: &[String]) -> RstDocument {
        let mut rst = RstDocument::new();
        if self.write_toc {
            rst.directive(
                "toctree",
                None,
                &[("hidden", ""), ("includehidden", "")],
                None,
                0,
            );
            rst.newline(1);
        }

        rst.heading(&self.name, self.level.underline(), false, 0);
        rst.newline(1);
        rst.content(&doc_prep(self.doc.as_deref()), 0);
        rst.newline(1);

        if !self.fixtures.is_empty() {
            let topic = format!("{} Fixtures", self.level.title());
            rst.directive("topic", Some(topic.as_str()), &[], None, 0);
            rst.newline(1);

            for fixture in &self.fixtures {
                let mut doc = fixture.doc.clone();
                if let Some(result) = &fixture.result {
                    doc.push(String::new());
                    doc.push(format!("**Fixture Result Value**: ``{result}``"));
                }
                // Indented so the entries sit inside the topic.
                rst.definition(&fixture.name, &doc.join("\n"), 3, false);
            }
        }
        rst.newline(2);

        for section in &self.sections {
            rst.directive("topic", Some(section.name.as_str()), &[], None, 0);
            rst.newline(1);
            rst.content(&section.lines, 3);
            rst.newline(1);
        }

        if let (Some(source_file), Some(source_obj)) = (&self.source_file, &self.source_obj) {
            rst.directive("container", Some("toggle"), &[], None, 0);
            rst.newline(1);
            rst.directive("container", Some("header"), &[], Some("Show/hide Source"), 3);
            rst.newline(1);
            rst.directive(
                "literalinclude",
                Some(source_file.as_str()),
                &[("pyobject", source_obj.as_str())],
                None,
                3,
            );
            rst.newline(1);
        }

        if !self.results.is_empty() {
            rst.directive("topic", Some("Test Results"), &[], None, 0);
            rst.newline(1);
            for result in &self.results {
                rst.definition(&result.when, &result.outcome.join("\n"), 3, true);
            }
        }

        for child in rendered_children {
            rst.push_raw(child.as_str());
            rst.newline(2);
        }
        rst
    }
}

impl fmt::Display for DocNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DocNode(name={}, level={}, children={})",
            self.name,
            self.level,
            self.children.len()
        )
    }
}
