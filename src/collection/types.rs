//! Hook payload types shared by the runner contract and the event log.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// The four documentation levels of a test run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Session,
    Module,
    Class,
    Function,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Session => "session",
            Level::Module => "module",
            Level::Class => "class",
            Level::Function => "function",
        }
    }

    /// Heading underline character for this level (h1 through h4).
    pub fn underline(&self) -> char {
        match self {
            Level::Session => '=',
            Level::Module => '-',
            Level::Class => '~',
            Level::Function => '+',
        }
    }

    /// Level name with a leading capital, e.g. `Module`.
    pub fn title(&self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a collector found in a test item's parent chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Package,
    Module,
    Class,
    /// Per-class instance wrapper inserted by older runners
    Instance,
    /// Plain directory collector
    Directory,
    Function,
    #[serde(untagged)]
    Other(String),
}

impl NodeKind {
    /// Documentation level for this kind.
    ///
    /// `Ok(None)` means the collector is transparent and gets no doc node.
    pub fn level(&self) -> Result<Option<Level>, String> {
        match self {
            NodeKind::Package | NodeKind::Module => Ok(Some(Level::Module)),
            NodeKind::Class => Ok(Some(Level::Class)),
            NodeKind::Function => Ok(Some(Level::Function)),
            NodeKind::Instance | NodeKind::Directory => Ok(None),
            NodeKind::Other(kind) => Err(kind.clone()),
        }
    }
}

/// A collector above a test item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectorNode {
    pub nodeid: String,
    pub name: String,
    #[serde(default)]
    pub doc: Option<String>,
    pub kind: NodeKind,
}

/// A collected test function, after deselection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestItem {
    pub nodeid: String,
    /// Item name, including any parametrization id (`test_x[a-b]`)
    pub name: String,
    /// Function name without the parametrization id
    #[serde(default)]
    pub originalname: Option<String>,
    #[serde(default)]
    pub doc: Option<String>,
    pub path: PathBuf,
    /// Name of the class defining the test, if any
    #[serde(default)]
    pub cls: Option<String>,
    /// Parent chain, nearest first, ending with the collector directly under the session
    #[serde(default)]
    pub parents: Vec<CollectorNode>,
}

impl TestItem {
    /// Name of the test function in its source file.
    pub fn function_name(&self) -> &str {
        match &self.originalname {
            Some(name) => name,
            None => self.name.split('[').next().unwrap_or(&self.name),
        }
    }
}

/// Name of the synthetic fixture a runner creates for direct parametrization
pub const DIRECT_PARAM_FIXTURE: &str = "get_direct_param_fixture_func";

/// A fixture definition as seen at setup time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureDef {
    pub argname: String,
    /// Name of the function implementing the fixture
    pub func_name: String,
    #[serde(default)]
    pub doc: Option<String>,
    /// String forms of the fixture params, when parametrized
    #[serde(default)]
    pub params: Vec<String>,
    /// The fixture asked for its result value to be documented
    #[serde(default)]
    pub doc_result: bool,
}

impl FixtureDef {
    pub fn is_direct_param(&self) -> bool {
        self.func_name == DIRECT_PARAM_FIXTURE
    }
}

/// The request that triggered a fixture setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureRequest {
    /// Node at the fixture's scope
    pub nodeid: String,
    #[serde(default)]
    pub param_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Setup,
    Call,
    Teardown,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Setup => "setup",
            Phase::Call => "call",
            Phase::Teardown => "teardown",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Passed,
    Failed,
    Skipped,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Passed => "passed",
            Outcome::Failed => "failed",
            Outcome::Skipped => "skipped",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one phase of one test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestReport {
    pub nodeid: String,
    pub when: Phase,
    pub outcome: Outcome,
    /// Text form of the failure representation
    #[serde(default)]
    pub longrepr: String,
}
