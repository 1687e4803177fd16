//! Error types for doc collection and rendering.

use std::fmt;
use std::io;

/// Errors raised while building or writing test documentation
#[derive(Debug)]
pub enum DocgenError {
    /// A collector in an item's parent chain has no documentation level
    UnknownLevel(String),
    /// A hook referenced a node id that was never collected
    UnknownNode(String),
    /// A section was extended before it was added
    MissingSection { node: String, section: String },
    /// A line of the event log could not be decoded
    EventParse { line: usize, message: String },
    /// The configuration file could not be decoded
    Config(String),
    IoError(io::Error),
}

pub type DocgenResult<T> = Result<T, DocgenError>;

impl fmt::Display for DocgenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownLevel(kind) => write!(f, "Unknown level of item: {kind}"),
            Self::UnknownNode(nodeid) => write!(f, "No doc node collected for '{nodeid}'"),
            Self::MissingSection { node, section } => {
                write!(f, "Node '{node}' has no section named '{section}'")
            }
            Self::EventParse { line, message } => {
                write!(f, "Invalid event on line {line}: {message}")
            }
            Self::Config(msg) => write!(f, "Invalid configuration: {msg}"),
            Self::IoError(e) => write!(f, "IO Error: {e}"),
        }
    }
}

impl std::error::Error for DocgenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for DocgenError {
    fn from(err: io::Error) -> Self {
        Self::IoError(err)
    }
}

impl From<toml::de::Error> for DocgenError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
