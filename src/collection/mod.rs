//! Doc collection over a test run.
//!
//! This module mirrors the runner's collection tree as documentation:
//! - Hook payload types
//! - Doc nodes and the tree that links them
//! - The session plugin that writes the documents

pub mod error;
pub mod nodes;
pub mod report;
pub mod session;
pub mod tree;
pub mod types;
