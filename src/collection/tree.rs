//! Doc tree built from the runner's collection hierarchy.
//!
//! Nodes live in an arena and are keyed by runner node id, so a collector
//! visited by many items gets exactly one doc node. Children keep the order
//! in which they were first encountered.

use super::error::{DocgenError, DocgenResult};
use super::nodes::{DocNode, NodeId};
use super::types::{Level, TestItem};
use log::debug;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

/// Options that shape the nodes created for test items
#[derive(Debug, Clone, Default)]
pub struct TreeOptions {
    /// Output directory; source paths are made relative to it
    pub rst_dir: Option<PathBuf>,
    pub include_src: bool,
}

#[derive(Debug, Default)]
pub struct DocTree {
    nodes: Vec<DocNode>,
    index: HashMap<String, NodeId>,
    /// Nodes directly under the session, one document each
    top_level: Vec<NodeId>,
}

impl DocTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> &DocNode {
        &self.nodes[id.0]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut DocNode {
        &mut self.nodes[id.0]
    }

    pub fn lookup(&self, nodeid: &str) -> Option<NodeId> {
        self.index.get(nodeid).copied()
    }

    pub fn node_mut(&mut self, nodeid: &str) -> Option<&mut DocNode> {
        let id = self.lookup(nodeid)?;
        Some(self.get_mut(id))
    }

    pub fn top_level(&self) -> &[NodeId] {
        &self.top_level
    }

    /// Create the doc node for a test item and link it into the tree.
    pub fn attach_item(&mut self, item: &TestItem, options: &TreeOptions) -> DocgenResult<NodeId> {
        let mut node = DocNode::new(item.name.clone(), item.doc.clone(), Level::Function);
        if options.include_src {
            let source_file = relative_source(&item.path, options.rst_dir.as_deref());
            let source_obj = match &item.cls {
                Some(cls) => format!("{cls}.{}", item.function_name()),
                None => item.function_name().to_string(),
            };
            node = node.with_source(source_file, source_obj);
        }

        let item_id = match self.lookup(&item.nodeid) {
            Some(id) => id,
            None => self.insert(item.nodeid.clone(), node),
        };

        let mut child = item_id;
        for parent in &item.parents {
            let level = match parent.kind.level() {
                Ok(Some(level)) => level,
                Ok(None) => continue,
                Err(kind) => return Err(DocgenError::UnknownLevel(kind)),
            };

            let parent_id = match self.lookup(&parent.nodeid) {
                Some(id) => id,
                None => {
                    debug!("Creating {level} doc node for {}", parent.nodeid);
                    let node = DocNode::new(parent.name.clone(), parent.doc.clone(), level)
                        .with_toc(level == Level::Module);
                    self.insert(parent.nodeid.clone(), node)
                }
            };

            let parent_node = self.get_mut(parent_id);
            if !parent_node.children.contains(&child) {
                parent_node.children.push(child);
            }
            child = parent_id;
        }

        if !self.top_level.contains(&child) {
            self.top_level.push(child);
        }
        Ok(item_id)
    }

    /// Render a node and, recursively, its children.
    pub fn emit(&self, id: NodeId) -> String {
        let node = self.get(id);
        let children: Vec<String> = node.children.iter().map(|&child| self.emit(child)).collect();
        node.build(&children).data()
    }

    fn insert(&mut self, nodeid: String, node: DocNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        self.index.insert(nodeid, id);
        id
    }
}

/// Path of a source file as seen from the output directory.
///
/// Relative paths on either side are taken from the working directory.
fn relative_source(path: &Path, rst_dir: Option<&Path>) -> String {
    let relative = match rst_dir {
        Some(base) => relative_path(&resolve(path), &resolve(base)),
        None => path.to_path_buf(),
    };
    relative.to_string_lossy().replace('\\', "/")
}

/// Absolute, lexically normalized form of a path.
fn resolve(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut resolved = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            other => resolved.push(other.as_os_str()),
        }
    }
    resolved
}

fn relative_path(path: &Path, base: &Path) -> PathBuf {
    let path: Vec<Component> = path.components().filter(|c| *c != Component::CurDir).collect();
    let base: Vec<Component> = base.components().filter(|c| *c != Component::CurDir).collect();

    let common = path
        .iter()
        .zip(base.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base.len() {
        relative.push("..");
    }
    for component in &path[common..] {
        relative.push(component.as_os_str());
    }
    relative
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::types::{CollectorNode, NodeKind};

    fn module(name: &str) -> CollectorNode {
        CollectorNode {
            nodeid: format!("{name}.py"),
            name: name.into(),
            doc: None,
            kind: NodeKind::Module,
        }
    }

    fn class(module: &str, name: &str) -> CollectorNode {
        CollectorNode {
            nodeid: format!("{module}.py::{name}"),
            name: name.into(),
            doc: Some(format!("{name} docs.")),
            kind: NodeKind::Class,
        }
    }

    fn item(module_name: &str, cls: Option<&str>, name: &str) -> TestItem {
        let mut parents = Vec::new();
        let nodeid = match cls {
            Some(cls) => {
                parents.push(CollectorNode {
                    nodeid: format!("{module_name}.py::{cls}::()"),
                    name: "()".into(),
                    doc: None,
                    kind: NodeKind::Instance,
                });
                parents.push(class(module_name, cls));
                format!("{module_name}.py::{cls}::{name}")
            }
            None => format!("{module_name}.py::{name}"),
        };
        parents.push(module(module_name));
        TestItem {
            nodeid,
            name: name.into(),
            originalname: None,
            doc: None,
            path: PathBuf::from(format!("tests/{module_name}.py")),
            cls: cls.map(str::to_string),
            parents,
        }
    }

    #[test]
    fn test_builds_hierarchy_without_duplicates() {
        let mut tree = DocTree::new();
        let options = TreeOptions::default();

        tree.attach_item(&item("test_a", None, "test_one"), &options).unwrap();
        tree.attach_item(&item("test_a", Some("TestClass"), "test_two"), &options).unwrap();
        tree.attach_item(&item("test_a", Some("TestClass"), "test_three"), &options).unwrap();
        tree.attach_item(&item("test_b", None, "test_four"), &options).unwrap();

        // 2 modules, 1 class, 4 functions; the instance is skipped
        assert_eq!(tree.len(), 7);
        assert_eq!(tree.top_level().len(), 2);

        let module_a = tree.get(tree.lookup("test_a.py").unwrap());
        assert!(module_a.write_toc);
        assert_eq!(module_a.children.len(), 2);

        let class_id = tree.lookup("test_a.py::TestClass").unwrap();
        let class_node = tree.get(class_id);
        assert_eq!(class_node.level, Level::Class);
        let names: Vec<&str> = class_node
            .children
            .iter()
            .map(|&id| tree.get(id).name.as_str())
            .collect();
        assert_eq!(names, vec!["test_two", "test_three"]);
    }

    #[test]
    fn test_reattaching_item_is_idempotent() {
        let mut tree = DocTree::new();
        let options = TreeOptions::default();
        let test = item("test_a", Some("TestClass"), "test_two");

        let first = tree.attach_item(&test, &options).unwrap();
        let second = tree.attach_item(&test, &options).unwrap();

        assert_eq!(first, second);
        let class_node = tree.get(tree.lookup("test_a.py::TestClass").unwrap());
        assert_eq!(class_node.children.len(), 1);
        assert_eq!(tree.top_level().len(), 1);
    }

    #[test]
    fn test_unknown_parent_kind_fails() {
        let mut tree = DocTree::new();
        let mut test = item("test_a", None, "test_one");
        test.parents.insert(
            0,
            CollectorNode {
                nodeid: "test_a.py::weird".into(),
                name: "weird".into(),
                doc: None,
                kind: NodeKind::Other("yamlfile".into()),
            },
        );

        let err = tree
            .attach_item(&test, &TreeOptions::default())
            .expect_err("unknown kind should fail");
        assert!(matches!(err, DocgenError::UnknownLevel(kind) if kind == "yamlfile"));
    }

    #[test]
    fn test_source_include_uses_class_and_original_name() {
        let mut tree = DocTree::new();
        let options = TreeOptions {
            rst_dir: Some(PathBuf::from("_docs")),
            include_src: true,
        };
        let mut test = item("test_a", Some("TestClass"), "test_two[1-2]");
        test.originalname = Some("test_two".into());

        let id = tree.attach_item(&test, &options).unwrap();
        let node = tree.get(id);
        assert_eq!(node.source_file.as_deref(), Some("../tests/test_a.py"));
        assert_eq!(node.source_obj.as_deref(), Some("TestClass.test_two"));
    }

    #[test]
    fn test_no_source_without_include_src() {
        let mut tree = DocTree::new();
        let id = tree
            .attach_item(&item("test_a", None, "test_one"), &TreeOptions::default())
            .unwrap();
        assert!(tree.get(id).source_file.is_none());
    }

    #[test]
    fn test_emit_nests_children_in_order() {
        let mut tree = DocTree::new();
        let options = TreeOptions::default();
        tree.attach_item(&item("test_a", Some("TestClass"), "test_two"), &options).unwrap();
        tree.attach_item(&item("test_a", None, "test_one"), &options).unwrap();

        let module_id = tree.top_level()[0];
        let data = tree.emit(module_id);

        let class_pos = data.find("TestClass\n~~~~~~~~~").unwrap();
        let two_pos = data.find("test_two\n++++++++").unwrap();
        let one_pos = data.find("test_one\n++++++++").unwrap();
        assert!(data.contains("TestClass docs."));
        assert!(class_pos < two_pos);
        assert!(two_pos < one_pos);
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(
            relative_path(Path::new("/repo/tests/test_a.py"), Path::new("/repo/_docs")),
            PathBuf::from("../tests/test_a.py")
        );
        assert_eq!(
            relative_path(Path::new("test_a.py"), Path::new("./_docs/api")),
            PathBuf::from("../../test_a.py")
        );
    }

    #[test]
    fn test_relative_source_mixes_relative_and_absolute() {
        let cwd = std::env::current_dir().unwrap();

        assert_eq!(
            relative_source(Path::new("test_sources.py"), Some(&cwd.join("_docs"))),
            "../test_sources.py"
        );
        assert_eq!(
            relative_source(&cwd.join("test_sources.py"), Some(Path::new("_docs"))),
            "../test_sources.py"
        );
        assert_eq!(
            relative_source(Path::new("tests/../test_a.py"), Some(Path::new("./_docs/api"))),
            "../../test_a.py"
        );
    }

    #[test]
    fn test_relative_source_without_rst_dir_keeps_path() {
        assert_eq!(relative_source(Path::new("tests/test_a.py"), None), "tests/test_a.py");
    }
}
