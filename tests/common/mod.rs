//! Common test utilities and helpers.
//!
//! The event logs built here mirror small pytest projects: a module with
//! passing and failing tests at module and class level, optionally using
//! scoped fixtures.

use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates a temporary project directory to run docgen in.
#[allow(dead_code)]
pub fn create_test_project() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let project_path = temp_dir.path().join("test_project");
    fs::create_dir_all(&project_path).expect("Failed to create project directory");
    (temp_dir, project_path)
}

/// Path to the compiled rdocgen binary.
#[allow(dead_code)]
pub fn get_rdocgen_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_rdocgen"))
}

/// Writes events as JSON lines and returns the log path.
#[allow(dead_code)]
pub fn write_event_log(project_path: &Path, events: &[Value]) -> PathBuf {
    let contents: Vec<String> = events.iter().map(Value::to_string).collect();
    let path = project_path.join("events.jsonl");
    fs::write(&path, contents.join("\n")).expect("Failed to write event log");
    path
}

#[allow(dead_code)]
pub fn to_event_log(events: &[Value]) -> String {
    events
        .iter()
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

fn module_node(module: &str) -> Value {
    json!({
        "nodeid": format!("{module}.py"),
        "name": module,
        "doc": null,
        "kind": "module",
    })
}

fn class_node(module: &str, class: &str) -> Value {
    json!({
        "nodeid": format!("{module}.py::{class}"),
        "name": class,
        "kind": "class",
    })
}

/// A collected item; class tests get the class and its instance as parents.
#[allow(dead_code)]
pub fn item(module: &str, class: Option<&str>, name: &str, doc: Option<&str>) -> Value {
    let (nodeid, parents) = match class {
        Some(class) => (
            format!("{module}.py::{class}::{name}"),
            vec![
                json!({
                    "nodeid": format!("{module}.py::{class}::()"),
                    "name": "()",
                    "kind": "instance",
                }),
                class_node(module, class),
                module_node(module),
            ],
        ),
        None => (format!("{module}.py::{name}"), vec![module_node(module)]),
    };
    json!({
        "nodeid": nodeid,
        "name": name,
        "doc": doc,
        "path": format!("{module}.py"),
        "cls": class,
        "parents": parents,
    })
}

/// Setup, call and teardown reports for one test.
#[allow(dead_code)]
pub fn reports(nodeid: &str, call_outcome: &str, longrepr: &str) -> Vec<Value> {
    vec![
        json!({"event": "test_report", "nodeid": nodeid, "when": "setup", "outcome": "passed"}),
        json!({
            "event": "test_report",
            "nodeid": nodeid,
            "when": "call",
            "outcome": call_outcome,
            "longrepr": longrepr,
        }),
        json!({"event": "test_report", "nodeid": nodeid, "when": "teardown", "outcome": "passed"}),
    ]
}

/// Two passing and two failing tests, at module and class level.
#[allow(dead_code)]
pub fn basic_run_events(module: &str) -> Vec<Value> {
    let failure = "def test_failing():\n>       assert \"pass\" == \"fail\"\nE       AssertionError";
    let tests = [
        (None, "test_passing_module_level", "This is a passing module-level test.", "passed"),
        (None, "test_failing_module_level", "This is a failing module-level test.", "failed"),
        (Some("TestClass"), "test_passing_class_level", "This is a passing class-level test.", "passed"),
        (Some("TestClass"), "test_failing_class_level", "This is a failing class-level test.", "failed"),
    ];

    let items: Vec<Value> = tests
        .iter()
        .map(|(class, name, doc, _)| {
            let doc = format!("\n    {doc}\n    ");
            item(module, *class, name, Some(doc.as_str()))
        })
        .collect();

    let mut events = vec![
        json!({"event": "session_start"}),
        json!({"event": "collection_finish", "items": items}),
    ];
    for (class, name, _, outcome) in tests {
        let nodeid = match class {
            Some(class) => format!("{module}.py::{class}::{name}"),
            None => format!("{module}.py::{name}"),
        };
        let longrepr = if outcome == "failed" { failure } else { "" };
        events.extend(reports(&nodeid, outcome, longrepr));
    }
    events.push(json!({"event": "session_finish", "exitstatus": 1}));
    events
}

/// A module-scoped fixture with a docstring and result value, used by one test.
#[allow(dead_code)]
pub fn fixture_run_events(module: &str) -> Vec<Value> {
    let passing = format!("{module}.py::test_passing_module_level");
    let class_test = format!("{module}.py::TestClass::test_passing_class_level");

    let mut events = vec![
        json!({"event": "session_start"}),
        json!({
            "event": "collection_finish",
            "items": [
                item(module, None, "test_passing_module_level", Some("Passing module test.")),
                item(module, Some("TestClass"), "test_passing_class_level", None),
            ],
        }),
        json!({
            "event": "fixture_setup",
            "fixture": {
                "argname": "module_fixture",
                "func_name": "module_fixture",
                "doc": "\n    Module fixture in use!\n    ",
            },
            "request": {"nodeid": format!("{module}.py")},
            "result": "Module",
        }),
    ];
    events.extend(reports(&passing, "passed", ""));
    events.push(json!({
        "event": "fixture_setup",
        "fixture": {
            "argname": "class_fixture",
            "func_name": "class_fixture",
            "doc": "\n    Class fixture in use!\n    ",
            "doc_result": true,
        },
        "request": {"nodeid": format!("{module}.py::TestClass")},
        "result": "Class",
    }));
    events.extend(reports(&class_test, "passed", ""));
    events.push(json!({"event": "session_finish", "exitstatus": 0}));
    events
}
