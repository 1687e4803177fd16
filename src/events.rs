//! JSON-lines event log of a test run.
//!
//! Each line is one hook call, tagged by `event`:
//!
//! ```text
//! {"event": "session_start"}
//! {"event": "collection_finish", "items": [...]}
//! {"event": "fixture_setup", "fixture": {...}, "request": {...}, "result": "1"}
//! {"event": "section", "nodeid": "...", "name": "Parameters", "lines": [...], "loc": 1}
//! {"event": "test_report", "nodeid": "...", "when": "call", "outcome": "failed", "longrepr": "..."}
//! {"event": "session_finish", "exitstatus": 1}
//! ```

use crate::collection::error::{DocgenError, DocgenResult};
use crate::collection::types::{FixtureDef, FixtureRequest, TestItem, TestReport};
use crate::hooks::TestRunnerHooks;
use serde::{Deserialize, Serialize};
use std::io::BufRead;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RunnerEvent {
    SessionStart,
    CollectionFinish {
        items: Vec<TestItem>,
    },
    FixtureSetup {
        fixture: FixtureDef,
        request: FixtureRequest,
        #[serde(default)]
        result: Option<String>,
    },
    Section {
        nodeid: String,
        name: String,
        #[serde(default)]
        lines: Vec<String>,
        #[serde(default)]
        loc: Option<usize>,
    },
    TestReport(TestReport),
    SessionFinish {
        #[serde(default)]
        exitstatus: i32,
    },
}

/// Decode a single event; `line` is only used for error messages.
pub fn parse_event(text: &str, line: usize) -> DocgenResult<RunnerEvent> {
    serde_json::from_str(text).map_err(|e| DocgenError::EventParse {
        line,
        message: e.to_string(),
    })
}

/// Read one event per non-blank line.
pub fn read_events<R: BufRead>(reader: R) -> DocgenResult<Vec<RunnerEvent>> {
    let mut events = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        events.push(parse_event(&line, index + 1)?);
    }
    Ok(events)
}

/// Deliver one event to the matching hook.
pub fn dispatch<H: TestRunnerHooks + ?Sized>(hooks: &mut H, event: RunnerEvent) -> DocgenResult<()> {
    match event {
        RunnerEvent::SessionStart => {
            hooks.session_start();
            Ok(())
        }
        RunnerEvent::CollectionFinish { items } => hooks.collection_modifyitems(&items),
        RunnerEvent::FixtureSetup {
            fixture,
            request,
            result,
        } => hooks.fixture_setup(&fixture, &request, result.as_deref()),
        RunnerEvent::Section {
            nodeid,
            name,
            lines,
            loc,
        } => hooks.add_section(&nodeid, &name, lines, loc),
        RunnerEvent::TestReport(report) => hooks.runtest_makereport(&report),
        RunnerEvent::SessionFinish { exitstatus } => hooks.session_finish(exitstatus),
    }
}

pub fn replay<H, I>(hooks: &mut H, events: I) -> DocgenResult<()>
where
    H: TestRunnerHooks + ?Sized,
    I: IntoIterator<Item = RunnerEvent>,
{
    for event in events {
        dispatch(hooks, event)?;
    }
    Ok(())
}
