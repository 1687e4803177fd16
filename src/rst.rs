//! Line-oriented reStructuredText writer.
//!
//! Every call appends one or more entries; the rendered document is the
//! entries joined with newlines. Nested documents are inlined as a single
//! raw entry.

use std::fs;
use std::path::Path;

const FIELD_INDENT: usize = 3;

#[derive(Debug, Default, Clone)]
pub struct RstDocument {
    entries: Vec<String>,
}

impl RstDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn newline(&mut self, count: usize) {
        match count {
            0 => {}
            1 => self.entries.push(String::new()),
            n => self.entries.push("\n".repeat(n - 1)),
        }
    }

    pub fn heading(&mut self, text: &str, underline: char, overline: bool, indent: usize) {
        let rule: String = std::iter::repeat(underline)
            .take(text.chars().count())
            .collect();
        if overline {
            self.entries.push(indented(&rule, indent));
        }
        self.entries.push(indented(text, indent));
        self.entries.push(indented(&rule, indent));
    }

    pub fn title(&mut self, text: &str) {
        self.heading(text, '=', true, 0);
    }

    pub fn h1(&mut self, text: &str) {
        self.heading(text, '=', false, 0);
    }

    pub fn h2(&mut self, text: &str) {
        self.heading(text, '-', false, 0);
    }

    pub fn h3(&mut self, text: &str) {
        self.heading(text, '~', false, 0);
    }

    pub fn h4(&mut self, text: &str) {
        self.heading(text, '+', false, 0);
    }

    /// Append a directive block.
    ///
    /// Fields with an empty value render as bare flags (`:glob:`).
    pub fn directive(
        &mut self,
        name: &str,
        arg: Option<&str>,
        fields: &[(&str, &str)],
        content: Option<&str>,
        indent: usize,
    ) {
        let mut block = Vec::new();
        match arg {
            Some(arg) => block.push(format!(".. {name}:: {arg}")),
            None => block.push(format!(".. {name}::")),
        }
        for (key, value) in fields {
            let field = if value.is_empty() {
                format!(":{key}:")
            } else {
                format!(":{key}: {value}")
            };
            block.push(indented(&field, FIELD_INDENT));
        }
        if let Some(content) = content {
            block.push(String::new());
            block.extend(content.lines().map(|line| indented(line, FIELD_INDENT)));
        }
        self.entries
            .extend(block.iter().map(|line| indented(line, indent)));
    }

    pub fn content<S: AsRef<str>>(&mut self, lines: &[S], indent: usize) {
        self.entries
            .extend(lines.iter().map(|line| indented(line.as_ref(), indent)));
    }

    pub fn paragraph(&mut self, text: &str, indent: usize) {
        self.entries
            .extend(text.lines().map(|line| indented(line, indent)));
    }

    /// Append a definition list entry: the term at `indent`, its body
    /// three columns deeper.
    pub fn definition(&mut self, name: &str, text: &str, indent: usize, bold: bool) {
        let term = if bold {
            format!("**{name}**")
        } else {
            name.to_string()
        };
        self.entries.push(indented(&term, indent));
        self.entries.extend(
            text.split('\n')
                .map(|line| indented(line, indent + FIELD_INDENT)),
        );
    }

    pub fn push_raw(&mut self, text: impl Into<String>) {
        self.entries.push(text.into());
    }

    pub fn data(&self) -> String {
        self.entries.join("\n")
    }

    pub fn write(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut data = self.data();
        data.push('\n');
        fs::write(path, data)
    }
}

/// Indent a line, leaving blank lines blank.
fn indented(line: &str, indent: usize) -> String {
    if indent == 0 || line.is_empty() {
        line.to_string()
    } else {
        format!("{}{line}", " ".repeat(indent))
    }
}
