//! Docstring normalization.

/// Split a docstring into lines and remove its common leading indentation.
///
/// Indentation is measured on lines that contain something other than
/// whitespace. One blank line is dropped from each end so that every
/// docstring reaches the RST writer in the same shape. Lines break on the
/// same characters as Python's `str.splitlines`, including a bare `\r`.
pub fn doc_prep(docstring: Option<&str>) -> Vec<String> {
    let docstring = match docstring {
        Some(doc) if !doc.is_empty() => doc,
        _ => return Vec::new(),
    };

    let doclines = split_lines(docstring);
    let min_indent = match doclines
        .iter()
        .filter(|line| !is_blank(line))
        .map(|line| indent_width(line))
        .min()
    {
        Some(indent) => indent,
        None => return Vec::new(),
    };

    let mut prepared: Vec<String> = doclines
        .iter()
        .map(|line| line.chars().skip(min_indent).collect())
        .collect();

    if prepared.first().is_some_and(|line| is_blank(line)) {
        prepared.remove(0);
    }
    if prepared.last().is_some_and(|line| is_blank(line)) {
        prepared.pop();
    }

    prepared
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Split on line boundaries; a trailing break does not start a new line.
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if !is_line_break(c) {
            continue;
        }
        lines.push(&text[start..i]);
        start = i + c.len_utf8();
        if c == '\r' {
            if let Some(&(j, '\n')) = chars.peek() {
                chars.next();
                start = j + 1;
            }
        }
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

fn is_blank(line: &str) -> bool {
    line.chars().all(char::is_whitespace)
}

fn indent_width(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}
