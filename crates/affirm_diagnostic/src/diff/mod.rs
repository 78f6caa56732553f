//! Line diffs between expected and actual renderings.
//!
//! Values are rendered with `Value::pretty` (or taken as raw text when both
//! sides are strings) and compared line by line using a longest-common-
//! subsequence edit script. Unchanged lines further than `context` lines
//! away from any change are elided; each remaining run is introduced by a
//! `@@ -start,len +start,len @@` hunk header.
//!
//! The common prefix and suffix are matched directly. When the remaining
//! middle is too large for the LCS table it is shown as a plain removal of
//! the expected lines followed by an insertion of the actual ones.

use std::io::IsTerminal;

use affirm_value::Value;

/// Upper bound on LCS table cells for the changed middle section.
const MAX_TABLE_CELLS: usize = 1 << 20;

/// ANSI color codes for diff output.
mod colors {
    pub const EXPECTED: &str = "\x1b[32m"; // Green
    pub const ACTUAL: &str = "\x1b[31m"; // Red
    pub const HUNK: &str = "\x1b[1;33m"; // Bold yellow
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode for rendered diffs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Color when stderr is a terminal.
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    #[default]
    Never,
}

impl ColorMode {
    /// Resolve to a boolean; `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Diff rendering options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffOptions {
    /// Unchanged lines kept around each change.
    pub context: usize,
    pub color: ColorMode,
    pub expected_label: String,
    pub actual_label: String,
}

impl Default for DiffOptions {
    fn default() -> Self {
        DiffOptions {
            context: 3,
            color: ColorMode::Never,
            expected_label: "Expected".to_string(),
            actual_label: "Received".to_string(),
        }
    }
}

impl DiffOptions {
    #[must_use]
    pub fn with_context(mut self, context: usize) -> Self {
        self.context = context;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: ColorMode) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn with_labels(mut self, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        self.expected_label = expected.into();
        self.actual_label = actual.into();
        self
    }

    /// Keep every unchanged line.
    #[must_use]
    pub fn full(self) -> Self {
        self.with_context(usize::MAX)
    }

    fn use_colors(&self) -> bool {
        self.color
            .should_use_colors(std::io::stderr().is_terminal())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Op {
    Equal,
    /// Line only in the expected rendering.
    Delete,
    /// Line only in the actual rendering.
    Insert,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Edit<'a> {
    op: Op,
    text: &'a str,
}

/// Diff two values.
///
/// Returns `None` when both renderings have the same lines.
pub fn diff_values(expected: &Value, actual: &Value, options: &DiffOptions) -> Option<String> {
    match (expected, actual) {
        (Value::Str(e), Value::Str(a)) => diff_text(e, a, options),
        _ => diff_text(&expected.pretty(), &actual.pretty(), options),
    }
}

/// Diff two texts line by line.
///
/// Returns `None` when the texts have the same lines.
pub fn diff_text(expected: &str, actual: &str, options: &DiffOptions) -> Option<String> {
    let expected_lines: Vec<&str> = expected.lines().collect();
    let actual_lines: Vec<&str> = actual.lines().collect();
    let edits = edit_script(&expected_lines, &actual_lines);
    if edits.iter().all(|e| e.op == Op::Equal) {
        return None;
    }
    Some(render(&edits, options))
}

fn equal(text: &str) -> Edit<'_> {
    Edit {
        op: Op::Equal,
        text,
    }
}

/// Edit script: common prefix and suffix, then the changed middle.
fn edit_script<'a>(expected: &[&'a str], actual: &[&'a str]) -> Vec<Edit<'a>> {
    let prefix = expected
        .iter()
        .zip(actual)
        .take_while(|(e, a)| e == a)
        .count();
    let suffix = expected[prefix..]
        .iter()
        .rev()
        .zip(actual[prefix..].iter().rev())
        .take_while(|(e, a)| e == a)
        .count();
    let expected_middle = &expected[prefix..expected.len() - suffix];
    let actual_middle = &actual[prefix..actual.len() - suffix];

    let mut edits = Vec::with_capacity(expected.len() + actual.len());
    edits.extend(expected[..prefix].iter().map(|&text| equal(text)));
    if expected_middle
        .len()
        .saturating_mul(actual_middle.len())
        <= MAX_TABLE_CELLS
    {
        edits.extend(lcs_script(expected_middle, actual_middle));
    } else {
        edits.extend(expected_middle.iter().map(|text| Edit {
            op: Op::Delete,
            text,
        }));
        edits.extend(actual_middle.iter().map(|text| Edit {
            op: Op::Insert,
            text,
        }));
    }
    edits.extend(expected[expected.len() - suffix..].iter().map(|&text| equal(text)));
    edits
}

/// Longest-common-subsequence edit script.
fn lcs_script<'a>(expected: &[&'a str], actual: &[&'a str]) -> Vec<Edit<'a>> {
    let n = expected.len();
    let m = actual.len();
    let width = m + 1;
    // lcs[i * width + j] = LCS length of expected[i..] and actual[j..]
    let mut lcs = vec![0usize; (n + 1) * width];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i * width + j] = if expected[i] == actual[j] {
                lcs[(i + 1) * width + j + 1] + 1
            } else {
                lcs[(i + 1) * width + j].max(lcs[i * width + j + 1])
            };
        }
    }

    let mut edits = Vec::with_capacity(n + m);
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if expected[i] == actual[j] {
            edits.push(equal(expected[i]));
            i += 1;
            j += 1;
        } else if lcs[(i + 1) * width + j] >= lcs[i * width + j + 1] {
            edits.push(Edit {
                op: Op::Delete,
                text: expected[i],
            });
            i += 1;
        } else {
            edits.push(Edit {
                op: Op::Insert,
                text: actual[j],
            });
            j += 1;
        }
    }
    edits.extend(expected[i..].iter().map(|text| Edit {
        op: Op::Delete,
        text,
    }));
    edits.extend(actual[j..].iter().map(|text| Edit {
        op: Op::Insert,
        text,
    }));
    edits
}

/// Which edits survive context trimming.
fn visible(edits: &[Edit<'_>], context: usize) -> Vec<bool> {
    let len = edits.len();
    let mut keep = vec![false; len];
    let mut since_change: Option<usize> = None;
    for (k, edit) in edits.iter().enumerate() {
        if edit.op == Op::Equal {
            since_change = since_change.map(|d| d.saturating_add(1));
        } else {
            since_change = Some(0);
        }
        keep[k] = since_change.is_some_and(|d| d <= context);
    }
    let mut until_change: Option<usize> = None;
    for k in (0..len).rev() {
        if edits[k].op == Op::Equal {
            until_change = until_change.map(|d| d.saturating_add(1));
        } else {
            until_change = Some(0);
        }
        keep[k] = keep[k] || until_change.is_some_and(|d| d <= context);
    }
    keep
}

fn render(edits: &[Edit<'_>], options: &DiffOptions) -> String {
    let color = options.use_colors();
    let paint = |code: &str, text: String| {
        if color {
            format!("{code}{text}{}", colors::RESET)
        } else {
            text
        }
    };

    let mut lines = vec![
        paint(colors::EXPECTED, format!("- {}", options.expected_label)),
        paint(colors::ACTUAL, format!("+ {}", options.actual_label)),
        String::new(),
    ];

    let keep = visible(edits, options.context);
    let elided = keep.iter().any(|k| !k);

    // 1-based line numbers of the next expected/actual line.
    let (mut e_line, mut a_line) = (1usize, 1usize);
    let mut k = 0;
    while k < edits.len() {
        if !keep[k] {
            match edits[k].op {
                Op::Equal => {
                    e_line += 1;
                    a_line += 1;
                }
                Op::Delete => e_line += 1,
                Op::Insert => a_line += 1,
            }
            k += 1;
            continue;
        }

        let start = k;
        while k < edits.len() && keep[k] {
            k += 1;
        }
        let hunk = &edits[start..k];

        if elided {
            let e_len = hunk.iter().filter(|e| e.op != Op::Insert).count();
            let a_len = hunk.iter().filter(|e| e.op != Op::Delete).count();
            lines.push(paint(
                colors::HUNK,
                format!("@@ -{e_line},{e_len} +{a_line},{a_len} @@"),
            ));
        }

        for edit in hunk {
            match edit.op {
                Op::Equal => {
                    lines.push(format!("  {}", edit.text));
                    e_line += 1;
                    a_line += 1;
                }
                Op::Delete => {
                    lines.push(paint(colors::EXPECTED, format!("- {}", edit.text)));
                    e_line += 1;
                }
                Op::Insert => {
                    lines.push(paint(colors::ACTUAL, format!("+ {}", edit.text)));
                    a_line += 1;
                }
            }
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests;
