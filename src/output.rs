//! Line-oriented Markdown accumulator and final cleanup
//!
//! HTML text flows; Markdown is made of lines. The transducer appends inline
//! content to a single pending line and "flushes" it into the list of
//! completed lines whenever a block boundary is reached. Block constructs that
//! must not be reformatted (fences, headings, table rows, verbatim code) bypass
//! the pending line and are pushed as completed lines directly.
//!
//! After the last event the completed lines are joined with `\n` and handed to
//! [`postprocess`], which collapses blank-line runs and trims the result.

/// Prefix applied to lines flushed inside a blockquote
pub const QUOTE_PREFIX: &str = "> ";

/// Completed Markdown lines plus the line currently being built
#[derive(Debug, Default)]
pub struct OutputSequence {
    /// Completed lines, in emission order
    lines: Vec<String>,
    /// Inline content of the current line
    line: String,
    /// List-item indentation carried by the current line
    indent: String,
}

impl OutputSequence {
    /// Create an empty output sequence
    pub fn new() -> Self {
        Self::default()
    }

    /// Append inline content to the current line
    pub fn append(&mut self, content: &str) {
        self.line.push_str(content);
    }

    /// Replace the current line with a list marker at the given indentation
    ///
    /// Whatever was pending on the current line is discarded.
    pub fn replace_line(&mut self, indent: String, marker: &str) {
        self.indent = indent;
        self.line.clear();
        self.line.push_str(marker);
    }

    /// Push a completed line, bypassing the current line
    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Take the trimmed content of the current line and clear it
    pub fn take_line(&mut self) -> String {
        let content = self.line.trim().to_string();
        self.line.clear();
        self.indent.clear();
        content
    }

    /// Finalize the current line
    ///
    /// A line with visible content is trimmed, given its list indentation and,
    /// when `quoted`, the `"> "` prefix, then pushed. A blank line is pushed
    /// instead only if the previous completed line is not already blank; at
    /// the very start of the output nothing is pushed.
    pub fn flush(&mut self, quoted: bool) {
        let content = self.line.trim();
        if !content.is_empty() {
            let mut finished =
                String::with_capacity(QUOTE_PREFIX.len() + self.indent.len() + content.len());
            if quoted {
                finished.push_str(QUOTE_PREFIX);
            }
            finished.push_str(&self.indent);
            finished.push_str(content);
            self.lines.push(finished);
        } else if self.lines.last().is_some_and(|last| !last.is_empty()) {
            self.lines.push(String::new());
        }
        self.line.clear();
        self.indent.clear();
    }

    /// Completed lines so far
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Content of the current, not yet flushed line
    pub fn pending(&self) -> &str {
        &self.line
    }

    /// Join the completed lines and run the post-processor
    pub fn into_markdown(self) -> String {
        postprocess(&self.lines.join("\n"))
    }
}

/// Collapse blank-line runs to one empty line and strip leading/trailing blanks
///
/// A line counts as blank when it holds only whitespace. Non-blank lines are
/// kept byte for byte.
///
/// # Examples
///
/// ```
/// use editmd_converter::output::postprocess;
///
/// assert_eq!(postprocess("\n\na\n\n \n\t\nb\n\n"), "a\n\nb");
/// ```
pub fn postprocess(markdown: &str) -> String {
    let mut cleaned: Vec<&str> = Vec::new();
    let mut prev_blank = false;

    for line in markdown.split('\n') {
        if line.trim().is_empty() {
            if !prev_blank {
                cleaned.push("");
                prev_blank = true;
            }
        } else {
            cleaned.push(line);
            prev_blank = false;
        }
    }

    let start = cleaned
        .iter()
        .position(|line| !line.is_empty())
        .unwrap_or(cleaned.len());
    let end = cleaned
        .iter()
        .rposition(|line| !line.is_empty())
        .map_or(start, |last| last + 1);

    cleaned[start..end].join("\n")
}
