//! Pre-tokenization cleanup of edited HTML
//!
//! The editing surface hands over `innerHTML` of its content element. Before
//! that text reaches the tokenizer it is cleaned in three ordered steps:
//!
//! 1. **Comments**: every `<!-- ... -->` is deleted, including multi-line ones
//! 2. **Non-content elements**: `<script>` and `<style>` elements are deleted
//!    together with their content, case-insensitively
//! 3. **Line endings**: CRLF and lone CR become LF
//!
//! Unterminated comments and unclosed `<script>`/`<style>` elements are left in
//! place; the tokenizer absorbs them later.
//!
//! # Examples
//!
//! ```
//! use editmd_converter::sanitizer::Sanitizer;
//!
//! let sanitizer = Sanitizer::new();
//! let cleaned = sanitizer.sanitize("<p>a<!-- note --></p>\r\n<style>p{}</style>");
//! assert_eq!(cleaned, "<p>a</p>\n");
//! ```

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

fn comment_regex() -> Option<&'static Regex> {
    static COMMENT_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    COMMENT_REGEX
        .get_or_init(|| Regex::new(r"(?s)<!--.*?-->").ok())
        .as_ref()
}

// Both elements share a single pass: whichever opens first runs to its own closer
fn non_content_regex() -> Option<&'static Regex> {
    static NON_CONTENT_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    NON_CONTENT_REGEX
        .get_or_init(|| Regex::new(r"(?is)<script[^>]*>.*?</script>|<style[^>]*>.*?</style>").ok())
        .as_ref()
}

fn line_ending_regex() -> Option<&'static Regex> {
    static LINE_ENDING_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    LINE_ENDING_REGEX
        .get_or_init(|| Regex::new(r"\r\n|\r").ok())
        .as_ref()
}

/// Cleans raw HTML before it is tokenized
///
/// Stateless; one instance can be shared between threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sanitizer;

impl Sanitizer {
    /// Create a new sanitizer
    pub fn new() -> Self {
        Self
    }

    /// Run all cleanup steps in order and return the cleaned HTML
    ///
    /// Never fails; the empty string maps to the empty string.
    pub fn sanitize(&self, html: &str) -> String {
        let without_comments = self.strip_comments(html);
        let without_elements = self.strip_non_content(&without_comments);
        self.normalize_line_endings(&without_elements).into_owned()
    }

    /// Delete every complete HTML comment
    pub fn strip_comments<'a>(&self, html: &'a str) -> Cow<'a, str> {
        match comment_regex() {
            Some(regex) => regex.replace_all(html, ""),
            None => Cow::Borrowed(html),
        }
    }

    /// Delete `<script>` and `<style>` elements with their content
    ///
    /// Scanning is left to right in a single pass: an element that starts
    /// inside another one's body is part of that body.
    pub fn strip_non_content<'a>(&self, html: &'a str) -> Cow<'a, str> {
        match non_content_regex() {
            Some(regex) => regex.replace_all(html, ""),
            None => Cow::Borrowed(html),
        }
    }

    /// Convert CRLF and lone CR line endings to LF
    pub fn normalize_line_endings<'a>(&self, html: &'a str) -> Cow<'a, str> {
        match line_ending_regex() {
            Some(regex) => regex.replace_all(html, "\n"),
            None => Cow::Borrowed(html),
        }
    }
}
