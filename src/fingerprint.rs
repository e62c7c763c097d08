//! Change detection for the editor sync loop
//!
//! The editing surface asks for Markdown on every debounce tick, whether or
//! not the user changed anything. Re-serializing identical content would
//! mark the document dirty and churn the undo history, so results are
//! compared by fingerprint and only real changes are reported.
//!
//! # Algorithm
//!
//! 1. Hash the Markdown bytes with BLAKE3
//! 2. Keep the first 128 bits (16 bytes)
//! 3. Encode as lower-case hex
//!
//! # Example
//!
//! ```
//! use editmd_converter::fingerprint::ContentTracker;
//!
//! let mut tracker = ContentTracker::new();
//! assert_eq!(tracker.update("<p>draft</p>"), Some("draft".to_string()));
//! // Same content on the next tick: nothing to report
//! assert_eq!(tracker.update("<p>draft</p>"), None);
//! // Extraction returned nothing: ignored
//! assert_eq!(tracker.update(""), None);
//! ```

use crate::converter::MarkdownConverter;
use log::debug;

/// Length of a fingerprint in hex characters
pub const FINGERPRINT_LEN: usize = 32;

/// Fingerprint of a Markdown document
///
/// ```
/// use editmd_converter::fingerprint::fingerprint;
///
/// let id = fingerprint("# Hello World");
/// assert_eq!(id.len(), 32);
/// assert_eq!(id, fingerprint("# Hello World"));
/// ```
pub fn fingerprint(markdown: &str) -> String {
    let hash = blake3::hash(markdown.as_bytes());
    hex::encode(&hash.as_bytes()[..FINGERPRINT_LEN / 2])
}

/// Tracks the last Markdown reported to the editor
#[derive(Debug, Clone, Default)]
pub struct ContentTracker {
    converter: MarkdownConverter,
    last: Option<String>,
}

impl ContentTracker {
    /// Create a tracker with a default converter and no known content
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tracker around a configured converter
    pub fn with_converter(converter: MarkdownConverter) -> Self {
        Self {
            converter,
            last: None,
        }
    }

    /// Convert freshly extracted HTML and report it if it changed
    ///
    /// Empty HTML is ignored and leaves the recorded state alone.
    pub fn update(&mut self, html: &str) -> Option<String> {
        if html.is_empty() {
            return None;
        }

        let markdown = self.converter.convert(html);
        let current = fingerprint(&markdown);
        if self.last.as_deref() == Some(current.as_str()) {
            return None;
        }

        debug!("Content changed, new fingerprint {}", current);
        self.last = Some(current);
        Some(markdown)
    }

    /// Record Markdown loaded from elsewhere as the current content
    pub fn set_markdown(&mut self, markdown: &str) {
        self.last = Some(fingerprint(markdown));
    }

    /// Forget the recorded content; the next non-empty update is reported
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Fingerprint of the last reported or recorded content
    pub fn last_fingerprint(&self) -> Option<&str> {
        self.last.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fingerprint_format() {
        let id = fingerprint("test content");
        assert_eq!(id.len(), FINGERPRINT_LEN);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_fingerprint_uniqueness() {
        assert_ne!(fingerprint("content 1"), fingerprint("content 2"));
    }

    #[test]
    fn test_empty_markdown_has_fingerprint() {
        assert_eq!(fingerprint("").len(), FINGERPRINT_LEN);
    }

    #[test]
    fn test_update_reports_changes_only() {
        let mut tracker = ContentTracker::new();
        assert_eq!(tracker.update("<p>a</p>"), Some("a".to_string()));
        assert_eq!(tracker.update("<p>a</p>"), None);
        assert_eq!(tracker.update("<p>b</p>"), Some("b".to_string()));
        assert_eq!(tracker.last_fingerprint(), Some(fingerprint("b").as_str()));
    }

    #[test]
    fn test_equivalent_html_is_not_a_change() {
        let mut tracker = ContentTracker::new();
        assert!(tracker.update("<p>same</p>").is_some());
        assert_eq!(tracker.update("<p>  same </p><!-- caret -->"), None);
    }

    #[test]
    fn test_empty_html_keeps_state() {
        let mut tracker = ContentTracker::new();
        tracker.update("<p>a</p>");
        let before = tracker.last_fingerprint().map(str::to_string);
        assert_eq!(tracker.update(""), None);
        assert_eq!(tracker.last_fingerprint().map(str::to_string), before);
    }

    #[test]
    fn test_set_markdown_suppresses_first_echo() {
        let mut tracker = ContentTracker::new();
        tracker.set_markdown("# Loaded");
        assert_eq!(tracker.update("<h1>Loaded</h1>"), None);
    }

    #[test]
    fn test_reset_reports_again() {
        let mut tracker = ContentTracker::new();
        tracker.update("<p>a</p>");
        tracker.reset();
        assert_eq!(tracker.last_fingerprint(), None);
        assert_eq!(tracker.update("<p>a</p>"), Some("a".to_string()));
    }

    proptest! {
        #[test]
        fn prop_fingerprint_is_deterministic(content in "\\PC{0,200}") {
            prop_assert_eq!(fingerprint(&content), fingerprint(&content));
        }

        #[test]
        fn prop_second_identical_update_is_silent(text in "[a-zA-Z0-9]{1,40}") {
            let mut tracker = ContentTracker::new();
            let html = format!("<p>{text}</p>");
            prop_assert_eq!(tracker.update(&html), Some(text.clone()));
            prop_assert_eq!(tracker.update(&html), None);
        }
    }
}
