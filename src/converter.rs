//! Markdown converter - single-pass transducer from tag events to Markdown
//!
//! This module holds the core of the crate: a stack machine that consumes the
//! start-tag / end-tag / text events produced by [`crate::tokenizer`] and
//! writes Markdown lines into an [`OutputSequence`].
//!
//! # Conversion Strategy
//!
//! HTML coming from a live editing surface is rarely a well-formed document.
//! Instead of building and repairing a DOM, the transducer keeps just enough
//! state to make local decisions:
//!
//! - **Context stack**: inline and block constructs that are currently open
//!   (heading, paragraph, bold, italic, inline code, code block, blockquote,
//!   link). A closing tag only acts when the top of the stack is the matching
//!   construct; anything else is ignored.
//! - **List stack**: one entry per open `ul`/`ol` with its item counter. Its
//!   depth sets the indentation of list items.
//! - **Table accumulator**: cells are collected until `</table>` and emitted
//!   as one Markdown table.
//! - **Mode flags**: verbatim mode inside `<pre>` suspends whitespace
//!   collapsing; inline-code mode is tracked alongside it.
//!
//! # Examples
//!
//! ```rust
//! use editmd_converter::converter::MarkdownConverter;
//!
//! let converter = MarkdownConverter::new();
//! let markdown = converter.convert("<h1>Title</h1><p>Some <strong>bold</strong> text.</p>");
//! assert_eq!(markdown, "# Title\n\nSome **bold** text.");
//! ```
//!
//! ## Lists
//!
//! ```rust
//! use editmd_converter::html_to_markdown;
//!
//! let markdown = html_to_markdown("<ol><li>one</li><li>two<ul><li>nested</li></ul></li></ol>");
//! assert_eq!(markdown, "1. one\n\n2. two\n\n  - nested");
//! ```
//!
//! # Malformed Input
//!
//! Unmatched closing tags are dropped, missing attributes read as empty
//! strings, ragged tables are emitted as they are. Conversion never fails.

use crate::decode::decode_html;
use crate::error::ConversionError;
use crate::legacy::simple_html_to_markdown;
use crate::output::OutputSequence;
use crate::sanitizer::Sanitizer;
use crate::table::TableAccumulator;
use crate::tokenizer::{EventSink, TagAttributes, tokenize};
use log::{debug, trace};
use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

/// Fence line opening and closing a verbatim code block
pub const CODE_FENCE: &str = "```";

/// Markdown hard line break
const HARD_BREAK: &str = "  \n";

/// Default boundary limit for [`MarkdownConverter::convert_bytes`]
pub const DEFAULT_MAX_INPUT_BYTES: usize = 16 * 1024 * 1024;

/// Which converter produces the Markdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConversionStrategy {
    /// Event-driven stack transducer
    #[default]
    Transducer,
    /// Older regex rewrite converter
    Legacy,
}

/// Conversion options
#[derive(Debug, Clone)]
pub struct ConversionOptions {
    /// Converter used by [`MarkdownConverter::convert`]
    pub strategy: ConversionStrategy,
    /// Largest input accepted by [`MarkdownConverter::convert_bytes`] (0 = unlimited)
    pub max_input_bytes: usize,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            strategy: ConversionStrategy::Transducer,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

/// List flavour of an open `ul`/`ol`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Ordered,
    Unordered,
}

/// Tag names the transducer knows, as a closed set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Heading(u8),
    Paragraph,
    LineBreak,
    Bold,
    Italic,
    Code,
    Preformatted,
    Blockquote,
    Anchor,
    List(ListKind),
    ListItem,
    Table,
    TableRow,
    TableCell,
    Image,
    Other,
}

impl ElementKind {
    /// Classify a lower-case tag name
    pub fn from_tag_name(name: &str) -> Self {
        match name {
            "h1" => ElementKind::Heading(1),
            "h2" => ElementKind::Heading(2),
            "h3" => ElementKind::Heading(3),
            "h4" => ElementKind::Heading(4),
            "h5" => ElementKind::Heading(5),
            "h6" => ElementKind::Heading(6),
            "p" => ElementKind::Paragraph,
            "br" => ElementKind::LineBreak,
            "strong" | "b" => ElementKind::Bold,
            "em" | "i" => ElementKind::Italic,
            "code" => ElementKind::Code,
            "pre" => ElementKind::Preformatted,
            "blockquote" => ElementKind::Blockquote,
            "a" => ElementKind::Anchor,
            "ul" => ElementKind::List(ListKind::Unordered),
            "ol" => ElementKind::List(ListKind::Ordered),
            "li" => ElementKind::ListItem,
            "table" => ElementKind::Table,
            "tr" => ElementKind::TableRow,
            "td" | "th" => ElementKind::TableCell,
            "img" => ElementKind::Image,
            _ => ElementKind::Other,
        }
    }
}

/// One open construct on the context stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextFrame {
    Header { level: u8 },
    Paragraph,
    Bold,
    Italic,
    InlineCode,
    CodeBlock,
    Blockquote,
    Link { href: String },
}

/// Nesting state of one open list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListFrame {
    pub kind: ListKind,
    pub counter: u32,
}

impl ListFrame {
    fn new(kind: ListKind) -> Self {
        Self { kind, counter: 0 }
    }

    /// Marker for the next item of this list
    fn next_marker(&mut self) -> Cow<'static, str> {
        match self.kind {
            ListKind::Ordered => {
                self.counter += 1;
                Cow::Owned(format!("{}. ", self.counter))
            }
            ListKind::Unordered => Cow::Borrowed("- "),
        }
    }
}

fn whitespace_regex() -> Option<&'static Regex> {
    static WHITESPACE_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    WHITESPACE_REGEX
        .get_or_init(|| Regex::new(r"\s+").ok())
        .as_ref()
}

/// Collapse every whitespace run to a single space
///
/// Leading and trailing runs are collapsed too, not removed.
pub fn collapse_whitespace(text: &str) -> Cow<'_, str> {
    match whitespace_regex() {
        Some(regex) => regex.replace_all(text, " "),
        None => Cow::Borrowed(text),
    }
}

fn image_markdown(attributes: &TagAttributes) -> String {
    let alt = attributes.get_or_empty("alt");
    let src = attributes.get_or_empty("src");
    let title = attributes.get_or_empty("title");

    if title.is_empty() {
        format!("![{alt}]({src})")
    } else {
        format!("![{alt}]({src} \"{title}\")")
    }
}

/// Per-conversion state machine
///
/// Feed it events through [`EventSink`] (or [`tokenize`]) and call
/// [`MarkdownTransducer::finish`] to get the Markdown. A transducer is used
/// for exactly one document.
#[derive(Debug, Default)]
pub struct MarkdownTransducer {
    context: Vec<ContextFrame>,
    lists: Vec<ListFrame>,
    table: TableAccumulator,
    output: OutputSequence,
    in_pre: bool,
    in_code: bool,
}

impl MarkdownTransducer {
    /// Create a transducer with empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Flush trailing content and return the post-processed Markdown
    pub fn finish(mut self) -> String {
        self.flush();
        self.output.into_markdown()
    }

    /// Constructs currently open, innermost last
    pub fn context(&self) -> &[ContextFrame] {
        &self.context
    }

    /// Lists currently open, innermost last
    pub fn lists(&self) -> &[ListFrame] {
        &self.lists
    }

    /// Whether text is currently taken verbatim
    pub fn in_verbatim(&self) -> bool {
        self.in_pre
    }

    fn in_blockquote(&self) -> bool {
        self.context
            .iter()
            .any(|frame| matches!(frame, ContextFrame::Blockquote))
    }

    fn flush(&mut self) {
        let quoted = self.in_blockquote();
        self.output.flush(quoted);
    }

    fn top_is(&self, frame: &ContextFrame) -> bool {
        self.context.last() == Some(frame)
    }

    /// Pop the top frame when it matches; report whether it did
    fn pop_if(&mut self, frame: &ContextFrame, name: &str) -> bool {
        if self.top_is(frame) {
            self.context.pop();
            true
        } else {
            debug!("Ignoring unmatched </{}> (open: {:?})", name, self.context.last());
            false
        }
    }

    fn open_list_item(&mut self) {
        self.flush();
        let depth = self.lists.len();
        if let Some(list) = self.lists.last_mut() {
            let marker = list.next_marker();
            let indent = "  ".repeat(depth - 1);
            self.output.replace_line(indent, &marker);
        }
    }

    fn close_heading(&mut self, name: &str) {
        if let Some(&ContextFrame::Header { level }) = self.context.last() {
            let content = self.output.take_line();
            let hashes = "#".repeat(usize::from(level));
            self.output.push_line(format!("{} {}", hashes, content));
            self.context.pop();
        } else {
            debug!("Ignoring unmatched </{}>", name);
        }
    }

    fn close_link(&mut self, name: &str) {
        if let Some(ContextFrame::Link { .. }) = self.context.last()
            && let Some(ContextFrame::Link { href }) = self.context.pop()
        {
            self.output.append(&format!("]({})", href));
        } else {
            debug!("Ignoring unmatched </{}>", name);
        }
    }

    fn close_table(&mut self) {
        if !self.table.is_active() {
            return;
        }
        let lines = self.table.close();
        debug!("Emitting table with {} lines", lines.len());
        for line in lines {
            self.output.push_line(line);
        }
    }

    fn close_table_cell(&mut self) {
        if self.table.is_active() {
            let cell = self.output.take_line();
            self.table.push_cell(cell);
        }
    }
}

impl EventSink for MarkdownTransducer {
    fn start_tag(&mut self, name: &str, attributes: &TagAttributes) {
        trace!("<{}> context depth {}", name, self.context.len());

        match ElementKind::from_tag_name(name) {
            ElementKind::Heading(level) => {
                self.flush();
                self.context.push(ContextFrame::Header { level });
            }
            ElementKind::Paragraph => {
                self.flush();
                self.context.push(ContextFrame::Paragraph);
            }
            ElementKind::LineBreak => self.output.append(HARD_BREAK),
            ElementKind::Bold => {
                self.context.push(ContextFrame::Bold);
                self.output.append("**");
            }
            ElementKind::Italic => {
                self.context.push(ContextFrame::Italic);
                self.output.append("*");
            }
            // Code inside a code block is already verbatim
            ElementKind::Code => {
                if !self.in_pre {
                    self.context.push(ContextFrame::InlineCode);
                    self.output.append("`");
                    self.in_code = true;
                }
            }
            ElementKind::Preformatted => {
                self.flush();
                self.context.push(ContextFrame::CodeBlock);
                self.in_pre = true;
                self.output.push_line(CODE_FENCE);
            }
            ElementKind::Blockquote => {
                self.flush();
                self.context.push(ContextFrame::Blockquote);
            }
            ElementKind::Anchor => {
                let href = attributes.get_or_empty("href").to_string();
                self.context.push(ContextFrame::Link { href });
                self.output.append("[");
            }
            ElementKind::List(kind) => {
                self.flush();
                self.lists.push(ListFrame::new(kind));
            }
            ElementKind::ListItem => self.open_list_item(),
            ElementKind::Table => {
                self.flush();
                self.table.open();
            }
            ElementKind::TableRow => self.table.start_row(),
            ElementKind::Image => self.output.append(&image_markdown(attributes)),
            ElementKind::TableCell | ElementKind::Other => {}
        }
    }

    fn end_tag(&mut self, name: &str) {
        trace!("</{}> context depth {}", name, self.context.len());

        match ElementKind::from_tag_name(name) {
            ElementKind::Heading(_) => self.close_heading(name),
            ElementKind::Paragraph => {
                if self.top_is(&ContextFrame::Paragraph) {
                    self.flush();
                    self.context.pop();
                } else {
                    debug!("Ignoring unmatched </{}>", name);
                }
            }
            ElementKind::Bold => {
                if self.pop_if(&ContextFrame::Bold, name) {
                    self.output.append("**");
                }
            }
            ElementKind::Italic => {
                if self.pop_if(&ContextFrame::Italic, name) {
                    self.output.append("*");
                }
            }
            ElementKind::Code => {
                if self.pop_if(&ContextFrame::InlineCode, name) {
                    self.output.append("`");
                    self.in_code = false;
                }
            }
            ElementKind::Preformatted => {
                if self.pop_if(&ContextFrame::CodeBlock, name) {
                    self.output.push_line(CODE_FENCE);
                    self.in_pre = false;
                }
            }
            ElementKind::Blockquote => {
                if self.top_is(&ContextFrame::Blockquote) {
                    // Flush while the quote is still open so the line gets its prefix
                    self.flush();
                    self.context.pop();
                } else {
                    debug!("Ignoring unmatched </{}>", name);
                }
            }
            ElementKind::Anchor => self.close_link(name),
            ElementKind::List(_) => {
                if self.lists.pop().is_some() {
                    self.flush();
                }
            }
            ElementKind::ListItem => self.flush(),
            ElementKind::Table => self.close_table(),
            ElementKind::TableRow => self.table.end_row(),
            ElementKind::TableCell => self.close_table_cell(),
            ElementKind::LineBreak | ElementKind::Image | ElementKind::Other => {}
        }
    }

    fn text(&mut self, data: &str) {
        trace!(
            "text ({} bytes, verbatim: {}, inline code: {})",
            data.len(),
            self.in_pre,
            self.in_code
        );

        if self.in_pre {
            self.output.push_line(data);
        } else {
            self.output.append(&collapse_whitespace(data));
        }
    }
}

/// Main Markdown converter
///
/// Holds configuration only; all conversion state lives in a fresh
/// [`MarkdownTransducer`] per call, so one converter can serve concurrent
/// callers.
///
/// # Usage
///
/// ```rust
/// use editmd_converter::converter::{ConversionOptions, ConversionStrategy, MarkdownConverter};
///
/// let converter = MarkdownConverter::new();
/// assert_eq!(converter.convert("<h2>Title</h2>"), "## Title");
///
/// let legacy = MarkdownConverter::with_options(ConversionOptions {
///     strategy: ConversionStrategy::Legacy,
///     ..Default::default()
/// });
/// assert_eq!(legacy.convert("<h2>Title</h2>"), "## Title");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MarkdownConverter {
    options: ConversionOptions,
    sanitizer: Sanitizer,
}

impl MarkdownConverter {
    /// Create a new converter with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new converter with custom options
    pub fn with_options(options: ConversionOptions) -> Self {
        Self {
            options,
            sanitizer: Sanitizer::new(),
        }
    }

    /// Options this converter was built with
    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Convert an HTML fragment to Markdown
    ///
    /// Total and deterministic: identical input always yields identical output
    /// and the empty string yields the empty string.
    pub fn convert(&self, html: &str) -> String {
        debug!(
            "Converting {} bytes of HTML ({:?})",
            html.len(),
            self.options.strategy
        );

        let markdown = match self.options.strategy {
            ConversionStrategy::Transducer => self.transduce(html),
            ConversionStrategy::Legacy => simple_html_to_markdown(html),
        };

        debug!("Produced {} bytes of Markdown", markdown.len());
        markdown
    }

    /// Validate raw UTF-8 bytes and convert them
    ///
    /// # Errors
    ///
    /// - `ConversionError::InvalidInput`: input exceeds `max_input_bytes`
    /// - `ConversionError::EncodingError`: the bytes are not UTF-8
    ///
    /// # Examples
    ///
    /// ```rust
    /// use editmd_converter::converter::MarkdownConverter;
    ///
    /// let converter = MarkdownConverter::new();
    /// let markdown = converter
    ///     .convert_bytes("<p>Café</p>".as_bytes())
    ///     .expect("Conversion failed");
    /// assert_eq!(markdown, "Café");
    /// ```
    pub fn convert_bytes(&self, html: &[u8]) -> Result<String, ConversionError> {
        self.validate_size(html.len())?;
        let text = decode_html(html)?;
        Ok(self.convert(&text))
    }

    fn validate_size(&self, len: usize) -> Result<(), ConversionError> {
        let limit = self.options.max_input_bytes;
        if limit != 0 && len > limit {
            return Err(ConversionError::InvalidInput(format!(
                "HTML input of {} bytes exceeds limit of {} bytes",
                len, limit
            )));
        }
        Ok(())
    }

    fn transduce(&self, html: &str) -> String {
        let cleaned = self.sanitizer.sanitize(html);
        let mut transducer = MarkdownTransducer::new();
        tokenize(&cleaned, &mut transducer);
        transducer.finish()
    }
}
