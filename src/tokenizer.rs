//! Streaming tag/text event source built on the html5ever tokenizer
//!
//! The converter never builds a DOM. It consumes a flat, document-ordered
//! stream of three events: start tag (with attributes), end tag, and text.
//! This module adapts html5ever's tokenizer to that contract.
//!
//! # Event Contract
//!
//! - Tag names arrive lower-cased; attribute values are entity-decoded
//! - Adjacent character tokens are coalesced, so every run of text between two
//!   tags is delivered as one `text` event
//! - A self-closing start tag (`<br/>`) is delivered as a start event
//!   immediately followed by the matching end event
//! - Comments, doctypes, NUL characters and parse errors produce no events
//!
//! Unbalanced or misnested tags are passed through untouched. Deciding what
//! they mean is left to the event consumer.
//!
//! # Examples
//!
//! ```
//! use editmd_converter::tokenizer::{collect_events, HtmlEvent};
//!
//! let events = collect_events("<p>a &amp; b</p>");
//! assert_eq!(events.len(), 3);
//! assert!(matches!(&events[1], HtmlEvent::Text(text) if text == "a & b"));
//! ```

use html5ever::Attribute;
use html5ever::tendril::StrTendril;
use html5ever::tokenizer::{
    BufferQueue, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use std::cell::RefCell;

/// Attributes of a start tag, in source order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagAttributes {
    entries: Vec<(String, String)>,
}

impl TagAttributes {
    /// Create an empty attribute list
    pub fn new() -> Self {
        Self::default()
    }

    fn from_html5ever(attrs: &[Attribute]) -> Self {
        attrs
            .iter()
            .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
            .collect()
    }

    /// Look up an attribute by name
    ///
    /// When a name occurs more than once the first occurrence wins. The
    /// tokenizer already discards later duplicates, so lists built by hand
    /// read the same way as tokenized ones.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Look up an attribute, reading a missing one as the empty string
    pub fn get_or_empty(&self, name: &str) -> &str {
        self.get(name).unwrap_or("")
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the tag carried no attributes
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TagAttributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

/// Consumer of tokenizer events
///
/// Implemented by the Markdown transducer; anything else that wants the raw
/// event stream (tests, debugging tools) can implement it too.
pub trait EventSink {
    /// An opening tag, e.g. `<a href="...">`
    fn start_tag(&mut self, name: &str, attributes: &TagAttributes);

    /// A closing tag, e.g. `</a>`
    fn end_tag(&mut self, name: &str);

    /// Decoded character data between tags
    fn text(&mut self, data: &str);
}

/// One tokenizer event, owned
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlEvent {
    Start {
        name: String,
        attributes: TagAttributes,
    },
    End {
        name: String,
    },
    Text(String),
}

impl EventSink for Vec<HtmlEvent> {
    fn start_tag(&mut self, name: &str, attributes: &TagAttributes) {
        self.push(HtmlEvent::Start {
            name: name.to_string(),
            attributes: attributes.clone(),
        });
    }

    fn end_tag(&mut self, name: &str) {
        self.push(HtmlEvent::End {
            name: name.to_string(),
        });
    }

    fn text(&mut self, data: &str) {
        self.push(HtmlEvent::Text(data.to_string()));
    }
}

/// Bridges html5ever's `&self` token sink to a `&mut` event sink
struct TokenAdapter<'s, S: EventSink> {
    sink: RefCell<&'s mut S>,
    pending_text: RefCell<String>,
}

impl<'s, S: EventSink> TokenAdapter<'s, S> {
    fn new(sink: &'s mut S) -> Self {
        Self {
            sink: RefCell::new(sink),
            pending_text: RefCell::new(String::new()),
        }
    }

    fn flush_text(&self) {
        let mut pending = self.pending_text.borrow_mut();
        if pending.is_empty() {
            return;
        }
        self.sink.borrow_mut().text(&pending);
        pending.clear();
    }
}

impl<S: EventSink> TokenSink for TokenAdapter<'_, S> {
    type Handle = ();

    fn process_token(&self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        match token {
            Token::CharacterTokens(text) => {
                self.pending_text.borrow_mut().push_str(&text);
            }
            Token::TagToken(tag) => {
                self.flush_text();
                let name: &str = &tag.name;
                let mut sink = self.sink.borrow_mut();
                match tag.kind {
                    TagKind::StartTag => {
                        let attributes = TagAttributes::from_html5ever(&tag.attrs);
                        sink.start_tag(name, &attributes);
                        if tag.self_closing {
                            sink.end_tag(name);
                        }
                    }
                    TagKind::EndTag => sink.end_tag(name),
                }
            }
            Token::EOFToken => self.flush_text(),
            // Comments, doctypes, NUL characters and parse errors carry no content
            _ => {}
        }
        TokenSinkResult::Continue
    }

    fn end(&self) {
        self.flush_text();
    }
}

/// Tokenize `html` and deliver every event to `sink`, in document order
///
/// Never fails: any string is a valid token stream for the HTML tokenizer.
pub fn tokenize<S: EventSink>(html: &str, sink: &mut S) {
    if html.is_empty() {
        return;
    }

    let tokenizer = Tokenizer::new(TokenAdapter::new(sink), TokenizerOpts::default());
    let input = BufferQueue::default();
    input.push_back(StrTendril::from_slice(html));

    // The sink never asks to suspend for scripts, so one feed drains the queue
    let _ = tokenizer.feed(&input);
    tokenizer.end();
}

/// Tokenize `html` into an owned list of events
pub fn collect_events(html: &str) -> Vec<HtmlEvent> {
    let mut events = Vec::new();
    tokenize(html, &mut events);
    events
}
