//! EditMD Converter - HTML to Markdown for a WYSIWYG Markdown editor
//!
//! The editor renders Markdown to HTML for its editing surface and, while the
//! user types, serializes the edited HTML back to Markdown. This library is
//! that reverse direction: a single-pass transducer that tolerates the
//! unbalanced, fragmentary HTML an editing surface produces.
//!
//! # Architecture
//!
//! Data flows one way:
//!
//! raw HTML → `sanitizer` → `tokenizer` → `converter` (context stack machine
//! writing into `output` and `table`) → `output::postprocess` → Markdown
//!
//! - `sanitizer`: comment, script and style removal, line ending normalization
//! - `tokenizer`: start-tag / end-tag / text events from html5ever's tokenizer
//! - `converter`: the transducer, options and the public converter type
//! - `output`: line buffer, completed lines and blank-line post-processing
//! - `table`: table row accumulation and emission
//! - `decode`: UTF-8 validation for HTML read from files or pipes
//! - `legacy`: the older regex rewrite converter
//! - `fingerprint`: change detection for the editor sync loop
//! - `error`: errors raised at the byte boundary
//!
//! # Example
//!
//! ```
//! let markdown = editmd_converter::html_to_markdown("<h2>Title</h2><p>Hello <em>there</em></p>");
//! assert_eq!(markdown, "## Title\n\nHello *there*");
//! ```

pub mod converter;
pub mod decode;
pub mod error;
pub mod fingerprint;
pub mod legacy;
pub mod output;
pub mod sanitizer;
pub mod table;
pub mod tokenizer;

pub use converter::{ConversionOptions, ConversionStrategy, MarkdownConverter};
pub use error::ConversionError;
pub use fingerprint::{ContentTracker, fingerprint};
pub use legacy::simple_html_to_markdown;

/// Convert an HTML fragment to Markdown with default options
pub fn html_to_markdown(html: &str) -> String {
    MarkdownConverter::new().convert(html)
}
