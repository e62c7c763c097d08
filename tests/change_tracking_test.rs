//! Editor sync loop and byte boundary tests
//!
//! Simulates the editor polling the editing surface: extracted HTML is
//! converted on every tick, and only real content changes are reported.

use editmd_converter::{
    ContentTracker, ConversionError, ConversionOptions, ConversionStrategy, MarkdownConverter,
    fingerprint,
};

#[test]
fn test_typing_session() {
    let mut tracker = ContentTracker::new();
    let ticks = [
        "<p>H</p>",
        "<p>He</p>",
        "<p>He</p>",
        "<p>Hello</p>",
        "",
        "<p>Hello</p>",
        "<p>Hello <b>you</b></p>",
    ];

    let reported: Vec<String> = ticks
        .iter()
        .filter_map(|html| tracker.update(html))
        .collect();

    assert_eq!(reported, ["H", "He", "Hello", "Hello **you**"]);
}

#[test]
fn test_cosmetic_html_changes_are_not_reported() {
    let mut tracker = ContentTracker::new();
    assert!(tracker.update("<p>Same text</p>").is_some());
    assert_eq!(
        tracker.update("<p><span>Same</span>   text</p><!-- selection -->"),
        None
    );
}

#[test]
fn test_open_file_then_edit() {
    let mut tracker = ContentTracker::new();
    let loaded = "# Title\n\nBody";
    tracker.set_markdown(loaded);
    assert_eq!(tracker.last_fingerprint(), Some(fingerprint(loaded).as_str()));

    assert_eq!(tracker.update("<h1>Title</h1><p>Body</p>"), None);
    assert_eq!(
        tracker.update("<h1>Title</h1><p>Body text</p>"),
        Some("# Title\n\nBody text".to_string())
    );
}

#[test]
fn test_new_document_resets_tracking() {
    let mut tracker = ContentTracker::new();
    tracker.update("<p>old</p>");
    tracker.reset();
    assert_eq!(tracker.update("<p>old</p>"), Some("old".to_string()));
}

#[test]
fn test_tracker_with_legacy_converter() {
    let converter = MarkdownConverter::with_options(ConversionOptions {
        strategy: ConversionStrategy::Legacy,
        ..Default::default()
    });
    let mut tracker = ContentTracker::with_converter(converter);
    assert_eq!(tracker.update("<h2>Legacy</h2>"), Some("## Legacy".to_string()));
}

#[test]
fn test_convert_bytes_saved_file() {
    let converter = MarkdownConverter::new();
    let saved = "\u{feff}<h1>Caf\u{e9}</h1><p>na\u{ef}ve</p>".as_bytes();
    assert_eq!(
        converter.convert_bytes(saved).expect("Conversion failed"),
        "# Caf\u{e9}\n\nna\u{ef}ve"
    );
}

#[test]
fn test_convert_bytes_errors() {
    let converter = MarkdownConverter::with_options(ConversionOptions {
        max_input_bytes: 16,
        ..Default::default()
    });

    let too_big = converter.convert_bytes(&[b'a'; 17]);
    assert!(matches!(too_big, Err(ConversionError::InvalidInput(_))));

    // Latin-1 bytes from an older editor
    let latin1 = converter.convert_bytes(b"<p>caf\xE9</p>");
    match latin1 {
        Err(err @ ConversionError::EncodingError(_)) => {
            assert!(err.to_string().contains("byte position 6"));
            assert_eq!(err.code(), 2);
        }
        other => panic!("Expected EncodingError, got {other:?}"),
    }
}

#[test]
fn test_fingerprint_matches_converted_output() {
    let markdown = MarkdownConverter::new().convert("<p>stable</p>");
    assert_eq!(fingerprint(&markdown), fingerprint("stable"));
}
