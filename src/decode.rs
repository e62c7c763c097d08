//! Byte input for the converter
//!
//! Documents are stored and exchanged as UTF-8. HTML that arrives as bytes
//! (a file, a pipe) is validated here before it reaches the transducer. A
//! leading UTF-8 byte order mark is dropped; anything that is not UTF-8 is
//! rejected rather than guessed at.
//!
//! ```rust
//! use editmd_converter::decode::decode_html;
//!
//! assert_eq!(decode_html(b"\xEF\xBB\xBF<p>x</p>").expect("Decoding failed"), "<p>x</p>");
//! assert!(decode_html(b"<p>Caf\xE9</p>").is_err());
//! ```

use crate::error::ConversionError;
use std::borrow::Cow;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

const UTF16_BOMS: [&[u8]; 2] = [b"\xFF\xFE", b"\xFE\xFF"];

/// Decode HTML bytes as UTF-8
///
/// The returned text borrows from `html`.
///
/// # Errors
///
/// `ConversionError::EncodingError` when the bytes carry a UTF-16 byte order
/// mark or are not valid UTF-8. The message names the offending byte offset.
pub fn decode_html(html: &[u8]) -> Result<Cow<'_, str>, ConversionError> {
    let body = html.strip_prefix(UTF8_BOM).unwrap_or(html);

    if UTF16_BOMS.iter().any(|bom| body.starts_with(bom)) {
        return Err(ConversionError::EncodingError(
            "UTF-16 input is not supported, save the document as UTF-8".to_string(),
        ));
    }

    std::str::from_utf8(body).map(Cow::Borrowed).map_err(|e| {
        let offset = e.valid_up_to() + (html.len() - body.len());
        ConversionError::EncodingError(format!("Invalid UTF-8 at byte position {offset}: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_valid_utf8_is_borrowed() {
        let decoded = decode_html("<p>héllo</p>".as_bytes()).expect("Decoding failed");
        assert!(matches!(decoded, Cow::Borrowed("<p>héllo</p>")));
    }

    #[test]
    fn test_bom_is_dropped() {
        let decoded = decode_html(b"\xEF\xBB\xBF<p>x</p>").expect("Decoding failed");
        assert_eq!(decoded, "<p>x</p>");
    }

    #[test]
    fn test_only_leading_bom_is_dropped() {
        let decoded = decode_html(b"<p>\xEF\xBB\xBF</p>").expect("Decoding failed");
        assert_eq!(decoded, "<p>\u{feff}</p>");
    }

    #[test]
    fn test_invalid_utf8_reports_position() {
        match decode_html(b"<p>\xC3\x28</p>") {
            Err(ConversionError::EncodingError(msg)) => assert!(msg.contains("byte position 3")),
            other => panic!("Expected EncodingError, got {other:?}"),
        }
    }

    #[test]
    fn test_position_counts_the_bom() {
        match decode_html(b"\xEF\xBB\xBFab\xFF") {
            Err(ConversionError::EncodingError(msg)) => assert!(msg.contains("byte position 5")),
            other => panic!("Expected EncodingError, got {other:?}"),
        }
    }

    #[test]
    fn test_meta_charset_is_not_honored() {
        // Latin-1 bytes stay invalid whatever the markup declares
        let result = decode_html(b"<meta charset=\"windows-1252\"><p>caf\xE9</p>");
        assert!(matches!(result, Err(ConversionError::EncodingError(_))));
    }

    #[test]
    fn test_utf16_is_rejected() {
        for bytes in [&b"\xFF\xFE<\x00p\x00>\x00"[..], &b"\xFE\xFF\x00<\x00p\x00>"[..]] {
            match decode_html(bytes) {
                Err(err @ ConversionError::EncodingError(_)) => {
                    assert!(err.to_string().contains("UTF-16"));
                    assert_eq!(err.code(), 2);
                }
                other => panic!("Expected EncodingError, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(decode_html(b"").expect("Decoding failed"), "");
        assert_eq!(decode_html(UTF8_BOM).expect("Decoding failed"), "");
    }

    proptest! {
        #[test]
        fn prop_valid_utf8_round_trips(text in "[^\u{feff}]{0,60}") {
            let decoded = decode_html(text.as_bytes()).expect("Decoding failed");
            prop_assert_eq!(decoded.as_ref(), text.as_str());
        }
    }
}
