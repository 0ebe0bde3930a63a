//! decode
//!
//! Decode a provider's raw file payload into a JSON value.
//!
//! Providers hand back [`RawFileContent`] in whatever transport encoding
//! their API uses; this module reduces all of them to one of two outcomes:
//! a parsed `serde_json::Value`, or [`PresetError::InvalidJson`]. Callers
//! never need provider-specific handling for malformed content.
//!
//! [`PresetError::InvalidJson`]: crate::error::PresetError::InvalidJson

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::Value;

use crate::error::PresetError;
use crate::provider::{ContentEncoding, RawFileContent};

/// Decode raw file content into a JSON value.
///
/// Steps: base64-decode when marked (GitHub's content field wraps lines, so
/// ASCII whitespace is stripped first), require valid UTF-8, reject
/// empty/blank content, parse as JSON.
///
/// # Errors
///
/// Every failure is [`PresetError::InvalidJson`] naming `reference` (the
/// `repo:file` being decoded). Parse errors are never propagated raw.
///
/// [`PresetError::InvalidJson`]: crate::error::PresetError::InvalidJson
pub fn decode(raw: &RawFileContent, reference: &str) -> Result<Value, PresetError> {
    let text = match raw.encoding {
        ContentEncoding::Utf8 => raw.payload.clone(),
        ContentEncoding::Base64 => {
            let stripped: String = raw
                .payload
                .chars()
                .filter(|c| !c.is_ascii_whitespace())
                .collect();
            let bytes = STANDARD
                .decode(stripped)
                .map_err(|_| PresetError::InvalidJson(reference.to_string()))?;
            String::from_utf8(bytes)
                .map_err(|_| PresetError::InvalidJson(reference.to_string()))?
        }
    };

    if text.trim().is_empty() {
        return Err(PresetError::InvalidJson(reference.to_string()));
    }

    serde_json::from_str(&text).map_err(|err| {
        tracing::debug!(reference, %err, "preset content failed to parse as JSON");
        PresetError::InvalidJson(reference.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn utf8_json_object() {
        let raw = RawFileContent::utf8(r#"{"foo":"bar"}"#);
        assert_eq!(decode(&raw, "r").unwrap(), json!({"foo": "bar"}));
    }

    #[test]
    fn base64_round_trip() {
        let original = json!({"somename": {"somesubname": {"foo": "bar"}}});
        let encoded = STANDARD.encode(serde_json::to_string(&original).unwrap());
        let raw = RawFileContent::base64(encoded);
        assert_eq!(decode(&raw, "r").unwrap(), original);
    }

    #[test]
    fn base64_with_line_wrapping() {
        // GitHub wraps base64 content with newlines every 60 chars
        let encoded = STANDARD.encode(r#"{"foo":"bar","baz":"qux","longer":"to force wrapping"}"#);
        let wrapped: String = encoded
            .chars()
            .enumerate()
            .flat_map(|(i, c)| {
                if i > 0 && i % 20 == 0 {
                    vec!['\n', c]
                } else {
                    vec![c]
                }
            })
            .collect();
        let raw = RawFileContent::base64(wrapped);
        assert_eq!(
            decode(&raw, "r").unwrap(),
            json!({"foo": "bar", "baz": "qux", "longer": "to force wrapping"})
        );
    }

    #[test]
    fn empty_content_is_invalid() {
        let raw = RawFileContent::utf8("");
        let err = decode(&raw, "some/repo:default.json").unwrap_err();
        assert!(err.is_invalid_json());
        assert!(err.to_string().contains("invalid preset JSON"));
        assert!(err.to_string().contains("some/repo:default.json"));
    }

    #[test]
    fn blank_content_is_invalid() {
        let raw = RawFileContent::utf8("   \n\t");
        assert!(decode(&raw, "r").unwrap_err().is_invalid_json());
    }

    #[test]
    fn empty_base64_is_invalid() {
        let raw = RawFileContent::base64("");
        assert!(decode(&raw, "r").unwrap_err().is_invalid_json());
    }

    #[test]
    fn non_json_text_is_invalid() {
        let raw = RawFileContent::utf8("not json");
        let err = decode(&raw, "r").unwrap_err();
        assert!(err.is_invalid_json());
    }

    #[test]
    fn base64_of_non_json_is_invalid() {
        let raw = RawFileContent::base64(STANDARD.encode("not json"));
        assert!(decode(&raw, "r").unwrap_err().is_invalid_json());
    }

    #[test]
    fn garbage_base64_is_invalid() {
        let raw = RawFileContent::base64("!!!not base64!!!");
        assert!(decode(&raw, "r").unwrap_err().is_invalid_json());
    }

    #[test]
    fn non_utf8_payload_is_invalid() {
        let raw = RawFileContent::base64(STANDARD.encode([0xff, 0xfe, 0x00]));
        assert!(decode(&raw, "r").unwrap_err().is_invalid_json());
    }

    #[test]
    fn scalar_json_is_accepted() {
        // The decoder parses; shape requirements belong to the caller.
        let raw = RawFileContent::utf8("42");
        assert_eq!(decode(&raw, "r").unwrap(), json!(42));
    }
}
