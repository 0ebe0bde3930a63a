//! path
//!
//! Preset name parsing and nested-value extraction. No I/O.
//!
//! A preset name like `"somefile/somename/somesubname"` names a file
//! (`somefile.json`) and a path of keys to traverse inside the parsed
//! document. A bare name (`"default"`, `"custom"`, `"somefile"`) names the
//! file alone and the whole document is returned.
//!
//! # Example
//!
//! ```
//! use preset_resolver::path;
//! use serde_json::json;
//!
//! let parsed = path::parse("somefile/somename");
//! assert_eq!(parsed.file_name, "somefile");
//! assert_eq!(parsed.segments, vec!["somename".to_string()]);
//!
//! let doc = json!({"somename": {"foo": "bar"}});
//! let value = path::extract(&doc, &parsed.segments, "somefile/somename").unwrap();
//! assert_eq!(value, json!({"foo": "bar"}));
//! ```

use serde_json::Value;

use crate::error::PresetError;

/// A preset name split into its file and traversal parts.
///
/// Derived deterministically from the preset name on every call; never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPresetName {
    /// Basename of the JSON file to fetch (without the `.json` suffix).
    pub file_name: String,
    /// Ordered keys to traverse inside the parsed document. May be empty.
    pub segments: Vec<String>,
}

/// Parse a preset name into a file name and traversal segments.
///
/// The first `/`-separated segment is the file name; everything after it is
/// a key path into the document. A name with no `/` (including the implicit
/// `"default"` and app-mode `"custom"` names) is the file name with no
/// segments.
pub fn parse(preset_name: &str) -> ParsedPresetName {
    let mut parts = preset_name.split('/');
    // split always yields at least one item, possibly empty
    let file_name = parts.next().unwrap_or_default().to_string();
    let segments: Vec<String> = parts.map(str::to_string).collect();
    ParsedPresetName {
        file_name,
        segments,
    }
}

/// Walk `document` along `segments` and return the value found there.
///
/// Traversal is plain object property lookup. With zero segments the whole
/// document is returned unchanged.
///
/// # Errors
///
/// Returns [`PresetError::NotFound`] naming `reference` (the full original
/// preset reference, for diagnostic clarity) if any segment is absent or the
/// current value is not an object at that point.
pub fn extract(
    document: &Value,
    segments: &[String],
    reference: &str,
) -> Result<Value, PresetError> {
    let mut current = document;
    for segment in segments {
        current = current
            .as_object()
            .and_then(|obj| obj.get(segment))
            .ok_or_else(|| PresetError::NotFound(reference.to_string()))?;
    }
    Ok(current.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    mod parse {
        use super::*;

        #[test]
        fn bare_default() {
            let parsed = parse("default");
            assert_eq!(parsed.file_name, "default");
            assert!(parsed.segments.is_empty());
        }

        #[test]
        fn bare_custom() {
            let parsed = parse("custom");
            assert_eq!(parsed.file_name, "custom");
            assert!(parsed.segments.is_empty());
        }

        #[test]
        fn bare_arbitrary_name() {
            let parsed = parse("somefile");
            assert_eq!(parsed.file_name, "somefile");
            assert!(parsed.segments.is_empty());
        }

        #[test]
        fn one_segment() {
            let parsed = parse("somefile/somename");
            assert_eq!(parsed.file_name, "somefile");
            assert_eq!(parsed.segments, vec!["somename".to_string()]);
        }

        #[test]
        fn two_segments() {
            let parsed = parse("somefile/somename/somesubname");
            assert_eq!(parsed.file_name, "somefile");
            assert_eq!(
                parsed.segments,
                vec!["somename".to_string(), "somesubname".to_string()]
            );
        }

        #[test]
        fn empty_name() {
            let parsed = parse("");
            assert_eq!(parsed.file_name, "");
            assert!(parsed.segments.is_empty());
        }
    }

    mod extract {
        use super::*;

        #[test]
        fn zero_segments_returns_document() {
            let doc = json!({"foo": "bar"});
            let value = extract(&doc, &[], "whole").unwrap();
            assert_eq!(value, doc);
        }

        #[test]
        fn one_level() {
            let doc = json!({"somename": {"foo": "bar"}});
            let value = extract(&doc, &["somename".to_string()], "r").unwrap();
            assert_eq!(value, json!({"foo": "bar"}));
        }

        #[test]
        fn two_levels() {
            let doc = json!({"b": {"c": {"foo": "bar"}}});
            let segments = vec!["b".to_string(), "c".to_string()];
            let value = extract(&doc, &segments, "a/b/c").unwrap();
            assert_eq!(value, json!({"foo": "bar"}));
        }

        #[test]
        fn scalar_leaf() {
            let doc = json!({"key": 42});
            let value = extract(&doc, &["key".to_string()], "r").unwrap();
            assert_eq!(value, json!(42));
        }

        #[test]
        fn missing_key_names_reference() {
            let doc = json!({"other": {}});
            let err = extract(&doc, &["somename".to_string()], "somefile/somename").unwrap_err();
            assert!(err.is_not_found());
            assert!(err.to_string().contains("somefile/somename"));
        }

        #[test]
        fn traversal_through_non_object_fails() {
            let doc = json!({"a": "scalar"});
            let segments = vec!["a".to_string(), "b".to_string()];
            let err = extract(&doc, &segments, "f/a/b").unwrap_err();
            assert!(err.is_not_found());
        }

        #[test]
        fn array_is_not_traversable() {
            let doc = json!({"a": [1, 2, 3]});
            let segments = vec!["a".to_string(), "0".to_string()];
            let err = extract(&doc, &segments, "f/a/0").unwrap_err();
            assert!(err.is_not_found());
        }
    }
}
