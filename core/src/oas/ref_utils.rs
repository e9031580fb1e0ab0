#![deny(missing_docs)]

//! # Reference Utilities
//!
//! Shared helpers for working with local `$ref` pointers (`#/definitions/...`,
//! `#/parameters/...`). External documents are never fetched; anything that is
//! not a local fragment is reported as unresolvable by the resolver.

use percent_encoding::percent_decode_str;

const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// Returns the `$ref` string of `value` when it is a reference object.
pub(crate) fn ref_target(value: &serde_json::Value) -> Option<&str> {
    value.get("$ref").and_then(|r| r.as_str())
}

/// Splits a local pointer (`#/a/b`) into decoded segments.
///
/// Returns `None` if the reference is not local to the current document.
pub(crate) fn local_pointer_segments(ref_str: &str) -> Option<Vec<String>> {
    let pointer = ref_str.strip_prefix('#')?;
    if pointer.is_empty() {
        return Some(Vec::new());
    }
    let pointer = pointer.strip_prefix('/')?;
    Some(pointer.split('/').map(decode_pointer_segment).collect())
}

/// Extracts the definition name from `#/definitions/{name}`.
pub(crate) fn extract_definition_name(ref_str: &str) -> Option<String> {
    let rest = ref_str.strip_prefix(DEFINITIONS_PREFIX)?;
    if rest.is_empty() || rest.contains('/') {
        return None;
    }
    Some(decode_pointer_segment(rest))
}

/// Undoes JSON Pointer escaping (`~1` and `~0`) and nothing else.
pub(crate) fn unescape_pointer_segment(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}

/// Decodes a `$ref` segment: pointer escapes, then percent-encoding.
pub(crate) fn decode_pointer_segment(segment: &str) -> String {
    let decoded = unescape_pointer_segment(segment);
    percent_decode_str(&decoded)
        .decode_utf8_lossy()
        .into_owned()
}
