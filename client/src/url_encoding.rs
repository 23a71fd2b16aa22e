//! Percent-encoding for values interpolated into API paths.
//!
//! A uid or snapshot key is always exactly one path segment. Without encoding,
//! `a/b` would add a segment, `a?b` would start a query and `a#b` would
//! truncate the path at a fragment.

use percent_encoding::{AsciiSet, CONTROLS, percent_encode};

/// Bytes encoded inside a single path segment. `%` is included so an
/// already-encoded value (such as `%2e%2e`) reaches Grafana verbatim.
pub const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^')
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'#')
    .add(b'+')
    .add(b';')
    .add(b'[')
    .add(b']');

#[must_use]
pub fn encode_path_segment(segment: &str) -> String {
    percent_encode(segment.as_bytes(), PATH_SEGMENT_ENCODE_SET).to_string()
}
