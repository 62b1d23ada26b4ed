//! Custom Header Extraction
//!
//! Filters a request's headers down to the ones that aren't standard HTTP
//! request headers.

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

use crate::request::InboundRequest;

/// Lowercase names of the standard request headers
pub const STANDARD_HEADERS: [&str; 30] = [
    "accept",
    "accept-charset",
    "accept-encoding",
    "accept-language",
    "accept-ranges",
    "authorization",
    "cache-control",
    "connection",
    "cookie",
    "content-length",
    "content-type",
    "date",
    "expect",
    "from",
    "host",
    "if-match",
    "if-modified-since",
    "if-none-match",
    "if-range",
    "if-unmodified-since",
    "max-forwards",
    "pragma",
    "proxy-authorization",
    "range",
    "referer",
    "te",
    "upgrade",
    "user-agent",
    "via",
    "warning",
];

static STANDARD_HEADER_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| STANDARD_HEADERS.iter().copied().collect());

/// Check a header name against the standard set, ignoring case
pub fn is_standard_header(name: &str) -> bool {
    STANDARD_HEADER_SET.contains(name.to_ascii_lowercase().as_str())
}

/// Collect the non-standard headers of a request
///
/// Keys keep the casing the request reports. Blank names are skipped and a
/// missing request gives an empty map.
pub fn custom_headers<R: InboundRequest + ?Sized>(request: Option<&R>) -> HashMap<String, String> {
    let mut headers = HashMap::new();
    let Some(request) = request else {
        return headers;
    };

    for name in request.header_names() {
        if name.trim().is_empty() || is_standard_header(name) {
            continue;
        }
        if let Some(value) = request.header(name) {
            headers.insert(name.to_string(), value.into_owned());
        }
    }

    headers
}
