//! Client Address Resolution
//!
//! Picks the most trustworthy client address of a request, preferring the
//! headers set by a reverse proxy over the transport peer.

use crate::request::InboundRequest;

pub const X_REAL_IP: &str = "X-Real-IP";
pub const X_FORWARDED_FOR: &str = "X-Forwarded-For";

/// Resolve the client address of a request
///
/// `X-Real-IP` wins when non-blank. Otherwise the first `X-Forwarded-For`
/// entry that isn't the literal `null` is used, and failing both the
/// transport peer address. Values are not validated as IPs.
pub fn remote_addr<R: InboundRequest + ?Sized>(request: &R) -> String {
    if let Some(ip) = request.header(X_REAL_IP).filter(|v| !is_blank(v)) {
        return ip.into_owned();
    }

    if let Some(chain) = request.header(X_FORWARDED_FOR).filter(|v| !is_blank(v)) {
        if let Some(ip) = first_forwarded(&chain) {
            return ip.to_string();
        }
    }

    request.remote_addr()
}

/// First entry of a forwarded-for chain that isn't `null` or empty
fn first_forwarded(chain: &str) -> Option<&str> {
    chain
        .split(',')
        .map(str::trim)
        .find(|ip| !ip.is_empty() && !ip.eq_ignore_ascii_case("null"))
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
