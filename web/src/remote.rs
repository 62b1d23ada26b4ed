//! Remote-call client address
//!
//! Handlers serving a remote-invocation transport install a [`RemoteCall`]
//! for the duration of the call; [`client_ip`] then reports the numeric
//! address of the calling host.

use reqkit_shared::{Error, Result};
use std::future::Future;
use std::net::{IpAddr, ToSocketAddrs};
use tracing::error;

/// Returned by [`client_ip`] when the caller can't be resolved. The spelling
/// is relied upon by existing consumers.
pub const UNKNOWN_CLIENT: &str = "Unknow Client";

tokio::task_local! {
    static CURRENT_CALL: RemoteCall;
}

/// Execution context of one remote call
#[derive(Debug, Clone)]
pub struct RemoteCall {
    pub client_host: String,
}

impl RemoteCall {
    pub fn new(client_host: impl Into<String>) -> Self {
        Self {
            client_host: client_host.into(),
        }
    }
}

/// Run `fut` with `call` as the active remote call
pub async fn scope<F: Future>(call: RemoteCall, fut: F) -> F::Output {
    CURRENT_CALL.scope(call, fut).await
}

/// Run `f` with `call` as the active remote call
pub fn sync_scope<F, R>(call: RemoteCall, f: F) -> R
where
    F: FnOnce() -> R,
{
    CURRENT_CALL.sync_scope(call, f)
}

/// Host name of the active remote call's client
pub fn current_client_host() -> Result<String> {
    CURRENT_CALL
        .try_with(|call| call.client_host.clone())
        .map_err(|_| Error::NoActiveCall)
}

/// Resolve a host name to its first numeric address
pub fn resolve_host(host: &str) -> Result<IpAddr> {
    let host = host.trim().trim_start_matches('[').trim_end_matches(']');
    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(ip);
    }

    (host, 0)
        .to_socket_addrs()
        .map_err(|e| Error::UnknownHost(format!("{}: {}", host, e)))?
        .next()
        .map(|addr| addr.ip())
        .ok_or_else(|| Error::UnknownHost(host.to_string()))
}

/// Numeric address of the active remote call's client, or [`UNKNOWN_CLIENT`]
pub fn client_ip() -> String {
    masked(current_client_host().and_then(|host| resolve_host(&host)))
}

/// Numeric address of `host`, or [`UNKNOWN_CLIENT`]
pub fn client_ip_of(host: &str) -> String {
    masked(resolve_host(host))
}

fn masked(resolved: Result<IpAddr>) -> String {
    match resolved {
        Ok(ip) => ip.to_string(),
        Err(e) => {
            error!("Failed to resolve remote client: {}", e);
            UNKNOWN_CLIENT.to_string()
        }
    }
}
