//! Reqkit
//!
//! HTTP helpers for request handlers: redirect/forward views, client address
//! resolution, custom header and parameter extraction, and a shared REST
//! client.

pub mod client_ip;
pub mod config;
pub mod headers;
pub mod params;
pub mod query;
pub mod registry;
pub mod remote;
pub mod request;
pub mod rest;
pub mod view;

pub use client_ip::remote_addr;
pub use config::{ReqkitConfig, RestClientConfig};
pub use headers::custom_headers;
pub use params::request_params;
pub use query::redirect_message;
pub use registry::Registry;
pub use remote::{client_ip, UNKNOWN_CLIENT};
pub use request::{InboundRequest, RawRequest};
pub use rest::{shared_rest_client, SharedRestClient, REST_CLIENT};
pub use view::{forward, redirect, View, ViewTarget};

pub use reqkit_shared::{Attributes, Bean, Error, ParamBag, ParamSource, Result};
