use anyhow::{Context, Result};
use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use clap::Parser;
use reqkit::config::ReqkitConfig;
use reqkit::rest::build_client;
use reqkit::{
    custom_headers, redirect, remote_addr, request_params, Registry, SharedRestClient, REST_CLIENT,
};
use std::{
    net::{IpAddr, SocketAddr},
    path::PathBuf,
    sync::Arc,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Parser)]
#[command(name = "reqkit-demo")]
#[command(version)]
#[command(about = "Serve the reqkit request helpers over HTTP", long_about = None)]
struct Cli {
    /// Address to bind (overrides the config file)
    #[arg(long)]
    host: Option<IpAddr>,

    /// Port to listen on (overrides the config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Path to reqkit.yml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone)]
struct AppState {
    registry: Arc<Registry>,
    rest: Arc<SharedRestClient>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "reqkit=debug,reqkit_demo=debug"
    } else {
        "reqkit=info,reqkit_demo=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let config = match cli.config.or_else(ReqkitConfig::find_config) {
        Some(path) => {
            info!("Loading config from {}", path.display());
            ReqkitConfig::load(&path)?
        }
        None => ReqkitConfig::default(),
    };

    let registry = Registry::new();
    registry.register(
        REST_CLIENT,
        build_client(&config.rest_client).context("Failed to build REST client")?,
    );

    let state = AppState {
        registry: Arc::new(registry),
        rest: Arc::new(SharedRestClient::new(config.rest_client.clone())),
    };

    let app = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/whoami", get(whoami))
        .route("/headers", get(headers))
        .route("/params", get(params))
        .route("/go", get(go))
        .route("/upstream", get(upstream))
        .with_state(state);

    let host = cli.host.unwrap_or(config.server.host);
    let port = cli.port.unwrap_or(config.server.port);
    let addr = SocketAddr::new(host, port);
    info!("reqkit demo on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;
    Ok(())
}

async fn whoami(req: Request<Body>) -> String {
    remote_addr(&req)
}

async fn headers(req: Request<Body>) -> impl IntoResponse {
    Json(custom_headers(Some(&req)))
}

async fn params(req: Request<Body>) -> impl IntoResponse {
    Json(request_params(Some(&req)))
}

/// Bounce to /params, carrying the request's parameters along
async fn go(req: Request<Body>) -> impl IntoResponse {
    let params = request_params(Some(&req));
    redirect("/params", Some(&params))
}

/// Parse an upstream target, accepting only http(s) URLs with a host
fn upstream_target(raw: &str) -> Option<Url> {
    let url = Url::parse(raw).ok()?;
    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Some(url),
        _ => None,
    }
}

/// GET the `url` parameter through the shared REST client
async fn upstream(State(state): State<AppState>, req: Request<Body>) -> impl IntoResponse {
    let Some(raw) = request_params(Some(&req)).remove("url") else {
        return (StatusCode::BAD_REQUEST, "Missing url parameter").into_response();
    };
    let Some(url) = upstream_target(&raw) else {
        return (StatusCode::BAD_REQUEST, "Only http and https URLs are allowed").into_response();
    };

    let client = state.rest.get(&state.registry);
    match client.get(url.clone()).send().await {
        Ok(resp) => Json(serde_json::json!({
            "url": url.as_str(),
            "status": resp.status().as_u16(),
        }))
        .into_response(),
        Err(e) => {
            warn!("Upstream {} failed: {}", url, e);
            (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_target_schemes() {
        assert!(upstream_target("https://example.com/status").is_some());
        assert!(upstream_target("http://127.0.0.1:9000/").is_some());
        assert!(upstream_target("file:///etc/passwd").is_none());
        assert!(upstream_target("ftp://example.com/").is_none());
        assert!(upstream_target("not a url").is_none());
    }

    #[test]
    fn test_default_bind_is_loopback() {
        let cli = Cli::parse_from(["reqkit-demo"]);
        let host = cli.host.unwrap_or(ReqkitConfig::default().server.host);
        assert!(host.is_loopback());
    }
}
