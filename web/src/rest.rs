//! Shared REST client
//!
//! The client comes from the [`Registry`] when one is bound under
//! [`REST_CLIENT`], otherwise it is built from [`RestClientConfig`]. A
//! [`SharedRestClient`] resolves it once and hands out the same instance
//! from then on.

use once_cell::sync::{Lazy, OnceCell};
use reqkit_shared::{Error, Result};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

use crate::config::RestClientConfig;
use crate::registry::Registry;

/// Registry name of the REST client component
pub const REST_CLIENT: &str = "rest_client";

/// Build a client from configuration
pub fn build_client(config: &RestClientConfig) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .user_agent(config.user_agent.clone())
        .build()
        .map_err(|e| Error::Client(e.to_string()))
}

/// Registry-bound client if there is one, else a freshly built client
pub fn resolve(registry: &Registry, config: &RestClientConfig) -> Result<Client> {
    if let Some(client) = registry.get::<Client>(REST_CLIENT) {
        debug!("Using REST client from registry");
        return Ok(client);
    }
    build_client(config)
}

/// Lazily resolved REST client, fixed after first use
#[derive(Debug, Default)]
pub struct SharedRestClient {
    config: RestClientConfig,
    client: OnceCell<Arc<Client>>,
}

impl SharedRestClient {
    pub fn new(config: RestClientConfig) -> Self {
        Self {
            config,
            client: OnceCell::new(),
        }
    }

    /// Resolve on first call, return the cached client afterwards even if
    /// the registry binding has changed since.
    pub fn get(&self, registry: &Registry) -> Arc<Client> {
        self.client
            .get_or_init(|| {
                let client = resolve(registry, &self.config).unwrap_or_else(|e| {
                    error!("Failed to build REST client, using defaults: {}", e);
                    Client::new()
                });
                Arc::new(client)
            })
            .clone()
    }

    pub fn is_initialized(&self) -> bool {
        self.client.get().is_some()
    }
}

static GLOBAL_REST_CLIENT: Lazy<SharedRestClient> = Lazy::new(SharedRestClient::default);

/// Process-wide client for callers that can't have one injected
pub fn shared_rest_client(registry: &Registry) -> Arc<Client> {
    GLOBAL_REST_CLIENT.get(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_from_config() {
        assert!(build_client(&RestClientConfig::default()).is_ok());
    }

    #[test]
    fn test_resolve_without_registry_binding() {
        let registry = Registry::new();
        assert!(resolve(&registry, &RestClientConfig::default()).is_ok());
    }

    #[test]
    fn test_cached_after_first_call() {
        let registry = Registry::new();
        registry.register(REST_CLIENT, Client::new());
        let shared = SharedRestClient::default();
        assert!(!shared.is_initialized());

        let first = shared.get(&registry);
        assert!(shared.is_initialized());

        registry.register(REST_CLIENT, Client::new());
        let second = shared.get(&registry);
        assert!(Arc::ptr_eq(&first, &second));

        registry.remove(REST_CLIENT);
        assert!(Arc::ptr_eq(&first, &shared.get(&registry)));
    }

    #[test]
    fn test_concurrent_first_calls() {
        let registry = Registry::new();
        let shared = SharedRestClient::default();
        let clients: Vec<Arc<Client>> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8).map(|_| s.spawn(|| shared.get(&registry))).collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert!(clients.iter().all(|c| Arc::ptr_eq(c, &clients[0])));
        assert!(Arc::ptr_eq(&clients[0], &shared.get(&registry)));
    }

    #[test]
    fn test_global_client_is_stable() {
        let registry = Registry::new();
        let a = shared_rest_client(&registry);
        let b = shared_rest_client(&registry);
        assert!(Arc::ptr_eq(&a, &b));
    }
}
