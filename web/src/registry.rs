//! Named component registry
//!
//! A small container handlers use to look shared components up by name.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::warn;

type Component = Arc<dyn Any + Send + Sync>;

/// Registry mapping well-known names to shared components
#[derive(Default)]
pub struct Registry {
    components: RwLock<HashMap<String, Component>>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            components: RwLock::new(HashMap::new()),
        }
    }

    /// Bind `component` under `name`, replacing any previous binding
    pub fn register<T: Any + Send + Sync>(&self, name: impl Into<String>, component: T) {
        let mut components = self.components.write().unwrap_or_else(PoisonError::into_inner);
        components.insert(name.into(), Arc::new(component));
    }

    pub fn contains(&self, name: &str) -> bool {
        let components = self.components.read().unwrap_or_else(PoisonError::into_inner);
        components.contains_key(name)
    }

    /// Clone of the component bound under `name`, if it is a `T`
    pub fn get<T: Any + Clone + Send + Sync>(&self, name: &str) -> Option<T> {
        let component = {
            let components = self.components.read().unwrap_or_else(PoisonError::into_inner);
            components.get(name)?.clone()
        };

        match component.downcast_ref::<T>() {
            Some(c) => Some(c.clone()),
            None => {
                warn!("Component '{}' is not a {}", name, std::any::type_name::<T>());
                None
            }
        }
    }

    pub fn remove(&self, name: &str) -> bool {
        let mut components = self.components.write().unwrap_or_else(PoisonError::into_inner);
        components.remove(name).is_some()
    }

    pub fn names(&self) -> Vec<String> {
        let components = self.components.read().unwrap_or_else(PoisonError::into_inner);
        components.keys().cloned().collect()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry").field("components", &self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_get() {
        let registry = Registry::new();
        registry.register("greeting", "hello".to_string());
        assert!(registry.contains("greeting"));
        assert_eq!(registry.get::<String>("greeting").as_deref(), Some("hello"));
    }

    #[test]
    fn test_type_mismatch() {
        let registry = Registry::new();
        registry.register("port", 8080u16);
        assert!(registry.get::<String>("port").is_none());
        assert_eq!(registry.get::<u16>("port"), Some(8080));
    }

    #[test]
    fn test_replace_and_remove() {
        let registry = Registry::new();
        registry.register("n", 1u32);
        registry.register("n", 2u32);
        assert_eq!(registry.get::<u32>("n"), Some(2));
        assert!(registry.remove("n"));
        assert!(!registry.contains("n"));
        assert!(!registry.remove("n"));
    }
}
