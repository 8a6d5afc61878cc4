//! Detection of the advanced logging backend
//!
//! The backend counts as active when all of these hold:
//!
//! - the host tracks fired actions
//! - a `{namespace}::Configurator` type is registered
//! - that type exposes an `ACTION_SETUP` symbol
//! - the action named by that symbol has fired at least once
//!
//! The answer and the resolved namespace are memoized per detector until
//! [`BackendDetector::refresh`] is called. A backend that boots after the
//! first check stays invisible until then.

use super::hooks::HOOK_BACKEND_NAMESPACE;
use super::host::Host;
use parking_lot::RwLock;
use serde_json::Value;

pub const CONFIGURATOR_TYPE: &str = "Configurator";
pub const SETUP_SYMBOL: &str = "ACTION_SETUP";
pub const LOG_SYMBOL: &str = "LOG";

/// Memoized detection state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackendCache {
    pub active: Option<bool>,
    pub namespace: Option<String>,
}

impl BackendCache {
    pub fn invalidate(&mut self) {
        self.active = None;
        self.namespace = None;
    }
}

#[derive(Debug, Default)]
pub struct BackendDetector {
    configured_namespace: String,
    cache: RwLock<BackendCache>,
}

impl BackendDetector {
    pub fn new(configured_namespace: impl Into<String>) -> Self {
        Self {
            configured_namespace: configured_namespace.into(),
            cache: RwLock::new(BackendCache::default()),
        }
    }

    /// Namespace after the backend-namespace filter, computed once
    pub fn namespace(&self, host: &Host) -> String {
        if let Some(ref ns) = self.cache.read().namespace {
            return ns.clone();
        }

        let filtered = host.apply_filters(
            HOOK_BACKEND_NAMESPACE,
            Value::String(self.configured_namespace.clone()),
            &[],
        );
        let namespace = match filtered {
            Value::String(s) if !s.trim().is_empty() => s.trim().to_string(),
            _ => self.configured_namespace.clone(),
        };

        self.cache.write().namespace = Some(namespace.clone());
        namespace
    }

    pub fn is_active(&self, host: &Host) -> bool {
        if let Some(active) = self.cache.read().active {
            return active;
        }

        let active = self.detect(host);
        self.cache.write().active = Some(active);
        active
    }

    fn detect(&self, host: &Host) -> bool {
        let Some(actions) = host.actions() else {
            return false;
        };
        let Some(registry) = host.backend() else {
            return false;
        };

        let configurator = format!("{}::{}", self.namespace(host), CONFIGURATOR_TYPE);
        if !registry.has_type(&configurator) {
            return false;
        }
        let Some(setup_action) = registry.symbol(&format!("{}::{}", configurator, SETUP_SYMBOL))
        else {
            return false;
        };

        actions.times_fired(&setup_action) > 0
    }

    /// Value of the namespaced log marker, if the backend defines one
    pub fn log_marker(&self, host: &Host) -> Option<String> {
        let registry = host.backend()?;
        registry.symbol(&format!("{}::{}", self.namespace(host), LOG_SYMBOL))
    }

    /// Forget the memoized state; the next call detects again
    pub fn refresh(&self) {
        self.cache.write().invalidate();
    }

    pub fn cache(&self) -> BackendCache {
        self.cache.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::{LoggerError, Result};
    use crate::core::hooks::HookRegistry;
    use crate::core::host::{BackendLogger, BackendRegistry, HookBus};
    use std::collections::HashMap;
    use std::sync::Arc;

    #[derive(Default)]
    struct FakeRegistry {
        types: Vec<String>,
        symbols: HashMap<String, String>,
    }

    impl BackendRegistry for FakeRegistry {
        fn has_type(&self, path: &str) -> bool {
            self.types.iter().any(|t| t == path)
        }

        fn symbol(&self, path: &str) -> Option<String> {
            self.symbols.get(path).cloned()
        }

        fn logger(&self, namespace: &str, _channel: &str) -> Result<Arc<dyn BackendLogger>> {
            Err(LoggerError::backend(namespace, "not supported"))
        }
    }

    fn wonolog_registry() -> Arc<FakeRegistry> {
        let mut registry = FakeRegistry::default();
        registry.types.push("wonolog::Configurator".into());
        registry.symbols.insert(
            "wonolog::Configurator::ACTION_SETUP".into(),
            "wonolog.setup".into(),
        );
        registry
            .symbols
            .insert("wonolog::LOG".into(), "wonolog.log".into());
        Arc::new(registry)
    }

    #[test]
    fn test_inactive_without_action_tracker() {
        let host = Host::builder().backend(wonolog_registry()).build();
        assert!(!BackendDetector::new("wonolog").is_active(&host));
    }

    #[test]
    fn test_inactive_until_setup_fired() {
        let hooks = Arc::new(HookRegistry::new());
        let host = Host::builder()
            .hook_registry(Arc::clone(&hooks))
            .backend(wonolog_registry())
            .build();

        let detector = BackendDetector::new("wonolog");
        assert!(!detector.is_active(&host));

        hooks.do_action("wonolog.setup", &[]);
        // memoized until refreshed
        assert!(!detector.is_active(&host));

        detector.refresh();
        assert!(detector.is_active(&host));
    }

    #[test]
    fn test_missing_configurator_or_symbol() {
        let hooks = Arc::new(HookRegistry::new());
        hooks.do_action("wonolog.setup", &[]);

        let mut no_symbol = FakeRegistry::default();
        no_symbol.types.push("wonolog::Configurator".into());
        let host = Host::builder()
            .hook_registry(Arc::clone(&hooks))
            .backend(Arc::new(no_symbol))
            .build();
        assert!(!BackendDetector::new("wonolog").is_active(&host));

        let host = Host::builder()
            .hook_registry(hooks)
            .backend(wonolog_registry())
            .build();
        assert!(!BackendDetector::new("other").is_active(&host));
    }

    #[test]
    fn test_namespace_filter_and_refresh() {
        let hooks = Arc::new(HookRegistry::new());
        hooks.add_filter(HOOK_BACKEND_NAMESPACE, |_, _| Value::String("wonolog".into()));
        hooks.do_action("wonolog.setup", &[]);
        let host = Host::builder()
            .hook_registry(Arc::clone(&hooks))
            .backend(wonolog_registry())
            .build();

        let detector = BackendDetector::new("custom");
        assert!(detector.is_active(&host));
        assert_eq!(
            detector.cache(),
            BackendCache {
                active: Some(true),
                namespace: Some("wonolog".into())
            }
        );
        assert_eq!(detector.log_marker(&host).as_deref(), Some("wonolog.log"));

        detector.refresh();
        assert_eq!(detector.cache(), BackendCache::default());
    }

    #[test]
    fn test_blank_filtered_namespace_ignored() {
        let hooks = Arc::new(HookRegistry::new());
        hooks.add_filter(HOOK_BACKEND_NAMESPACE, |_, _| Value::String("  ".into()));
        let host = Host::builder().hook_registry(hooks).build();
        assert_eq!(BackendDetector::new("wonolog").namespace(&host), "wonolog");
    }
}
