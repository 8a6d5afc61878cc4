//! In-process hook registry
//!
//! Named filters and actions, each an ordered list of callbacks. Filters
//! receive the current value and return the next one; actions only observe.
//! Callbacks with equal priority run in registration order.

use super::host::{ActionTracker, HookBus};
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Priority used by [`HookRegistry::add_filter`] and [`HookRegistry::add_action`]
pub const DEFAULT_PRIORITY: i32 = 10;

/// Hook names forming the logger's extension contract
pub const HOOK_OVERRIDE_LOG: &str = "component_logger_override_log";
pub const HOOK_BACKEND_NAMESPACE: &str = "component_logger_backend_namespace";
pub const HOOK_BACKEND_PREFIX: &str = "component_logger_backend_prefix";
pub const HOOK_BACKEND_ACTION: &str = "component_logger_backend_action";
pub const HOOK_LOGGED: &str = "component_logger_logged";
pub const HOOK_FALLBACK: &str = "component_logger_fallback";

/// Level-specific fallback action, e.g. `component_logger_fallback_error`
pub fn fallback_hook(level: super::LogLevel) -> String {
    format!("{}_{}", HOOK_FALLBACK, level.name())
}

pub type FilterCallback = Arc<dyn Fn(Value, &[Value]) -> Value + Send + Sync>;
pub type ActionCallback = Arc<dyn Fn(&[Value]) + Send + Sync>;

struct Registered<C> {
    priority: i32,
    callback: C,
}

/// Ordered filter and action callbacks plus a fired-action counter
#[derive(Default)]
pub struct HookRegistry {
    filters: RwLock<HashMap<String, Vec<Registered<FilterCallback>>>>,
    actions: RwLock<HashMap<String, Vec<Registered<ActionCallback>>>>,
    fired: RwLock<HashMap<String, usize>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_filter<F>(&self, name: &str, callback: F)
    where
        F: Fn(Value, &[Value]) -> Value + Send + Sync + 'static,
    {
        self.add_filter_with_priority(name, DEFAULT_PRIORITY, callback);
    }

    pub fn add_filter_with_priority<F>(&self, name: &str, priority: i32, callback: F)
    where
        F: Fn(Value, &[Value]) -> Value + Send + Sync + 'static,
    {
        let mut filters = self.filters.write();
        insert_ordered(
            filters.entry(name.to_string()).or_default(),
            Registered {
                priority,
                callback: Arc::new(callback) as FilterCallback,
            },
        );
    }

    pub fn add_action<F>(&self, name: &str, callback: F)
    where
        F: Fn(&[Value]) + Send + Sync + 'static,
    {
        self.add_action_with_priority(name, DEFAULT_PRIORITY, callback);
    }

    pub fn add_action_with_priority<F>(&self, name: &str, priority: i32, callback: F)
    where
        F: Fn(&[Value]) + Send + Sync + 'static,
    {
        let mut actions = self.actions.write();
        insert_ordered(
            actions.entry(name.to_string()).or_default(),
            Registered {
                priority,
                callback: Arc::new(callback) as ActionCallback,
            },
        );
    }

    /// Drop every callback registered for `name`, filters and actions alike
    pub fn remove_all(&self, name: &str) {
        self.filters.write().remove(name);
        self.actions.write().remove(name);
    }

    pub fn has_filter(&self, name: &str) -> bool {
        self.filters.read().get(name).is_some_and(|v| !v.is_empty())
    }

    pub fn has_action(&self, name: &str) -> bool {
        self.actions.read().get(name).is_some_and(|v| !v.is_empty())
    }

    /// Mark an action as fired without running callbacks
    pub fn record_fired(&self, name: &str) {
        *self.fired.write().entry(name.to_string()).or_insert(0) += 1;
    }
}

fn insert_ordered<C>(list: &mut Vec<Registered<C>>, entry: Registered<C>) {
    let pos = list.partition_point(|r| r.priority <= entry.priority);
    list.insert(pos, entry);
}

impl HookBus for HookRegistry {
    fn apply_filters(&self, name: &str, value: Value, args: &[Value]) -> Value {
        // Snapshot so callbacks may register hooks without deadlocking
        let callbacks: Vec<FilterCallback> = match self.filters.read().get(name) {
            Some(list) => list.iter().map(|r| Arc::clone(&r.callback)).collect(),
            None => return value,
        };
        callbacks
            .into_iter()
            .fold(value, |acc, callback| callback(acc, args))
    }

    fn do_action(&self, name: &str, args: &[Value]) {
        self.record_fired(name);
        let callbacks: Vec<ActionCallback> = match self.actions.read().get(name) {
            Some(list) => list.iter().map(|r| Arc::clone(&r.callback)).collect(),
            None => return,
        };
        for callback in callbacks {
            callback(args);
        }
    }
}

impl ActionTracker for HookRegistry {
    fn times_fired(&self, action: &str) -> usize {
        self.fired.read().get(action).copied().unwrap_or(0)
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookRegistry")
            .field("filters", &self.filters.read().keys().collect::<Vec<_>>())
            .field("actions", &self.actions.read().keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_filters_chain_in_priority_order() {
        let hooks = HookRegistry::new();
        hooks.add_filter("name", |v, _| json!(format!("{}b", v.as_str().unwrap())));
        hooks.add_filter_with_priority("name", 5, |v, _| {
            json!(format!("{}a", v.as_str().unwrap()))
        });
        hooks.add_filter_with_priority("name", 20, |v, _| {
            json!(format!("{}c", v.as_str().unwrap()))
        });

        assert_eq!(hooks.apply_filters("name", json!(""), &[]), json!("abc"));
    }

    #[test]
    fn test_unregistered_filter_returns_input() {
        let hooks = HookRegistry::new();
        assert_eq!(hooks.apply_filters("none", json!(3), &[]), json!(3));
    }

    #[test]
    fn test_filter_receives_args() {
        let hooks = HookRegistry::new();
        hooks.add_filter("f", |_, args| args[0].clone());
        assert_eq!(hooks.apply_filters("f", Value::Null, &[json!("x")]), json!("x"));
    }

    #[test]
    fn test_actions_fire_and_are_counted() {
        let hooks = HookRegistry::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = Arc::clone(&calls);
        hooks.add_action("boot", move |_| {
            calls_clone.fetch_add(1, Ordering::Relaxed);
        });

        assert_eq!(hooks.times_fired("boot"), 0);
        hooks.do_action("boot", &[]);
        hooks.do_action("boot", &[]);
        hooks.do_action("other", &[]);

        assert_eq!(calls.load(Ordering::Relaxed), 2);
        assert_eq!(hooks.times_fired("boot"), 2);
        assert_eq!(hooks.times_fired("other"), 1);
    }

    #[test]
    fn test_filters_and_actions_are_distinct() {
        let hooks = HookRegistry::new();
        hooks.add_action("same", |_| {});
        assert!(hooks.has_action("same"));
        assert!(!hooks.has_filter("same"));

        hooks.remove_all("same");
        assert!(!hooks.has_action("same"));
    }

    #[test]
    fn test_callback_may_register_hooks() {
        let hooks = Arc::new(HookRegistry::new());
        let inner = Arc::clone(&hooks);
        hooks.add_action("outer", move |_| inner.add_action("late", |_| {}));
        hooks.do_action("outer", &[]);
        assert!(hooks.has_action("late"));
    }

    #[test]
    fn test_fallback_hook_name() {
        assert_eq!(
            fallback_hook(crate::core::LogLevel::Critical),
            "component_logger_fallback_critical"
        );
    }
}
