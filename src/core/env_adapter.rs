//! Boundary the core consumes to read existing environment variables and
//! publish results. Kept as a trait so the core never touches `std::env`
//! directly outside of [`ProcessEnvAdapter`], and so hosts that have their
//! own per-request scratch surface (not process-wide `std::env`) can plug
//! in their own implementation.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::core::post_process::FinalValue;

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub trait EnvironmentAdapter {
    /// A snapshot of currently-visible variables, consulted once at the
    /// start of post-processing to seed the `EnvView`.
    fn snapshot(&self) -> HashMap<String, String>;

    /// Publish `key = value` to the primary surface (e.g. `std::env`).
    /// Returns `true` if the value was written, `false` if it was skipped
    /// (invalid key, or already present with `override_existing == false`).
    fn publish(&self, key: &str, value: &str, override_existing: bool) -> bool;

    /// Publish the structured value to a per-request scratch surface, if
    /// the host has one. The default implementation is a no-op: most hosts
    /// (a bare CLI process) have no such surface.
    fn publish_scratch(&self, _key: &str, _value: &FinalValue, _override_existing: bool) -> bool {
        false
    }
}

/// Default adapter: reads and writes `std::env`.
#[derive(Default)]
pub struct ProcessEnvAdapter;

impl EnvironmentAdapter for ProcessEnvAdapter {
    fn snapshot(&self) -> HashMap<String, String> {
        std::env::vars().collect()
    }

    fn publish(&self, key: &str, value: &str, override_existing: bool) -> bool {
        if !is_valid_key(key) {
            return false;
        }
        if !override_existing && std::env::var_os(key).is_some() {
            return false;
        }
        std::env::set_var(key, value);
        true
    }
}

/// In-memory adapter for tests, and for embedding this crate in hosts that
/// keep their own scratch map instead of `std::env`.
#[derive(Default)]
pub struct InMemoryAdapter {
    vars: RefCell<HashMap<String, String>>,
    scratch: RefCell<HashMap<String, FinalValue>>,
}

impl InMemoryAdapter {
    pub fn new(initial: HashMap<String, String>) -> Self {
        Self {
            vars: RefCell::new(initial),
            scratch: RefCell::new(HashMap::new()),
        }
    }

    pub fn into_vars(self) -> HashMap<String, String> {
        self.vars.into_inner()
    }

    pub fn scratch(&self) -> HashMap<String, FinalValue> {
        self.scratch.borrow().clone()
    }
}

impl EnvironmentAdapter for InMemoryAdapter {
    fn snapshot(&self) -> HashMap<String, String> {
        self.vars.borrow().clone()
    }

    fn publish(&self, key: &str, value: &str, override_existing: bool) -> bool {
        if !is_valid_key(key) {
            return false;
        }
        let mut vars = self.vars.borrow_mut();
        if !override_existing && vars.contains_key(key) {
            return false;
        }
        vars.insert(key.to_string(), value.to_string());
        true
    }

    fn publish_scratch(&self, key: &str, value: &FinalValue, override_existing: bool) -> bool {
        if !is_valid_key(key) {
            return false;
        }
        let mut scratch = self.scratch.borrow_mut();
        if !override_existing && scratch.contains_key(key) {
            return false;
        }
        scratch.insert(key.to_string(), value.clone());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_key_rules() {
        assert!(is_valid_key("APP_NAME"));
        assert!(is_valid_key("_private"));
        assert!(is_valid_key("a1"));
        assert!(!is_valid_key("1BAD"));
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("bad-key"));
    }

    #[test]
    fn in_memory_adapter_respects_override_flag() {
        let mut initial = HashMap::new();
        initial.insert("EXISTING".to_string(), "old".to_string());
        let adapter = InMemoryAdapter::new(initial);

        assert!(!adapter.publish("EXISTING", "new", false));
        assert_eq!(adapter.snapshot().get("EXISTING").map(String::as_str), Some("old"));

        assert!(adapter.publish("EXISTING", "new", true));
        assert_eq!(adapter.snapshot().get("EXISTING").map(String::as_str), Some("new"));
    }

    #[test]
    fn invalid_keys_are_silently_skipped() {
        let adapter = InMemoryAdapter::default();
        assert!(!adapter.publish("1BAD", "value", true));
        assert!(adapter.snapshot().is_empty());
    }
}
