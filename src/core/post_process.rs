//! Drives Parser output through the Expander in file order, then
//! opportunistically decodes JSON-shaped values.

use std::collections::HashMap;

use serde_json::Value as JsonValue;

use crate::core::expand::{expand, EnvView};
use crate::core::parser::ParsedEntry;

/// A post-processed value: either the expanded string, or a JSON value
/// when opportunistic decoding kicked in. Only arrays and objects count
/// as "container" for this purpose — any other decoded JSON scalar is
/// discarded and the original string is kept, per the decoding rule.
#[derive(Debug, Clone, PartialEq)]
pub enum FinalValue {
    Str(String),
    Json(JsonValue),
}

impl FinalValue {
    /// The stringified form published to the process environment: the
    /// string as-is, or the JSON value re-serialized.
    pub fn to_env_string(&self) -> String {
        match self {
            FinalValue::Str(s) => s.clone(),
            FinalValue::Json(v) => v.to_string(),
        }
    }
}

/// Capability hook for opportunistic JSON decoding, injected so
/// [`post_process`] is testable without a real JSON dependency. The
/// default implementation wraps `serde_json`.
pub trait JsonDecoder {
    fn decode(&self, input: &str) -> Option<JsonValue>;
}

#[derive(Default)]
pub struct SerdeJsonDecoder;

impl JsonDecoder for SerdeJsonDecoder {
    fn decode(&self, input: &str) -> Option<JsonValue> {
        serde_json::from_str(input).ok()
    }
}

/// Options controlling post-processing.
#[derive(Debug, Clone, Copy)]
pub struct PostProcessOptions {
    /// Enable opportunistic JSON decoding of array/object-shaped values.
    pub arrays: bool,
}

impl Default for PostProcessOptions {
    fn default() -> Self {
        Self { arrays: true }
    }
}

/// Ordered output of [`post_process`]: last-writer-wins on duplicate keys,
/// insertion order preserved.
#[derive(Debug, Clone, Default)]
pub struct OrderedEnv {
    order: Vec<String>,
    index: HashMap<String, usize>,
    values: Vec<FinalValue>,
}

impl OrderedEnv {
    fn set(&mut self, key: String, value: FinalValue) {
        if let Some(&i) = self.index.get(&key) {
            self.values[i] = value;
        } else {
            self.index.insert(key.clone(), self.order.len());
            self.order.push(key);
            self.values.push(value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&FinalValue> {
        self.index.get(key).map(|&i| &self.values[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FinalValue)> {
        self.order.iter().map(move |k| (k.as_str(), self.get(k).unwrap()))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Run `entries` through expansion and, optionally, opportunistic JSON
/// decoding, against a view seeded from `process_env`.
pub fn post_process(
    entries: &[ParsedEntry],
    process_env: HashMap<String, String>,
    opts: PostProcessOptions,
    decoder: &dyn JsonDecoder,
) -> OrderedEnv {
    let mut view = EnvView::new(process_env);
    let mut out = OrderedEnv::default();

    for entry in entries {
        let expanded = expand(&entry.raw_value, &view);
        view.insert(entry.key.clone(), expanded.clone());

        let value = if opts.arrays {
            decode_if_container(&expanded, decoder).unwrap_or(FinalValue::Str(expanded))
        } else {
            FinalValue::Str(expanded)
        };

        out.set(entry.key.clone(), value);
    }

    out
}

fn decode_if_container(expanded: &str, decoder: &dyn JsonDecoder) -> Option<FinalValue> {
    let first = expanded.trim_start().chars().next()?;
    if first != '[' && first != '{' {
        return None;
    }
    match decoder.decode(expanded)? {
        v @ JsonValue::Array(_) | v @ JsonValue::Object(_) => Some(FinalValue::Json(v)),
        _ => None,
    }
}
