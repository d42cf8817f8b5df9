//! Per-session key/value state.
//!
//! The TUI redraws everything from state on every key press, so anything
//! that must survive between interactions lives here rather than in locals.
//! Values are held as JSON so handlers can store any serializable type.
//! The store lives in memory for one session and is never written to disk.

use std::collections::HashMap;

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Current wizard step (integer, 1-4).
pub const STEP_KEY: &str = "step";

/// Accumulated form data, one object per section.
pub const FORM_DATA_KEY: &str = "form_data";

#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    values: HashMap<String, Value>,
}

impl SessionStore {
    /// Create a store with the session defaults applied.
    pub fn new() -> Self {
        let mut store = Self::default();
        store.init_defaults();
        store
    }

    /// Set `step = 1` and `form_data = {}` unless they are already present.
    pub fn init_defaults(&mut self) {
        self.values
            .entry(STEP_KEY.to_string())
            .or_insert_with(|| Value::from(1));
        self.values
            .entry(FORM_DATA_KEY.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }

    /// Drop everything and start a fresh session.
    pub fn reset(&mut self) {
        debug!(keys = self.values.len(), "Resetting session store");
        self.values.clear();
        self.init_defaults();
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn get_value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn get_value_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.values.get_mut(key)
    }

    /// Decode the value under `key`, failing if it has the wrong shape.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.values.get(key) {
            Some(value) => {
                let decoded = T::deserialize(value)
                    .with_context(|| format!("Failed to decode session value: {}", key))?;
                Ok(Some(decoded))
            }
            None => Ok(None),
        }
    }

    /// Decode the value under `key`. Absent and undecodable both yield `None`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.load(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Ignoring malformed session value");
                None
            }
        }
    }

    pub fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)
            .with_context(|| format!("Failed to encode session value: {}", key))?;
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
