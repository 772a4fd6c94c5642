use std::collections::HashMap;
use std::sync::Mutex;

use super::{validate_key, ParamStore};
use crate::error::Result;

/// Process-local store, nothing touches the disk
#[derive(Debug, Default)]
pub struct MemoryParams {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of the whole store, handy for before/after comparisons
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map is still a valid map
        self.values.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ParamStore for MemoryParams {
    fn get(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        Ok(self.lock().get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        self.lock().remove(key);
        Ok(())
    }
}
