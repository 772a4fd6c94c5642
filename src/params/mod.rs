//! Key/value parameter store
//!
//! Settings and device state live in a flat string-to-string store. The
//! on-device layout is one file per key; tests use the in-memory variant.

mod file;
pub mod keys;
mod memory;

pub use file::FileParams;
pub use memory::MemoryParams;

use crate::error::{Result, SettingsError};

/// Narrow interface over the parameter store
pub trait ParamStore {
    /// Read a value, `None` when the key has never been written
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, persisted before returning
    fn put(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a value. Removing a missing key succeeds.
    fn remove(&self, key: &str) -> Result<()>;

    /// Read a value, treating a missing key as the empty string
    fn get_or_default(&self, key: &str) -> Result<String> {
        Ok(self.get(key)?.unwrap_or_default())
    }

    /// Booleans are stored as "1" / "0"; anything other than "1" is false
    fn get_bool(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.as_deref() == Some("1"))
    }

    fn put_bool(&self, key: &str, value: bool) -> Result<()> {
        self.put(key, if value { "1" } else { "0" })
    }
}

impl<T: ParamStore + ?Sized> ParamStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        (**self).put(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// Keys double as file names, so only `[A-Za-z0-9_]` is accepted
pub(crate) fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(SettingsError::InvalidParamKey(key.to_string()));
    }
    Ok(())
}
