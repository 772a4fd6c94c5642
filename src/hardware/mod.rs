//! Device control primitives
//!
//! Reboot and poweroff are the only side effects the settings screen has on
//! the device itself. Everything else goes through the parameter store.

mod system;

pub use system::SystemHardware;

use crate::error::Result;

/// Trait for hardware backends
pub trait Hardware: Send + Sync {
    /// Newer (TICI) devices expose a different set of toggles
    fn is_tici(&self) -> bool;

    /// Human-readable OS version, empty when unknown
    fn os_version(&self) -> String;

    fn reboot(&self) -> Result<()>;

    fn poweroff(&self) -> Result<()>;
}
