//! Offroad settings - backend of the settings screen of a driver-assistance device
//!
//! This crate provides:
//! - A key/value parameter store with a file-backed implementation
//! - GitHub SSH key management with a bounded, cancellable fetch
//! - Feature toggles, device actions and developer information
//! - A command-line front end over all of the above

pub mod cli;
pub mod config;
pub mod error;
pub mod hardware;
pub mod panels;
pub mod params;
pub mod prompt;
pub mod ssh_keys;

#[cfg(test)]
mod testing;

pub use error::{Result, SettingsError};
