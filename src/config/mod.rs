//! Runtime configuration
//!
//! Resolves where the parameter store lives and which extra CA bundle the
//! key fetcher should trust.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, SettingsError};

pub const PARAMS_DIR_ENV: &str = "OFFROAD_PARAMS_DIR";
pub const CA_BUNDLE_ENV: &str = "OFFROAD_CA_BUNDLE";

/// Params location on the device
const DEVICE_PARAMS_DIR: &str = "/data/params/d";
/// CA bundle shipped by older device images
const DEVICE_CA_BUNDLE: &str = "/usr/etc/tls/cert.pem";
const APP_DIR: &str = "offroad-settings";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub params_dir: PathBuf,
    pub ca_bundle: Option<PathBuf>,
}

impl Config {
    /// Resolve from the CLI override and the process environment
    pub fn load(params_dir_override: Option<PathBuf>) -> Result<Self> {
        Self::resolve(params_dir_override, |name| std::env::var_os(name).map(PathBuf::from))
    }

    /// Resolution with an injectable environment lookup
    pub fn resolve(
        params_dir_override: Option<PathBuf>,
        env: impl Fn(&str) -> Option<PathBuf>,
    ) -> Result<Self> {
        let params_dir = match params_dir_override.or_else(|| env(PARAMS_DIR_ENV)) {
            Some(dir) => dir,
            None => default_params_dir()?,
        };

        let ca_bundle = match env(CA_BUNDLE_ENV) {
            Some(path) if !path.is_file() => {
                return Err(SettingsError::InvalidConfig(format!(
                    "{} points to a missing file: {}",
                    CA_BUNDLE_ENV,
                    path.display()
                )));
            }
            Some(path) => Some(path),
            None => Some(PathBuf::from(DEVICE_CA_BUNDLE)).filter(|p| p.is_file()),
        };

        let config = Self {
            params_dir,
            ca_bundle,
        };
        debug!(?config, "configuration resolved");
        Ok(config)
    }
}

fn default_params_dir() -> Result<PathBuf> {
    let device = Path::new(DEVICE_PARAMS_DIR);
    if device.is_dir() {
        return Ok(device.to_path_buf());
    }

    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR).join("params"))
        .ok_or_else(|| SettingsError::InvalidConfig("Could not determine a data directory".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_override_wins() {
        let env = |name: &str| (name == PARAMS_DIR_ENV).then(|| PathBuf::from("/from/env"));
        let config = Config::resolve(Some(PathBuf::from("/from/flag")), env).unwrap();
        assert_eq!(config.params_dir, PathBuf::from("/from/flag"));
    }

    #[test]
    fn test_env_used_without_override() {
        let env = |name: &str| (name == PARAMS_DIR_ENV).then(|| PathBuf::from("/from/env"));
        let config = Config::resolve(None, env).unwrap();
        assert_eq!(config.params_dir, PathBuf::from("/from/env"));
    }

    #[test]
    fn test_ca_bundle_from_env() {
        let tmp = TempDir::new().unwrap();
        let bundle = tmp.path().join("cert.pem");
        std::fs::write(&bundle, "").unwrap();

        let env = |name: &str| (name == CA_BUNDLE_ENV).then(|| bundle.clone());
        let config = Config::resolve(Some(tmp.path().to_path_buf()), env).unwrap();
        assert_eq!(config.ca_bundle, Some(bundle.clone()));
    }

    #[test]
    fn test_missing_ca_bundle_from_env() {
        let env = |name: &str| (name == CA_BUNDLE_ENV).then(|| PathBuf::from("/nonexistent/cert.pem"));
        let result = Config::resolve(Some(PathBuf::from("/tmp")), env);
        assert!(matches!(result, Err(SettingsError::InvalidConfig(_))));
    }
}
