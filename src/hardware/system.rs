use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{info, warn};

use super::Hardware;
use crate::error::{Result, SettingsError};

const TICI_MARKER: &str = "/TICI";
const VERSION_FILE: &str = "/VERSION";

/// Hardware backed by the running system
#[derive(Debug, Clone)]
pub struct SystemHardware {
    root: PathBuf,
}

impl SystemHardware {
    pub fn new() -> Self {
        Self::with_root("/")
    }

    /// Resolve marker files relative to `root` instead of `/`
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path(&self, absolute: &str) -> PathBuf {
        self.root.join(absolute.trim_start_matches('/'))
    }

    fn run(&self, program: &str, args: &[&str]) -> Result<()> {
        info!(program, ?args, "running power command");

        let status = Command::new(program).args(args).status().map_err(|e| {
            SettingsError::HardwareCommand {
                command: program.to_string(),
                reason: e.to_string(),
            }
        })?;

        if !status.success() {
            warn!(program, %status, "power command failed");
            return Err(SettingsError::HardwareCommand {
                command: program.to_string(),
                reason: status.to_string(),
            });
        }
        Ok(())
    }

    /// TICI images need sudo, older ones run the UI as root
    fn power_command<'a>(&self, action: &'a str) -> (&'a str, Vec<&'a str>) {
        if self.is_tici() {
            ("sudo", vec![action])
        } else {
            (action, Vec::new())
        }
    }
}

impl Default for SystemHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl Hardware for SystemHardware {
    fn is_tici(&self) -> bool {
        self.path(TICI_MARKER).is_file()
    }

    fn os_version(&self) -> String {
        read_trimmed(&self.path(VERSION_FILE))
    }

    fn reboot(&self) -> Result<()> {
        let (program, args) = self.power_command("reboot");
        self.run(program, &args)
    }

    fn poweroff(&self) -> Result<()> {
        let (program, args) = self.power_command("poweroff");
        self.run(program, &args)
    }
}

fn read_trimmed(path: &Path) -> String {
    fs::read_to_string(path)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}
