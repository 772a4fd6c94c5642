//! Device panel: identity, calibration, training guide, uninstall, power

use std::time::Duration;

use serde::Serialize;
use tracing::info;

use crate::error::{Result, SettingsError};
use crate::hardware::Hardware;
use crate::params::{keys, ParamStore};
use crate::prompt::Prompt;

/// Pause between clearing calibration and rebooting
pub const REBOOT_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    pub dongle_id: String,
    pub serial: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionResult {
    Done,
    Cancelled,
}

pub struct DevicePanel<'a> {
    params: &'a dyn ParamStore,
    hardware: &'a dyn Hardware,
    prompt: &'a dyn Prompt,
}

impl<'a> DevicePanel<'a> {
    pub fn new(params: &'a dyn ParamStore, hardware: &'a dyn Hardware, prompt: &'a dyn Prompt) -> Self {
        Self {
            params,
            hardware,
            prompt,
        }
    }

    pub fn info(&self) -> Result<DeviceInfo> {
        Ok(DeviceInfo {
            dongle_id: self.params.get_or_default(keys::DONGLE_ID)?,
            serial: self.params.get_or_default(keys::HARDWARE_SERIAL)?,
        })
    }

    /// Open the driver camera preview
    pub fn driver_view(&self) -> Result<ActionResult> {
        self.ensure_offroad()?;
        self.params.put_bool(keys::IS_DRIVER_VIEW_ENABLED, true)?;
        Ok(ActionResult::Done)
    }

    pub fn reset_calibration(&self) -> Result<ActionResult> {
        self.ensure_offroad()?;
        if !self.prompt.confirm("Are you sure you want to reset calibration?") {
            return Ok(ActionResult::Cancelled);
        }
        self.params.remove(keys::CALIBRATION_PARAMS)?;
        info!("calibration reset");
        Ok(ActionResult::Done)
    }

    /// Drop calibration and learned vehicle parameters, then reboot so
    /// calibration starts over from scratch
    pub async fn reset_calibration_and_reboot(&self) -> Result<ActionResult> {
        if !self.prompt.confirm("Are you sure you want to reset calibration and reboot?") {
            return Ok(ActionResult::Cancelled);
        }
        self.params.remove(keys::CALIBRATION_PARAMS)?;
        self.params.remove(keys::LIVE_PARAMETERS)?;
        info!(delay_ms = REBOOT_DELAY.as_millis() as u64, "calibration reset, rebooting");

        tokio::time::sleep(REBOOT_DELAY).await;
        self.hardware.reboot()?;
        Ok(ActionResult::Done)
    }

    /// Show the training guide again on next start
    pub fn review_training_guide(&self) -> Result<ActionResult> {
        self.ensure_offroad()?;
        if !self.prompt.confirm("Are you sure you want to review the training guide?") {
            return Ok(ActionResult::Cancelled);
        }
        self.params.remove(keys::COMPLETED_TRAINING_VERSION)?;
        Ok(ActionResult::Done)
    }

    pub fn uninstall_label(&self) -> Result<String> {
        let brand = if self.params.get_bool(keys::PASSIVE)? {
            "dashcam"
        } else {
            "openpilot"
        };
        Ok(format!("Uninstall {}", brand))
    }

    pub fn uninstall(&self) -> Result<ActionResult> {
        self.ensure_offroad()?;
        let question = format!("Are you sure you want to {}?", self.uninstall_label()?.to_lowercase());
        if !self.prompt.confirm(&question) {
            return Ok(ActionResult::Cancelled);
        }
        self.params.put_bool(keys::DO_UNINSTALL, true)?;
        info!("uninstall requested");
        Ok(ActionResult::Done)
    }

    pub fn reboot(&self) -> Result<ActionResult> {
        if !self.prompt.confirm("Are you sure you want to reboot?") {
            return Ok(ActionResult::Cancelled);
        }
        self.hardware.reboot()?;
        Ok(ActionResult::Done)
    }

    pub fn poweroff(&self) -> Result<ActionResult> {
        if !self.prompt.confirm("Are you sure you want to power off?") {
            return Ok(ActionResult::Cancelled);
        }
        self.hardware.poweroff()?;
        Ok(ActionResult::Done)
    }

    fn ensure_offroad(&self) -> Result<()> {
        if self.params.get_bool(keys::IS_ONROAD)? {
            return Err(SettingsError::Onroad);
        }
        Ok(())
    }
}
