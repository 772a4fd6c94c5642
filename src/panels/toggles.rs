//! Feature toggles
//!
//! Every toggle is a boolean parameter. A few only exist on one hardware
//! generation, and the driver camera toggle can be locked by the device.

use serde::Serialize;
use tracing::info;

use crate::error::{Result, SettingsError};
use crate::hardware::Hardware;
use crate::params::{keys, ParamStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleGroup {
    General,
    Community,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Availability {
    Always,
    TiciOnly,
    NonTiciOnly,
}

/// Static description of one toggle
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ToggleDef {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub group: ToggleGroup,
    #[serde(skip)]
    availability: Availability,
}

impl ToggleDef {
    const fn new(
        key: &'static str,
        title: &'static str,
        description: &'static str,
        group: ToggleGroup,
        availability: Availability,
    ) -> Self {
        Self {
            key,
            title,
            description,
            group,
            availability,
        }
    }

    fn is_available(&self, hardware: &dyn Hardware) -> bool {
        match self.availability {
            Availability::Always => true,
            Availability::TiciOnly => hardware.is_tici(),
            Availability::NonTiciOnly => !hardware.is_tici(),
        }
    }
}

use Availability::{Always, NonTiciOnly, TiciOnly};
use ToggleGroup::{Community, General};

pub const TOGGLES: &[ToggleDef] = &[
    ToggleDef::new(
        "OpenpilotEnabledToggle",
        "Enable openpilot",
        "Use the openpilot system for adaptive cruise control and lane keep driver assistance. \
         Your attention is required at all times to use this feature. \
         Changing this setting takes effect when the car is powered off.",
        General,
        Always,
    ),
    ToggleDef::new(
        "IsLdwEnabled",
        "Enable Lane Departure Warnings",
        "Receive alerts to steer back into the lane when your vehicle drifts over a detected \
         lane line without a turn signal activated while driving over 50 km/h.",
        General,
        Always,
    ),
    ToggleDef::new(
        "IsRHD",
        "Enable Right-Hand Drive",
        "Allow openpilot to obey left-hand traffic conventions and perform driver monitoring \
         on the right driver seat.",
        General,
        Always,
    ),
    ToggleDef::new(
        "IsMetric",
        "Use Metric System",
        "Display speed in km/h instead of mph.",
        General,
        Always,
    ),
    ToggleDef::new(
        "CommunityFeaturesToggle",
        "Enable Community Features",
        "Use features from the open source community that are not maintained or supported by \
         comma.ai and have not been confirmed to meet the standard safety model. These features \
         include community supported cars and community supported hardware. \
         Be extra cautious when using these features.",
        General,
        Always,
    ),
    ToggleDef::new(
        "IsUploadRawEnabled",
        "Upload Raw Logs",
        "Upload full logs and full resolution video while on Wi-Fi.",
        General,
        NonTiciOnly,
    ),
    ToggleDef::new(
        keys::RECORD_FRONT,
        "Record and Upload Driver Camera",
        "Upload data from the driver facing camera and help improve the driver monitoring algorithm.",
        General,
        Always,
    ),
    ToggleDef::new(
        "EndToEndToggle",
        "Drive Without Lanelines (Alpha)",
        "Aim to drive the way a human would where there are no lane lines.",
        General,
        Always,
    ),
    ToggleDef::new(
        "EnableWideCamera",
        "Enable use of Wide Angle Camera",
        "Use wide angle camera for driving and ui. Only takes effect after reboot.",
        General,
        TiciOnly,
    ),
    ToggleDef::new("EnableLteOnroad", "Enable LTE while onroad", "", General, TiciOnly),
    ToggleDef::new(
        "UseClusterSpeed",
        "Use Cluster Speed",
        "Use the instrument cluster speed instead of wheel speed.",
        Community,
        Always,
    ),
    ToggleDef::new(
        "LongControlEnabled",
        "Enable Longitudinal Control",
        "openpilot controls the vehicle speed. Use with caution.",
        Community,
        Always,
    ),
    ToggleDef::new(
        "MadModeEnabled",
        "Enable MAD Mode",
        "HKG MAD mode: steering stays available without engaging cruise control.",
        Community,
        Always,
    ),
    ToggleDef::new(
        "AutoLaneChangeEnabled",
        "Enable Auto Lane Change",
        "Change lanes automatically. Use with caution.",
        Community,
        Always,
    ),
    ToggleDef::new(
        "SccSmootherSlowOnCurves",
        "Slow Down on Curves",
        "Lower the cruise speed according to road curvature while SCC is set.",
        Community,
        Always,
    ),
    ToggleDef::new(
        "SccSmootherSyncGasPressed",
        "Sync Cruise Speed",
        "When the accelerator takes the car above the set speed, the set speed follows it.",
        Community,
        Always,
    ),
    ToggleDef::new(
        "FuseWithStockScc",
        "Fuse with Stock SCC",
        "Take assistance from the stock SCC while longitudinal control is enabled.",
        Community,
        Always,
    ),
    ToggleDef::new(
        "ShowDebugUI",
        "Show Debug UI",
        "Show acceleration and other debug information on screen.",
        Community,
        Always,
    ),
];

/// Toggle together with its current value
#[derive(Debug, Clone, Serialize)]
pub struct ToggleState {
    #[serde(flatten)]
    pub def: ToggleDef,
    pub enabled: bool,
    pub locked: bool,
}

/// Toggles that exist on this hardware, in display order
pub fn available(hardware: &dyn Hardware) -> impl Iterator<Item = &'static ToggleDef> + '_ {
    TOGGLES.iter().filter(move |t| t.is_available(hardware))
}

pub fn find(hardware: &dyn Hardware, key: &str) -> Option<&'static ToggleDef> {
    available(hardware).find(|t| t.key == key)
}

fn is_locked(params: &dyn ParamStore, key: &str) -> Result<bool> {
    if key == keys::RECORD_FRONT {
        params.get_bool(keys::RECORD_FRONT_LOCK)
    } else {
        Ok(false)
    }
}

pub fn list(params: &dyn ParamStore, hardware: &dyn Hardware) -> Result<Vec<ToggleState>> {
    available(hardware)
        .map(|def| {
            Ok(ToggleState {
                def: *def,
                enabled: params.get_bool(def.key)?,
                locked: is_locked(params, def.key)?,
            })
        })
        .collect()
}

pub fn set(params: &dyn ParamStore, hardware: &dyn Hardware, key: &str, value: bool) -> Result<()> {
    let def = find(hardware, key).ok_or_else(|| SettingsError::UnknownToggle(key.to_string()))?;

    if is_locked(params, def.key)? {
        return Err(SettingsError::ToggleLocked(def.key.to_string()));
    }

    params.put_bool(def.key, value)?;
    info!(key = def.key, value, "toggle changed");
    Ok(())
}
