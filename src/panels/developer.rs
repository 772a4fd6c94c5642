//! Developer panel: version and build information

use serde::Serialize;

use crate::error::Result;
use crate::hardware::Hardware;
use crate::params::{keys, ParamStore};

const VERSION_LEN: usize = 14;
const COMMIT_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DevRow {
    pub name: &'static str,
    pub value: String,
}

impl DevRow {
    fn new(name: &'static str, value: impl AsRef<str>) -> Self {
        Self {
            name,
            value: value.as_ref().trim().to_string(),
        }
    }
}

pub fn rows(params: &dyn ParamStore, hardware: &dyn Hardware) -> Result<Vec<DevRow>> {
    let brand = if params.get_bool(keys::PASSIVE)? {
        "dashcam"
    } else {
        "openpilot"
    };
    let version = params.get_or_default(keys::VERSION)?;
    let commit = params.get_or_default(keys::GIT_COMMIT)?;

    Ok(vec![
        DevRow::new("Version", format!("{} v{}", brand, truncate(&version, VERSION_LEN))),
        DevRow::new("Git Branch", params.get_or_default(keys::GIT_BRANCH)?),
        DevRow::new("Git Commit", truncate(&commit, COMMIT_LEN)),
        DevRow::new("Panda Firmware", params.get_or_default(keys::PANDA_FIRMWARE_HEX)?),
        DevRow::new("OS Version", hardware.os_version()),
    ])
}

/// Rows as a `{ name: value }` object
pub fn to_json(rows: &[DevRow]) -> serde_json::Value {
    rows.iter()
        .map(|row| (row.name.to_string(), serde_json::Value::from(row.value.clone())))
        .collect::<serde_json::Map<_, _>>()
        .into()
}

fn truncate(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}
