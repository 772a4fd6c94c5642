//! SSH access switch shown next to the key manager

use tracing::info;

use crate::error::Result;
use crate::params::{keys, ParamStore};

pub fn ssh_enabled(params: &dyn ParamStore) -> Result<bool> {
    params.get_bool(keys::SSH_ENABLED)
}

pub fn set_ssh_enabled(params: &dyn ParamStore, enabled: bool) -> Result<()> {
    params.put_bool(keys::SSH_ENABLED, enabled)?;
    info!(enabled, "SSH access toggled");
    Ok(())
}
