//! Settings panels
//!
//! Only the behaviour lives here: which parameters a panel reads and writes
//! and which device actions it triggers. Rendering is left to the front end.

pub mod developer;
pub mod device;
pub mod network;
pub mod toggles;

pub use developer::DevRow;
pub use device::{ActionResult, DeviceInfo, DevicePanel};
pub use toggles::{ToggleDef, ToggleGroup, ToggleState};
