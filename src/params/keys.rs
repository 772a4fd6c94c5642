//! Well-known parameter names

pub const GITHUB_USERNAME: &str = "GithubUsername";
pub const GITHUB_SSH_KEYS: &str = "GithubSshKeys";
pub const SSH_ENABLED: &str = "SshEnabled";

pub const DONGLE_ID: &str = "DongleId";
pub const HARDWARE_SERIAL: &str = "HardwareSerial";
pub const IS_ONROAD: &str = "IsOnroad";
pub const PASSIVE: &str = "Passive";

pub const CALIBRATION_PARAMS: &str = "CalibrationParams";
pub const LIVE_PARAMETERS: &str = "LiveParameters";
pub const COMPLETED_TRAINING_VERSION: &str = "CompletedTrainingVersion";
pub const DO_UNINSTALL: &str = "DoUninstall";
pub const IS_DRIVER_VIEW_ENABLED: &str = "IsDriverViewEnabled";

pub const RECORD_FRONT: &str = "RecordFront";
pub const RECORD_FRONT_LOCK: &str = "RecordFrontLock";

pub const VERSION: &str = "Version";
pub const GIT_BRANCH: &str = "GitBranch";
pub const GIT_COMMIT: &str = "GitCommit";
pub const PANDA_FIRMWARE_HEX: &str = "PandaFirmwareHex";
