use thiserror::Error;

pub type Result<T> = std::result::Result<T, SettingsError>;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Invalid parameter key '{0}'")]
    InvalidParamKey(String),

    #[error("GitHub username must not be empty")]
    EmptyUsername,

    #[error("A key request is already in progress")]
    FetchInFlight,

    #[error("SSH keys for '{0}' are already configured. Remove them first.")]
    KeysAlreadyConfigured(String),

    #[error("Cannot remove SSH keys while a key request is in progress")]
    RemoveWhileFetching,

    #[error("Unknown toggle '{0}'")]
    UnknownToggle(String),

    #[error("Toggle '{0}' is locked")]
    ToggleLocked(String),

    #[error("This action is only available while offroad")]
    Onroad,

    #[error("Operation cancelled by user")]
    Cancelled,

    #[error("Hardware command '{command}' failed: {reason}")]
    HardwareCommand { command: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
