//! The CLI's own error type: wraps the motion core's `PendantError` plus
//! the I/O and parsing failures that only happen at this operator-facing
//! boundary (config files, scripts).

use pendant_sdk::PendantError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Pendant(#[from] PendantError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid script JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid joint positions: {0}")]
    InvalidJoints(String),

    #[error("invalid cartesian target: {0}")]
    InvalidPose(String),

    #[error("unknown joint name: {0}")]
    UnknownJoint(String),

    #[error("unknown axis name: {0}")]
    UnknownAxis(String),

    #[error("the motor link is not configured (serial port unset, simulation mode off)")]
    NoMotorLink,
}

pub type Result<T> = std::result::Result<T, CliError>;
