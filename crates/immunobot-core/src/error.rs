//! Error types for immunobot operations.
//!
//! The protocol itself never fails: ages clamp and stale information
//! simply disarms. Errors only arise at the edges, when decoding radio
//! frames, converting raw role ids, or validating configuration.

use thiserror::Error;

/// Result type for immunobot operations.
pub type Result<T> = std::result::Result<T, ImmunobotError>;

/// Errors that can occur at the edges of the protocol.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ImmunobotError {
    /// Frame decoding errors.
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),
    /// Configuration errors.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    /// A raw id that does not name any role.
    #[error("Unknown role id: {0}")]
    UnknownRole(u8),
}

/// Radio frame errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Frame is not exactly one payload plus checksum.
    #[error("Wrong frame length: expected {expected}, found {found}")]
    WrongLength { expected: usize, found: usize },
    /// Checksum trailer does not match the payload.
    #[error("Checksum mismatch: frame carries {found:#06x}, payload hashes to {expected:#06x}")]
    ChecksumMismatch { expected: u16, found: u16 },
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Invalid value.
    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
    /// Out of range.
    #[error("{field} out of range: {value} (must be {min}-{max})")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },
}

// Convenience constructors
impl ImmunobotError {
    pub fn invalid_config(
        field: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        ImmunobotError::Config(ConfigError::InvalidValue {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        })
    }

    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, value: f64) -> Self {
        ImmunobotError::Config(ConfigError::OutOfRange {
            field: field.into(),
            min,
            max,
            value,
        })
    }
}
