//! Protocol parameters shared by every agent in a swarm.

use crate::error::{ImmunobotError, Result};
use crate::types::MAX_AGE;
use serde::{Deserialize, Serialize};

/// Tunable constants of the immune protocol.
///
/// Every robot in a swarm must run with the same values; they are not
/// negotiated over the radio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolConfig {
    /// Ticks after which a contact is too stale to arm (default: 64).
    pub disarm_ticks: u64,
    /// Ticks a target must stay armed before dying (default: 192).
    pub death_ticks: u64,
    /// Maximum antibody/antigen binding distance in millimeters (default: 75).
    pub binding_distance_mm: f64,
    /// Motor speed during a medium-strength death sequence (default: 60).
    pub medium_speed: u8,
    /// Motor speed during a strong death sequence (default: 130).
    pub strong_speed: u8,
    /// Ticks between random color redraws while sparkling (default: 3).
    pub sparkle_period: u64,
    /// Mask applied to the random byte to form a sparkle color (default: 0x07).
    pub sparkle_mask: u8,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            disarm_ticks: 64,
            death_ticks: 192,
            binding_distance_mm: 75.0,
            medium_speed: 60,
            strong_speed: 130,
            sparkle_period: 3,
            sparkle_mask: 0x07,
        }
    }
}

impl ProtocolConfig {
    /// Check that the parameters describe a protocol that can arm and die.
    pub fn validate(&self) -> Result<()> {
        // Relayed ages saturate at MAX_AGE; anything above it never disarms.
        if self.disarm_ticks == 0 || self.disarm_ticks > u64::from(MAX_AGE) {
            return Err(ImmunobotError::out_of_range(
                "disarm_ticks",
                1.0,
                f64::from(MAX_AGE),
                self.disarm_ticks as f64,
            ));
        }
        if self.death_ticks == 0 {
            return Err(ImmunobotError::invalid_config(
                "death_ticks",
                self.death_ticks,
                "death latency must be at least one tick",
            ));
        }
        if !self.binding_distance_mm.is_finite() || self.binding_distance_mm <= 0.0 {
            return Err(ImmunobotError::invalid_config(
                "binding_distance_mm",
                self.binding_distance_mm,
                "must be a positive distance",
            ));
        }
        if self.sparkle_period == 0 {
            return Err(ImmunobotError::invalid_config(
                "sparkle_period",
                self.sparkle_period,
                "must be at least one tick",
            ));
        }
        Ok(())
    }
}
