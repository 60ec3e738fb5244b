//! Simulated proximity radio.
//!
//! Models the infrared link between neighbouring robots: frames only
//! reach robots within range, some are lost, some arrive with a flipped
//! bit and fail their checksum. Only verified frames are handed to the
//! agent, together with a distance measurement.

use crate::types::Position;
use immunobot_core::error::CodecError;
use immunobot_core::message::{Message, FRAME_LEN};
use immunobot_core::platform::DistanceEstimator;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Link characteristics shared by every robot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadioConfig {
    /// Maximum distance a frame travels, in millimeters (default: 100).
    pub range_mm: f64,
    /// Probability that a frame in range is never received (default: 0.0).
    pub loss_rate: f64,
    /// Probability that a received frame has one bit flipped (default: 0.0).
    pub corruption_rate: f64,
    /// Uniform error added to distance measurements, ± millimeters (default: 0.0).
    pub distance_jitter_mm: f64,
    /// Ticks between broadcasts of the same robot (default: 1).
    pub transmit_interval: u64,
}

impl Default for RadioConfig {
    fn default() -> Self {
        Self {
            range_mm: 100.0,
            loss_rate: 0.0,
            corruption_rate: 0.0,
            distance_jitter_mm: 0.0,
            transmit_interval: 1,
        }
    }
}

/// Raw measurement recorded with a received frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Signal-derived distance before calibration.
    pub raw_mm: f64,
}

/// Turns raw measurements into distances by removing a fixed bias.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CalibratedEstimator {
    pub offset_mm: f64,
}

impl CalibratedEstimator {
    pub fn new(offset_mm: f64) -> Self {
        Self { offset_mm }
    }
}

impl DistanceEstimator for CalibratedEstimator {
    type Measurement = Measurement;

    fn estimate_distance(&self, measurement: &Measurement) -> f64 {
        (measurement.raw_mm - self.offset_mm).max(0.0)
    }
}

/// What happened to one frame on one link.
#[derive(Debug, Clone, PartialEq)]
pub enum Reception {
    Delivered(Message, Measurement),
    OutOfRange,
    Lost,
    /// Arrived damaged and failed verification.
    Corrupted(CodecError),
}

/// The shared medium.
#[derive(Debug, Clone)]
pub struct SimRadio {
    config: RadioConfig,
    rng: StdRng,
}

impl SimRadio {
    pub fn new(config: RadioConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &RadioConfig {
        &self.config
    }

    /// Whether a robot broadcasts on this tick.
    pub fn is_transmit_tick(&self, tick: u64) -> bool {
        tick % self.config.transmit_interval.max(1) == 0
    }

    /// Send one frame from `from` to a receiver at `to`.
    pub fn transmit(&mut self, frame: &[u8; FRAME_LEN], from: Position, to: Position) -> Reception {
        let distance = from.distance_to(&to);
        // NaN positions are nowhere, hence out of range.
        if !(distance <= self.config.range_mm) {
            return Reception::OutOfRange;
        }
        if self.rng.gen_bool(self.config.loss_rate.clamp(0.0, 1.0)) {
            return Reception::Lost;
        }

        let mut received = *frame;
        if self.rng.gen_bool(self.config.corruption_rate.clamp(0.0, 1.0)) {
            let byte = self.rng.gen_range(0..FRAME_LEN);
            let bit = self.rng.gen_range(0..8);
            received[byte] ^= 1 << bit;
        }

        match Message::decode_frame(&received) {
            Ok(message) => {
                let jitter = self.config.distance_jitter_mm.abs();
                let noise = if jitter > 0.0 {
                    self.rng.gen_range(-jitter..=jitter)
                } else {
                    0.0
                };
                let measurement = Measurement {
                    raw_mm: (distance + noise).max(0.0),
                };
                Reception::Delivered(message, measurement)
            }
            Err(e) => {
                trace!(error = %e, "frame dropped");
                Reception::Corrupted(e)
            }
        }
    }
}
