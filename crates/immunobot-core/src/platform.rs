//! Platform — the hardware the agent runs on.
//!
//! The agent never touches a register. Everything it needs from a
//! robot (a clock, a dice roll, an LED, two motors) comes through
//! [`Platform`], and the radio layer turns raw measurements into
//! millimeters through [`DistanceEstimator`].

use crate::types::{ColorCode, Tick};

/// Effectors and clock of one robot.
///
/// Effector calls are fire-and-forget: the hardware reports nothing
/// back to the agent.
pub trait Platform {
    /// Monotonically increasing tick counter.
    fn current_tick(&self) -> Tick;

    /// One byte of randomness. Only used for cosmetic flashing.
    fn random_byte(&mut self) -> u8;

    fn set_color(&mut self, color: ColorCode);

    fn set_motor_speeds(&mut self, left: u8, right: u8);

    /// Kick the motors out of standstill before a non-zero speed.
    ///
    /// Vibration motors need a short burst to overcome static friction.
    /// Platforms without that problem can keep the default.
    fn spin_up_motors(&mut self) {}
}

/// Turns a raw radio measurement into a distance.
pub trait DistanceEstimator {
    /// Whatever the radio records alongside a received frame.
    type Measurement;

    /// Estimated distance to the sender, in millimeters.
    fn estimate_distance(&self, measurement: &Self::Measurement) -> f64;
}

/// Remembers the last speeds sent to the motors so that the hardware
/// is only touched on change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotorDriver {
    left: u8,
    right: u8,
}

impl MotorDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply new speeds, spinning up any output leaving standstill.
    pub fn drive(&mut self, platform: &mut dyn Platform, left: u8, right: u8) {
        if (self.left == 0 && left != 0) || (self.right == 0 && right != 0) {
            platform.spin_up_motors();
        }
        if left != self.left || right != self.right {
            platform.set_motor_speeds(left, right);
            self.left = left;
            self.right = right;
        }
    }

    pub fn speeds(&self) -> (u8, u8) {
        (self.left, self.right)
    }
}

/// Random color source for the death sparkle.
///
/// Draws a new byte at most once per `period` ticks so the flashing is
/// visible rather than noise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sparkler {
    drawn_at: Option<Tick>,
    byte: u8,
}

impl Sparkler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(&mut self, platform: &mut dyn Platform, period: u64, mask: u8) -> ColorCode {
        let now = platform.current_tick();
        let stale = self
            .drawn_at
            .map_or(true, |at| now >= at.saturating_add(period));
        if stale {
            self.byte = platform.random_byte();
            self.drawn_at = Some(now);
        }
        ColorCode(self.byte & mask)
    }
}
