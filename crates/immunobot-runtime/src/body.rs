//! Simulated robot body — the [`Platform`] an agent drives in a swarm run.

use immunobot_core::platform::Platform;
use immunobot_core::types::{ColorCode, Tick};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// LED, motors and clock of one simulated robot.
#[derive(Debug, Clone)]
pub struct SimulatedBody {
    tick: Tick,
    rng: StdRng,
    color: ColorCode,
    motors: (u8, u8),
    spin_ups: u64,
    motor_writes: u64,
}

/// Effector state as seen from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BodyState {
    pub color: ColorCode,
    pub motors: (u8, u8),
    pub spin_ups: u64,
}

impl SimulatedBody {
    pub fn new(seed: u64) -> Self {
        Self {
            tick: 0,
            rng: StdRng::seed_from_u64(seed),
            color: ColorCode::OFF,
            motors: (0, 0),
            spin_ups: 0,
            motor_writes: 0,
        }
    }

    /// Advance the hardware clock.
    pub fn set_tick(&mut self, tick: Tick) {
        self.tick = tick;
    }

    pub fn color(&self) -> ColorCode {
        self.color
    }

    pub fn motors(&self) -> (u8, u8) {
        self.motors
    }

    pub fn spin_ups(&self) -> u64 {
        self.spin_ups
    }

    /// How many times the motor speeds were actually written.
    pub fn motor_writes(&self) -> u64 {
        self.motor_writes
    }

    pub fn state(&self) -> BodyState {
        BodyState {
            color: self.color,
            motors: self.motors,
            spin_ups: self.spin_ups,
        }
    }
}

impl Platform for SimulatedBody {
    fn current_tick(&self) -> Tick {
        self.tick
    }

    fn random_byte(&mut self) -> u8 {
        self.rng.gen()
    }

    fn set_color(&mut self, color: ColorCode) {
        self.color = color;
    }

    fn set_motor_speeds(&mut self, left: u8, right: u8) {
        self.motors = (left, right);
        self.motor_writes += 1;
    }

    fn spin_up_motors(&mut self) {
        self.spin_ups += 1;
    }
}
