//! Identifiers and geometry of the simulated arena.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a robot in the swarm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RobotId(pub Uuid);

impl RobotId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Deterministic id (for reproducible runs and tests).
    pub fn from_seed(seed: u64) -> Self {
        Self(Uuid::from_u128(u128::from(seed)))
    }
}

impl Default for RobotId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RobotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "robot-{:06x}", self.0.as_u128() & 0xFF_FFFF)
    }
}

/// A position on the arena floor, in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Position) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}
