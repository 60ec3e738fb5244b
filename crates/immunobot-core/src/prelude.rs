//! Immunobot Core Prelude — convenient imports for common usage.
//!
//! ```rust
//! use immunobot_core::prelude::*;
//! ```

// Re-export commonly used types
pub use crate::types::{
    saturate_age, CellStatus, ColorCode, EventAges, Response, Tick, MAX_AGE,
};
pub use crate::role::{compatible, Role};
pub use crate::config::ProtocolConfig;
pub use crate::message::{Message, FRAME_LEN, PAYLOAD_LEN};
pub use crate::tracker::{EventAgeTracker, Evidence, TrackerUpdate};
pub use crate::lifecycle::{KillSwitch, Transition};
pub use crate::effector::{EffectorInput, EffectorOutput, Shade};

// Re-export the agent and its platform contracts
pub use crate::agent::{Agent, AgentSnapshot, ImmuneAgent};
pub use crate::platform::{DistanceEstimator, Platform};

// Re-export error types
pub use crate::error::{ImmunobotError, Result};
